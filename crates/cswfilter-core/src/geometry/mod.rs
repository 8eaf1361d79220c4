mod crs;
mod transform;
mod wkt;


pub use crs::{AxisOrder, Crs, CrsError};
pub use transform::{BuiltinTransforms, CrsTransform, TransformError};
pub use wkt::WktError;

///
/// Geometry values
///
/// Planar shapes carried by geometry literals. Coordinates are stored in the
/// axis order of the tagged CRS; an untagged geometry is in the default CRS.
///

///
/// Coord
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

///
/// Shape
///

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Coord),
    LineString(Vec<Coord>),

    /// Exterior ring first, then holes.
    Polygon(Vec<Vec<Coord>>),

    Envelope { min: Coord, max: Coord },
}

impl Shape {
    /// Rebuild this shape with every coordinate passed through `f`.
    ///
    /// Envelope corners are re-ordered afterwards so `min <= max` still holds
    /// when the mapping swaps axes or flips a direction.
    pub(crate) fn try_map_coords<E>(
        &self,
        mut f: impl FnMut(Coord) -> Result<Coord, E>,
    ) -> Result<Self, E> {
        let shape = match self {
            Self::Point(c) => Self::Point(f(*c)?),
            Self::LineString(coords) => {
                Self::LineString(coords.iter().map(|c| f(*c)).collect::<Result<_, _>>()?)
            }
            Self::Polygon(rings) => {
                let mut mapped = Vec::with_capacity(rings.len());
                for ring in rings {
                    mapped.push(ring.iter().map(|c| f(*c)).collect::<Result<_, _>>()?);
                }
                Self::Polygon(mapped)
            }
            Self::Envelope { min, max } => {
                let a = f(*min)?;
                let b = f(*max)?;
                Self::Envelope {
                    min: Coord::new(a.x.min(b.x), a.y.min(b.y)),
                    max: Coord::new(a.x.max(b.x), a.y.max(b.y)),
                }
            }
        };

        Ok(shape)
    }
}

///
/// Geometry
///

#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub shape: Shape,
    pub crs: Option<Crs>,
}

impl Geometry {
    #[must_use]
    pub const fn new(shape: Shape) -> Self {
        Self { shape, crs: None }
    }

    #[must_use]
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    #[must_use]
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(Shape::Point(Coord::new(x, y)))
    }

    #[must_use]
    pub const fn envelope(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Shape::Envelope {
            min: Coord::new(min_x, min_y),
            max: Coord::new(max_x, max_y),
        })
    }

    #[must_use]
    pub fn polygon(exterior: Vec<Coord>) -> Self {
        Self::new(Shape::Polygon(vec![exterior]))
    }

    /// True when the geometry's CRS differs from `target`. An untagged
    /// geometry is read as WGS84 longitude/latitude.
    #[must_use]
    pub fn needs_reprojection(&self, target: &Crs) -> bool {
        match &self.crs {
            Some(crs) => crs != target,
            None => *target != Crs::wgs84(),
        }
    }
}
