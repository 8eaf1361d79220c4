//! Well-known text reading and writing for geometry literals.

use crate::geometry::{Coord, Crs, Geometry, Shape};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// WktError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WktError {
    #[error("unexpected end of WKT input")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("unsupported WKT geometry type '{keyword}'")]
    UnknownKeyword { keyword: String },

    #[error("invalid WKT number '{text}'")]
    InvalidNumber { text: String },

    #[error("invalid SRID prefix '{text}'")]
    InvalidSrid { text: String },
}

impl FromStr for Geometry {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (crs, body) = split_srid(s.trim())?;
        let mut parser = Parser::new(body);
        let shape = parser.shape()?;
        parser.finish()?;

        Ok(Self { shape, crs })
    }
}

// EWKT "SRID=n;" prefix.
fn split_srid(input: &str) -> Result<(Option<Crs>, &str), WktError> {
    let Some((head, body)) = input.split_once(';') else {
        return Ok((None, input));
    };
    let Some(srid) = head.trim().strip_prefix("SRID=") else {
        return Ok((None, input));
    };
    let code = srid.trim().parse::<u32>().map_err(|_| WktError::InvalidSrid {
        text: head.to_string(),
    })?;

    Ok((Some(Crs::epsg(code)), body))
}

///
/// Parser
///

struct Parser<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.offset += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    fn expect(&mut self, expected: char) -> Result<(), WktError> {
        match self.peek() {
            Some(found) if found == expected => {
                self.offset += found.len_utf8();
                Ok(())
            }
            Some(found) => Err(WktError::UnexpectedChar {
                offset: self.offset,
                found,
            }),
            None => Err(WktError::UnexpectedEnd),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.offset += len;
        &rest[..len]
    }

    fn finish(&mut self) -> Result<(), WktError> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(WktError::UnexpectedChar {
                offset: self.offset,
                found,
            }),
        }
    }

    fn shape(&mut self) -> Result<Shape, WktError> {
        let keyword = self.take_while(|c| c.is_ascii_alphabetic()).to_ascii_uppercase();

        match keyword.as_str() {
            "POINT" => {
                self.expect('(')?;
                let coord = self.coord()?;
                self.expect(')')?;
                Ok(Shape::Point(coord))
            }
            "LINESTRING" => Ok(Shape::LineString(self.coord_list()?)),
            "POLYGON" => {
                self.expect('(')?;
                let mut rings = vec![self.coord_list()?];
                while self.peek() == Some(',') {
                    self.expect(',')?;
                    rings.push(self.coord_list()?);
                }
                self.expect(')')?;
                Ok(Shape::Polygon(rings))
            }
            "ENVELOPE" => {
                // ENVELOPE(minx, maxx, maxy, miny)
                self.expect('(')?;
                let min_x = self.number()?;
                self.expect(',')?;
                let max_x = self.number()?;
                self.expect(',')?;
                let max_y = self.number()?;
                self.expect(',')?;
                let min_y = self.number()?;
                self.expect(')')?;
                Ok(Shape::Envelope {
                    min: Coord::new(min_x, min_y),
                    max: Coord::new(max_x, max_y),
                })
            }
            "" => match self.peek() {
                Some(found) => Err(WktError::UnexpectedChar {
                    offset: self.offset,
                    found,
                }),
                None => Err(WktError::UnexpectedEnd),
            },
            _ => Err(WktError::UnknownKeyword { keyword }),
        }
    }

    fn coord_list(&mut self) -> Result<Vec<Coord>, WktError> {
        self.expect('(')?;
        let mut coords = vec![self.coord()?];
        while self.peek() == Some(',') {
            self.expect(',')?;
            coords.push(self.coord()?);
        }
        self.expect(')')?;

        Ok(coords)
    }

    fn coord(&mut self) -> Result<Coord, WktError> {
        let x = self.number()?;
        let y = self.number()?;

        // z/m ordinates are accepted and dropped
        while matches!(self.peek(), Some(c) if is_number_char(c)) {
            self.number()?;
        }

        Ok(Coord::new(x, y))
    }

    fn number(&mut self) -> Result<f64, WktError> {
        let text = self.take_while(is_number_char);
        if text.is_empty() {
            return match self.peek() {
                Some(found) => Err(WktError::UnexpectedChar {
                    offset: self.offset,
                    found,
                }),
                None => Err(WktError::UnexpectedEnd),
            };
        }

        text.parse::<f64>().map_err(|_| WktError::InvalidNumber {
            text: text.to_string(),
        })
    }
}

const fn is_number_char(c: char) -> bool {
    matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E')
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.crs {
            Some(crs) if crs.authority() == "EPSG" => write!(f, "SRID={};", crs.code())?,
            _ => {}
        }

        write!(f, "{}", self.shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(c) => write!(f, "POINT ({} {})", c.x, c.y),
            Self::LineString(coords) => {
                f.write_str("LINESTRING ")?;
                write_coord_list(f, coords)
            }
            Self::Polygon(rings) => {
                f.write_str("POLYGON (")?;
                for (i, ring) in rings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_coord_list(f, ring)?;
                }
                f.write_str(")")
            }
            Self::Envelope { min, max } => {
                write!(f, "ENVELOPE ({}, {}, {}, {})", min.x, max.x, max.y, min.y)
            }
        }
    }
}

fn write_coord_list(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {}", c.x, c.y)?;
    }
    f.write_str(")")
}
