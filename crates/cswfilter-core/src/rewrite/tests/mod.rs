
use crate::{
    ANY_GEO,
    clock::FixedClock,
    error::RewriteError,
    filter::{Expression, Function, Predicate, SpatialOp},
    geometry::{Coord, Crs, Geometry, Shape},
    resolver::{AttributeRegistry, NamespaceContext, namespaces},
    rewrite::{FilterRewriter, RewriteOptions},
    units::UnitError,
    value::{Period, PrimitiveFormat, Value},
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::sync::Arc;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub(super) fn registry() -> AttributeRegistry {
    AttributeRegistry::builder()
        .with_csw_defaults()
        .attribute("resource-size", PrimitiveFormat::Long)
        .attribute("location", PrimitiveFormat::Geometry)
        .attribute("published", PrimitiveFormat::Boolean)
        .alias("size", "resource-size")
        .build()
        .unwrap()
}

pub(super) fn rewriter() -> FilterRewriter {
    FilterRewriter::new(Arc::new(registry())).with_clock(Arc::new(FixedClock(now())))
}

fn rewrite(predicate: &Predicate) -> Predicate {
    rewriter().rewrite(predicate).unwrap().unwrap()
}

fn prop(name: &str) -> Expression {
    Expression::property(name)
}

fn lit(value: impl Into<Value>) -> Expression {
    Expression::literal(value)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

//
// Logical structure
//

#[test]
fn include_and_exclude_are_unchanged() {
    assert_eq!(rewrite(&Predicate::Include), Predicate::Include);
    assert_eq!(rewrite(&Predicate::Exclude), Predicate::Exclude);
}

#[test]
fn empty_junctions_collapse_to_no_filter() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite(&Predicate::and(vec![])).unwrap(), None);
    assert_eq!(
        rewriter
            .rewrite(&Predicate::or(vec![Predicate::and(vec![]), Predicate::or(vec![])]))
            .unwrap(),
        None
    );
}

#[test]
fn single_survivor_is_unwrapped() {
    let input = Predicate::and(vec![
        Predicate::or(vec![]),
        Predicate::eq(prop("dc:title"), lit("maps")),
    ]);

    assert_eq!(rewrite(&input), Predicate::eq(prop("title"), lit("maps")));
}

#[test]
fn junctions_keep_child_order_and_do_not_flatten() {
    let input = Predicate::or(vec![
        Predicate::eq(prop("dc:title"), lit("a")),
        Predicate::and(vec![
            Predicate::eq(prop("dc:creator"), lit("b")),
            Predicate::eq(prop("dc:subject"), lit("c")),
        ]),
    ]);

    let expected = Predicate::or(vec![
        Predicate::eq(prop("title"), lit("a")),
        Predicate::and(vec![
            Predicate::eq(prop("contact.creator-name"), lit("b")),
            Predicate::eq(prop("topic.keyword"), lit("c")),
        ]),
    ]);

    assert_eq!(rewrite(&input), expected);
}

#[test]
fn negated_empty_filter_matches_nothing() {
    let input = Predicate::not(Predicate::and(vec![]));
    assert_eq!(rewrite(&input), Predicate::Exclude);

    let input = Predicate::not(Predicate::eq(prop("dc:title"), lit("a")));
    assert_eq!(
        rewrite(&input),
        Predicate::not(Predicate::eq(prop("title"), lit("a")))
    );
}

//
// Property names
//

#[test]
fn unknown_property_passes_through() {
    let input = Predicate::eq(prop("ex:unknown"), lit("x"));
    assert_eq!(rewrite(&input), input);
}

#[test]
fn request_namespace_bindings_resolve_properties() {
    let ctx = NamespaceContext::new().with("purl", namespaces::DC);
    let property = crate::filter::PropertyRef::new("purl:title").with_namespaces(ctx);
    let input = Predicate::eq(Expression::Property(property), lit("x"));

    assert_eq!(rewrite(&input), Predicate::eq(prop("title"), lit("x")));
}

#[test]
fn like_and_is_null_rewrite_their_property() {
    assert_eq!(
        rewrite(&Predicate::like(prop("csw:AnyText"), "%ocean%")),
        Predicate::like(prop("anyText"), "%ocean%")
    );
    assert_eq!(
        rewrite(&Predicate::is_null(prop("dc:title"))),
        Predicate::is_null(prop("title"))
    );
}

//
// Literal coercion
//

#[test]
fn text_literal_takes_the_sibling_property_type() {
    assert_eq!(
        rewrite(&Predicate::eq(prop("size"), lit("42"))),
        Predicate::eq(prop("resource-size"), lit(42_i64))
    );
    assert_eq!(
        rewrite(&Predicate::ne(prop("published"), lit("TRUE"))),
        Predicate::ne(prop("published"), lit(true))
    );
}

#[test]
fn leading_literal_keeps_its_type() {
    assert_eq!(
        rewrite(&Predicate::eq(lit("42"), prop("size"))),
        Predicate::eq(lit("42"), prop("resource-size"))
    );
    assert_eq!(
        rewrite(&Predicate::ne(lit("TRUE"), prop("published"))),
        Predicate::ne(lit("TRUE"), prop("published"))
    );
}

#[test]
fn unparseable_literal_is_kept() {
    let input = Predicate::eq(prop("size"), lit("forty-two"));
    assert_eq!(
        rewrite(&input),
        Predicate::eq(prop("resource-size"), lit("forty-two"))
    );
}

#[test]
fn between_bounds_are_coerced_against_the_property() {
    let input = Predicate::between(prop("size"), lit("1"), lit("10"));
    assert_eq!(
        rewrite(&input),
        Predicate::between(prop("resource-size"), lit(1_i64), lit(10_i64))
    );
}

//
// Temporal downgrade
//

#[test]
fn strict_ordering_over_dates_becomes_after_and_before() {
    let d = date(2020, 1, 1);

    assert_eq!(
        rewrite(&Predicate::gt(prop("dct:modified"), lit(d))),
        Predicate::after(prop("modified"), lit(d))
    );
    assert_eq!(
        rewrite(&Predicate::lt(prop("dct:modified"), lit(d))),
        Predicate::before(prop("modified"), lit(d))
    );
}

#[test]
fn greater_or_equal_becomes_during_until_now() {
    let d = date(2020, 1, 1);

    assert_eq!(
        rewrite(&Predicate::gte(prop("apiso:Modified"), lit(d))),
        Predicate::during(prop("modified"), Period::new(d, now()))
    );
}

#[test]
fn less_or_equal_becomes_before_the_next_instant() {
    let d = date(2020, 1, 1);
    let limit = d + TimeDelta::milliseconds(1);

    assert_eq!(
        rewrite(&Predicate::lte(prop("apiso:Modified"), lit(d))),
        Predicate::before(prop("modified"), lit(limit))
    );
}

#[test]
fn literal_first_inclusive_comparisons_keep_their_operator() {
    let d = date(2020, 1, 1);

    assert_eq!(
        rewrite(&Predicate::gte(lit(d), prop("dct:modified"))),
        Predicate::during(prop("modified"), Period::new(d, now()))
    );
    assert_eq!(
        rewrite(&Predicate::lte(lit(d), prop("dct:modified"))),
        Predicate::before(prop("modified"), lit(d + TimeDelta::milliseconds(1)))
    );
}

#[test]
fn text_dates_are_coerced_before_the_downgrade() {
    let input = Predicate::gte(prop("dct:modified"), lit("2020-01-01"));

    assert_eq!(
        rewrite(&input),
        Predicate::during(prop("modified"), Period::new(date(2020, 1, 1), now()))
    );
}

#[test]
fn date_increment_is_configurable() {
    let d = date(2020, 1, 1);
    let options = RewriteOptions {
        date_increment: TimeDelta::seconds(1),
        ..RewriteOptions::default()
    };
    let rewriter = rewriter().with_options(options);

    let out = rewriter
        .rewrite(&Predicate::lte(prop("modified"), lit(d)))
        .unwrap()
        .unwrap();

    assert_eq!(
        out,
        Predicate::before(prop("modified"), lit(d + TimeDelta::seconds(1)))
    );
}

#[test]
fn non_positive_date_increment_keeps_the_inclusive_comparison() {
    let d = date(2020, 1, 1);

    for increment in [TimeDelta::zero(), TimeDelta::milliseconds(-1)] {
        let options = RewriteOptions {
            date_increment: increment,
            ..RewriteOptions::default()
        };
        let out = rewriter()
            .with_options(options)
            .rewrite(&Predicate::lte(prop("dct:modified"), lit(d)))
            .unwrap()
            .unwrap();

        assert_eq!(out, Predicate::lte(prop("modified"), lit(d)));
    }
}

#[test]
fn ordering_over_non_dates_stays_a_comparison() {
    assert_eq!(
        rewrite(&Predicate::gte(prop("size"), lit("5"))),
        Predicate::gte(prop("resource-size"), lit(5_i64))
    );
    assert_eq!(
        rewrite(&Predicate::lt(prop("dc:title"), lit("m"))),
        Predicate::lt(prop("title"), lit("m"))
    );
}

#[test]
fn inclusive_date_comparison_without_literal_stays_a_comparison() {
    let input = Predicate::gte(prop("modified"), prop("created"));
    assert_eq!(rewrite(&input), input);
}

//
// Functions
//

#[test]
fn typed_function_equality_converts_the_literal() {
    let function =
        Function::new("length", vec![prop("dc:title")]).returning(PrimitiveFormat::Integer);
    let input = Predicate::eq(Expression::Function(function), lit("7"));

    let expected_fn =
        Function::new("length", vec![prop("title")]).returning(PrimitiveFormat::Integer);
    assert_eq!(
        rewrite(&input),
        Predicate::eq(Expression::Function(expected_fn), lit(7_i64))
    );
}

#[test]
fn typed_function_equality_keeps_unconvertible_literal() {
    let function =
        Function::new("length", vec![prop("dc:title")]).returning(PrimitiveFormat::Integer);
    let input = Predicate::eq(Expression::Function(function), lit("seven"));

    let Predicate::Compare(out) = rewrite(&input) else {
        panic!("expected a comparison");
    };
    assert_eq!(out.right, lit("seven"));
}

#[test]
fn fuzzy_rewrites_only_its_property_argument() {
    let function = Function::new(
        "fuzzy",
        vec![prop("dc:title"), prop("dc:subject"), lit("2")],
    );
    let out = rewrite(&Predicate::Function(function));

    let expected = Function::new("fuzzy", vec![prop("title"), prop("dc:subject"), lit("2")]);
    assert_eq!(out, Predicate::Function(expected));
}

#[test]
fn generic_functions_rewrite_every_argument() {
    let function = Function::new("concat", vec![prop("dc:title"), prop("dc:subject")]);
    let out = rewrite(&Predicate::Function(function));

    let expected = Function::new("concat", vec![prop("title"), prop("topic.keyword")]);
    assert_eq!(out, Predicate::Function(expected));
}

//
// Spatial
//

#[test]
fn bounding_box_becomes_within_any_geometry() {
    let envelope = Geometry::envelope(-10.0, -5.0, 10.0, 5.0);

    for alias in ["BoundingBox", "ows:BoundingBox", "OWS:BOUNDINGBOX", "apiso:BoundingBox"] {
        let input = Predicate::bbox(prop(alias), lit(envelope.clone()));
        assert_eq!(
            rewrite(&input),
            Predicate::spatial(SpatialOp::Within, prop(ANY_GEO), lit(envelope.clone()))
        );
    }
}

#[test]
fn bounding_box_over_geometry_attribute_is_accepted() {
    let envelope = Geometry::envelope(0.0, 0.0, 1.0, 1.0);
    let input = Predicate::bbox(prop("location"), lit(envelope.clone()));

    assert_eq!(
        rewrite(&input),
        Predicate::spatial(SpatialOp::Within, prop("location"), lit(envelope))
    );
}

#[test]
fn bounding_box_over_non_geometry_fails() {
    let input = Predicate::and(vec![
        Predicate::eq(prop("dc:title"), lit("x")),
        Predicate::bbox(prop("dc:title"), lit(Geometry::envelope(0.0, 0.0, 1.0, 1.0))),
    ]);

    let err = rewriter().rewrite(&input).unwrap_err();
    assert_eq!(
        err,
        RewriteError::UnsupportedSpatialTarget {
            property: "dc:title".to_string()
        }
    );
}

#[test]
fn geometry_literals_are_reprojected_to_the_target_crs() {
    let source = Geometry::point(111_319.490_793_273_57, 0.0).with_crs(Crs::epsg(3857));
    let input = Predicate::spatial(
        SpatialOp::Intersects,
        prop("apiso:BoundingBox"),
        lit(source),
    );

    let Predicate::Spatial(out) = rewrite(&input) else {
        panic!("expected a spatial predicate");
    };
    assert_eq!(out.left, prop(ANY_GEO));

    let geometry = out.right.as_literal().and_then(Value::as_geometry).unwrap();
    assert_eq!(geometry.crs, Some(Crs::wgs84()));
    let Shape::Point(Coord { x, y }) = geometry.shape else {
        panic!("expected a point");
    };
    assert_close(x, 1.0);
    assert_close(y, 0.0);
}

#[test]
fn equality_against_geometry_literal_is_reprojected() {
    let source = Geometry::point(0.0, 0.0).with_crs(Crs::epsg(3857));
    let out = rewrite(&Predicate::eq(prop("apiso:BoundingBox"), lit(source)));

    let Predicate::Compare(out) = out else {
        panic!("expected a comparison");
    };
    let geometry = out.right.as_literal().and_then(Value::as_geometry).unwrap();
    assert_eq!(geometry.crs, Some(Crs::wgs84()));
    assert_eq!(out.left, prop(ANY_GEO));
}

#[test]
fn unsupported_source_crs_keeps_the_original_geometry() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let source = Geometry::point(530_000.0, 180_000.0).with_crs(Crs::epsg(27700));
    let input = Predicate::spatial(
        SpatialOp::Intersects,
        prop("location"),
        lit(source.clone()),
    );

    assert_eq!(
        rewrite(&input),
        Predicate::spatial(SpatialOp::Intersects, prop("location"), lit(source))
    );
}

#[test]
fn wkt_text_is_coerced_against_geometry_attributes() {
    let input = Predicate::spatial(
        SpatialOp::Contains,
        prop("location"),
        lit("POINT (1 2)"),
    );

    assert_eq!(
        rewrite(&input),
        Predicate::spatial(
            SpatialOp::Contains,
            prop("location"),
            lit(Geometry::point(1.0, 2.0))
        )
    );
}

#[test]
fn distances_are_converted_to_meters() {
    let point = Geometry::point(1.0, 2.0);
    let input = Predicate::dwithin(prop("location"), lit(point.clone()), 2.5, "km");

    assert_eq!(
        rewrite(&input),
        Predicate::dwithin(prop("location"), lit(point), 2500.0, "meters")
    );

    let Predicate::Distance(out) = rewrite(&Predicate::beyond(
        prop("location"),
        lit(Geometry::point(0.0, 0.0)),
        1.0,
        "nautical_miles",
    )) else {
        panic!("expected a distance predicate");
    };
    assert_close(out.distance, 1852.0);
    assert_eq!(out.unit, "meters");
}

#[test]
fn unknown_distance_unit_fails() {
    let origin = lit(Geometry::point(0.0, 0.0));
    let input = Predicate::dwithin(prop("location"), origin, 1.0, "parsecs");

    assert_eq!(
        rewriter().rewrite(&input).unwrap_err(),
        RewriteError::UnconvertibleDistanceUnit(UnitError::Unknown {
            unit: "parsecs".to_string()
        })
    );
}

#[test]
fn rewriter_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FilterRewriter>();
}
