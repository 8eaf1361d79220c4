use chrono::{TimeDelta, TimeZone, Utc};
use cswfilter::{
    core::clock::FixedClock,
    error::FilterErrorKind,
    prelude::*,
};
use std::sync::Arc;

fn rewriter() -> FilterRewriter {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    FilterRewriter::new(Arc::new(AttributeRegistry::csw_record_defaults()))
        .with_clock(Arc::new(FixedClock(now)))
}

#[test]
fn bounding_box_equality_is_rewritten_into_storage_crs() {
    let point = Geometry::point(0.0, 0.0).with_crs(Crs::epsg(3857));
    let input = Predicate::eq(
        Expression::property("apiso:BoundingBox"),
        Expression::literal(point),
    );

    let out = rewriter().rewrite(&input).unwrap().unwrap();

    let Predicate::Compare(cmp) = out else {
        panic!("expected a comparison");
    };
    assert_eq!(cmp.op, CompareOp::Eq);
    assert_eq!(cmp.left, Expression::property("anyGeo"));

    let Some(Value::Geometry(geometry)) = cmp.right.as_literal() else {
        panic!("expected a geometry literal");
    };
    assert_eq!(geometry.crs, Some(Crs::wgs84()));
    assert_eq!(geometry.shape, Shape::Point(Coord::new(0.0, 0.0)));
}

#[test]
fn mixed_record_filter_rewrites_end_to_end() {
    let since = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let input = Predicate::and(vec![
        Predicate::like(Expression::property("csw:AnyText"), "%river%"),
        Predicate::gte(Expression::property("dct:modified"), Expression::literal(since)),
        Predicate::lte(Expression::property("dct:modified"), Expression::literal(until)),
        Predicate::bbox(
            Expression::property("ows:BoundingBox"),
            Expression::literal(Geometry::envelope(-10.0, 40.0, 5.0, 55.0)),
        ),
    ]);

    let out = rewriter().rewrite(&input).unwrap().unwrap();

    let Predicate::And(children) = out else {
        panic!("expected a conjunction");
    };
    assert_eq!(
        children,
        vec![
            Predicate::like(Expression::property("anyText"), "%river%"),
            Predicate::during(Expression::property("modified"), Period::new(since, now)),
            Predicate::before(
                Expression::property("modified"),
                Expression::literal(until + TimeDelta::milliseconds(1))
            ),
            Predicate::spatial(
                SpatialOp::Within,
                Expression::property("anyGeo"),
                Expression::literal(Geometry::envelope(-10.0, 40.0, 5.0, 55.0))
            ),
        ]
    );
}

#[test]
fn config_driven_transformer_rewrites_requests() {
    let config = RewriterConfig::from_toml_str(
        r#"
[namespaces]
ex = "http://example.org/ns"

[[attributes]]
name = "resource-size"
format = "long"
aliases = ["ex:size"]
"#,
    )
    .unwrap();
    let transformer = QueryFilterTransformer::new(config.build_rewriter().unwrap());
    let provider = cswfilter::csw_record_provider(transformer);

    let request = QueryRequest::new(
        Query::new(Some(Predicate::gt(
            Expression::property("ex:size"),
            Expression::literal("1024"),
        )))
        .page(1, 50),
    )
    .source("local")
    .property("origin", serde_json::json!({ "endpoint": "csw" }));

    let out = provider
        .get(&QualifiedName::csw_record())
        .unwrap()
        .transform(&request, &Properties::new())
        .unwrap();

    assert_eq!(
        out.query.filter,
        Some(Predicate::gt(
            Expression::property("resource-size"),
            Expression::literal(1024_i64)
        ))
    );
    assert_eq!(out.query.page_size, 50);
    assert_eq!(out.source_ids, request.source_ids);
    assert_eq!(out.properties, request.properties);
}

#[test]
fn rewrite_errors_map_to_the_public_taxonomy() {
    let input = Predicate::dwithin(
        Expression::property("anyGeo"),
        Expression::literal(Geometry::point(0.0, 0.0)),
        3.0,
        "furlongs",
    );
    let err: Error = rewriter().rewrite(&input).unwrap_err().into();

    assert_eq!(err.kind, ErrorKind::Filter(FilterErrorKind::UnconvertibleDistanceUnit));
    assert_eq!(err.exception_code(), "InvalidParameterValue");
    assert!(err.message.contains("furlongs"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let err = cswfilter::transformer_from_path("/nonexistent/cswfilter.toml").unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert_eq!(err.exception_code(), "NoApplicableCode");
}

#[test]
fn version_is_exported() {
    assert!(!cswfilter::VERSION.is_empty());
}
