//! Built-in CSW record vocabulary.

use crate::{ANY_GEO, ANY_TEXT, resolver::AttributeRegistryBuilder, value::PrimitiveFormat};

///
/// Well-known namespace URIs used by CSW 2.0.2 requests.
///

pub mod namespaces {
    pub const CSW: &str = "http://www.opengis.net/cat/csw/2.0.2";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DCT: &str = "http://purl.org/dc/terms/";
    pub const OWS: &str = "http://www.opengis.net/ows";
    pub const APISO: &str = "http://www.opengis.net/cat/csw/apiso/1.0";
    pub const GML: &str = "http://www.opengis.net/gml";
    pub const OGC: &str = "http://www.opengis.net/ogc";
}

const PREFIXES: &[(&str, &str)] = &[
    ("csw", namespaces::CSW),
    ("dc", namespaces::DC),
    ("dct", namespaces::DCT),
    ("ows", namespaces::OWS),
    ("apiso", namespaces::APISO),
    ("gml", namespaces::GML),
    ("ogc", namespaces::OGC),
];

// (internal attribute, format, external aliases)
const ATTRIBUTES: &[(&str, PrimitiveFormat, &[&str])] = &[
    (
        "id",
        PrimitiveFormat::String,
        &["dc:identifier", "apiso:Identifier", "identifier"],
    ),
    ("title", PrimitiveFormat::String, &["dc:title", "apiso:Title"]),
    (
        "modified",
        PrimitiveFormat::Date,
        &["dct:modified", "apiso:Modified", "dc:date", "date"],
    ),
    (
        "created",
        PrimitiveFormat::Date,
        &["dct:created", "apiso:CreationDate", "dct:dateSubmitted"],
    ),
    (
        "effective",
        PrimitiveFormat::Date,
        &["apiso:PublicationDate", "dct:dateAccepted"],
    ),
    ("expiration", PrimitiveFormat::Date, &["dct:valid"]),
    (
        "description",
        PrimitiveFormat::String,
        &["dc:description", "dct:abstract", "apiso:Abstract", "abstract"],
    ),
    (
        "topic.keyword",
        PrimitiveFormat::String,
        &["dc:subject", "apiso:Subject", "subject"],
    ),
    (
        "datatype",
        PrimitiveFormat::String,
        &["dc:type", "apiso:Type", "type"],
    ),
    (
        "media.format",
        PrimitiveFormat::String,
        &["dc:format", "apiso:Format", "format"],
    ),
    (
        "contact.creator-name",
        PrimitiveFormat::String,
        &["dc:creator", "creator"],
    ),
    (
        "contact.publisher-name",
        PrimitiveFormat::String,
        &["dc:publisher", "apiso:OrganisationName", "publisher"],
    ),
    (
        "contact.contributor-name",
        PrimitiveFormat::String,
        &["dc:contributor", "contributor"],
    ),
    (
        "language",
        PrimitiveFormat::String,
        &["dc:language", "apiso:Language"],
    ),
    ("resource-uri", PrimitiveFormat::String, &["dc:source", "source"]),
    (
        ANY_TEXT,
        PrimitiveFormat::String,
        &["csw:AnyText", "apiso:AnyText", "AnyText"],
    ),
    (
        ANY_GEO,
        PrimitiveFormat::Geometry,
        &["dct:spatial", "ows:BoundingBox", "apiso:BoundingBox", "BoundingBox"],
    ),
];

/// Install the vocabulary, with the geometry aliases mapped to `any_geo`.
pub(super) fn install(
    mut builder: AttributeRegistryBuilder,
    any_geo: &str,
) -> AttributeRegistryBuilder {
    for (prefix, uri) in PREFIXES {
        builder = builder.namespace(*prefix, *uri);
    }

    for (attribute, format, aliases) in ATTRIBUTES {
        let attribute = if *attribute == ANY_GEO { any_geo } else { *attribute };

        builder = builder.attribute(attribute, *format);
        for alias in *aliases {
            builder = builder.alias(*alias, attribute);
        }
    }

    builder
}
