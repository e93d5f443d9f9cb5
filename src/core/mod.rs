//! Datenmodell und Geodäsie-Kernel der Engine.

/// Feature-Datenmodell (Kategorien, Attribute, Status).
pub mod feature;
/// FeatureStore — validate-and-add, Statusübergänge, Persistenz-Grenze.
pub mod feature_store;
/// Ellipsoidische Distanz-/Peilungs-/Zielpunkt-Funktionen.
pub mod geodesy;
/// WGS84-Punkt mit Bereichs-Invarianten.
pub mod geo_point;

pub use feature::{
    Feature, FeatureAttributes, FeatureCategory, FeatureId, Geometry, MarkerKind, Priority,
    SearchAreaParams, SearchAreaStatus,
};
pub use feature_store::FeatureStore;
pub use geo_point::GeoPoint;
