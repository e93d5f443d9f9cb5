//! WGS84-Punkt in Dezimalgrad.

use serde::{Deserialize, Serialize};

/// Geographischer Punkt in WGS84-Dezimalgrad.
///
/// Invariante an der Engine-Grenze: -90 ≤ lat ≤ 90, -180 ≤ lon ≤ 180.
/// Die Umrechnung aus dem Host-CRS passiert außerhalb des Kerns
/// ([`crate::host::ScreenTransform`]); der FeatureStore prüft die Bereiche
/// erneut bevor ein Feature akzeptiert wird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Breite in Grad (Nord positiv)
    pub lat: f64,
    /// Länge in Grad (Ost positiv)
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Prüft die WGS84-Bereichs-Invariante.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Identitätsvergleich mit der Toleranz des Peilungs-Sonderfalls
    /// (identische Punkte liefern Peilung 0 statt NaN).
    pub fn approx_eq(&self, other: &GeoPoint) -> bool {
        (self.lat - other.lat).abs() < 1e-9 && (self.lon - other.lon).abs() < 1e-9
    }
}
