//! Geometrie-Generatoren: tessellierte Ringe, Sektoren und Peillinien aus
//! Geodäsie-Primitiven.
//!
//! Generatoren sind reine Funktionen: Eingaben werden vollständig validiert
//! bevor irgendeine Geometrie gebaut wird; fehlschlagende Anfragen erzeugen
//! nie Teil-Ergebnisse.

/// Peillinien-Generator (rechtweisende Peilung + Distanz → Linie).
pub mod bearing_line;
/// Ring-Generator (Radien → geschlossene Kreis-Polygone).
pub mod ring;
/// Sektor-Generator (Zentrum/Radius/Peilungen → Kuchenstück-Polygon).
pub mod sector;

pub use bearing_line::{generate_bearing_line, BearingLine};
pub use ring::{generate_rings, RingPolygon, RingSpec};
pub use sector::{generate_sector, SectorPolygon};

use crate::error::ViolationCollector;
use crate::shared::EngineOptions;
use std::f64::consts::PI;

/// Segment-Anzahl eines Vollkreises, so dass die Sehnen-Abweichung
/// (Sagitta) unter `max_chord_error_m` bleibt.
///
/// Sagitta s = r·(1 − cos(π/n)) ≤ e  ⇒  n ≥ π / acos(1 − e/r)
pub fn segment_count_for_radius(
    radius_m: f64,
    max_chord_error_m: f64,
    min_segments: u32,
) -> u32 {
    if radius_m <= max_chord_error_m {
        return min_segments;
    }
    let required = PI / (1.0 - max_chord_error_m / radius_m).acos();
    (required.ceil() as u32).max(min_segments)
}

/// Gemeinsame Radius-Validierung der Generatoren.
///
/// `field` benennt das beanstandete Feld in der Fehlermeldung
/// (z.B. `radius_m` oder `rings[2].radius_m`).
pub(crate) fn validate_radius(
    collector: &mut ViolationCollector,
    field: &str,
    radius_m: f64,
    options: &EngineOptions,
) {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        collector.push(field, format!("Radius muss positiv sein (war {radius_m})"));
    } else if radius_m > options.max_ring_radius_m {
        collector.push(
            field,
            format!(
                "Radius {radius_m} m über Maximum {} m",
                options.max_ring_radius_m
            ),
        );
    }
}
