//! Ring-Generator: tesselliert Distanz-Ringe um ein Zentrum als geschlossene
//! Polygone.

use super::{segment_count_for_radius, validate_radius};
use crate::core::{geodesy, GeoPoint};
use crate::error::{ValidationError, ViolationCollector};
use crate::shared::EngineOptions;

/// Spezifikation eines einzelnen Rings.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub radius_m: f64,
    /// Anzeige-Label (z.B. `"1000 m"` oder `"50% (2000 m)"`)
    pub label: String,
    /// LPB-Kategorie, falls der Ring statistisch abgeleitet ist
    pub lpb_category: Option<String>,
    /// LPB-Perzentil (25/50/75/95), falls zutreffend
    pub percentile: Option<u8>,
}

impl RingSpec {
    /// Manueller Ring ohne LPB-Bezug.
    pub fn manual(radius_m: f64) -> Self {
        Self {
            radius_m,
            label: format!("{radius_m:.0} m"),
            lpb_category: None,
            percentile: None,
        }
    }

    /// Statistischer Ring aus der LPB-Tabelle.
    pub fn lpb(category: &str, percentile: u8, radius_m: f64) -> Self {
        Self {
            radius_m,
            label: format!("{percentile}% ({radius_m:.0} m)"),
            lpb_category: Some(category.to_string()),
            percentile: Some(percentile),
        }
    }
}

/// Ein tessellierter Ring: geschlossenes Polygon plus Metadaten.
#[derive(Debug, Clone, PartialEq)]
pub struct RingPolygon {
    pub spec: RingSpec,
    /// Geschlossen: erster Vertex == letzter Vertex
    pub vertices: Vec<GeoPoint>,
}

/// Erzeugt je Radius ein geschlossenes Kreis-Polygon um `center`.
///
/// Jeder Radius wird unabhängig validiert (0 < r ≤ Maximum); alle
/// Beanstandungen werden gemeinsam gemeldet und es wird kein Teil-Ergebnis
/// erzeugt. Die Segment-Anzahl skaliert mit dem Radius, so dass die
/// Sehnen-Abweichung unter `options.max_chord_error_m` bleibt (mindestens
/// `options.min_ring_segments` Segmente).
pub fn generate_rings(
    center: GeoPoint,
    specs: &[RingSpec],
    options: &EngineOptions,
) -> Result<Vec<RingPolygon>, ValidationError> {
    let mut collector = ViolationCollector::new();

    if !center.is_valid() {
        collector.push(
            "center",
            format!("Kein gültiger WGS84-Punkt: ({}, {})", center.lat, center.lon),
        );
    }
    if specs.is_empty() {
        collector.push("rings", "Mindestens ein Radius erforderlich");
    }
    for (index, spec) in specs.iter().enumerate() {
        validate_radius(
            &mut collector,
            &format!("rings[{index}].radius_m"),
            spec.radius_m,
            options,
        );
    }
    collector.into_result()?;

    let rings = specs
        .iter()
        .map(|spec| RingPolygon {
            spec: spec.clone(),
            vertices: tessellate_circle(center, spec.radius_m, options),
        })
        .collect();
    Ok(rings)
}

/// Tesselliert einen Vollkreis; schließt das Polygon durch erneutes Anhängen
/// des ersten Vertex (bitgleiche Schließung statt `destination(…, 360°)`).
fn tessellate_circle(center: GeoPoint, radius_m: f64, options: &EngineOptions) -> Vec<GeoPoint> {
    let segments = segment_count_for_radius(
        radius_m,
        options.max_chord_error_m,
        options.min_ring_segments,
    );

    let mut vertices = Vec::with_capacity(segments as usize + 1);
    for k in 0..segments {
        let bearing = 360.0 * f64::from(k) / f64::from(segments);
        vertices.push(geodesy::destination(center, bearing, radius_m));
    }
    vertices.push(vertices[0]);
    vertices
}
