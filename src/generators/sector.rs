//! Sektor-Generator: Zentrum, Radius und zwei Peilungen ergeben ein
//! geschlossenes Kuchenstück-Polygon.

use super::{segment_count_for_radius, validate_radius};
use crate::core::{geodesy, GeoPoint};
use crate::error::{ValidationError, ViolationCollector};
use crate::shared::EngineOptions;

/// Tessellierter Suchsektor mit Metadaten.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPolygon {
    pub center: GeoPoint,
    pub radius_m: f64,
    /// Rechtweisende Startpeilung, normalisiert auf [0, 360)
    pub start_bearing_deg: f64,
    /// Rechtweisende Endpeilung, normalisiert auf [0, 360)
    pub end_bearing_deg: f64,
    /// Winkelausdehnung im Uhrzeigersinn von Start nach Ende, (0, 360)
    pub span_deg: f64,
    /// Geschlossen: Zentrum → Bogen → Zentrum
    pub vertices: Vec<GeoPoint>,
    pub area_sqm: f64,
}

/// Baut das Sektor-Polygon: Zentrum, Bogen-Vertices im Uhrzeigersinn von
/// `start_bearing_deg` nach `end_bearing_deg`, wieder Zentrum.
///
/// Die Winkelausdehnung wird immer im Uhrzeigersinn gemessen; Start == Ende
/// (Span 0°) ist degeneriert und wird abgelehnt. Die Bogen-Schrittweite ist
/// höchstens `options.sector_max_step_deg` und der Bogen mindestens so fein
/// wie der entsprechende Vollkreis-Ausschnitt.
pub fn generate_sector(
    center: GeoPoint,
    radius_m: f64,
    start_bearing_deg: f64,
    end_bearing_deg: f64,
    options: &EngineOptions,
) -> Result<SectorPolygon, ValidationError> {
    let mut collector = ViolationCollector::new();

    if !center.is_valid() {
        collector.push(
            "center",
            format!("Kein gültiger WGS84-Punkt: ({}, {})", center.lat, center.lon),
        );
    }
    validate_radius(&mut collector, "radius_m", radius_m, options);
    if !start_bearing_deg.is_finite() {
        collector.push("start_bearing_deg", "Peilung muss endlich sein");
    }
    if !end_bearing_deg.is_finite() {
        collector.push("end_bearing_deg", "Peilung muss endlich sein");
    }

    let (start, end, span) = if start_bearing_deg.is_finite() && end_bearing_deg.is_finite() {
        let start = geodesy::normalize_deg(start_bearing_deg);
        let end = geodesy::normalize_deg(end_bearing_deg);
        let span = (end - start).rem_euclid(360.0);
        if span == 0.0 {
            collector.push(
                "end_bearing_deg",
                "Start- und Endpeilung identisch: Sektor wäre degeneriert",
            );
        }
        (start, end, span)
    } else {
        (0.0, 0.0, 0.0)
    };
    collector.into_result()?;

    let steps = arc_steps(radius_m, span, options);
    let mut vertices = Vec::with_capacity(steps as usize + 3);
    vertices.push(center);
    for k in 0..=steps {
        let bearing = start + span * f64::from(k) / f64::from(steps);
        vertices.push(geodesy::destination(center, bearing, radius_m));
    }
    vertices.push(center);

    let area_sqm = geodesy::polygon_area_sqm(&vertices);

    Ok(SectorPolygon {
        center,
        radius_m,
        start_bearing_deg: start,
        end_bearing_deg: end,
        span_deg: span,
        vertices,
        area_sqm,
    })
}

/// Schritt-Anzahl des Sektor-Bogens: anteilig zum Vollkreis (Sehnenfehler),
/// höchstens `sector_max_step_deg` pro Schritt, mindestens `min_sector_steps`.
fn arc_steps(radius_m: f64, span_deg: f64, options: &EngineOptions) -> u32 {
    let full_circle = segment_count_for_radius(
        radius_m,
        options.max_chord_error_m,
        options.min_ring_segments,
    );
    let by_chord = (f64::from(full_circle) * span_deg / 360.0).ceil() as u32;
    let by_step = (span_deg / options.sector_max_step_deg).ceil() as u32;
    by_chord.max(by_step).max(options.min_sector_steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geodesy::distance_m;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn center() -> GeoPoint {
        GeoPoint::new(52.2, -9.1)
    }

    #[test]
    fn test_sektor_geschlossen_beginnt_und_endet_im_zentrum() {
        let sector = generate_sector(center(), 1_000.0, 0.0, 90.0, &EngineOptions::default())
            .expect("Sektor erwartet");
        assert_eq!(sector.vertices.first(), Some(&center()));
        assert_eq!(sector.vertices.last(), Some(&center()));
        assert!(sector.vertices.len() >= 12);
    }

    #[test]
    fn test_viertelkreis_flaeche_nahe_pi_r2_durch_4() {
        let radius = 2_000.0;
        let sector = generate_sector(center(), radius, 0.0, 90.0, &EngineOptions::default())
            .expect("Sektor erwartet");
        let expected = PI * radius * radius / 4.0;
        assert_relative_eq!(sector.area_sqm, expected, max_relative = 0.02);
    }

    #[test]
    fn test_span_ueber_nord_im_uhrzeigersinn() {
        // 350° → 10° ist ein 20°-Sektor, nicht 340°
        let sector = generate_sector(center(), 1_000.0, 350.0, 10.0, &EngineOptions::default())
            .expect("Sektor erwartet");
        assert_relative_eq!(sector.span_deg, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bogenvertices_auf_radius() {
        let radius = 5_000.0;
        let sector = generate_sector(center(), radius, 30.0, 120.0, &EngineOptions::default())
            .expect("Sektor erwartet");
        // Erster und letzter Vertex sind das Zentrum, dazwischen der Bogen
        for vertex in &sector.vertices[1..sector.vertices.len() - 1] {
            let d = distance_m(center(), *vertex);
            assert!((d - radius).abs() < 1.0, "Bogen-Distanz {d}");
        }
    }

    #[test]
    fn test_degenerierter_sektor_abgelehnt() {
        let err = generate_sector(center(), 1_000.0, 45.0, 45.0, &EngineOptions::default())
            .expect_err("Fehler erwartet");
        assert!(err.mentions_field("end_bearing_deg"));
        // 360°-Äquivalente Peilungen sind ebenfalls degeneriert
        let err = generate_sector(center(), 1_000.0, 45.0, 405.0, &EngineOptions::default())
            .expect_err("Fehler erwartet");
        assert!(err.mentions_field("end_bearing_deg"));
    }

    #[test]
    fn test_ungueltiger_radius_und_peilung_gemeinsam_gemeldet() {
        let err = generate_sector(center(), -10.0, f64::NAN, 90.0, &EngineOptions::default())
            .expect_err("Fehler erwartet");
        assert!(err.mentions_field("radius_m"));
        assert!(err.mentions_field("start_bearing_deg"));
    }

    #[test]
    fn test_schrittweite_hoechstens_5_grad() {
        let sector = generate_sector(center(), 100.0, 0.0, 180.0, &EngineOptions::default())
            .expect("Sektor erwartet");
        // Bogen hat steps+1 Vertices; 180° / 5° = 36 Schritte mindestens
        let arc_len = sector.vertices.len() - 2;
        assert!(arc_len >= 37, "arc_len = {arc_len}");
    }
}
