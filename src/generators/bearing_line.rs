//! Peillinien-Generator: Ursprung, rechtweisende Peilung und Distanz ergeben
//! eine geodätische Linie plus Anzeige-Peilungen.

use super::validate_radius;
use crate::core::{geodesy, GeoPoint};
use crate::error::{ValidationError, ViolationCollector};
use crate::shared::EngineOptions;

/// Peillinie mit allen abgeleiteten Anzeigewerten.
///
/// Geometrie-Grundlage ist immer die rechtweisende Peilung; missweisende
/// und Gegenpeilung sind reine Anzeigewerte.
#[derive(Debug, Clone, PartialEq)]
pub struct BearingLine {
    pub origin: GeoPoint,
    pub endpoint: GeoPoint,
    /// Rechtweisend, normalisiert auf [0, 360)
    pub true_bearing_deg: f64,
    /// Missweisend: rechtweisend minus Missweisung, normalisiert
    pub magnetic_bearing_deg: f64,
    /// Gegenpeilung: rechtweisend + 180°, normalisiert
    pub reciprocal_bearing_deg: f64,
    pub distance_m: f64,
    /// Benutzte Missweisung in Grad (westlich negativ)
    pub declination_deg: f64,
}

/// Baut eine Peillinie vom Ursprung entlang der rechtweisenden Peilung.
pub fn generate_bearing_line(
    origin: GeoPoint,
    true_bearing_deg: f64,
    distance_m: f64,
    options: &EngineOptions,
) -> Result<BearingLine, ValidationError> {
    let mut collector = ViolationCollector::new();

    if !origin.is_valid() {
        collector.push(
            "origin",
            format!("Kein gültiger WGS84-Punkt: ({}, {})", origin.lat, origin.lon),
        );
    }
    if !true_bearing_deg.is_finite() {
        collector.push("bearing_deg", "Peilung muss endlich sein");
    }
    validate_radius(&mut collector, "distance_m", distance_m, options);
    collector.into_result()?;

    let true_bearing = geodesy::normalize_deg(true_bearing_deg);
    let endpoint = geodesy::destination(origin, true_bearing, distance_m);

    Ok(BearingLine {
        origin,
        endpoint,
        true_bearing_deg: true_bearing,
        magnetic_bearing_deg: geodesy::normalize_deg(
            true_bearing - options.magnetic_declination_deg,
        ),
        reciprocal_bearing_deg: geodesy::normalize_deg(true_bearing + 180.0),
        distance_m,
        declination_deg: options.magnetic_declination_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geodesy::{distance_m as dist, initial_bearing_deg};
    use approx::assert_relative_eq;

    fn origin() -> GeoPoint {
        GeoPoint::new(52.2, -9.1)
    }

    #[test]
    fn test_endpunkt_in_peilrichtung_und_distanz() {
        let line = generate_bearing_line(origin(), 45.0, 5_000.0, &EngineOptions::default())
            .expect("Peillinie erwartet");
        assert_relative_eq!(dist(origin(), line.endpoint), 5_000.0, epsilon = 1.0);
        assert_relative_eq!(
            initial_bearing_deg(origin(), line.endpoint),
            45.0,
            epsilon = 0.1
        );
    }

    #[test]
    fn test_missweisende_peilung_westdeklination() {
        // Missweisung −4.5° (West): missweisend = rechtweisend − (−4.5) = +4.5
        let line = generate_bearing_line(origin(), 90.0, 1_000.0, &EngineOptions::default())
            .expect("Peillinie erwartet");
        assert_relative_eq!(line.magnetic_bearing_deg, 94.5, epsilon = 1e-9);
    }

    #[test]
    fn test_gegenpeilung_normalisiert() {
        let line = generate_bearing_line(origin(), 350.0, 1_000.0, &EngineOptions::default())
            .expect("Peillinie erwartet");
        assert_relative_eq!(line.reciprocal_bearing_deg, 170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_peilung_wird_normalisiert() {
        let line = generate_bearing_line(origin(), -90.0, 1_000.0, &EngineOptions::default())
            .expect("Peillinie erwartet");
        assert_relative_eq!(line.true_bearing_deg, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ungueltige_distanz_abgelehnt() {
        let err = generate_bearing_line(origin(), 45.0, 0.0, &EngineOptions::default())
            .expect_err("Fehler erwartet");
        assert!(err.mentions_field("distance_m"));
    }
}
