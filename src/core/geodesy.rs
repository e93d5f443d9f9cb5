//! Geodäsie-Kernel: Distanz, Peilung und Zielpunkt auf dem WGS84-Ellipsoid.
//!
//! Alle drei Funktionen rechnen auf dem breitengrad-abhängigen geozentrischen
//! Krümmungsradius des WGS84-Ellipsoids statt auf einer Kugel mit fixem
//! Erdradius. `destination` iteriert den Radius auf die Mittelbreite des
//! Ergebnisses, damit `distance_m(origin, destination(origin, θ, d)) == d`
//! innerhalb von 1 m für d ≤ 100 km und |lat| ≤ 70° gilt.
//!
//! Alle Funktionen sind total: Pole, identische Punkte und Null-Distanzen
//! liefern definierte Werte, nie NaN und nie eine Panic.

use super::GeoPoint;

/// WGS84 große Halbachse (Äquatorradius) in Metern.
pub const WGS84_SEMI_MAJOR_M: f64 = 6_378_137.0;
/// WGS84 Abplattung.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;
/// WGS84 kleine Halbachse (Polradius) in Metern.
pub const WGS84_SEMI_MINOR_M: f64 = WGS84_SEMI_MAJOR_M * (1.0 - WGS84_FLATTENING);

/// Geozentrischer Erdradius auf der gegebenen Breite.
///
/// R(φ) = sqrt(((a²·cosφ)² + (b²·sinφ)²) / ((a·cosφ)² + (b·sinφ)²))
pub fn geocentric_radius_m(lat_deg: f64) -> f64 {
    let lat = lat_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let a = WGS84_SEMI_MAJOR_M;
    let b = WGS84_SEMI_MINOR_M;

    let numerator = (a * a * cos_lat).powi(2) + (b * b * sin_lat).powi(2);
    let denominator = (a * cos_lat).powi(2) + (b * sin_lat).powi(2);
    (numerator / denominator).sqrt()
}

/// Normalisiert einen Winkel auf [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    let n = deg.rem_euclid(360.0);
    // rem_euclid(−1e-16, 360) kann exakt 360.0 liefern
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Distanz zwischen zwei WGS84-Punkten in Metern.
///
/// Haversine-Zentralwinkel auf dem Radius der Mittelbreite — dadurch exakt
/// symmetrisch: `distance_m(a, b) == distance_m(b, a)`.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    if a.approx_eq(&b) {
        return 0.0;
    }

    let radius = geocentric_radius_m((a.lat + b.lat) * 0.5);

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi * 0.5).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda * 0.5).sin().powi(2);
    // Clamp gegen Rundungsfehler bei Antipoden
    let central_angle = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();

    radius * central_angle
}

/// Anfangspeilung von `a` nach `b` in Grad, [0, 360), 0 = Nord.
///
/// Identische Punkte liefern 0.0 (kein NaN, keine Exception).
pub fn initial_bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    if a.approx_eq(&b) {
        return 0.0;
    }

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let x = d_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    normalize_deg(x.atan2(y).to_degrees())
}

/// Sphärische Vorwärtslösung auf einem festen Radius.
fn forward_on_radius(origin: GeoPoint, bearing_deg: f64, distance_m: f64, radius_m: f64) -> GeoPoint {
    let bearing = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lon.to_radians();
    let delta = distance_m / radius_m;

    let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * bearing.cos())
        .clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();

    let lambda2 = lambda1
        + (bearing.sin() * delta.sin() * phi1.cos())
            .atan2(delta.cos() - phi1.sin() * sin_phi2);

    // Länge auf [-180, 180] normalisieren
    let lon = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    GeoPoint::new(phi2.to_degrees(), lon)
}

/// Projiziert einen Zielpunkt von `origin` aus unter `bearing_deg` (Grad,
/// 0 = Nord) in `distance_m` Metern Entfernung.
///
/// Der Erdradius wird iterativ auf der Mittelbreite zwischen Start und Ziel
/// ausgewertet — derselbe Radius, den `distance_m` für das Punktpaar benutzt.
pub fn destination(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    if distance_m <= 0.0 || !distance_m.is_finite() {
        return origin;
    }

    let bearing = normalize_deg(bearing_deg);
    let mut radius = geocentric_radius_m(origin.lat);
    let mut dest = forward_on_radius(origin, bearing, distance_m, radius);
    for _ in 0..2 {
        radius = geocentric_radius_m((origin.lat + dest.lat) * 0.5);
        dest = forward_on_radius(origin, bearing, distance_m, radius);
    }
    dest
}

/// Fläche eines Polygons in Quadratmetern (Shoelace auf der lokalen
/// Tangentialebene um den Schwerpunkt, äquirektangular projiziert).
///
/// Erwartet die Vertices in WGS84-Grad; ob das Polygon geschlossen ist
/// (erster == letzter Vertex) oder nicht, spielt keine Rolle.
pub fn polygon_area_sqm(vertices: &[GeoPoint]) -> f64 {
    // Doppelte Schlusspunkte ignorieren
    let n = if vertices.len() > 1 && vertices[0].approx_eq(vertices.last().unwrap()) {
        vertices.len() - 1
    } else {
        vertices.len()
    };
    if n < 3 {
        return 0.0;
    }

    let lat0 = vertices[..n].iter().map(|p| p.lat).sum::<f64>() / n as f64;
    let lon0 = vertices[..n].iter().map(|p| p.lon).sum::<f64>() / n as f64;
    let radius = geocentric_radius_m(lat0);
    let cos_lat0 = lat0.to_radians().cos();

    let project = |p: &GeoPoint| -> (f64, f64) {
        let x = (p.lon - lon0).to_radians() * cos_lat0 * radius;
        let y = (p.lat - lat0).to_radians() * radius;
        (x, y)
    };

    let mut sum = 0.0;
    for i in 0..n {
        let (x1, y1) = project(&vertices[i]);
        let (x2, y2) = project(&vertices[(i + 1) % n]);
        sum += x1 * y2 - x2 * y1;
    }
    (sum * 0.5).abs()
}

/// Gesamtlänge eines Linienzugs in Metern.
pub fn path_length_m(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TRALEE: GeoPoint = GeoPoint::new(52.2, -9.1);

    #[test]
    fn test_distanz_symmetrisch() {
        let a = GeoPoint::new(52.2, -9.1);
        let b = GeoPoint::new(52.9, -8.3);
        assert!((distance_m(a, b) - distance_m(b, a)).abs() < 0.01);
    }

    #[test]
    fn test_distanz_identischer_punkte_ist_null() {
        assert_eq!(distance_m(TRALEE, TRALEE), 0.0);
    }

    #[test]
    fn test_distanz_ein_breitengrad() {
        // 1° Breite ≈ 111.2 km auf der genutzten geozentrischen Kugel
        let a = GeoPoint::new(52.0, -9.0);
        let b = GeoPoint::new(53.0, -9.0);
        let d = distance_m(a, b);
        assert!((110_500.0..112_500.0).contains(&d), "d = {d}");
    }

    #[test]
    fn test_peilung_nord_ost_sued_west() {
        let origin = GeoPoint::new(52.0, -9.0);
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(53.0, -9.0)),
            0.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            initial_bearing_deg(origin, GeoPoint::new(51.0, -9.0)),
            180.0,
            epsilon = 1e-9
        );
        let east = initial_bearing_deg(origin, GeoPoint::new(52.0, -8.0));
        assert!((89.0..91.0).contains(&east), "east = {east}");
        let west = initial_bearing_deg(origin, GeoPoint::new(52.0, -10.0));
        assert!((269.0..271.0).contains(&west), "west = {west}");
    }

    #[test]
    fn test_peilung_identischer_punkte_ist_null() {
        assert_eq!(initial_bearing_deg(TRALEE, TRALEE), 0.0);
    }

    #[test]
    fn test_peilung_gegenrichtung_auf_meridian_exakt_180() {
        let a = GeoPoint::new(52.0, -9.0);
        let b = GeoPoint::new(52.8, -9.0);
        let forward = initial_bearing_deg(a, b);
        let reverse = initial_bearing_deg(b, a);
        assert_relative_eq!((reverse - forward).rem_euclid(360.0), 180.0, epsilon = 0.01);
    }

    #[test]
    fn test_peilung_gegenrichtung_innerhalb_meridiankonvergenz() {
        // Abseits des Meridians weichen Hin- und Rückpeilung um die
        // Meridiankonvergenz von 180° ab; bei ≤50 km bleibt das unter 1°.
        let a = GeoPoint::new(52.2, -9.1);
        let b = GeoPoint::new(52.4, -8.6);
        let forward = initial_bearing_deg(a, b);
        let reverse = initial_bearing_deg(b, a);
        let diff = (reverse - forward).rem_euclid(360.0);
        assert!((diff - 180.0).abs() < 1.0, "diff = {diff}");
    }

    #[test]
    fn test_zielpunkt_roundtrip_unter_einem_meter() {
        // Stichproben über Breite, Peilung und Distanz (≤100 km, |lat| ≤ 70°)
        for &lat in &[-68.0, -45.0, 0.0, 23.5, 52.2, 69.9] {
            for &bearing in &[0.0, 37.0, 90.0, 135.0, 222.5, 359.0] {
                for &dist in &[1.0, 500.0, 10_000.0, 99_000.0] {
                    let origin = GeoPoint::new(lat, -9.1);
                    let dest = destination(origin, bearing, dist);
                    let back = distance_m(origin, dest);
                    assert!(
                        (back - dist).abs() < 1.0,
                        "lat={lat} θ={bearing} d={dist}: zurückgemessen {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_zielpunkt_null_distanz_ist_origin() {
        let dest = destination(TRALEE, 123.0, 0.0);
        assert!(dest.approx_eq(&TRALEE));
    }

    #[test]
    fn test_zielpunkt_am_pol_definiert() {
        let pole = GeoPoint::new(90.0, 0.0);
        let dest = destination(pole, 45.0, 1000.0);
        assert!(dest.lat.is_finite() && dest.lon.is_finite());
        assert!(dest.lat < 90.0);
        // Distanz und Peilung am Pol bleiben ebenfalls definiert
        assert!(distance_m(pole, dest).is_finite());
        assert!(initial_bearing_deg(pole, dest).is_finite());
    }

    #[test]
    fn test_zielpunkt_ueber_datumsgrenze_normalisiert() {
        let origin = GeoPoint::new(10.0, 179.9);
        let dest = destination(origin, 90.0, 50_000.0);
        assert!(dest.is_valid(), "lon = {}", dest.lon);
    }

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(725.0), 5.0);
    }

    #[test]
    fn test_geozentrischer_radius_monoton_zum_pol() {
        let equator = geocentric_radius_m(0.0);
        let mid = geocentric_radius_m(45.0);
        let pole = geocentric_radius_m(90.0);
        assert_relative_eq!(equator, WGS84_SEMI_MAJOR_M, epsilon = 0.01);
        assert_relative_eq!(pole, WGS84_SEMI_MINOR_M, epsilon = 0.01);
        assert!(equator > mid && mid > pole);
    }

    #[test]
    fn test_polygonflaeche_quadrat() {
        // ~1 km × 1 km Quadrat bei 52° Nord
        let origin = GeoPoint::new(52.0, -9.0);
        let e = destination(origin, 90.0, 1000.0);
        let ne = destination(e, 0.0, 1000.0);
        let n = destination(origin, 0.0, 1000.0);
        let area = polygon_area_sqm(&[origin, e, ne, n]);
        assert_relative_eq!(area, 1_000_000.0, max_relative = 0.01);
    }

    #[test]
    fn test_polygonflaeche_degeneriert_null() {
        assert_eq!(polygon_area_sqm(&[]), 0.0);
        assert_eq!(polygon_area_sqm(&[TRALEE, TRALEE]), 0.0);
    }

    #[test]
    fn test_pfadlaenge() {
        let a = GeoPoint::new(52.0, -9.0);
        let b = destination(a, 90.0, 1000.0);
        let c = destination(b, 0.0, 500.0);
        assert_relative_eq!(path_length_m(&[a, b, c]), 1500.0, epsilon = 1.0);
        assert_eq!(path_length_m(&[a]), 0.0);
    }
}
