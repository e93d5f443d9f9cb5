//! Zentrale Konfiguration der Search-Geometry-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Geometrie-Grenzen ───────────────────────────────────────────────

/// Maximaler Ring-/Sektor-Radius in Metern (100 km — SAR-Einsatzgrenze).
pub const MAX_RING_RADIUS_M: f64 = 100_000.0;
/// Maximal zulässige Sehnen-Abweichung der Tessellation in Metern.
pub const MAX_CHORD_ERROR_M: f64 = 1.0;
/// Minimale Segment-Anzahl eines Vollkreises.
pub const MIN_RING_SEGMENTS: u32 = 36;
/// Minimale Schritt-Anzahl eines Sektor-Bogens.
pub const MIN_SECTOR_STEPS: u32 = 10;
/// Maximale Winkel-Schrittweite des Sektor-Bogens in Grad.
pub const SECTOR_MAX_STEP_DEG: f64 = 5.0;
/// Maximale Ring-Anzahl einer einzelnen Distanz-Ring-Anfrage.
pub const MAX_RING_COUNT: u32 = 20;

// ── Tools ───────────────────────────────────────────────────────────

/// Klick innerhalb dieses Radius (Meter) auf den letzten Vertex gilt beim
/// Pfad-Tool als expliziter Abschluss (Wiederhol-Punkt).
pub const REPEAT_POINT_EPSILON_M: f64 = 0.5;
/// Default-Missweisung in Grad (Irland, West-Deklination negativ).
pub const DEFAULT_MAGNETIC_DECLINATION_DEG: f64 = -4.5;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `sar_search_geometry.toml` im Host-Profil gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximaler Ring-/Sektor-/Peillinien-Radius in Metern
    pub max_ring_radius_m: f64,
    /// Maximale Sehnen-Abweichung der Tessellation in Metern
    pub max_chord_error_m: f64,
    /// Minimale Segment-Anzahl eines Vollkreises
    pub min_ring_segments: u32,
    /// Minimale Schritt-Anzahl eines Sektor-Bogens
    pub min_sector_steps: u32,
    /// Maximale Winkel-Schrittweite des Sektor-Bogens in Grad
    pub sector_max_step_deg: f64,
    /// Maximale Ring-Anzahl einer einzelnen Distanz-Ring-Anfrage
    pub max_ring_count: u32,
    /// Missweisung in Grad für die Peillinien-Anzeige
    pub magnetic_declination_deg: f64,
    /// Wiederhol-Punkt-Toleranz des Pfad-Tools in Metern
    pub repeat_point_epsilon_m: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_ring_radius_m: MAX_RING_RADIUS_M,
            max_chord_error_m: MAX_CHORD_ERROR_M,
            min_ring_segments: MIN_RING_SEGMENTS,
            min_sector_steps: MIN_SECTOR_STEPS,
            sector_max_step_deg: SECTOR_MAX_STEP_DEG,
            max_ring_count: MAX_RING_COUNT,
            magnetic_declination_deg: DEFAULT_MAGNETIC_DECLINATION_DEG,
            repeat_point_epsilon_m: REPEAT_POINT_EPSILON_M,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei; bei fehlender oder defekter Datei
    /// werden die Defaults benutzt (mit Warnung im Log).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(options) => options,
                Err(err) => {
                    log::warn!("Engine-Optionen unlesbar ({}): {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Speichert die Optionen als TOML.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        std::fs::write(path, content)
    }
}
