//! Verträge zur Host-Anwendung.
//!
//! Der Host liefert Eingabe-Events in Screen-Koordinaten, die Umrechnung
//! Screen ↔ WGS84, eine transiente Vorschau-Fläche und die Persistenz der
//! fertigen Features. Alles hier sind reine Schnittstellen — die Engine
//! kennt weder Rendering noch Dialoge noch Transport.

use crate::core::GeoPoint;
use crate::tools::PreviewGeometry;
use glam::Vec2;
use indexmap::IndexMap;

// ── Eingabe / Vorschau ───────────────────────────────────────────

/// Umrechnung zwischen Host-Screen-Koordinaten und WGS84.
///
/// Die Engine-Grenze ist immer WGS84-Grad; jede CRS-Konvertierung des Hosts
/// passiert hinter diesem Trait.
pub trait ScreenTransform {
    fn to_geographic(&self, screen: Vec2) -> GeoPoint;
    fn to_screen(&self, geo: GeoPoint) -> Vec2;
}

/// Transiente Vorschau-Fläche des Hosts (halbtransparent im Viewport).
///
/// Vorschau-Geometrie wird nie persistiert; jede echte Zustands-Transition
/// ersetzt oder löscht sie.
pub trait PreviewSink {
    fn set_preview(&mut self, geometry: &PreviewGeometry);
    fn clear_preview(&mut self);
}

// ── Konfigurations-Schritt (externe Dialoge) ─────────────────────

/// Feld-Art eines Konfigurations-Dialogs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFieldKind {
    Text,
    Number,
    /// Auswahl aus festen Werten
    Choice(Vec<String>),
}

/// Ein Eingabefeld der Konfigurations-Anfrage.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigField {
    /// Schlüssel im Antwort-Map
    pub key: String,
    /// Anzeigetext
    pub label: String,
    pub kind: ConfigFieldKind,
    pub default: Option<String>,
}

impl ConfigField {
    pub fn text(key: &str, label: &str, default: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ConfigFieldKind::Text,
            default: default.map(str::to_string),
        }
    }

    pub fn number(key: &str, label: &str, default: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ConfigFieldKind::Number,
            default: Some(default.to_string()),
        }
    }

    pub fn choice(key: &str, label: &str, values: Vec<String>, default: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ConfigFieldKind::Choice(values),
            default: default.map(str::to_string),
        }
    }
}

/// Synchron gestellte Konfigurations-Anfrage (`{title, fields[]}`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRequest {
    pub title: String,
    pub fields: Vec<ConfigField>,
}

/// Antwort des Hosts: Werte (nur Strings über die Grenze) oder Abbruch.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResponse {
    Values(IndexMap<String, String>),
    Cancelled,
}

/// Liefert die Konfigurations-Dialoge des Hosts, synchron.
pub trait ConfigProvider {
    fn request(&mut self, request: &ConfigRequest) -> ConfigResponse;
}

// ── Persistenz-Grenze ────────────────────────────────────────────

/// Skalarer Attributwert an der Persistenz-Grenze.
///
/// Nur Strings, Zahlen fester Breite und Booleans überqueren die Grenze —
/// keine verschachtelten Strukturen.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

/// Flacher Persistenz-Datensatz eines validierten Features.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRecord {
    /// Layer-/Tabellenname (Kategorie-Name)
    pub layer: &'static str,
    pub id: String,
    pub name: String,
    /// Geometrie als Punktliste in WGS84-Grad
    pub geometry: Vec<GeoPoint>,
    /// ISO-8601
    pub created_at: String,
    /// Kategorie-spezifische Felder
    pub fields: Vec<(String, FieldValue)>,
}

/// Persistenzschicht des Hosts.
///
/// Jeder Aufruf ist aus Engine-Sicht atomar; Fehler werden unverändert an
/// den Aufrufer durchgereicht (keine stillen Retries).
pub trait PersistenceSink {
    fn persist(&mut self, record: &PersistRecord) -> Result<(), String>;
}
