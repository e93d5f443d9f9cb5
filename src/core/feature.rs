//! Feature-Datenmodell: Kategorien, Geometrie und kategorie-spezifische
//! Attribute.
//!
//! Ein Feature existiert nur vollständig: es wird ausschließlich über die
//! `add_*`-Operationen des [`super::FeatureStore`] erzeugt, per
//! `update_search_area_status` mutiert (nur Suchflächen) oder als Ganzes
//! gelöscht. Teil-Features gibt es nicht.

use super::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Eindeutige Feature-ID (UUID v4).
pub type FeatureId = Uuid;

/// Marker-Arten (Punkt-Features der Einsatzplanung).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Initial Planning Point / Last Known Position
    IppLkp,
    /// Hinweis / Fundstück
    Clue,
    /// Gefahrenstelle
    Hazard,
}

impl MarkerKind {
    /// Anzeigename, zugleich Default-Feature-Name.
    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerKind::IppLkp => "IPP/LKP",
            MarkerKind::Clue => "Clue",
            MarkerKind::Hazard => "Hazard",
        }
    }
}

/// Priorität einer Suchfläche bzw. eines Sektors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Status einer Suchfläche im Einsatzverlauf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchAreaStatus {
    #[default]
    Planned,
    Assigned,
    InProgress,
    Completed,
    Cleared,
    Suspended,
}

impl fmt::Display for SearchAreaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchAreaStatus::Planned => "Planned",
            SearchAreaStatus::Assigned => "Assigned",
            SearchAreaStatus::InProgress => "InProgress",
            SearchAreaStatus::Completed => "Completed",
            SearchAreaStatus::Cleared => "Cleared",
            SearchAreaStatus::Suspended => "Suspended",
        };
        f.write_str(s)
    }
}

/// Feature-Geometrie in WGS84-Grad.
///
/// Ring-/Sektor-Polygone sind geschlossen (erster Vertex == letzter Vertex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(GeoPoint),
    Line(Vec<GeoPoint>),
    Polygon(Vec<GeoPoint>),
}

impl Geometry {
    /// Alle Vertices in Reihenfolge (für die Persistenz-Grenze).
    pub fn points(&self) -> &[GeoPoint] {
        match self {
            Geometry::Point(p) => std::slice::from_ref(p),
            Geometry::Line(pts) | Geometry::Polygon(pts) => pts,
        }
    }
}

/// Eingabe-Parameter einer Suchfläche (Status default `Planned`).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAreaParams {
    pub status: SearchAreaStatus,
    pub team: String,
    pub priority: Priority,
    /// Probability of Area, 0–100
    pub poa: f64,
    /// Probability of Detection, 0–100
    pub pod: f64,
}

impl Default for SearchAreaParams {
    fn default() -> Self {
        Self {
            status: SearchAreaStatus::Planned,
            team: "Unassigned".to_string(),
            priority: Priority::Medium,
            poa: 50.0,
            pod: 0.0,
        }
    }
}

/// Kategorie-spezifische Attribute eines Features.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAttributes {
    /// Getrackte Geräteposition — wird vom Tracking-Subsystem geliefert und
    /// hier nur als Geometrie-Eingabe konsumiert (keine Erzeugungs-Operation).
    TrackPoint {
        device_id: String,
        recorded_at: String,
    },
    /// Breadcrumb-Segment eines getrackten Geräts (wie TrackPoint nur Input).
    BreadcrumbSegment { device_id: String },
    Marker {
        kind: MarkerKind,
        /// LPB-Kategorie des Subjekts (nur IPP/LKP sinnvoll)
        subject_category: Option<String>,
        description: String,
    },
    Line {
        /// Geodätische Gesamtlänge in Metern
        distance_m: f64,
    },
    SearchArea {
        status: SearchAreaStatus,
        team: String,
        priority: Priority,
        poa: f64,
        pod: f64,
        area_sqkm: f64,
    },
    RangeRing {
        center: GeoPoint,
        radius_m: f64,
        label: String,
        lpb_category: Option<String>,
        percentile: Option<u8>,
    },
    BearingLine {
        origin: GeoPoint,
        /// Rechtweisende Peilung (Geometrie-Grundlage)
        bearing_deg: f64,
        /// Missweisende Peilung — reiner Anzeigewert
        magnetic_bearing_deg: f64,
        /// Gegenpeilung — reiner Anzeigewert
        reciprocal_bearing_deg: f64,
        distance_m: f64,
        label: String,
    },
    Sector {
        center: GeoPoint,
        radius_m: f64,
        start_bearing_deg: f64,
        end_bearing_deg: f64,
        area_sqkm: f64,
        priority: Priority,
    },
    TextLabel {
        text: String,
        font_size: u32,
        rotation_deg: f64,
    },
}

/// Kategorie-Tag (zugleich Layer-Schlüssel an der Persistenz-Grenze).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCategory {
    TrackPoint,
    BreadcrumbSegment,
    Marker,
    Line,
    SearchArea,
    RangeRing,
    BearingLine,
    Sector,
    TextLabel,
}

impl FeatureCategory {
    /// Layer-Name des Hosts (entspricht den Layern der Einsatzkarte).
    pub fn layer_name(&self) -> &'static str {
        match self {
            FeatureCategory::TrackPoint => "Track Points",
            FeatureCategory::BreadcrumbSegment => "Breadcrumbs",
            FeatureCategory::Marker => "Markers",
            FeatureCategory::Line => "Lines",
            FeatureCategory::SearchArea => "Search Areas",
            FeatureCategory::RangeRing => "Range Rings",
            FeatureCategory::BearingLine => "Bearing Lines",
            FeatureCategory::Sector => "Search Sectors",
            FeatureCategory::TextLabel => "Text Labels",
        }
    }
}

/// Vollständiges Feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub geometry: Geometry,
    pub attributes: FeatureAttributes,
    /// Erstellzeitpunkt, ISO-8601
    pub created_at: String,
}

impl Feature {
    pub fn category(&self) -> FeatureCategory {
        match &self.attributes {
            FeatureAttributes::TrackPoint { .. } => FeatureCategory::TrackPoint,
            FeatureAttributes::BreadcrumbSegment { .. } => FeatureCategory::BreadcrumbSegment,
            FeatureAttributes::Marker { .. } => FeatureCategory::Marker,
            FeatureAttributes::Line { .. } => FeatureCategory::Line,
            FeatureAttributes::SearchArea { .. } => FeatureCategory::SearchArea,
            FeatureAttributes::RangeRing { .. } => FeatureCategory::RangeRing,
            FeatureAttributes::BearingLine { .. } => FeatureCategory::BearingLine,
            FeatureAttributes::Sector { .. } => FeatureCategory::Sector,
            FeatureAttributes::TextLabel { .. } => FeatureCategory::TextLabel,
        }
    }
}
