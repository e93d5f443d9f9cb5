//! FeatureStore: validate-and-add, Statusübergänge, Persistenz-Grenze.
//!
//! Jede `add_*`-Operation validiert vollständig (alle Verletzungen auf
//! einmal), persistiert dann über die optionale Host-Senke und fügt erst
//! danach in den Store ein. Schlägt die Persistenz fehl, bleibt der Store
//! unverändert — es gibt keine halb angelegten Features.

use super::feature::{
    Feature, FeatureAttributes, FeatureCategory, FeatureId, Geometry, MarkerKind, Priority,
    SearchAreaParams, SearchAreaStatus,
};
use super::{geodesy, GeoPoint};
use crate::error::{EngineError, ViolationCollector};
use crate::generators::{BearingLine, RingPolygon, SectorPolygon};
use crate::host::{FieldValue, PersistRecord, PersistenceSink};
use indexmap::IndexMap;
use uuid::Uuid;

/// Erlaubte Statusübergänge einer Suchfläche.
///
/// Absichtlich permissiv (Feld-Realität: Teams springen zurück), aber
/// explizit aufgezählt statt "alles erlaubt".
const STATUS_TRANSITIONS: &[(SearchAreaStatus, &[SearchAreaStatus])] = &[
    (
        SearchAreaStatus::Planned,
        &[
            SearchAreaStatus::Assigned,
            SearchAreaStatus::InProgress,
            SearchAreaStatus::Suspended,
        ],
    ),
    (
        SearchAreaStatus::Assigned,
        &[
            SearchAreaStatus::Planned,
            SearchAreaStatus::InProgress,
            SearchAreaStatus::Suspended,
        ],
    ),
    (
        SearchAreaStatus::InProgress,
        &[
            SearchAreaStatus::Assigned,
            SearchAreaStatus::Completed,
            SearchAreaStatus::Suspended,
        ],
    ),
    (
        SearchAreaStatus::Completed,
        &[
            SearchAreaStatus::InProgress,
            SearchAreaStatus::Cleared,
            SearchAreaStatus::Suspended,
        ],
    ),
    (SearchAreaStatus::Cleared, &[SearchAreaStatus::InProgress]),
    (
        SearchAreaStatus::Suspended,
        &[
            SearchAreaStatus::Planned,
            SearchAreaStatus::Assigned,
            SearchAreaStatus::InProgress,
        ],
    ),
];

fn transition_allowed(from: SearchAreaStatus, to: SearchAreaStatus) -> bool {
    STATUS_TRANSITIONS
        .iter()
        .find(|(f, _)| *f == from)
        .map(|(_, targets)| targets.contains(&to))
        .unwrap_or(false)
}

/// Zentraler Feature-Bestand der Einsatzplanung.
///
/// Einfügereihenfolge bleibt erhalten. Der Store ist bewusst kein Global:
/// der Host hält genau eine Instanz pro Einsatz und reicht sie an die Tools
/// durch.
#[derive(Default)]
pub struct FeatureStore {
    features: IndexMap<FeatureId, Feature>,
    sink: Option<Box<dyn PersistenceSink>>,
}

impl std::fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureStore")
            .field("features", &self.features.len())
            .field("persistent", &self.sink.is_some())
            .finish()
    }
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store mit Host-Persistenz: jedes Feature wird vor dem Einfügen
    /// persistiert.
    pub fn with_persistence(sink: Box<dyn PersistenceSink>) -> Self {
        Self {
            features: IndexMap::new(),
            sink: Some(sink),
        }
    }

    // ── Abfragen ─────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    pub fn in_category(&self, category: FeatureCategory) -> impl Iterator<Item = &Feature> {
        self.features
            .values()
            .filter(move |f| f.category() == category)
    }

    // ── Erzeugungs-Operationen ───────────────────────────────────────

    /// Punkt-Marker (IPP/LKP, Clue, Hazard).
    pub fn add_marker(
        &mut self,
        name: &str,
        point: GeoPoint,
        kind: MarkerKind,
        subject_category: Option<String>,
        description: String,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        validate_point(&mut collector, "point", point);
        collector.into_result()?;

        self.insert(
            name,
            Geometry::Point(point),
            FeatureAttributes::Marker {
                kind,
                subject_category,
                description,
            },
        )
    }

    /// Freie Linie; die geodätische Länge wird beim Anlegen berechnet.
    pub fn add_line(&mut self, name: &str, points: Vec<GeoPoint>) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        validate_vertices(&mut collector, "points", &points, 2);
        collector.into_result()?;

        let distance_m = geodesy::path_length_m(&points);
        self.insert(
            name,
            Geometry::Line(points),
            FeatureAttributes::Line { distance_m },
        )
    }

    /// Suchfläche. Offene Polygone werden geschlossen; die Fläche wird beim
    /// Anlegen berechnet.
    pub fn add_search_area(
        &mut self,
        name: &str,
        mut vertices: Vec<GeoPoint>,
        params: SearchAreaParams,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        validate_vertices(&mut collector, "vertices", &vertices, 3);
        if !(0.0..=100.0).contains(&params.poa) || !params.poa.is_finite() {
            collector.push("poa", format!("POA {} außerhalb 0–100", params.poa));
        }
        if !(0.0..=100.0).contains(&params.pod) || !params.pod.is_finite() {
            collector.push("pod", format!("POD {} außerhalb 0–100", params.pod));
        }
        if params.team.trim().is_empty() {
            collector.push("team", "Team darf nicht leer sein");
        }
        collector.into_result()?;

        if vertices.first() != vertices.last() {
            vertices.push(vertices[0]);
        }
        let area_sqkm = geodesy::polygon_area_sqm(&vertices) / 1.0e6;
        self.insert(
            name,
            Geometry::Polygon(vertices),
            FeatureAttributes::SearchArea {
                status: params.status,
                team: params.team,
                priority: params.priority,
                poa: params.poa,
                pod: params.pod,
                area_sqkm,
            },
        )
    }

    /// Distanz-Ring aus dem Ring-Generator.
    pub fn add_range_ring(
        &mut self,
        name: &str,
        center: GeoPoint,
        ring: &RingPolygon,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        validate_point(&mut collector, "center", center);
        collector.into_result()?;

        self.insert(
            name,
            Geometry::Polygon(ring.vertices.clone()),
            FeatureAttributes::RangeRing {
                center,
                radius_m: ring.spec.radius_m,
                label: ring.spec.label.clone(),
                lpb_category: ring.spec.lpb_category.clone(),
                percentile: ring.spec.percentile,
            },
        )
    }

    /// Peillinie aus dem Peillinien-Generator.
    pub fn add_bearing_line(
        &mut self,
        name: &str,
        line: &BearingLine,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        collector.into_result()?;

        self.insert(
            name,
            Geometry::Line(vec![line.origin, line.endpoint]),
            FeatureAttributes::BearingLine {
                origin: line.origin,
                bearing_deg: line.true_bearing_deg,
                magnetic_bearing_deg: line.magnetic_bearing_deg,
                reciprocal_bearing_deg: line.reciprocal_bearing_deg,
                distance_m: line.distance_m,
                label: name.trim().to_string(),
            },
        )
    }

    /// Suchsektor aus dem Sektor-Generator.
    pub fn add_sector(
        &mut self,
        name: &str,
        sector: &SectorPolygon,
        priority: Priority,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        validate_name(&mut collector, name);
        collector.into_result()?;

        self.insert(
            name,
            Geometry::Polygon(sector.vertices.clone()),
            FeatureAttributes::Sector {
                center: sector.center,
                radius_m: sector.radius_m,
                start_bearing_deg: sector.start_bearing_deg,
                end_bearing_deg: sector.end_bearing_deg,
                area_sqkm: sector.area_sqm / 1.0e6,
                priority,
            },
        )
    }

    /// Kartentext an einem Punkt.
    pub fn add_text_label(
        &mut self,
        text: &str,
        point: GeoPoint,
        font_size: u32,
        rotation_deg: f64,
    ) -> Result<FeatureId, EngineError> {
        let mut collector = ViolationCollector::new();
        if text.trim().is_empty() {
            collector.push("text", "Text darf nicht leer sein");
        }
        validate_point(&mut collector, "point", point);
        if font_size == 0 {
            collector.push("font_size", "Schriftgröße muss mindestens 1 sein");
        }
        if !rotation_deg.is_finite() {
            collector.push("rotation_deg", "Rotation muss endlich sein");
        }
        collector.into_result()?;

        self.insert(
            text,
            Geometry::Point(point),
            FeatureAttributes::TextLabel {
                text: text.trim().to_string(),
                font_size,
                rotation_deg: geodesy::normalize_deg(rotation_deg),
            },
        )
    }

    // ── Mutation / Löschen ───────────────────────────────────────────

    /// Statuswechsel einer Suchfläche laut Übergangstabelle.
    ///
    /// Erlaubte Wechsel werden geloggt; unzulässige Wechsel und Wechsel auf
    /// den aktuellen Status sind Fehler und lassen das Feature unverändert.
    pub fn update_search_area_status(
        &mut self,
        id: FeatureId,
        new_status: SearchAreaStatus,
    ) -> Result<(), EngineError> {
        let feature = self
            .features
            .get_mut(&id)
            .ok_or_else(|| EngineError::FeatureNotFound(id.to_string()))?;

        let FeatureAttributes::SearchArea { status, .. } = &mut feature.attributes else {
            return Err(EngineError::NotASearchArea(id.to_string()));
        };
        if !transition_allowed(*status, new_status) {
            return Err(EngineError::IllegalStatusTransition {
                from: *status,
                to: new_status,
            });
        }
        log::info!(
            "Suchfläche '{}' ({id}): Status {} → {new_status}",
            feature.name,
            *status
        );
        *status = new_status;
        Ok(())
    }

    /// Entfernt ein Feature vollständig.
    pub fn remove(&mut self, id: FeatureId) -> Result<Feature, EngineError> {
        self.features
            .shift_remove(&id)
            .ok_or_else(|| EngineError::FeatureNotFound(id.to_string()))
    }

    // ── Intern ───────────────────────────────────────────────────────

    /// Persistiert (falls Senke vorhanden) und fügt dann ein. Reihenfolge
    /// garantiert: kein Feature im Store, das der Host nicht kennt.
    fn insert(
        &mut self,
        name: &str,
        geometry: Geometry,
        attributes: FeatureAttributes,
    ) -> Result<FeatureId, EngineError> {
        let feature = Feature {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            geometry,
            attributes,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        if let Some(sink) = &mut self.sink {
            let record = flatten(&feature);
            sink.persist(&record).map_err(EngineError::Persistence)?;
        }

        let id = feature.id;
        log::info!(
            "Feature angelegt: '{}' ({id}) in Layer '{}'",
            feature.name,
            feature.category().layer_name()
        );
        self.features.insert(id, feature);
        Ok(id)
    }
}

// ── Validierungs-Helfer ─────────────────────────────────────────────

fn validate_name(collector: &mut ViolationCollector, name: &str) {
    if name.trim().is_empty() {
        collector.push("name", "Name darf nicht leer sein");
    }
}

fn validate_point(collector: &mut ViolationCollector, field: &str, point: GeoPoint) {
    if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
        collector.push(
            format!("{field}.latitude"),
            format!("Breite {} außerhalb −90…90", point.lat),
        );
    }
    if !point.lon.is_finite() || !(-180.0..=180.0).contains(&point.lon) {
        collector.push(
            format!("{field}.longitude"),
            format!("Länge {} außerhalb −180…180", point.lon),
        );
    }
}

fn validate_vertices(
    collector: &mut ViolationCollector,
    field: &str,
    points: &[GeoPoint],
    minimum: usize,
) {
    if points.len() < minimum {
        collector.push(
            field,
            format!("Mindestens {minimum} Punkte erforderlich (waren {})", points.len()),
        );
    }
    for (index, point) in points.iter().enumerate() {
        validate_point(collector, &format!("{field}[{index}]"), *point);
    }
}

/// Flacht ein Feature zum Persistenz-Datensatz ab (nur Skalare).
fn flatten(feature: &Feature) -> PersistRecord {
    let mut fields: Vec<(String, FieldValue)> = Vec::new();
    let mut push = |key: &str, value: FieldValue| fields.push((key.to_string(), value));

    match &feature.attributes {
        FeatureAttributes::TrackPoint {
            device_id,
            recorded_at,
        } => {
            push("device_id", FieldValue::Text(device_id.clone()));
            push("recorded_at", FieldValue::Text(recorded_at.clone()));
        }
        FeatureAttributes::BreadcrumbSegment { device_id } => {
            push("device_id", FieldValue::Text(device_id.clone()));
        }
        FeatureAttributes::Marker {
            kind,
            subject_category,
            description,
        } => {
            push("marker_type", FieldValue::Text(kind.display_name().to_string()));
            if let Some(category) = subject_category {
                push("subject_category", FieldValue::Text(category.clone()));
            }
            push("description", FieldValue::Text(description.clone()));
        }
        FeatureAttributes::Line { distance_m } => {
            push("distance_m", FieldValue::Number(*distance_m));
        }
        FeatureAttributes::SearchArea {
            status,
            team,
            priority,
            poa,
            pod,
            area_sqkm,
        } => {
            push("status", FieldValue::Text(status.to_string()));
            push("team", FieldValue::Text(team.clone()));
            push("priority", FieldValue::Text(priority.to_string()));
            push("poa", FieldValue::Number(*poa));
            push("pod", FieldValue::Number(*pod));
            push("area_sqkm", FieldValue::Number(*area_sqkm));
        }
        FeatureAttributes::RangeRing {
            center,
            radius_m,
            label,
            lpb_category,
            percentile,
        } => {
            push("center_lat", FieldValue::Number(center.lat));
            push("center_lon", FieldValue::Number(center.lon));
            push("radius_m", FieldValue::Number(*radius_m));
            push("label", FieldValue::Text(label.clone()));
            if let Some(category) = lpb_category {
                push("lpb_category", FieldValue::Text(category.clone()));
            }
            if let Some(percentile) = percentile {
                push("percentile", FieldValue::Integer(i64::from(*percentile)));
            }
        }
        FeatureAttributes::BearingLine {
            origin,
            bearing_deg,
            magnetic_bearing_deg,
            reciprocal_bearing_deg,
            distance_m,
            label,
        } => {
            push("origin_lat", FieldValue::Number(origin.lat));
            push("origin_lon", FieldValue::Number(origin.lon));
            push("bearing_deg", FieldValue::Number(*bearing_deg));
            push("magnetic_bearing_deg", FieldValue::Number(*magnetic_bearing_deg));
            push("reciprocal_bearing_deg", FieldValue::Number(*reciprocal_bearing_deg));
            push("distance_m", FieldValue::Number(*distance_m));
            push("label", FieldValue::Text(label.clone()));
        }
        FeatureAttributes::Sector {
            center,
            radius_m,
            start_bearing_deg,
            end_bearing_deg,
            area_sqkm,
            priority,
        } => {
            push("center_lat", FieldValue::Number(center.lat));
            push("center_lon", FieldValue::Number(center.lon));
            push("radius_m", FieldValue::Number(*radius_m));
            push("start_bearing_deg", FieldValue::Number(*start_bearing_deg));
            push("end_bearing_deg", FieldValue::Number(*end_bearing_deg));
            push("area_sqkm", FieldValue::Number(*area_sqkm));
            push("priority", FieldValue::Text(priority.to_string()));
        }
        FeatureAttributes::TextLabel {
            text,
            font_size,
            rotation_deg,
        } => {
            push("text", FieldValue::Text(text.clone()));
            push("font_size", FieldValue::Integer(i64::from(*font_size)));
            push("rotation_deg", FieldValue::Number(*rotation_deg));
        }
    }

    PersistRecord {
        layer: feature.category().layer_name(),
        id: feature.id.to_string(),
        name: feature.name.clone(),
        geometry: feature.geometry.points().to_vec(),
        created_at: feature.created_at.clone(),
        fields,
    }
}
