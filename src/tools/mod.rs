//! Interaktive Zeichen-Tools der Einsatzkarte.
//!
//! Jedes Tool ist eine kleine Zustandsmaschine über den Eingabe-Events des
//! Hosts. Tools erzeugen nie selbst Features: ein abgeschlossenes Tool
//! liefert ein reines Daten-[`ToolOutcome`], das der Host über
//! [`apply_tool_outcome`] in den [`crate::FeatureStore`] übernimmt.
//! Vorschau-Geometrie läuft getrennt über den [`PreviewSink`] des Hosts und
//! wird nie persistiert.

/// Übernahme der Tool-Ergebnisse in den FeatureStore.
pub mod apply;
/// Peillinien-Tool (Punkt + Konfigurations-Dialog).
pub mod bearing;
/// Parse-Helfer für Dialog-Antworten.
mod dialog;
/// Marker-Tool (ein Klick, sofort fertig).
pub mod marker;
/// Pfad-Tool für Linien und Suchflächen (Multi-Klick).
pub mod path;
/// Distanz-Ring-Tool (Punkt + Konfigurations-Dialog).
pub mod range_ring;
/// Sektor-Tool (drei Klicks: Zentrum, Radius, Endpeilung).
pub mod sector;
/// Text-Tool (Punkt + Konfigurations-Dialog).
pub mod text_label;

pub use apply::apply_tool_outcome;
pub use bearing::BearingTool;
pub use marker::MarkerTool;
pub use path::{PathKind, PathTool};
pub use range_ring::RangeRingTool;
pub use sector::SectorTool;
pub use text_label::TextLabelTool;

use crate::core::{GeoPoint, MarkerKind, Priority, SearchAreaParams};
use crate::error::EngineError;
use crate::generators::{BearingLine, RingPolygon, SectorPolygon};
use crate::host::{ConfigProvider, PreviewSink, ScreenTransform};
use crate::lpb::LpbTable;
use crate::shared::EngineOptions;
use glam::Vec2;
use indexmap::IndexMap;

// ── Zustands-Typen ──────────────────────────────────────────────────

/// Sammel-Schritt eines Tools (welcher Eingabe-Teil gerade fehlt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectStep {
    /// Pfad-Vertices werden gesammelt
    Vertices,
    /// Radius-Klick steht aus
    Radius,
    /// Endpeilungs-Klick steht aus
    EndBearing,
    /// Konfigurations-Dialog steht aus bzw. war ungültig
    Configuration,
}

/// Zustand eines Tools.
///
/// `Completed` und `Cancelled` sind transient: der nächste `reset()` bzw.
/// die nächste Aktivierung beginnt wieder bei `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Collecting(CollectStep),
    Previewing(CollectStep),
    Completed,
    Cancelled,
}

/// Transiente Vorschau-Geometrie für den Host-Viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewGeometry {
    Points(Vec<GeoPoint>),
    Line(Vec<GeoPoint>),
    Polygon(Vec<GeoPoint>),
}

/// Reaktion eines Tools auf ein Eingabe-Event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Eingabe übernommen, Tool sammelt weiter
    Continue,
    /// Tool ist fertig, Ergebnis via `take_outcome()` abholbar
    Completed,
    /// Eingabe in diesem Zustand bedeutungslos (z.B. Abschluss ohne Minimum)
    Ignored,
    /// Tool wurde abgebrochen, kein Ergebnis
    Cancelled,
}

/// Fertiges Tool-Ergebnis — reine Daten, noch kein Feature.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Marker {
        kind: MarkerKind,
        point: GeoPoint,
    },
    Line {
        points: Vec<GeoPoint>,
    },
    SearchArea {
        vertices: Vec<GeoPoint>,
        params: SearchAreaParams,
    },
    Sector {
        sector: SectorPolygon,
        priority: Priority,
    },
    RangeRings {
        center: GeoPoint,
        /// LPB-Anzeigename, falls die Ringe statistisch abgeleitet sind
        lpb_display_name: Option<String>,
        rings: Vec<RingPolygon>,
    },
    BearingLine {
        name: String,
        line: BearingLine,
    },
    TextLabel {
        text: String,
        point: GeoPoint,
        font_size: u32,
        rotation_deg: f64,
    },
}

/// Kontext, den die Registry jedem Eingabe-Event mitgibt.
pub struct ToolContext<'a> {
    pub options: &'a EngineOptions,
    pub lpb: &'a LpbTable,
    pub config: &'a mut dyn ConfigProvider,
}

// ── Tool-Vertrag ────────────────────────────────────────────────────

/// Gemeinsamer Vertrag aller Zeichen-Tools.
///
/// Tools halten keinen Store-Zugriff und keine Host-Handles; sie konsumieren
/// WGS84-Punkte und produzieren höchstens ein [`ToolOutcome`].
pub trait SearchTool {
    /// Registry-Schlüssel des Tools.
    fn name(&self) -> &'static str;

    /// Statuszeilen-Text für den aktuellen Zustand.
    fn status_text(&self) -> String;

    fn state(&self) -> ToolState;

    /// Klick in WGS84. Konfigurations-Dialoge laufen synchron innerhalb
    /// dieses Aufrufs über `ctx.config`.
    fn on_pointer_down(
        &mut self,
        point: GeoPoint,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolAction, EngineError>;

    /// Cursor-Bewegung in WGS84; liefert die aktuelle Vorschau (falls es in
    /// diesem Zustand eine gibt).
    fn on_pointer_move(&mut self, point: GeoPoint, options: &EngineOptions)
        -> Option<PreviewGeometry>;

    /// Expliziter Abschluss (Rechtsklick/Enter beim Host). Default: in
    /// diesem Tool bedeutungslos.
    fn on_finish(&mut self, _options: &EngineOptions) -> ToolAction {
        ToolAction::Ignored
    }

    /// Vorschau der bereits bestätigten Eingaben ohne Cursor (für den
    /// Host-Redraw zwischen zwei Pointer-Events). Default: keine.
    fn confirmed_preview(&self) -> Option<PreviewGeometry> {
        None
    }

    /// Harter Abbruch: gesammelte Eingaben verwerfen.
    fn on_cancel(&mut self);

    /// Holt das fertige Ergebnis ab (genau einmal nach `Completed`).
    fn take_outcome(&mut self) -> Option<ToolOutcome>;

    /// Zurück auf `Idle` für die nächste Benutzung.
    fn reset(&mut self);
}

// ── Registry ────────────────────────────────────────────────────────

/// Verwaltet die Tools und garantiert, dass höchstens eines aktiv ist.
///
/// Tool-Wechsel bricht das bisherige Tool hart ab (kein implizites
/// Fertigstellen) und löscht die Vorschau. Die Registry ist bewusst kein
/// Global: der Host hält eine Instanz pro Karten-Ansicht.
pub struct ToolRegistry {
    tools: IndexMap<&'static str, Box<dyn SearchTool>>,
    active: Option<&'static str>,
    transform: Box<dyn ScreenTransform>,
    preview: Box<dyn PreviewSink>,
    config: Box<dyn ConfigProvider>,
    options: EngineOptions,
    lpb: LpbTable,
}

impl ToolRegistry {
    pub fn new(
        transform: Box<dyn ScreenTransform>,
        preview: Box<dyn PreviewSink>,
        config: Box<dyn ConfigProvider>,
        options: EngineOptions,
        lpb: LpbTable,
    ) -> Self {
        Self {
            tools: IndexMap::new(),
            active: None,
            transform,
            preview,
            config,
            options,
            lpb,
        }
    }

    /// Registriert ein Tool unter seinem Namen. Ein bereits registrierter
    /// Name wird ersetzt.
    pub fn register(&mut self, tool: Box<dyn SearchTool>) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active
    }

    /// Zustand des aktiven Tools ([`ToolState::Idle`] wenn keines aktiv).
    pub fn active_state(&self) -> ToolState {
        self.active
            .and_then(|name| self.tools.get(name))
            .map(|tool| tool.state())
            .unwrap_or(ToolState::Idle)
    }

    /// Statuszeilen-Text des aktiven Tools.
    pub fn status_text(&self) -> Option<String> {
        self.active
            .and_then(|name| self.tools.get(name))
            .map(|tool| tool.status_text())
    }

    /// Vorschau der bestätigten Eingaben des aktiven Tools (für den
    /// Host-Redraw ohne neues Pointer-Event).
    pub fn confirmed_preview(&self) -> Option<PreviewGeometry> {
        self.active
            .and_then(|name| self.tools.get(name))
            .and_then(|tool| tool.confirmed_preview())
    }

    /// Aktiviert ein Tool; ein laufendes Tool wird hart abgebrochen.
    pub fn activate(&mut self, name: &str) -> Result<(), EngineError> {
        let (key, _) = self
            .tools
            .get_key_value(name)
            .ok_or_else(|| EngineError::UnknownTool(name.to_string()))?;
        let key = *key;

        self.deactivate_current();
        if let Some(tool) = self.tools.get_mut(key) {
            tool.reset();
        }
        log::info!("Tool aktiviert: {key}");
        self.active = Some(key);
        Ok(())
    }

    /// Bricht das aktive Tool ab und löscht die Vorschau.
    pub fn deactivate_current(&mut self) {
        if let Some(name) = self.active.take() {
            if let Some(tool) = self.tools.get_mut(name) {
                if matches!(tool.state(), ToolState::Collecting(_) | ToolState::Previewing(_)) {
                    log::info!("Tool abgebrochen (Wechsel): {name}");
                }
                tool.on_cancel();
            }
            self.preview.clear_preview();
        }
    }

    /// Klick in Screen-Koordinaten. Liefert das Ergebnis, wenn das Tool
    /// damit fertig wurde.
    pub fn on_pointer_down(&mut self, screen: Vec2) -> Result<Option<ToolOutcome>, EngineError> {
        let Some(name) = self.active else {
            return Ok(None);
        };
        let point = self.transform.to_geographic(screen);
        let tool = self
            .tools
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownTool(name.to_string()))?;

        let mut ctx = ToolContext {
            options: &self.options,
            lpb: &self.lpb,
            config: self.config.as_mut(),
        };
        let action = tool.on_pointer_down(point, &mut ctx)?;
        Ok(self.handle_action(name, action))
    }

    /// Cursor-Bewegung in Screen-Koordinaten; aktualisiert die Vorschau.
    pub fn on_pointer_move(&mut self, screen: Vec2) {
        let Some(name) = self.active else { return };
        let point = self.transform.to_geographic(screen);
        let Some(tool) = self.tools.get_mut(name) else {
            return;
        };
        match tool.on_pointer_move(point, &self.options) {
            Some(geometry) => self.preview.set_preview(&geometry),
            None => self.preview.clear_preview(),
        }
    }

    /// Expliziter Abschluss (Rechtsklick/Enter).
    pub fn on_finish(&mut self) -> Option<ToolOutcome> {
        let name = self.active?;
        let action = self.tools.get_mut(name)?.on_finish(&self.options);
        self.handle_action(name, action)
    }

    /// Abbruch des aktiven Tools (Escape); das Tool bleibt aktiv und
    /// beginnt von vorn.
    pub fn on_cancel(&mut self) {
        if let Some(name) = self.active {
            if let Some(tool) = self.tools.get_mut(name) {
                tool.on_cancel();
            }
            self.preview.clear_preview();
        }
    }

    fn handle_action(&mut self, name: &'static str, action: ToolAction) -> Option<ToolOutcome> {
        match action {
            ToolAction::Completed => {
                let outcome = self.tools.get_mut(name).and_then(|tool| {
                    let outcome = tool.take_outcome();
                    tool.reset();
                    outcome
                });
                self.preview.clear_preview();
                outcome
            }
            ToolAction::Cancelled => {
                self.preview.clear_preview();
                None
            }
            ToolAction::Continue | ToolAction::Ignored => None,
        }
    }
}
