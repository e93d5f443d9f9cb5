//! Pfad-Tool: Multi-Klick-Erfassung für Linien und Suchflächen.
//!
//! Abschluss entweder explizit (Rechtsklick/Enter beim Host) oder durch
//! Wiederhol-Klick auf den letzten Vertex. Abschluss unterhalb des
//! Vertex-Minimums wird ignoriert, nicht als Fehler gemeldet.

use super::{
    CollectStep, PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState,
};
use crate::core::{geodesy, GeoPoint, SearchAreaParams};
use crate::error::EngineError;
use crate::shared::EngineOptions;

/// Was der Pfad am Ende wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Offene Linie, mindestens 2 Vertices
    Line,
    /// Suchflächen-Polygon, mindestens 3 Vertices
    SearchArea,
}

impl PathKind {
    fn minimum_vertices(self) -> usize {
        match self {
            PathKind::Line => 2,
            PathKind::SearchArea => 3,
        }
    }
}

/// Sammelt Vertices bis zum Abschluss.
pub struct PathTool {
    kind: PathKind,
    vertices: Vec<GeoPoint>,
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl PathTool {
    pub fn new(kind: PathKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            state: ToolState::Idle,
            outcome: None,
        }
    }

    pub fn line() -> Self {
        Self::new(PathKind::Line)
    }

    pub fn search_area() -> Self {
        Self::new(PathKind::SearchArea)
    }

    fn complete(&mut self) -> ToolAction {
        if self.vertices.len() < self.kind.minimum_vertices() {
            return ToolAction::Ignored;
        }
        let points = std::mem::take(&mut self.vertices);
        self.outcome = Some(match self.kind {
            PathKind::Line => ToolOutcome::Line { points },
            PathKind::SearchArea => ToolOutcome::SearchArea {
                vertices: points,
                params: SearchAreaParams::default(),
            },
        });
        self.state = ToolState::Completed;
        ToolAction::Completed
    }
}

impl SearchTool for PathTool {
    fn name(&self) -> &'static str {
        match self.kind {
            PathKind::Line => "line",
            PathKind::SearchArea => "search_area",
        }
    }

    fn status_text(&self) -> String {
        let minimum = self.kind.minimum_vertices();
        let count = self.vertices.len();
        if count < minimum {
            format!("Punkte setzen ({count}/{minimum} Minimum)")
        } else {
            format!("{count} Punkte — Abschluss mit Rechtsklick oder Wiederhol-Klick")
        }
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn on_pointer_down(
        &mut self,
        point: GeoPoint,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolAction, EngineError> {
        // Wiederhol-Klick auf den letzten Vertex schließt ab
        if let Some(last) = self.vertices.last() {
            if geodesy::distance_m(*last, point) <= ctx.options.repeat_point_epsilon_m {
                return Ok(self.complete());
            }
        }
        self.vertices.push(point);
        self.state = ToolState::Collecting(CollectStep::Vertices);
        Ok(ToolAction::Continue)
    }

    fn on_pointer_move(
        &mut self,
        point: GeoPoint,
        _options: &EngineOptions,
    ) -> Option<PreviewGeometry> {
        if self.vertices.is_empty() {
            return Some(PreviewGeometry::Points(vec![point]));
        }
        self.state = ToolState::Previewing(CollectStep::Vertices);
        let mut preview = self.vertices.clone();
        preview.push(point);
        Some(match self.kind {
            PathKind::Line => PreviewGeometry::Line(preview),
            PathKind::SearchArea => PreviewGeometry::Polygon(preview),
        })
    }

    fn confirmed_preview(&self) -> Option<PreviewGeometry> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(match self.kind {
            PathKind::Line => PreviewGeometry::Line(self.vertices.clone()),
            PathKind::SearchArea => PreviewGeometry::Polygon(self.vertices.clone()),
        })
    }

    fn on_finish(&mut self, _options: &EngineOptions) -> ToolAction {
        self.complete()
    }

    fn on_cancel(&mut self) {
        self.vertices.clear();
        self.outcome = None;
        self.state = ToolState::Cancelled;
    }

    fn take_outcome(&mut self) -> Option<ToolOutcome> {
        self.outcome.take()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.outcome = None;
        self.state = ToolState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ConfigProvider, ConfigRequest, ConfigResponse};
    use crate::lpb::LpbTable;

    struct NoDialog;
    impl ConfigProvider for NoDialog {
        fn request(&mut self, _request: &ConfigRequest) -> ConfigResponse {
            panic!("Pfad-Tool braucht keinen Dialog");
        }
    }

    fn click(tool: &mut PathTool, lat: f64, lon: f64) -> ToolAction {
        let options = EngineOptions::default();
        let lpb = LpbTable::builtin();
        let mut dialog = NoDialog;
        let mut ctx = ToolContext {
            options: &options,
            lpb: &lpb,
            config: &mut dialog,
        };
        tool.on_pointer_down(GeoPoint::new(lat, lon), &mut ctx)
            .unwrap()
    }

    #[test]
    fn test_linie_braucht_zwei_vertices() {
        let mut tool = PathTool::line();
        assert_eq!(click(&mut tool, 52.0, -9.0), ToolAction::Continue);
        // Abschluss mit nur einem Vertex wird ignoriert, Zustand bleibt
        assert_eq!(tool.on_finish(&EngineOptions::default()), ToolAction::Ignored);
        assert_eq!(tool.state(), ToolState::Collecting(CollectStep::Vertices));

        assert_eq!(click(&mut tool, 52.01, -9.0), ToolAction::Continue);
        assert_eq!(tool.on_finish(&EngineOptions::default()), ToolAction::Completed);
        let Some(ToolOutcome::Line { points }) = tool.take_outcome() else {
            panic!("Linie erwartet");
        };
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_suchflaeche_braucht_drei_vertices() {
        let mut tool = PathTool::search_area();
        click(&mut tool, 52.0, -9.0);
        click(&mut tool, 52.0, -8.9);
        assert_eq!(tool.on_finish(&EngineOptions::default()), ToolAction::Ignored);

        click(&mut tool, 52.1, -8.9);
        assert_eq!(tool.on_finish(&EngineOptions::default()), ToolAction::Completed);
        let Some(ToolOutcome::SearchArea { vertices, params }) = tool.take_outcome() else {
            panic!("Suchfläche erwartet");
        };
        assert_eq!(vertices.len(), 3);
        assert_eq!(params, SearchAreaParams::default());
    }

    #[test]
    fn test_wiederholklick_schliesst_ab() {
        let mut tool = PathTool::line();
        click(&mut tool, 52.0, -9.0);
        click(&mut tool, 52.01, -9.0);
        // Erneuter Klick auf den letzten Vertex (innerhalb der Toleranz)
        assert_eq!(click(&mut tool, 52.01, -9.0), ToolAction::Completed);
        assert!(matches!(tool.take_outcome(), Some(ToolOutcome::Line { .. })));
    }

    #[test]
    fn test_vorschau_enthaelt_cursor() {
        let mut tool = PathTool::line();
        click(&mut tool, 52.0, -9.0);
        let preview = tool
            .on_pointer_move(GeoPoint::new(52.05, -9.0), &EngineOptions::default())
            .expect("Vorschau erwartet");
        let PreviewGeometry::Line(points) = preview else {
            panic!("Linien-Vorschau erwartet");
        };
        assert_eq!(points.len(), 2);
        assert_eq!(tool.state(), ToolState::Previewing(CollectStep::Vertices));
    }

    #[test]
    fn test_abbruch_verwirft_vertices() {
        let mut tool = PathTool::search_area();
        click(&mut tool, 52.0, -9.0);
        click(&mut tool, 52.0, -8.9);
        tool.on_cancel();
        assert_eq!(tool.state(), ToolState::Cancelled);
        assert_eq!(tool.take_outcome(), None);
        // Neustart beginnt leer
        tool.reset();
        assert_eq!(tool.on_finish(&EngineOptions::default()), ToolAction::Ignored);
    }
}
