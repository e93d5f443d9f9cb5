//! Marker-Tool: ein Klick setzt einen Punkt-Marker.

use super::{PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState};
use crate::core::{GeoPoint, MarkerKind};
use crate::error::EngineError;
use crate::shared::EngineOptions;

/// Einfachstes Tool: jeder Klick erzeugt sofort ein fertiges Ergebnis.
pub struct MarkerTool {
    kind: MarkerKind,
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl MarkerTool {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            state: ToolState::Idle,
            outcome: None,
        }
    }
}

impl SearchTool for MarkerTool {
    fn name(&self) -> &'static str {
        match self.kind {
            MarkerKind::IppLkp => "marker_ipp_lkp",
            MarkerKind::Clue => "marker_clue",
            MarkerKind::Hazard => "marker_hazard",
        }
    }

    fn status_text(&self) -> String {
        format!("{}: Position klicken", self.kind.display_name())
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn on_pointer_down(
        &mut self,
        point: GeoPoint,
        _ctx: &mut ToolContext<'_>,
    ) -> Result<ToolAction, EngineError> {
        self.outcome = Some(ToolOutcome::Marker {
            kind: self.kind,
            point,
        });
        self.state = ToolState::Completed;
        Ok(ToolAction::Completed)
    }

    fn on_pointer_move(
        &mut self,
        point: GeoPoint,
        _options: &EngineOptions,
    ) -> Option<PreviewGeometry> {
        Some(PreviewGeometry::Points(vec![point]))
    }

    fn on_cancel(&mut self) {
        self.outcome = None;
        self.state = ToolState::Cancelled;
    }

    fn take_outcome(&mut self) -> Option<ToolOutcome> {
        self.outcome.take()
    }

    fn reset(&mut self) {
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
            panic!("Marker-Tool braucht keinen Dialog");
        }
    }

    #[test]
    fn test_klick_liefert_sofort_ergebnis() {
        let options = EngineOptions::default();
        let lpb = LpbTable::builtin();
        let mut dialog = NoDialog;
        let mut ctx = ToolContext {
            options: &options,
            lpb: &lpb,
            config: &mut dialog,
        };

        let mut tool = MarkerTool::new(MarkerKind::Clue);
        let point = GeoPoint::new(52.2, -9.1);
        let action = tool.on_pointer_down(point, &mut ctx).unwrap();

        assert_eq!(action, ToolAction::Completed);
        assert_eq!(tool.state(), ToolState::Completed);
        assert_eq!(
            tool.take_outcome(),
            Some(ToolOutcome::Marker {
                kind: MarkerKind::Clue,
                point
            })
        );
        // Ergebnis ist nur einmal abholbar
        assert_eq!(tool.take_outcome(), None);
    }

    #[test]
    fn test_abbruch_verwirft_ergebnis() {
        let options = EngineOptions::default();
        let lpb = LpbTable::builtin();
        let mut dialog = NoDialog;
        let mut ctx = ToolContext {
            options: &options,
            lpb: &lpb,
            config: &mut dialog,
        };

        let mut tool = MarkerTool::new(MarkerKind::Hazard);
        tool.on_pointer_down(GeoPoint::new(52.2, -9.1), &mut ctx)
            .unwrap();
        tool.on_cancel();
        assert_eq!(tool.state(), ToolState::Cancelled);
        assert_eq!(tool.take_outcome(), None);
    }
}
