//! Text-Tool: Punkt klicken, dann synchroner Dialog für Text, Schriftgröße
//! und Rotation.

use super::dialog;
use super::{
    CollectStep, PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState,
};
use crate::core::GeoPoint;
use crate::error::{EngineError, ViolationCollector};
use crate::host::{ConfigField, ConfigRequest, ConfigResponse};
use crate::shared::EngineOptions;

pub struct TextLabelTool {
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl TextLabelTool {
    pub fn new() -> Self {
        Self {
            state: ToolState::Idle,
            outcome: None,
        }
    }

    fn build_request() -> ConfigRequest {
        ConfigRequest {
            title: "Kartentext".to_string(),
            fields: vec![
                ConfigField::text("text", "Text", None),
                ConfigField::number("font_size", "Schriftgröße (pt)", 12.0),
                ConfigField::number("rotation_deg", "Rotation (Grad)", 0.0),
            ],
        }
    }
}

impl Default for TextLabelTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTool for TextLabelTool {
    fn name(&self) -> &'static str {
        "text_label"
    }

    fn status_text(&self) -> String {
        "Kartentext: Position klicken".to_string()
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn on_pointer_down(
        &mut self,
        point: GeoPoint,
        ctx: &mut ToolContext<'_>,
    ) -> Result<ToolAction, EngineError> {
        self.state = ToolState::Collecting(CollectStep::Configuration);

        let values = match ctx.config.request(&Self::build_request()) {
            ConfigResponse::Values(values) => values,
            ConfigResponse::Cancelled => {
                self.state = ToolState::Cancelled;
                return Ok(ToolAction::Cancelled);
            }
        };

        let mut collector = ViolationCollector::new();
        let text = dialog::text(&values, "text", &mut collector);
        let font_size = dialog::count(&values, "font_size", &mut collector);
        let rotation_deg = dialog::number(&values, "rotation_deg", &mut collector);
        collector.into_result()?;

        self.outcome = Some(ToolOutcome::TextLabel {
            text: text.unwrap_or_default(),
            point,
            font_size: font_size.unwrap_or_default(),
            rotation_deg: rotation_deg.unwrap_or_default(),
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
