//! Peillinien-Tool: Ursprung klicken, dann synchroner Dialog für Name,
//! Peilung, Peilungsart und Distanz.
//!
//! Missweisende Peilungen werden vor der Geometrie in rechtweisende
//! umgerechnet (rechtweisend = missweisend + Missweisung); die Linie selbst
//! ist immer rechtweisend.

use super::dialog;
use super::{
    CollectStep, PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState,
};
use crate::core::{geodesy, GeoPoint};
use crate::error::{EngineError, ViolationCollector};
use crate::generators::generate_bearing_line;
use crate::host::{ConfigField, ConfigRequest, ConfigResponse};
use crate::shared::EngineOptions;

const BEARING_TRUE: &str = "True";
const BEARING_MAGNETIC: &str = "Magnetic";

pub struct BearingTool {
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl BearingTool {
    pub fn new() -> Self {
        Self {
            state: ToolState::Idle,
            outcome: None,
        }
    }

    fn build_request(options: &EngineOptions) -> ConfigRequest {
        ConfigRequest {
            title: "Peillinie".to_string(),
            fields: vec![
                ConfigField::text("name", "Name", Some("Bearing")),
                ConfigField::number("bearing_deg", "Peilung (Grad)", 0.0),
                ConfigField::choice(
                    "bearing_type",
                    "Peilungsart",
                    vec![BEARING_TRUE.to_string(), BEARING_MAGNETIC.to_string()],
                    Some(BEARING_TRUE),
                ),
                ConfigField::number(
                    "distance_m",
                    format!("Distanz (m, max. {:.0})", options.max_ring_radius_m).as_str(),
                    1_000.0,
                ),
            ],
        }
    }
}

impl Default for BearingTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTool for BearingTool {
    fn name(&self) -> &'static str {
        "bearing_line"
    }

    fn status_text(&self) -> String {
        "Peillinie: Ursprung klicken".to_string()
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

        let request = Self::build_request(ctx.options);
        let values = match ctx.config.request(&request) {
            ConfigResponse::Values(values) => values,
            ConfigResponse::Cancelled => {
                self.state = ToolState::Cancelled;
                return Ok(ToolAction::Cancelled);
            }
        };

        let mut collector = ViolationCollector::new();
        let name = dialog::text(&values, "name", &mut collector);
        let bearing_deg = dialog::number(&values, "bearing_deg", &mut collector);
        let bearing_type = dialog::text(&values, "bearing_type", &mut collector);
        let distance_m = dialog::number(&values, "distance_m", &mut collector);
        collector.into_result()?;
        let (name, bearing_deg, bearing_type, distance_m) = (
            name.unwrap_or_default(),
            bearing_deg.unwrap_or_default(),
            bearing_type.unwrap_or_default(),
            distance_m.unwrap_or_default(),
        );

        let true_bearing_deg = if bearing_type == BEARING_MAGNETIC {
            geodesy::normalize_deg(bearing_deg + ctx.options.magnetic_declination_deg)
        } else {
            bearing_deg
        };

        let line = generate_bearing_line(point, true_bearing_deg, distance_m, ctx.options)?;
        self.outcome = Some(ToolOutcome::BearingLine { name, line });
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
