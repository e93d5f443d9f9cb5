//! Distanz-Ring-Tool: Ankerpunkt klicken, dann synchroner
//! Konfigurations-Dialog (manuelle Radien oder LPB-Statistik).

use super::dialog;
use super::{
    CollectStep, PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState,
};
use crate::core::GeoPoint;
use crate::error::{EngineError, ViolationCollector};
use crate::generators::{generate_rings, RingSpec};
use crate::host::{ConfigField, ConfigRequest, ConfigResponse};
use crate::lpb::{LpbTable, DEFAULT_PERCENTILES};
use crate::shared::EngineOptions;

const MODE_MANUAL: &str = "Manual";
const MODE_LPB: &str = "LPB Statistics";

pub struct RangeRingTool {
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl RangeRingTool {
    pub fn new() -> Self {
        Self {
            state: ToolState::Idle,
            outcome: None,
        }
    }

    fn build_request(lpb: &LpbTable, options: &EngineOptions) -> ConfigRequest {
        ConfigRequest {
            title: format!("Distanz-Ringe (Radius max. {:.0} m)", options.max_ring_radius_m),
            fields: vec![
                ConfigField::choice(
                    "mode",
                    "Modus",
                    vec![MODE_MANUAL.to_string(), MODE_LPB.to_string()],
                    Some(MODE_MANUAL),
                ),
                ConfigField::number("radius_m", "Maximaler Radius (m)", 1_000.0),
                ConfigField::number(
                    "ring_count",
                    format!("Anzahl Ringe (max. {})", options.max_ring_count).as_str(),
                    4.0,
                ),
                ConfigField::choice(
                    "lpb_category",
                    "LPB-Kategorie",
                    lpb.display_names().map(str::to_string).collect(),
                    lpb.display_names().next(),
                ),
            ],
        }
    }

    /// Baut die Ring-Spezifikationen aus den Dialog-Werten.
    fn specs_from_values(
        values: &dialog::DialogValues,
        lpb: &LpbTable,
        options: &EngineOptions,
    ) -> Result<(Vec<RingSpec>, Option<String>), EngineError> {
        let mut collector = ViolationCollector::new();
        let mode = dialog::text(values, "mode", &mut collector);
        collector.into_result()?;
        let mode = mode.unwrap_or_default();

        if mode == MODE_LPB {
            let mut collector = ViolationCollector::new();
            let display_name = dialog::text(values, "lpb_category", &mut collector);
            collector.into_result()?;
            let display_name = display_name.unwrap_or_default();

            let key = lpb
                .category_for_display_name(&display_name)
                .ok_or_else(|| EngineError::UnknownLpbCategory(display_name.clone()))?;
            let distances = lpb.distances(key, &DEFAULT_PERCENTILES)?;
            let specs = distances
                .iter()
                .map(|(&percentile, &distance)| RingSpec::lpb(key, percentile, distance))
                .collect();
            return Ok((specs, Some(display_name)));
        }

        let mut collector = ViolationCollector::new();
        let radius = dialog::number(values, "radius_m", &mut collector);
        let ring_count = dialog::count(values, "ring_count", &mut collector);
        if let Some(count) = ring_count {
            if count > options.max_ring_count {
                collector.push(
                    "ring_count",
                    format!("Anzahl {count} über Maximum {}", options.max_ring_count),
                );
            }
        }
        collector.into_result()?;
        let (radius, ring_count) = (radius.unwrap_or_default(), ring_count.unwrap_or_default());

        // Gleichmäßig gestufte Radien bis zum Maximum
        let specs = (1..=ring_count)
            .map(|i| RingSpec::manual(radius * f64::from(i) / f64::from(ring_count)))
            .collect();
        Ok((specs, None))
    }
}

impl Default for RangeRingTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTool for RangeRingTool {
    fn name(&self) -> &'static str {
        "range_rings"
    }

    fn status_text(&self) -> String {
        "Distanz-Ringe: Zentrum klicken".to_string()
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

        let request = Self::build_request(ctx.lpb, ctx.options);
        let values = match ctx.config.request(&request) {
            ConfigResponse::Values(values) => values,
            ConfigResponse::Cancelled => {
                self.state = ToolState::Cancelled;
                return Ok(ToolAction::Cancelled);
            }
        };

        // Fehler lassen den Zustand stehen; der nächste Klick setzt den
        // Anker neu und öffnet den Dialog erneut
        let (specs, lpb_display_name) = Self::specs_from_values(&values, ctx.lpb, ctx.options)?;
        let rings = generate_rings(point, &specs, ctx.options)?;

        self.outcome = Some(ToolOutcome::RangeRings {
            center: point,
            lpb_display_name,
            rings,
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
