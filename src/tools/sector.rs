//! Sektor-Tool: drei Klicks definieren einen Suchsektor.
//!
//! 1. Klick: Zentrum. 2. Klick: Radius und Startpeilung (Distanz und
//! Richtung zum Zentrum). 3. Klick: Endpeilung — der Sektor wird im
//! Uhrzeigersinn von Start nach Ende aufgespannt.

use super::{
    CollectStep, PreviewGeometry, SearchTool, ToolAction, ToolContext, ToolOutcome, ToolState,
};
use crate::core::{geodesy, GeoPoint, Priority};
use crate::error::{EngineError, ViolationCollector};
use crate::generators::{generate_sector, validate_radius};
use crate::shared::EngineOptions;

#[derive(Clone, Copy)]
enum Stage {
    Idle,
    /// Zentrum gesetzt, Radius-Klick steht aus
    AwaitRadius { center: GeoPoint },
    /// Radius und Startpeilung gesetzt, Endpeilungs-Klick steht aus
    AwaitEndBearing {
        center: GeoPoint,
        radius_m: f64,
        start_bearing_deg: f64,
    },
}

pub struct SectorTool {
    stage: Stage,
    state: ToolState,
    outcome: Option<ToolOutcome>,
}

impl SectorTool {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            state: ToolState::Idle,
            outcome: None,
        }
    }
}

impl Default for SectorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTool for SectorTool {
    fn name(&self) -> &'static str {
        "sector"
    }

    fn status_text(&self) -> String {
        match self.stage {
            Stage::Idle => "Sektor: Zentrum klicken".to_string(),
            Stage::AwaitRadius { .. } => "Sektor: Radius/Startpeilung klicken".to_string(),
            Stage::AwaitEndBearing {
                radius_m,
                start_bearing_deg,
                ..
            } => format!(
                "Sektor: Endpeilung klicken (Radius {radius_m:.0} m, Start {start_bearing_deg:.0}°)"
            ),
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
        match self.stage {
            Stage::Idle => {
                self.stage = Stage::AwaitRadius { center: point };
                self.state = ToolState::Collecting(CollectStep::Radius);
                Ok(ToolAction::Continue)
            }
            Stage::AwaitRadius { center } => {
                let radius_m = geodesy::distance_m(center, point);
                if radius_m <= 0.0 {
                    // Klick auf das Zentrum: kein Radius ablesbar
                    return Ok(ToolAction::Ignored);
                }
                let mut collector = ViolationCollector::new();
                validate_radius(&mut collector, "radius_m", radius_m, ctx.options);
                collector.into_result()?;
                self.stage = Stage::AwaitEndBearing {
                    center,
                    radius_m,
                    start_bearing_deg: geodesy::initial_bearing_deg(center, point),
                };
                self.state = ToolState::Collecting(CollectStep::EndBearing);
                Ok(ToolAction::Continue)
            }
            Stage::AwaitEndBearing {
                center,
                radius_m,
                start_bearing_deg,
            } => {
                let end_bearing_deg = geodesy::initial_bearing_deg(center, point);
                let sector = generate_sector(
                    center,
                    radius_m,
                    start_bearing_deg,
                    end_bearing_deg,
                    ctx.options,
                )?;
                self.outcome = Some(ToolOutcome::Sector {
                    sector,
                    priority: Priority::default(),
                });
                self.stage = Stage::Idle;
                self.state = ToolState::Completed;
                Ok(ToolAction::Completed)
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        point: GeoPoint,
        options: &EngineOptions,
    ) -> Option<PreviewGeometry> {
        match self.stage {
            Stage::Idle => Some(PreviewGeometry::Points(vec![point])),
            Stage::AwaitRadius { center } => {
                self.state = ToolState::Previewing(CollectStep::Radius);
                Some(PreviewGeometry::Line(vec![center, point]))
            }
            Stage::AwaitEndBearing {
                center,
                radius_m,
                start_bearing_deg,
            } => {
                let end_bearing_deg = geodesy::initial_bearing_deg(center, point);
                // Degenerierte Zwischenstände (Cursor exakt auf der
                // Startpeilung) liefern keine Vorschau; die Registry
                // räumt eine vorherige dann weg
                let sector =
                    generate_sector(center, radius_m, start_bearing_deg, end_bearing_deg, options)
                        .ok()?;
                self.state = ToolState::Previewing(CollectStep::EndBearing);
                Some(PreviewGeometry::Polygon(sector.vertices))
            }
        }
    }

    fn confirmed_preview(&self) -> Option<PreviewGeometry> {
        match self.stage {
            Stage::Idle => None,
            Stage::AwaitRadius { center } => Some(PreviewGeometry::Points(vec![center])),
            Stage::AwaitEndBearing {
                center,
                radius_m,
                start_bearing_deg,
            } => Some(PreviewGeometry::Line(vec![
                center,
                geodesy::destination(center, start_bearing_deg, radius_m),
            ])),
        }
    }

    fn on_cancel(&mut self) {
        self.stage = Stage::Idle;
        self.outcome = None;
        self.state = ToolState::Cancelled;
    }

    fn take_outcome(&mut self) -> Option<ToolOutcome> {
        self.outcome.take()
    }

    fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.outcome = None;
        self.state = ToolState::Idle;
    }
}
