//! Übernahme fertiger Tool-Ergebnisse in den FeatureStore.
//!
//! Einziger Weg vom Tool zum Feature: der Host holt das [`ToolOutcome`] ab
//! und ruft [`apply_tool_outcome`]. Ein Ergebnis kann mehrere Features
//! erzeugen (LPB-Ringsatz). Da jeder Ring einzeln persistiert wird, bricht
//! ein Persistenzfehler den Satz an dieser Stelle ab; bereits angelegte
//! Ringe bleiben gültig im Store.

use super::ToolOutcome;
use crate::core::{FeatureId, FeatureStore};
use crate::error::EngineError;

/// Legt die Features zu einem Tool-Ergebnis an und liefert ihre IDs in
/// Erzeugungs-Reihenfolge.
pub fn apply_tool_outcome(
    store: &mut FeatureStore,
    outcome: ToolOutcome,
) -> Result<Vec<FeatureId>, EngineError> {
    match outcome {
        ToolOutcome::Marker { kind, point } => {
            let id = store.add_marker(kind.display_name(), point, kind, None, String::new())?;
            Ok(vec![id])
        }
        ToolOutcome::Line { points } => {
            let id = store.add_line("Line", points)?;
            Ok(vec![id])
        }
        ToolOutcome::SearchArea { vertices, params } => {
            let id = store.add_search_area("Search Area", vertices, params)?;
            Ok(vec![id])
        }
        ToolOutcome::Sector { sector, priority } => {
            let id = store.add_sector("Search Sector", &sector, priority)?;
            Ok(vec![id])
        }
        ToolOutcome::RangeRings {
            center,
            lpb_display_name,
            rings,
        } => {
            let mut ids = Vec::with_capacity(rings.len());
            for ring in &rings {
                let name = match (&lpb_display_name, ring.spec.percentile) {
                    (Some(display_name), Some(percentile)) => {
                        format!("{display_name} - {percentile}%")
                    }
                    _ => format!("Range Ring {}", ring.spec.label),
                };
                ids.push(store.add_range_ring(&name, center, ring)?);
            }
            Ok(ids)
        }
        ToolOutcome::BearingLine { name, line } => {
            let id = store.add_bearing_line(&name, &line)?;
            Ok(vec![id])
        }
        ToolOutcome::TextLabel {
            text,
            point,
            font_size,
            rotation_deg,
        } => {
            let id = store.add_text_label(&text, point, font_size, rotation_deg)?;
            Ok(vec![id])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FeatureCategory, GeoPoint, MarkerKind};
    use crate::generators::{generate_rings, RingSpec};
    use crate::shared::EngineOptions;

    fn center() -> GeoPoint {
        GeoPoint::new(52.2, -9.1)
    }

    #[test]
    fn test_marker_bekommt_artnamen() {
        let mut store = FeatureStore::new();
        let ids = apply_tool_outcome(
            &mut store,
            ToolOutcome::Marker {
                kind: MarkerKind::IppLkp,
                point: center(),
            },
        )
        .unwrap();
        assert_eq!(store.get(ids[0]).unwrap().name, "IPP/LKP");
    }

    #[test]
    fn test_lpb_ringsatz_erzeugt_benannte_features() {
        let mut store = FeatureStore::new();
        let options = EngineOptions::default();
        let specs = vec![
            RingSpec::lpb("hiker", 25, 800.0),
            RingSpec::lpb("hiker", 50, 2_000.0),
        ];
        let rings = generate_rings(center(), &specs, &options).unwrap();

        let ids = apply_tool_outcome(
            &mut store,
            ToolOutcome::RangeRings {
                center: center(),
                lpb_display_name: Some("Hiker".to_string()),
                rings,
            },
        )
        .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(store.get(ids[0]).unwrap().name, "Hiker - 25%");
        assert_eq!(store.get(ids[1]).unwrap().name, "Hiker - 50%");
        assert_eq!(store.in_category(FeatureCategory::RangeRing).count(), 2);
    }

    #[test]
    fn test_manueller_ring_bekommt_labelnamen() {
        let mut store = FeatureStore::new();
        let options = EngineOptions::default();
        let rings = generate_rings(center(), &[RingSpec::manual(500.0)], &options).unwrap();

        let ids = apply_tool_outcome(
            &mut store,
            ToolOutcome::RangeRings {
                center: center(),
                lpb_display_name: None,
                rings,
            },
        )
        .unwrap();
        assert_eq!(store.get(ids[0]).unwrap().name, "Range Ring 500 m");
    }
}
