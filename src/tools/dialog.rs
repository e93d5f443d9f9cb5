//! Parse-Helfer für Konfigurations-Antworten (über die Host-Grenze kommen
//! nur Strings).

use crate::error::ViolationCollector;
use indexmap::IndexMap;

pub(crate) type DialogValues = IndexMap<String, String>;

/// Nicht-leerer Text; fehlend oder leer wird beanstandet.
pub(crate) fn text(
    values: &DialogValues,
    key: &str,
    collector: &mut ViolationCollector,
) -> Option<String> {
    match values.get(key).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            collector.push(key, "Wert fehlt oder ist leer");
            None
        }
    }
}

/// Endliche Gleitkommazahl.
pub(crate) fn number(
    values: &DialogValues,
    key: &str,
    collector: &mut ViolationCollector,
) -> Option<f64> {
    let raw = values.get(key).map(|v| v.trim()).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            collector.push(key, format!("Keine gültige Zahl: '{raw}'"));
            None
        }
    }
}

/// Positive Ganzzahl.
pub(crate) fn count(
    values: &DialogValues,
    key: &str,
    collector: &mut ViolationCollector,
) -> Option<u32> {
    let raw = values.get(key).map(|v| v.trim()).unwrap_or("");
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            collector.push(key, format!("Keine positive Ganzzahl: '{raw}'"));
            None
        }
    }
}
