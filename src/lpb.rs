//! Lost-Person-Behavior-Statistik: Distanz-Perzentile je Subjekt-Kategorie.
//!
//! Datengrundlage: "Lost Person Behavior" (Robert Koester) / NASAR. Die
//! eingebaute Tabelle ist versioniert unter `data/lpb_statistics.json`;
//! Hosts können eine eigene Tabelle im selben Schema laden.

use crate::error::EngineError;
use indexmap::IndexMap;

/// Standard-Perzentile der Suchplanung.
pub const DEFAULT_PERCENTILES: [u8; 4] = [25, 50, 75, 95];

const BUILTIN_JSON: &str = include_str!("../data/lpb_statistics.json");

#[derive(Debug, Clone)]
struct CategoryEntry {
    name: String,
    /// Perzentil → Distanz in Metern, in Datei-Reihenfolge
    distances_m: IndexMap<u8, f64>,
}

/// Referenztabelle der LPB-Distanzen.
///
/// Kategorien behalten ihre Datei-Reihenfolge (für Auswahl-Dialoge).
/// Unbekannte Kategorie-Schlüssel sind immer ein expliziter Fehler, nie ein
/// stiller Fallback.
#[derive(Debug, Clone)]
pub struct LpbTable {
    categories: IndexMap<String, CategoryEntry>,
}

impl LpbTable {
    /// Eingebaute Tabelle. Das eingebettete JSON ist Teil des Builds und
    /// wird über Unit-Tests abgesichert, daher kein Fehlerpfad nach außen.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_JSON).expect("eingebaute LPB-Tabelle ist gültig")
    }

    /// Lädt eine Tabelle aus JSON im Schema
    /// `{ kategorie: { "25": meter, "50": meter, … } }`; ein optionales
    /// `"name"`-Feld je Kategorie liefert den Anzeigenamen (Default:
    /// Kategorie-Schlüssel).
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let raw: IndexMap<String, IndexMap<String, serde_json::Value>> =
            serde_json::from_str(json).map_err(|err| EngineError::LpbData(err.to_string()))?;
        if raw.is_empty() {
            return Err(EngineError::LpbData("Tabelle enthält keine Kategorien".into()));
        }

        let mut categories = IndexMap::with_capacity(raw.len());
        for (key, fields) in raw {
            let mut name = key.clone();
            let mut distances_m = IndexMap::new();
            for (field, value) in fields {
                if field == "name" {
                    name = value
                        .as_str()
                        .ok_or_else(|| EngineError::LpbData(format!("{key}: name ist kein String")))?
                        .to_string();
                    continue;
                }
                let percentile: u8 = field.parse().map_err(|_| {
                    EngineError::LpbData(format!("{key}: unbekanntes Feld '{field}'"))
                })?;
                if !(1..=99).contains(&percentile) {
                    return Err(EngineError::LpbData(format!(
                        "{key}: Perzentil {percentile} außerhalb 1–99"
                    )));
                }
                let distance = value.as_f64().unwrap_or(f64::NAN);
                if !distance.is_finite() || distance <= 0.0 {
                    return Err(EngineError::LpbData(format!(
                        "{key}: Distanz {value} m für Perzentil {percentile} ungültig"
                    )));
                }
                distances_m.insert(percentile, distance);
            }
            if distances_m.is_empty() {
                return Err(EngineError::LpbData(format!("{key}: keine Perzentile")));
            }
            categories.insert(key, CategoryEntry { name, distances_m });
        }
        Ok(Self { categories })
    }

    /// Distanzen der Kategorie für die angefragten Perzentile, in
    /// Anfrage-Reihenfolge. Perzentile ohne Tabellenwert werden ausgelassen.
    pub fn distances(
        &self,
        category_key: &str,
        percentiles: &[u8],
    ) -> Result<IndexMap<u8, f64>, EngineError> {
        let entry = self
            .categories
            .get(category_key)
            .ok_or_else(|| EngineError::UnknownLpbCategory(category_key.to_string()))?;
        Ok(percentiles
            .iter()
            .filter_map(|p| entry.distances_m.get(p).map(|&d| (*p, d)))
            .collect())
    }

    /// Anzeigename einer Kategorie.
    pub fn display_name(&self, category_key: &str) -> Result<&str, EngineError> {
        self.categories
            .get(category_key)
            .map(|entry| entry.name.as_str())
            .ok_or_else(|| EngineError::UnknownLpbCategory(category_key.to_string()))
    }

    /// Kategorie-Schlüssel zu einem Anzeigenamen (Auswahl-Dialoge liefern
    /// den Anzeigenamen zurück).
    pub fn category_for_display_name(&self, display_name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, entry)| entry.name == display_name)
            .map(|(key, _)| key.as_str())
    }

    /// Alle Kategorie-Schlüssel in Tabellen-Reihenfolge.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Alle Anzeigenamen in Tabellen-Reihenfolge.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.categories.values().map(|entry| entry.name.as_str())
    }
}

impl Default for LpbTable {
    fn default() -> Self {
        Self::builtin()
    }
}
