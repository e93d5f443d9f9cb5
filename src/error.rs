//! Fehler-Typen der Engine.
//!
//! Validierungsfehler sind strukturiert: jede verletzte Bedingung wird als
//! eigene [`Violation`] gemeldet, damit der Host alle Probleme auf einmal
//! anzeigen kann. Kein Fehler bricht die interaktive Session ab.

use crate::core::SearchAreaStatus;
use thiserror::Error;

/// Eine einzelne verletzte Validierungsbedingung.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct Violation {
    /// Betroffenes Feld (z.B. `latitude`, `rings[2].radius_m`)
    pub field: String,
    /// Beschreibung der Verletzung
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validierungsfehler mit allen verletzten Feldern.
///
/// Wird nur mit mindestens einer Violation konstruiert; ein leerer
/// Violation-Vektor bedeutet "gültig" und erzeugt keinen Fehler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validierung fehlgeschlagen: {}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// Prüft ob ein bestimmtes Feld beanstandet wurde.
    pub fn mentions_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Sammelhilfe: Violations aufsammeln und am Ende in ein Result umwandeln.
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<Violation>,
}

impl ViolationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Gibt `Ok(())` zurück wenn nichts beanstandet wurde, sonst den Fehler
    /// mit allen gesammelten Violations.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}

/// Alle Fehler, die die Engine an den Aufrufer zurückgibt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Ein oder mehrere Eingabefelder sind ungültig.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// LPB-Lookup mit unbekanntem Kategorie-Schlüssel.
    #[error("Unbekannte LPB-Kategorie: '{0}'")]
    UnknownLpbCategory(String),

    /// LPB-Referenzdaten konnten nicht geladen werden.
    #[error("LPB-Referenzdaten ungültig: {0}")]
    LpbData(String),

    /// Statuswechsel einer Suchfläche ist laut Übergangstabelle nicht erlaubt.
    #[error("Unzulässiger Statusübergang: {from} → {to}")]
    IllegalStatusTransition {
        from: SearchAreaStatus,
        to: SearchAreaStatus,
    },

    /// Feature-ID ist im Store nicht vorhanden.
    #[error("Feature nicht gefunden: {0}")]
    FeatureNotFound(String),

    /// Operation passt nicht zur Kategorie des Features.
    #[error("Feature {0} ist keine Suchfläche")]
    NotASearchArea(String),

    /// Tool-Name ist in der Registry nicht registriert.
    #[error("Unbekanntes Tool: '{0}'")]
    UnknownTool(String),

    /// Fehler der Host-Persistenzschicht, unverändert durchgereicht.
    #[error("Persistenz-Fehler: {0}")]
    Persistence(String),
}
