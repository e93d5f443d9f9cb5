//! End-to-End-Tests des FeatureStore: Validierung, Statusübergänge,
//! Persistenz-Atomarität.

use sar_search_geometry::{
    generate_rings, generate_sector, EngineError, EngineOptions, FeatureStore, FieldValue,
    GeoPoint, Geometry, MarkerKind, PersistRecord, PersistenceSink, Priority, RingSpec,
    SearchAreaParams, SearchAreaStatus,
};
use std::cell::RefCell;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn kerry() -> GeoPoint {
    GeoPoint::new(52.2, -9.1)
}

fn square() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(52.0, -9.0),
        GeoPoint::new(52.0, -8.9),
        GeoPoint::new(52.1, -8.9),
        GeoPoint::new(52.1, -9.0),
    ]
}

#[test]
fn test_ungueltige_breite_meldet_feld_und_speichert_nichts() {
    let mut store = FeatureStore::new();
    let err = store
        .add_marker("IPP", GeoPoint::new(91.0, -9.1), MarkerKind::IppLkp, None, String::new())
        .expect_err("Fehler erwartet");

    let EngineError::Validation(err) = err else {
        panic!("Validierungsfehler erwartet, war {err:?}");
    };
    assert!(err.mentions_field("point.latitude"));
    assert!(!err.mentions_field("point.longitude"));
    assert!(store.is_empty());
}

#[test]
fn test_alle_verletzungen_auf_einmal() {
    let mut store = FeatureStore::new();
    let params = SearchAreaParams {
        poa: -1.0,
        pod: 200.0,
        team: "  ".to_string(),
        ..SearchAreaParams::default()
    };
    let err = store
        .add_search_area("", vec![GeoPoint::new(91.0, 0.0)], params)
        .expect_err("Fehler erwartet");

    let EngineError::Validation(err) = err else {
        panic!("Validierungsfehler erwartet");
    };
    assert!(err.mentions_field("name"));
    assert!(err.mentions_field("vertices"));
    assert!(err.mentions_field("vertices[0].latitude"));
    assert!(err.mentions_field("poa"));
    assert!(err.mentions_field("pod"));
    assert!(err.mentions_field("team"));
}

#[test]
fn test_statusuebergaenge_vollstaendige_tabelle() {
    init_logging();
    use SearchAreaStatus::*;
    let legal: &[(SearchAreaStatus, SearchAreaStatus)] = &[
        (Planned, Assigned),
        (Planned, InProgress),
        (Planned, Suspended),
        (Assigned, Planned),
        (Assigned, InProgress),
        (Assigned, Suspended),
        (InProgress, Assigned),
        (InProgress, Completed),
        (InProgress, Suspended),
        (Completed, InProgress),
        (Completed, Cleared),
        (Completed, Suspended),
        (Cleared, InProgress),
        (Suspended, Planned),
        (Suspended, Assigned),
        (Suspended, InProgress),
    ];
    let all = [Planned, Assigned, InProgress, Completed, Cleared, Suspended];

    for from in all {
        for to in all {
            let mut store = FeatureStore::new();
            let params = SearchAreaParams {
                status: from,
                ..SearchAreaParams::default()
            };
            let id = store.add_search_area("Alpha", square(), params).unwrap();
            let result = store.update_search_area_status(id, to);

            if legal.contains(&(from, to)) {
                assert!(result.is_ok(), "{from} → {to} sollte erlaubt sein");
            } else {
                assert!(
                    matches!(result, Err(EngineError::IllegalStatusTransition { .. })),
                    "{from} → {to} sollte abgelehnt werden"
                );
            }
        }
    }
}

#[test]
fn test_generator_ausgaben_landen_als_features() {
    let options = EngineOptions::default();
    let mut store = FeatureStore::new();

    let rings = generate_rings(kerry(), &[RingSpec::lpb("hiker", 95, 8_000.0)], &options).unwrap();
    let ring_id = store.add_range_ring("Hiker - 95%", kerry(), &rings[0]).unwrap();

    let sector = generate_sector(kerry(), 2_000.0, 10.0, 100.0, &options).unwrap();
    let sector_id = store.add_sector("Sektor Nord-Ost", &sector, Priority::High).unwrap();

    assert_eq!(store.len(), 2);
    let Geometry::Polygon(ring_vertices) = &store.get(ring_id).unwrap().geometry else {
        panic!("Polygon erwartet");
    };
    assert_eq!(ring_vertices.first(), ring_vertices.last());
    let Geometry::Polygon(sector_vertices) = &store.get(sector_id).unwrap().geometry else {
        panic!("Polygon erwartet");
    };
    assert_eq!(sector_vertices.first(), Some(&kerry()));
}

// ── Persistenz ──────────────────────────────────────────────────────

struct FlakySink {
    records: Rc<RefCell<Vec<PersistRecord>>>,
    fail_after: usize,
}

impl PersistenceSink for FlakySink {
    fn persist(&mut self, record: &PersistRecord) -> Result<(), String> {
        if self.records.borrow().len() >= self.fail_after {
            return Err("GPKG-Layer gesperrt".to_string());
        }
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

#[test]
fn test_persistenzfehler_ist_atomar() {
    let records = Rc::new(RefCell::new(Vec::new()));
    let mut store = FeatureStore::with_persistence(Box::new(FlakySink {
        records: records.clone(),
        fail_after: 1,
    }));

    store
        .add_marker("IPP", kerry(), MarkerKind::IppLkp, None, String::new())
        .unwrap();
    let err = store
        .add_marker("Clue 1", kerry(), MarkerKind::Clue, None, String::new())
        .expect_err("Persistenzfehler erwartet");

    assert!(matches!(err, EngineError::Persistence(_)));
    // Nur das erste Feature existiert, in Store und Persistenz gleichermaßen
    assert_eq!(store.len(), 1);
    assert_eq!(records.borrow().len(), 1);
}

#[test]
fn test_persistenz_datensatz_traegt_attribute() {
    let records = Rc::new(RefCell::new(Vec::new()));
    let mut store = FeatureStore::with_persistence(Box::new(FlakySink {
        records: records.clone(),
        fail_after: usize::MAX,
    }));

    let params = SearchAreaParams {
        team: "Team Bravo".to_string(),
        priority: Priority::High,
        poa: 65.0,
        ..SearchAreaParams::default()
    };
    store.add_search_area("Alpha", square(), params).unwrap();

    let records = records.borrow();
    assert_eq!(records[0].layer, "Search Areas");
    assert!(records[0]
        .fields
        .iter()
        .any(|(k, v)| k == "team" && *v == FieldValue::Text("Team Bravo".into())));
    assert!(records[0]
        .fields
        .iter()
        .any(|(k, v)| k == "poa" && *v == FieldValue::Number(65.0)));
    // Geometrie geht geschlossen über die Grenze
    assert_eq!(records[0].geometry.first(), records[0].geometry.last());
    assert!(!records[0].created_at.is_empty());
}
