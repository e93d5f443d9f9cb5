//! Gemeinsame Konstanten und Laufzeit-Optionen.

pub mod options;

pub use options::{
    EngineOptions, DEFAULT_MAGNETIC_DECLINATION_DEG, MAX_CHORD_ERROR_M, MAX_RING_COUNT,
    MAX_RING_RADIUS_M, MIN_RING_SEGMENTS, MIN_SECTOR_STEPS, REPEAT_POINT_EPSILON_M,
    SECTOR_MAX_STEP_DEG,
};
