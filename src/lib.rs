//! SAR Search Geometry Engine.
//! Kern-Funktionalität als Library exportiert: Geodäsie-Kernel, Geometrie-
//! Generatoren, LPB-Statistik und die interaktiven Zeichen-Tools.
//!
//! Karten-Darstellung, Dialoge und Persistenz liefert die Host-Anwendung
//! über die Verträge in [`host`].

pub mod core;
pub mod error;
pub mod generators;
pub mod host;
pub mod lpb;
pub mod shared;
pub mod tools;

pub use crate::core::{
    geodesy, Feature, FeatureAttributes, FeatureCategory, FeatureId, FeatureStore, GeoPoint,
    Geometry, MarkerKind, Priority, SearchAreaParams, SearchAreaStatus,
};
pub use error::{EngineError, ValidationError, Violation};
pub use generators::{
    generate_bearing_line, generate_rings, generate_sector, segment_count_for_radius, BearingLine,
    RingPolygon, RingSpec, SectorPolygon,
};
pub use host::{
    ConfigField, ConfigFieldKind, ConfigProvider, ConfigRequest, ConfigResponse, FieldValue,
    PersistRecord, PersistenceSink, PreviewSink, ScreenTransform,
};
pub use lpb::LpbTable;
pub use shared::EngineOptions;
pub use tools::{
    apply_tool_outcome, BearingTool, CollectStep, MarkerTool, PathKind, PathTool, PreviewGeometry,
    RangeRingTool, SearchTool, SectorTool, TextLabelTool, ToolAction, ToolContext, ToolOutcome,
    ToolRegistry, ToolState,
};
