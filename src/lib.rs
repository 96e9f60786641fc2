//! LuxePlan vision backend.
//!
//! This crate turns a room photograph's scene analysis into placement
//! transforms for product cutouts in an interior-design visualizer.
//!
//! # Architecture
//!
//! - `anchor`: detected scene features and best-anchor resolution
//! - `placement`: category policy registry and the placement engine
//! - `vision`: scene analyzer seam, fixed-output stand-in, plane inference,
//!   room classification
//! - `config`: service configuration (file + environment)
//! - `api`: HTTP service exposing placement
//! - `cli`: command-line entry point
//!
//! Placement is a pure computation. The policy registry is built once and
//! only read afterwards, so one engine can be shared across threads.

pub mod anchor;
pub mod api;
pub mod cli;
pub mod config;
pub mod placement;
pub mod vision;

pub use anchor::{find_anchor, AnchorPoint, Plane};
pub use placement::{
    compute_placement, Extent, Layout, PlacementEngine, PlacementError, PlacementPolicy,
    PlacementRequest, PlacementResult, PolicyRegistry, FALLBACK_SCALE,
};
pub use vision::{
    analyze_dimensions, analyze_image, classify_room, infer_planes, PlaneInfo, RoomType,
    SceneAnalysis, SceneAnalyzer, SegmentationMask, StubAnalyzer,
};
