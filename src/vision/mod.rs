//! Scene analysis.
//!
//! Segmentation, detection and depth estimation sit behind the
//! [`SceneAnalyzer`] trait. The only implementation shipped here is
//! [`StubAnalyzer`], a fixed-output stand-in that scales a canned kitchen
//! layout to the image. Plane inference and room classification run on top
//! of whatever the analyzer returns.
//!
//! Analysis MUST NOT:
//! - Modify or re-encode the input image
//! - Store the input image

mod analysis;
mod analyzer;
mod planes;
mod room;
mod stub;

pub use analysis::{analyze_dimensions, analyze_image, image_id_for, SceneAnalysis, MAX_IMAGE_BYTES};
pub use analyzer::{SceneAnalyzer, SceneFrame, SegmentationMask};
pub use planes::{infer_planes, Bounds, PlaneInfo};
pub use room::{classify_room, RoomType};
pub use stub::{StubAnalyzer, DETECTABLE_LABELS, ROOM_SEGMENT_LABELS};
