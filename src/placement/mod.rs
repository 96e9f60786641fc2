//! Category-driven product placement.
//!
//! A request names a product category; the [`PolicyRegistry`] maps it to a
//! [`PlacementPolicy`], and the policy turns the scene anchors and pixel
//! dimensions into a [`PlacementResult`]. Unknown categories and missing
//! anchors are expected outcomes and degrade to an image-centered placement.
//! Only non-positive dimensions are reported as errors.

mod engine;
mod policy;
mod registry;
mod result;

pub use engine::{compute_placement, PlacementEngine};
pub use policy::{Extent, Layout, PlacementPolicy, FALLBACK_SCALE};
pub use registry::PolicyRegistry;
pub use result::{PlacementError, PlacementRequest, PlacementResult};
