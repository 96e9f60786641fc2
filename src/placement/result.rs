use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorPoint, Plane};

/// Input to the placement engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlacementRequest {
    /// Product category key, e.g. `faucets`.
    pub category: String,
    /// Pixel dimensions of the product cutout.
    pub asset_width: i64,
    pub asset_height: i64,
    #[serde(default)]
    pub anchors: Vec<AnchorPoint>,
    /// Depth reference from scene analysis. Carried for wire compatibility only.
    #[serde(default)]
    pub depth_map_url: Option<String>,
    /// Pixel dimensions of the scene photograph.
    pub image_width: i64,
    pub image_height: i64,
    /// Overrides the policy's default snap target.
    #[serde(default)]
    pub target_anchor_label: Option<String>,
}

/// Placement transform for a product cutout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlacementResult {
    /// Placement center in scene pixel space.
    pub x: f64,
    pub y: f64,
    /// Uniform scale applied to the asset.
    pub scale: f64,
    /// Degrees. Always 0 until perspective correction exists.
    pub rotation: f64,
    /// Stacking priority; lower paints first.
    pub z_order: i32,
    /// Plane whose lighting model drives the contact shadow.
    pub shadow_plane: Plane,
    /// Reference to a mask of scene content rendered in front of the product.
    #[serde(default)]
    pub occlusion_mask: Option<String>,
}

/// Caller contract violations reported by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementError {
    /// An asset or image dimension was zero or negative.
    InvalidDimensions { field: &'static str, value: i64 },
    /// An extent side was zero, negative, or not finite.
    InvalidExtent { width: f64, height: f64 },
}

impl PlacementError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            PlacementError::InvalidDimensions { .. } | PlacementError::InvalidExtent { .. } => {
                "invalid_dimensions"
            }
        }
    }
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::InvalidDimensions { field, value } => {
                write!(f, "{}: {} must be positive, got {}", self.code(), field, value)
            }
            PlacementError::InvalidExtent { width, height } => write!(
                f,
                "{}: extent must be positive and finite, got {}x{}",
                self.code(),
                width,
                height
            ),
        }
    }
}

impl std::error::Error for PlacementError {}
