use crate::anchor::{find_anchor, AnchorPoint, Plane};

use super::result::{PlacementError, PlacementResult};

/// Scale multiplier applied to the fit-to-image scale when no anchor is found.
pub const FALLBACK_SCALE: f64 = 0.3;

/// Anchor label the faucet layout sits above.
const FAUCET_SINK_LABEL: &str = "sink";
/// Faucet center offset above the sink center, in sink heights.
const FAUCET_SINK_OFFSET: f64 = 0.6;

/// Pixel extent of an asset or scene. Both sides are positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    width: f64,
    height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Result<Self, PlacementError> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PlacementError::InvalidExtent { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// How a policy turns anchors into a transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Snap to the resolved anchor, or center in the image when none exists.
    Anchored,
    /// Anchored, then lift the center above the best `sink` anchor.
    FaucetOverSink,
    /// Full-surface material change. Anchors are ignored; the product is
    /// centered horizontally at `y_fraction` of the image height at scale 1.
    FixedSurface { y_fraction: f64 },
}

/// Category placement rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPolicy {
    /// Registry key.
    pub category: &'static str,
    /// Default anchor label to snap to. Empty means no default target.
    pub snap_to: &'static str,
    pub align_plane: Plane,
    pub shadow_plane: Plane,
    pub default_z_order: i32,
    /// Multiplier applied after anchor-relative fit scaling.
    pub scale_factor: f64,
    pub layout: Layout,
}

impl PlacementPolicy {
    /// Policy used for categories without specialized rules.
    pub const GENERIC: PlacementPolicy = PlacementPolicy {
        category: "",
        snap_to: "",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Floor,
        default_z_order: 5,
        scale_factor: 1.0,
        layout: Layout::Anchored,
    };

    /// Anchor label this policy targets for a request.
    ///
    /// An explicit non-empty override wins over `snap_to`.
    pub fn target_label<'a>(&'a self, target_anchor_label: Option<&'a str>) -> &'a str {
        match target_anchor_label {
            Some(label) if !label.is_empty() => label,
            _ => self.snap_to,
        }
    }

    /// Compute the placement transform.
    pub fn compute(
        &self,
        anchors: &[AnchorPoint],
        asset: Extent,
        image: Extent,
        target_anchor_label: Option<&str>,
    ) -> PlacementResult {
        match self.layout {
            Layout::Anchored => self.compute_anchored(anchors, asset, image, target_anchor_label),
            Layout::FaucetOverSink => {
                let mut result =
                    self.compute_anchored(anchors, asset, image, target_anchor_label);
                if let Some(sink) = find_anchor(anchors, FAUCET_SINK_LABEL) {
                    result.y = sink.y - sink.height * FAUCET_SINK_OFFSET;
                }
                result
            }
            Layout::FixedSurface { y_fraction } => PlacementResult {
                x: image.width / 2.0,
                y: image.height * y_fraction,
                scale: 1.0,
                rotation: 0.0,
                z_order: self.default_z_order,
                shadow_plane: self.shadow_plane,
                occlusion_mask: None,
            },
        }
    }

    fn compute_anchored(
        &self,
        anchors: &[AnchorPoint],
        asset: Extent,
        image: Extent,
        target_anchor_label: Option<&str>,
    ) -> PlacementResult {
        let label = self.target_label(target_anchor_label);
        let anchor = find_anchor(anchors, label).filter(|anchor| {
            let usable = anchor.has_extent();
            if !usable {
                log::debug!(
                    "anchor '{}' has an empty bounding box; ignoring it",
                    anchor.label
                );
            }
            usable
        });

        let (x, y, scale) = match anchor {
            Some(anchor) => {
                let fit = (anchor.width / asset.width).min(anchor.height / asset.height);
                (anchor.x, anchor.y, fit * self.scale_factor)
            }
            None => {
                log::debug!(
                    "no '{}' anchor for category '{}'; centering in image",
                    label,
                    self.category
                );
                let (cx, cy) = image.center();
                let fit = (image.width / asset.width).min(image.height / asset.height);
                (cx, cy, fit * FALLBACK_SCALE)
            }
        };

        PlacementResult {
            x,
            y,
            scale,
            rotation: 0.0,
            z_order: self.default_z_order,
            shadow_plane: self.shadow_plane,
            occlusion_mask: None,
        }
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::GENERIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(width: f64, height: f64) -> Extent {
        Extent::new(width, height).expect("valid extent")
    }

    fn sink(x: f64, y: f64, width: f64, height: f64, confidence: f64) -> AnchorPoint {
        AnchorPoint {
            id: String::new(),
            label: "sink".to_string(),
            x,
            y,
            width,
            height,
            confidence,
            plane: Plane::Countertop,
        }
    }

    const FAUCET: PlacementPolicy = PlacementPolicy {
        category: "faucets",
        snap_to: "sink",
        align_plane: Plane::Countertop,
        shadow_plane: Plane::Countertop,
        default_z_order: 6,
        scale_factor: 0.6,
        layout: Layout::FaucetOverSink,
    };

    #[test]
    fn anchored_fits_within_anchor_box() {
        let policy = PlacementPolicy {
            scale_factor: 1.0,
            snap_to: "sink",
            ..PlacementPolicy::GENERIC
        };
        let anchors = vec![sink(300.0, 250.0, 100.0, 50.0, 0.9)];
        let result = policy.compute(
            &anchors,
            ext(200.0, 200.0),
            ext(800.0, 600.0),
            None,
        );
        assert_eq!((result.x, result.y), (300.0, 250.0));
        assert!((result.scale - 0.25).abs() < 1e-12);
        assert_eq!(result.rotation, 0.0);
        assert_eq!(result.z_order, 5);
        assert_eq!(result.shadow_plane, Plane::Floor);
        assert!(result.occlusion_mask.is_none());
    }

    #[test]
    fn generic_without_target_centers_in_image() {
        let anchors = vec![sink(300.0, 250.0, 100.0, 50.0, 0.9)];
        let result = PlacementPolicy::GENERIC.compute(
            &anchors,
            ext(100.0, 50.0),
            ext(1000.0, 800.0),
            None,
        );
        assert_eq!((result.x, result.y), (500.0, 400.0));
        assert_eq!(result.scale, (10.0f64).min(16.0) * FALLBACK_SCALE);
    }

    #[test]
    fn explicit_target_overrides_snap_to() {
        let mut mirror = sink(50.0, 60.0, 20.0, 20.0, 0.5);
        mirror.label = "mirror".to_string();
        let anchors = vec![sink(300.0, 250.0, 100.0, 50.0, 0.9), mirror];
        let result = FAUCET.compute_anchored(
            &anchors,
            ext(10.0, 10.0),
            ext(800.0, 600.0),
            Some("mirror"),
        );
        assert_eq!((result.x, result.y), (50.0, 60.0));
    }

    #[test]
    fn empty_target_override_falls_back_to_snap_to() {
        assert_eq!(FAUCET.target_label(Some("")), "sink");
        assert_eq!(FAUCET.target_label(None), "sink");
        assert_eq!(FAUCET.target_label(Some("vanity")), "vanity");
    }

    #[test]
    fn faucet_sits_above_sink() {
        let anchors = vec![sink(100.0, 200.0, 40.0, 20.0, 0.9)];
        let result = FAUCET.compute(
            &anchors,
            ext(20.0, 20.0),
            ext(800.0, 600.0),
            None,
        );
        assert_eq!(result.x, 100.0);
        assert!((result.y - 188.0).abs() < 1e-9);
        assert!((result.scale - 0.6).abs() < 1e-12);
        assert_eq!(result.z_order, 6);
    }

    #[test]
    fn faucet_offset_uses_sink_even_when_targeting_elsewhere() {
        let anchors = vec![sink(100.0, 200.0, 40.0, 20.0, 0.9)];
        let result = FAUCET.compute(
            &anchors,
            ext(20.0, 20.0),
            ext(800.0, 600.0),
            Some("vanity"),
        );
        // No vanity: generic fallback x, sink-relative y.
        assert_eq!(result.x, 400.0);
        assert!((result.y - 188.0).abs() < 1e-9);
        assert!((result.scale - 40.0f64.min(30.0) * FALLBACK_SCALE).abs() < 1e-12);
    }

    #[test]
    fn faucet_without_sink_keeps_fallback() {
        let result = FAUCET.compute(&[], ext(20.0, 20.0), ext(800.0, 600.0), None);
        assert_eq!((result.x, result.y), (400.0, 300.0));
    }

    #[test]
    fn degenerate_anchor_box_falls_back() {
        let anchors = vec![sink(100.0, 200.0, 0.0, 20.0, 0.9)];
        let policy = PlacementPolicy {
            snap_to: "sink",
            ..PlacementPolicy::GENERIC
        };
        let result = policy.compute(
            &anchors,
            ext(20.0, 20.0),
            ext(800.0, 600.0),
            None,
        );
        assert_eq!((result.x, result.y), (400.0, 300.0));
        assert!(result.scale > 0.0);
    }

    #[test]
    fn fixed_surface_ignores_anchors() {
        let policy = PlacementPolicy {
            category: "backsplash",
            shadow_plane: Plane::Wall,
            default_z_order: 1,
            layout: Layout::FixedSurface { y_fraction: 0.38 },
            ..PlacementPolicy::GENERIC
        };
        let anchors = vec![sink(1.0, 2.0, 3.0, 4.0, 1.0)];
        let with = policy.compute(&anchors, ext(5.0, 5.0), ext(1000.0, 500.0), None);
        let without = policy.compute(&[], ext(5.0, 5.0), ext(1000.0, 500.0), None);
        assert_eq!(with, without);
        assert_eq!(with.x, 500.0);
        assert!((with.y - 190.0).abs() < 1e-9);
        assert_eq!(with.scale, 1.0);
        assert_eq!(with.z_order, 1);
        assert_eq!(with.shadow_plane, Plane::Wall);
    }

    #[test]
    fn extent_rejects_empty_or_non_finite_sides() {
        for (width, height) in [
            (0.0, 20.0),
            (20.0, 0.0),
            (0.0, 0.0),
            (-5.0, 10.0),
            (f64::INFINITY, 10.0),
            (10.0, f64::NAN),
        ] {
            match Extent::new(width, height) {
                Err(PlacementError::InvalidExtent { .. }) => {}
                other => panic!("expected invalid extent for {width}x{height}, got {other:?}"),
            }
        }
        let extent = ext(800.0, 600.0);
        assert_eq!((extent.width(), extent.height()), (800.0, 600.0));
        assert_eq!(extent.center(), (400.0, 300.0));
    }

    #[test]
    fn every_layout_yields_finite_positive_scale() {
        let anchors = vec![sink(100.0, 200.0, 40.0, 20.0, 0.9)];
        let layouts = [
            Layout::Anchored,
            Layout::FaucetOverSink,
            Layout::FixedSurface { y_fraction: 0.5 },
        ];
        for layout in layouts {
            let policy = PlacementPolicy {
                snap_to: "sink",
                scale_factor: 0.6,
                layout,
                ..PlacementPolicy::GENERIC
            };
            for asset in [ext(1.0, 20.0), ext(20.0, 1.0), ext(1e-6, 1e6)] {
                let with = policy.compute(&anchors, asset, ext(800.0, 600.0), None);
                let without = policy.compute(&[], asset, ext(800.0, 600.0), None);
                for result in [with, without] {
                    assert!(result.scale.is_finite() && result.scale > 0.0, "{layout:?}");
                }
            }
        }
    }
}
