use serde::{Deserialize, Serialize};

use crate::anchor::Plane;

use super::analyzer::SegmentationMask;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A planar surface inferred from segmentation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlaneInfo {
    pub label: Plane,
    /// Unit normal `[x, y, z]` in camera space.
    pub normal: [f64; 3],
    /// Signed distance from the camera, in meters.
    pub distance: f64,
    pub bounds: Bounds,
}

/// Fixed plane geometry: normal, signed distance, and the vertical band
/// (start, extent) as fractions of image height.
fn plane_model(plane: Plane) -> ([f64; 3], f64, f64, f64) {
    match plane {
        Plane::Wall => ([0.0, 0.0, 1.0], 1.0, 0.0, 0.6),
        Plane::Floor => ([0.0, 1.0, 0.0], 0.0, 0.65, 0.35),
        Plane::Countertop => ([0.0, 1.0, 0.0], 0.85, 0.4, 0.15),
        Plane::Ceiling => ([0.0, -1.0, 0.0], 2.4, 0.0, 0.1),
    }
}

/// Infer planar surfaces from segmentation masks.
///
/// Emits at most one plane per surface label, in wall, floor, countertop,
/// ceiling order, and only for labels present in `segments`. Bounds are
/// fixed bands of the image, not the segment polygon.
pub fn infer_planes(segments: &[SegmentationMask], width: u32, height: u32) -> Vec<PlaneInfo> {
    Plane::ALL
        .into_iter()
        .filter(|plane| segments.iter().any(|segment| segment.label == plane.as_str()))
        .map(|plane| {
            let (normal, distance, top, extent) = plane_model(plane);
            PlaneInfo {
                label: plane,
                normal,
                distance,
                bounds: Bounds {
                    x: 0,
                    y: fraction_of(height, top),
                    width,
                    height: fraction_of(height, extent),
                },
            }
        })
        .collect()
}

/// Truncating fraction of a pixel length.
fn fraction_of(length: u32, fraction: f64) -> u32 {
    (f64::from(length) * fraction) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(label: &str) -> SegmentationMask {
        SegmentationMask {
            label: label.to_string(),
            mask_url: format!("/api/masks/test/{label}.png"),
            polygon: vec![],
            area: 0.0,
        }
    }

    #[test]
    fn emits_planes_in_fixed_order() {
        let segments = vec![
            segment("ceiling"),
            segment("countertop"),
            segment("backsplash"),
            segment("floor"),
            segment("wall"),
        ];
        let planes = infer_planes(&segments, 1000, 800);
        let labels: Vec<Plane> = planes.iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            vec![Plane::Wall, Plane::Floor, Plane::Countertop, Plane::Ceiling]
        );

        assert_eq!(planes[0].bounds, Bounds { x: 0, y: 0, width: 1000, height: 480 });
        assert_eq!(planes[1].bounds, Bounds { x: 0, y: 520, width: 1000, height: 280 });
        assert_eq!(planes[2].bounds, Bounds { x: 0, y: 320, width: 1000, height: 120 });
        assert_eq!(planes[3].bounds, Bounds { x: 0, y: 0, width: 1000, height: 80 });
        assert_eq!(planes[3].normal, [0.0, -1.0, 0.0]);
        assert_eq!(planes[2].distance, 0.85);
    }

    #[test]
    fn skips_absent_labels() {
        let planes = infer_planes(&[segment("floor"), segment("cabinet_faces")], 640, 480);
        assert_eq!(planes.len(), 1);
        assert_eq!(planes[0].label, Plane::Floor);
        assert_eq!(planes[0].distance, 0.0);
        assert!(infer_planes(&[], 640, 480).is_empty());
    }

    #[test]
    fn duplicate_segments_emit_one_plane() {
        let planes = infer_planes(&[segment("wall"), segment("wall")], 640, 480);
        assert_eq!(planes.len(), 1);
    }

    #[test]
    fn bounds_truncate_fractional_pixels() {
        let planes = infer_planes(&[segment("wall"), segment("floor")], 101, 101);
        assert_eq!(planes[0].bounds.height, 60);
        assert_eq!(planes[1].bounds.y, 65);
        assert_eq!(planes[1].bounds.height, 35);
    }
}
