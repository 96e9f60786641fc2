use std::sync::OnceLock;

use crate::anchor::AnchorPoint;

use super::policy::Extent;
use super::registry::PolicyRegistry;
use super::result::{PlacementError, PlacementRequest, PlacementResult};

/// Routes placement requests to category policies.
///
/// Stateless apart from its read-only registry; a single engine can serve any
/// number of concurrent callers through `&self`.
#[derive(Clone, Debug, Default)]
pub struct PlacementEngine {
    registry: PolicyRegistry,
}

impl PlacementEngine {
    /// Engine backed by the built-in category policies.
    pub fn new() -> Self {
        Self::with_registry(PolicyRegistry::builtin())
    }

    pub fn with_registry(registry: PolicyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Compute the placement transform for a request.
    pub fn compute(&self, request: &PlacementRequest) -> Result<PlacementResult, PlacementError> {
        self.place(
            &request.category,
            request.asset_width,
            request.asset_height,
            &request.anchors,
            request.image_width,
            request.image_height,
            request.target_anchor_label.as_deref(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &self,
        category: &str,
        asset_width: i64,
        asset_height: i64,
        anchors: &[AnchorPoint],
        image_width: i64,
        image_height: i64,
        target_anchor_label: Option<&str>,
    ) -> Result<PlacementResult, PlacementError> {
        let asset = Extent::new(
            positive("asset_width", asset_width)?,
            positive("asset_height", asset_height)?,
        )?;
        let image = Extent::new(
            positive("image_width", image_width)?,
            positive("image_height", image_height)?,
        )?;
        let policy = self.registry.policy_for(category);
        log::debug!(
            "placing category '{}' ({} anchors) on {}x{} image",
            category,
            anchors.len(),
            image_width,
            image_height
        );
        Ok(policy.compute(anchors, asset, image, target_anchor_label))
    }
}

/// Compute a placement with the built-in policies.
///
/// Zero or negative dimensions are rejected with
/// [`PlacementError::InvalidDimensions`]; unknown categories and missing
/// anchors degrade to the generic image-centered placement.
pub fn compute_placement(
    category: &str,
    asset_width: i64,
    asset_height: i64,
    anchors: &[AnchorPoint],
    image_width: i64,
    image_height: i64,
    target_anchor_label: Option<&str>,
) -> Result<PlacementResult, PlacementError> {
    static ENGINE: OnceLock<PlacementEngine> = OnceLock::new();
    ENGINE.get_or_init(PlacementEngine::new).place(
        category,
        asset_width,
        asset_height,
        anchors,
        image_width,
        image_height,
        target_anchor_label,
    )
}

fn positive(field: &'static str, value: i64) -> Result<f64, PlacementError> {
    if value <= 0 {
        return Err(PlacementError::InvalidDimensions { field, value });
    }
    Ok(value as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Plane;

    fn request(category: &str) -> PlacementRequest {
        PlacementRequest {
            category: category.to_string(),
            asset_width: 20,
            asset_height: 20,
            anchors: vec![],
            depth_map_url: None,
            image_width: 800,
            image_height: 600,
            target_anchor_label: None,
        }
    }

    #[test]
    fn rejects_each_non_positive_dimension() {
        let engine = PlacementEngine::new();
        let cases: [(&str, fn(&mut PlacementRequest)); 4] = [
            ("asset_width", |r| r.asset_width = 0),
            ("asset_height", |r| r.asset_height = -3),
            ("image_width", |r| r.image_width = 0),
            ("image_height", |r| r.image_height = -1),
        ];
        for (field, mutate) in cases {
            let mut req = request("faucets");
            mutate(&mut req);
            match engine.compute(&req) {
                Err(PlacementError::InvalidDimensions { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected invalid dimensions for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn fixed_surface_categories_still_validate_dimensions() {
        let engine = PlacementEngine::new();
        let mut req = request("flooring");
        req.asset_width = 0;
        assert!(engine.compute(&req).is_err());
    }

    #[test]
    fn unknown_category_matches_generic_policy() {
        let engine = PlacementEngine::new();
        let mut req = request("wallpaper");
        req.anchors = vec![AnchorPoint {
            id: "a1".to_string(),
            label: "sink".to_string(),
            x: 100.0,
            y: 200.0,
            width: 40.0,
            height: 20.0,
            confidence: 0.9,
            plane: Plane::Countertop,
        }];
        let result = engine.compute(&req).expect("placement");
        let generic = crate::placement::PlacementPolicy::GENERIC.compute(
            &req.anchors,
            Extent::new(20.0, 20.0).unwrap(),
            Extent::new(800.0, 600.0).unwrap(),
            None,
        );
        assert_eq!(result, generic);
        assert_eq!((result.x, result.y), (400.0, 300.0));
        assert_eq!(result.z_order, 5);
        assert_eq!(result.shadow_plane, Plane::Floor);
    }

    #[test]
    fn free_function_uses_builtin_policies() {
        let result = compute_placement("lighting", 10, 10, &[], 1000, 800, None).unwrap();
        assert_eq!(result.z_order, 8);
        assert_eq!(result.shadow_plane, Plane::Ceiling);
        assert_eq!(result.scale, 80.0 * 0.3);
    }
}
