use std::collections::HashMap;

use crate::anchor::Plane;

use super::policy::{Layout, PlacementPolicy};

/// Built-in category policies.
const BUILTIN_POLICIES: [PlacementPolicy; 15] = [
    PlacementPolicy {
        category: "faucets",
        snap_to: "sink",
        align_plane: Plane::Countertop,
        shadow_plane: Plane::Countertop,
        default_z_order: 6,
        scale_factor: 0.6,
        layout: Layout::FaucetOverSink,
    },
    PlacementPolicy {
        category: "sinks",
        snap_to: "sink",
        align_plane: Plane::Countertop,
        shadow_plane: Plane::Countertop,
        default_z_order: 4,
        scale_factor: 0.9,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "countertops",
        snap_to: "sink",
        align_plane: Plane::Countertop,
        shadow_plane: Plane::Countertop,
        default_z_order: 2,
        scale_factor: 1.0,
        layout: Layout::FixedSurface { y_fraction: 0.5 },
    },
    PlacementPolicy {
        category: "cabinets",
        snap_to: "cabinet_run",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Wall,
        default_z_order: 1,
        scale_factor: 1.0,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "backsplash",
        snap_to: "",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Wall,
        default_z_order: 1,
        scale_factor: 1.0,
        layout: Layout::FixedSurface { y_fraction: 0.38 },
    },
    PlacementPolicy {
        category: "flooring",
        snap_to: "",
        align_plane: Plane::Floor,
        shadow_plane: Plane::Floor,
        default_z_order: 0,
        scale_factor: 1.0,
        layout: Layout::FixedSurface { y_fraction: 0.8 },
    },
    PlacementPolicy {
        category: "lighting",
        snap_to: "lighting_fixture",
        align_plane: Plane::Ceiling,
        shadow_plane: Plane::Ceiling,
        default_z_order: 8,
        scale_factor: 0.8,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "mirrors",
        snap_to: "mirror",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Wall,
        default_z_order: 3,
        scale_factor: 1.0,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "hardware",
        snap_to: "cabinet_run",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Wall,
        default_z_order: 7,
        scale_factor: 0.15,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "appliances",
        snap_to: "stove",
        align_plane: Plane::Floor,
        shadow_plane: Plane::Floor,
        default_z_order: 3,
        scale_factor: 0.9,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "fixtures",
        ..PlacementPolicy::GENERIC
    },
    PlacementPolicy {
        category: "shower",
        snap_to: "shower_head",
        align_plane: Plane::Wall,
        shadow_plane: Plane::Wall,
        default_z_order: 5,
        scale_factor: 0.5,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "tub",
        snap_to: "bathtub",
        align_plane: Plane::Floor,
        shadow_plane: Plane::Floor,
        default_z_order: 3,
        scale_factor: 0.9,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "vanity",
        snap_to: "vanity",
        align_plane: Plane::Floor,
        shadow_plane: Plane::Floor,
        default_z_order: 3,
        scale_factor: 0.9,
        layout: Layout::Anchored,
    },
    PlacementPolicy {
        category: "toilet",
        snap_to: "toilet",
        align_plane: Plane::Floor,
        shadow_plane: Plane::Floor,
        default_z_order: 3,
        scale_factor: 0.8,
        layout: Layout::Anchored,
    },
];

/// Category-to-policy table.
///
/// Built once and read-only afterwards; lookups never fail because unknown
/// categories resolve to the generic policy.
#[derive(Clone, Debug)]
pub struct PolicyRegistry {
    policies: HashMap<String, PlacementPolicy>,
    fallback: PlacementPolicy,
}

impl PolicyRegistry {
    /// Empty registry; every category resolves to the generic policy.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
            fallback: PlacementPolicy::GENERIC,
        }
    }

    /// Registry holding the built-in kitchen and bath categories.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for policy in BUILTIN_POLICIES {
            registry.register(policy);
        }
        registry
    }

    /// Register a policy under its category. Replaces any previous entry.
    pub fn register(&mut self, policy: PlacementPolicy) {
        self.policies.insert(policy.category.to_string(), policy);
    }

    /// Policy registered for `category`, if any.
    pub fn get(&self, category: &str) -> Option<&PlacementPolicy> {
        self.policies.get(category)
    }

    /// Policy for `category`, or the generic policy for unknown categories.
    pub fn policy_for(&self, category: &str) -> &PlacementPolicy {
        match self.policies.get(category) {
            Some(policy) => policy,
            None => {
                log::debug!("unknown category '{}'; using generic policy", category);
                &self.fallback
            }
        }
    }

    /// Registered categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.policies.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
