use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPoint;

const KITCHEN_LABELS: [&str; 5] = ["stove", "fridge", "oven", "dishwasher", "range_hood"];
const BATHROOM_LABELS: [&str; 4] = ["toilet", "bathtub", "shower_head", "vanity"];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Kitchen,
    Bathroom,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the room from the distinct fixture labels detected in it.
///
/// Bathroom wins only with strictly more distinct bathroom fixtures than
/// kitchen fixtures; ties, including an empty scene, are kitchens.
pub fn classify_room(anchors: &[AnchorPoint]) -> RoomType {
    let labels: HashSet<&str> = anchors.iter().map(|a| a.label.as_str()).collect();
    let kitchen = KITCHEN_LABELS.iter().filter(|l| labels.contains(*l)).count();
    let bathroom = BATHROOM_LABELS.iter().filter(|l| labels.contains(*l)).count();
    if bathroom > kitchen {
        RoomType::Bathroom
    } else {
        RoomType::Kitchen
    }
}
