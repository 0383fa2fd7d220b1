//! Static registry of the seven map stations and their artifacts.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::TOPIC_COUNT;

/// Proportion concept taught at a station. Selects the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "prop_direct_fruit")]
    DirectProportion,
    #[serde(rename = "ratio_share")]
    RatioShare,
    #[serde(rename = "recipe_ratio")]
    RecipeRatio,
    #[serde(rename = "prop_table_fill")]
    TableFill,
    #[serde(rename = "map_scale")]
    MapScale,
    #[serde(rename = "speed_distance")]
    SpeedDistance,
    #[serde(rename = "prop_inverse_workers")]
    InverseWorkers,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::DirectProportion,
        Self::RatioShare,
        Self::RecipeRatio,
        Self::TableFill,
        Self::MapScale,
        Self::SpeedDistance,
        Self::InverseWorkers,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectProportion => "prop_direct_fruit",
            Self::RatioShare => "ratio_share",
            Self::RecipeRatio => "recipe_ratio",
            Self::TableFill => "prop_table_fill",
            Self::MapScale => "map_scale",
            Self::SpeedDistance => "speed_distance",
            Self::InverseWorkers => "prop_inverse_workers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collectible reward bound to exactly one topic. `id` equals the topic id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub id: u8,
    pub name: &'static str,
    pub desc: &'static str,
    pub rule: &'static str,
    pub icon: &'static str,
}

/// A station on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: u8,
    pub title: &'static str,
    pub category: Category,
    /// Map position in percent of the map width/height.
    pub x: u8,
    pub y: u8,
    pub theme: &'static str,
    pub artifact: Artifact,
}

pub static TOPICS: [Topic; TOPIC_COUNT as usize] = [
    Topic {
        id: 1,
        title: "Market",
        category: Category::DirectProportion,
        x: 15,
        y: 75,
        theme: "market",
        artifact: Artifact {
            id: 1,
            name: "Merchant's Scale",
            desc: "Weighs the value of things.",
            rule: "Direct proportion: y = k·x",
            icon: "scale",
        },
    },
    Topic {
        id: 2,
        title: "Treasury",
        category: Category::RatioShare,
        x: 35,
        y: 60,
        theme: "treasury",
        artifact: Artifact {
            id: 2,
            name: "Royal Gold Coin",
            desc: "A symbol of fair sharing.",
            rule: "Sharing: add up the parts, then divide the total.",
            icon: "coins",
        },
    },
    Topic {
        id: 3,
        title: "Tower",
        category: Category::RecipeRatio,
        x: 25,
        y: 35,
        theme: "tower",
        artifact: Artifact {
            id: 3,
            name: "Magic Elixir",
            desc: "A perfect blend of ingredients.",
            rule: "Recipes: the ratio (a:b) must stay the same.",
            icon: "flask",
        },
    },
    Topic {
        id: 4,
        title: "Library",
        category: Category::TableFill,
        x: 55,
        y: 25,
        theme: "library",
        artifact: Artifact {
            id: 4,
            name: "Ancient Scroll",
            desc: "Tables full of data.",
            rule: "Tables: the coefficient k = y/x is constant.",
            icon: "scroll",
        },
    },
    Topic {
        id: 5,
        title: "Cartography",
        category: Category::MapScale,
        x: 80,
        y: 30,
        theme: "cartography",
        artifact: Artifact {
            id: 5,
            name: "Golden Compass",
            desc: "Points the way on the map.",
            rule: "Scale: 1 cm on the map = n cm in reality.",
            icon: "compass",
        },
    },
    Topic {
        id: 6,
        title: "Canyon",
        category: Category::SpeedDistance,
        x: 85,
        y: 60,
        theme: "canyon",
        artifact: Artifact {
            id: 6,
            name: "Winged Boot",
            desc: "The speed of travel.",
            rule: "Speed: v = S / t (distance divided by time).",
            icon: "wing",
        },
    },
    Topic {
        id: 7,
        title: "Pyramid",
        category: Category::InverseWorkers,
        x: 60,
        y: 80,
        theme: "pyramid",
        artifact: Artifact {
            id: 7,
            name: "Master's Hammer",
            desc: "A tool for building.",
            rule: "Inverse: workers · days = constant.",
            icon: "hammer",
        },
    },
];

/// Look up a topic by its id (1-based).
#[must_use]
pub fn topic(id: u8) -> Option<&'static Topic> {
    let index = usize::from(id.checked_sub(1)?);
    TOPICS.get(index)
}

/// Look up an artifact by its id, which is also its topic's id.
#[must_use]
pub fn artifact(id: u8) -> Option<&'static Artifact> {
    topic(id).map(|t| &t.artifact)
}

#[must_use]
pub fn is_final_topic(id: u8) -> bool {
    id == TOPIC_COUNT
}
