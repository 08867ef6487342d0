//! Vehicle reference data: the catalog's node and edge types.
//!
//! Vehicles are immutable once a catalog is loaded. Presentation order
//! (rank, battle rating, name) is shared by listings, folder sibling
//! order and cascade breakdowns, so it lives here next to the type.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest research rank.
pub const MIN_RANK: u8 = 1;
/// Highest research rank.
pub const MAX_RANK: u8 = 8;

pub const CLASS_ARMY: &str = "army";
pub const CLASS_HELICOPTER: &str = "helicopter";
pub const CLASS_AVIATION: &str = "aviation";
pub const CLASS_COASTAL: &str = "coastal";
pub const CLASS_BLUEWATER: &str = "bluewater";

/// All valid vehicle class names.
pub const VALID_CLASSES: &[&str] = &[
    CLASS_ARMY,
    CLASS_HELICOPTER,
    CLASS_AVIATION,
    CLASS_COASTAL,
    CLASS_BLUEWATER,
];

pub const TYPE_TREE: &str = "tree";
pub const TYPE_PREMIUM: &str = "premium";
pub const TYPE_COLLECTOR: &str = "collector";

/// All valid vehicle type tags.
pub const VALID_TYPES: &[&str] = &[TYPE_TREE, TYPE_PREMIUM, TYPE_COLLECTOR];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Research tree branch a vehicle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Army,
    Helicopter,
    Aviation,
    Coastal,
    Bluewater,
}

impl VehicleClass {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            CLASS_ARMY => Ok(Self::Army),
            CLASS_HELICOPTER => Ok(Self::Helicopter),
            CLASS_AVIATION => Ok(Self::Aviation),
            CLASS_COASTAL => Ok(Self::Coastal),
            CLASS_BLUEWATER => Ok(Self::Bluewater),
            _ => Err(CoreError::Validation(format!(
                "Invalid vehicle class '{s}'. Must be one of: {}",
                VALID_CLASSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Army => CLASS_ARMY,
            Self::Helicopter => CLASS_HELICOPTER,
            Self::Aviation => CLASS_AVIATION,
            Self::Coastal => CLASS_COASTAL,
            Self::Bluewater => CLASS_BLUEWATER,
        }
    }
}

/// How a vehicle is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Researched with RP along the tree.
    #[default]
    Tree,
    /// Bought with premium currency.
    Premium,
    /// Collector/event vehicle, not researchable.
    Collector,
}

impl VehicleType {
    /// Parse a type tag. Matching is case-insensitive.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            TYPE_TREE => Ok(Self::Tree),
            TYPE_PREMIUM => Ok(Self::Premium),
            TYPE_COLLECTOR => Ok(Self::Collector),
            _ => Err(CoreError::Validation(format!(
                "Invalid vehicle type '{s}'. Must be one of: {}",
                VALID_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tree => TYPE_TREE,
            Self::Premium => TYPE_PREMIUM,
            Self::Collector => TYPE_COLLECTOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Battle ratings
// ---------------------------------------------------------------------------

/// Matchmaking tier per game mode. Any of them may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleRatings {
    #[serde(default)]
    pub br_ab: Option<f64>,
    #[serde(default)]
    pub br_rb: Option<f64>,
    #[serde(default)]
    pub br_sb: Option<f64>,
}

impl BattleRatings {
    /// Single rating used for ordering: RB, then AB, then SB, then 0.
    pub fn sort_value(&self) -> f64 {
        self.br_rb.or(self.br_ab).or(self.br_sb).unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Vehicle / edge
// ---------------------------------------------------------------------------

/// A vehicle in the research catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: DbId,
    pub name: String,
    /// Nation slug, e.g. `"usa"`.
    pub nation: String,
    pub class: VehicleClass,
    pub rank: u8,
    #[serde(rename = "type", default)]
    pub vehicle_type: VehicleType,
    #[serde(flatten)]
    pub battle_ratings: BattleRatings,
    /// Research cost. `None` for vehicles that cannot be researched.
    #[serde(default)]
    pub rp_cost: Option<i64>,
    /// Golden eagle price. Set for premium vehicles.
    #[serde(default)]
    pub ge_cost: Option<i64>,
    /// Parent vehicle when this one is a variant nested in a folder.
    #[serde(default)]
    pub folder_of: Option<DbId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
}

impl Vehicle {
    /// Order by rank, coalesced battle rating, then name.
    pub fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| {
                self.battle_ratings
                    .sort_value()
                    .total_cmp(&other.battle_ratings.sort_value())
            })
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Directed unlock relation: `child_id` needs `parent_id` researched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleEdge {
    pub parent_id: DbId,
    pub child_id: DbId,
    /// RP needed to unlock the child through this edge, when it differs
    /// from the child's own `rp_cost`.
    #[serde(default)]
    pub unlock_rp: Option<i64>,
}

/// Validate that a rank is within `[MIN_RANK, MAX_RANK]`.
pub fn validate_rank(rank: i64) -> Result<u8, CoreError> {
    if !(MIN_RANK as i64..=MAX_RANK as i64).contains(&rank) {
        return Err(CoreError::Validation(format!(
            "Rank must be between {MIN_RANK} and {MAX_RANK}, got {rank}"
        )));
    }
    Ok(rank as u8)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
