//! Immutable, indexed vehicle catalog.
//!
//! A [`Catalog`] is built once from vehicles and edges, validated, and then
//! only read. The API keeps it behind an `Arc` so a re-import can swap in a
//! new snapshot without any request seeing a half-built graph.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;
use crate::vehicle::{Vehicle, VehicleClass, VehicleEdge, VehicleType};

/// Filter for catalog listings. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub nation: Option<String>,
    pub class: Option<VehicleClass>,
    pub rank: Option<u8>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
}

impl VehicleFilter {
    pub fn matches(&self, v: &Vehicle) -> bool {
        self.nation
            .as_deref()
            .map_or(true, |n| v.nation.eq_ignore_ascii_case(n))
            && self.class.map_or(true, |c| v.class == c)
            && self.rank.map_or(true, |r| v.rank == r)
            && self.vehicle_type.map_or(true, |t| v.vehicle_type == t)
    }
}

/// Summary counts reported by health checks and imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub vehicles: usize,
    pub edges: usize,
    pub folders: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: HashMap<DbId, Vehicle>,
    edges: Vec<VehicleEdge>,
    /// child id -> parent ids from the edge table.
    parents_by_child: HashMap<DbId, BTreeSet<DbId>>,
    /// folder parent id -> variant ids in sibling order.
    variants_by_folder: HashMap<DbId, Vec<DbId>>,
}

impl Catalog {
    /// Validate and index vehicles and edges.
    ///
    /// Rejects duplicate vehicle ids, duplicate `(parent, child)` edges,
    /// self-edges, and references to vehicles that are not in the catalog.
    pub fn new(vehicles: Vec<Vehicle>, edges: Vec<VehicleEdge>) -> Result<Self, CoreError> {
        let mut by_id: HashMap<DbId, Vehicle> = HashMap::with_capacity(vehicles.len());
        for v in vehicles {
            if by_id.contains_key(&v.id) {
                return Err(CoreError::Conflict(format!(
                    "Duplicate vehicle id {}",
                    v.id
                )));
            }
            by_id.insert(v.id, v);
        }

        for v in by_id.values() {
            if let Some(folder) = v.folder_of {
                if folder == v.id {
                    return Err(CoreError::Validation(format!(
                        "Vehicle {} cannot be a variant of itself",
                        v.id
                    )));
                }
                if !by_id.contains_key(&folder) {
                    return Err(CoreError::Validation(format!(
                        "Vehicle {} references unknown folder parent {folder}",
                        v.id
                    )));
                }
            }
        }

        let mut seen: HashSet<(DbId, DbId)> = HashSet::with_capacity(edges.len());
        let mut parents_by_child: HashMap<DbId, BTreeSet<DbId>> = HashMap::new();
        for e in &edges {
            if e.parent_id == e.child_id {
                return Err(CoreError::Validation(format!(
                    "Edge {} -> {} points at itself",
                    e.parent_id, e.child_id
                )));
            }
            for id in [e.parent_id, e.child_id] {
                if !by_id.contains_key(&id) {
                    return Err(CoreError::Validation(format!(
                        "Edge {} -> {} references unknown vehicle {id}",
                        e.parent_id, e.child_id
                    )));
                }
            }
            if !seen.insert((e.parent_id, e.child_id)) {
                return Err(CoreError::Conflict(format!(
                    "Duplicate edge {} -> {}",
                    e.parent_id, e.child_id
                )));
            }
            parents_by_child
                .entry(e.child_id)
                .or_default()
                .insert(e.parent_id);
        }

        let mut variants_by_folder: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for v in by_id.values() {
            if let Some(folder) = v.folder_of {
                variants_by_folder.entry(folder).or_default().push(v.id);
            }
        }
        for ids in variants_by_folder.values_mut() {
            ids.sort_by(|a, b| by_id[a].presentation_cmp(&by_id[b]));
        }

        Ok(Self {
            vehicles: by_id,
            edges,
            parents_by_child,
            variants_by_folder,
        })
    }

    pub fn vehicle(&self, id: DbId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Look up a vehicle, failing with `NotFound` when it is absent.
    pub fn require_vehicle(&self, id: DbId) -> Result<&Vehicle, CoreError> {
        self.vehicle(id)
            .ok_or_else(|| CoreError::vehicle_not_found(id))
    }

    /// Parents of `child_id` from the edge table only.
    pub fn parents_of(&self, child_id: DbId) -> impl Iterator<Item = DbId> + '_ {
        self.parents_by_child
            .get(&child_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Variant ids nested under `folder_id`, in sibling order.
    pub fn variant_ids(&self, folder_id: DbId) -> &[DbId] {
        self.variants_by_folder
            .get(&folder_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edges(&self) -> &[VehicleEdge] {
        &self.edges
    }

    /// Vehicles matching `filter`, in presentation order.
    pub fn list(&self, filter: &VehicleFilter) -> Vec<&Vehicle> {
        let mut out: Vec<&Vehicle> = self
            .vehicles
            .values()
            .filter(|v| filter.matches(v))
            .collect();
        out.sort_by(|a, b| a.presentation_cmp(b));
        out
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            vehicles: self.vehicles.len(),
            edges: self.edges.len(),
            folders: self.variants_by_folder.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
