//! Prerequisite resolution over the unlock graph.
//!
//! A vehicle's immediate prerequisites come from three places: parents in
//! the edge table, its folder parent, and the folder sibling ordered just
//! before it. Sibling order is derived from the catalog on every call and
//! never stored as an edge.
//!
//! Traversal keeps a visited set, so cycles in imported data terminate.

use std::collections::{BTreeSet, VecDeque};

use crate::catalog::Catalog;
use crate::types::DbId;
use crate::vehicle::Vehicle;

/// Variants nested under `folder_id`, ordered by rank, battle rating, name.
pub fn folder_variants(catalog: &Catalog, folder_id: DbId) -> Vec<&Vehicle> {
    catalog
        .variant_ids(folder_id)
        .iter()
        .filter_map(|id| catalog.vehicle(*id))
        .collect()
}

/// The variant ordered immediately before `vehicle` in its folder, if any.
pub fn previous_variant(catalog: &Catalog, vehicle: &Vehicle) -> Option<DbId> {
    let folder = vehicle.folder_of?;
    let siblings = catalog.variant_ids(folder);
    let pos = siblings.iter().position(|id| *id == vehicle.id)?;
    pos.checked_sub(1).map(|prev| siblings[prev])
}

/// Direct prerequisites of `vehicle_id`. Empty for unknown vehicles.
pub fn immediate_prerequisites(catalog: &Catalog, vehicle_id: DbId) -> BTreeSet<DbId> {
    let Some(vehicle) = catalog.vehicle(vehicle_id) else {
        return BTreeSet::new();
    };

    let mut out: BTreeSet<DbId> = catalog.parents_of(vehicle_id).collect();
    if let Some(folder) = vehicle.folder_of {
        out.insert(folder);
    }
    if let Some(prev) = previous_variant(catalog, vehicle) {
        out.insert(prev);
    }
    out
}

/// Every direct and indirect prerequisite of `vehicle_id`, excluding itself.
pub fn transitive_prerequisites(catalog: &Catalog, vehicle_id: DbId) -> BTreeSet<DbId> {
    let mut visited: BTreeSet<DbId> = BTreeSet::from([vehicle_id]);
    let mut queue: VecDeque<DbId> = VecDeque::from([vehicle_id]);
    let mut result: BTreeSet<DbId> = BTreeSet::new();

    while let Some(current) = queue.pop_front() {
        for prereq in immediate_prerequisites(catalog, current) {
            if visited.insert(prereq) {
                result.insert(prereq);
                queue.push_back(prereq);
            }
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::test_support::{edge, vehicle};

    /// 1 -> 2 -> 3, plus a folder under 3 holding variants 10 (BR 4.0),
    /// 11 (BR 4.3) and 12 (rank 4).
    fn tree() -> Catalog {
        let mut variants = Vec::new();
        for (id, name, rank, br) in [(10, "V-A", 3, 4.0), (11, "V-B", 3, 4.3), (12, "V-C", 4, 1.0)] {
            let mut v = vehicle(id, name, rank, Some(30_000));
            v.folder_of = Some(3);
            v.battle_ratings.br_ab = Some(br);
            variants.push(v);
        }
        let mut vehicles = vec![
            vehicle(1, "Root", 1, Some(0)),
            vehicle(2, "Middle", 2, Some(10_000)),
            vehicle(3, "Folder", 3, Some(25_000)),
            vehicle(4, "Unrelated", 1, Some(500)),
        ];
        vehicles.extend(variants);
        Catalog::new(vehicles, vec![edge(1, 2), edge(2, 3)]).unwrap()
    }

    // -- previous_variant --

    #[test]
    fn first_variant_has_no_previous_sibling() {
        let catalog = tree();
        let first = catalog.vehicle(10).unwrap();
        assert_eq!(previous_variant(&catalog, first), None);
    }

    #[test]
    fn later_variants_point_at_preceding_sibling() {
        let catalog = tree();
        assert_eq!(previous_variant(&catalog, catalog.vehicle(11).unwrap()), Some(10));
        assert_eq!(previous_variant(&catalog, catalog.vehicle(12).unwrap()), Some(11));
    }

    #[test]
    fn non_variant_has_no_previous_sibling() {
        let catalog = tree();
        assert_eq!(previous_variant(&catalog, catalog.vehicle(2).unwrap()), None);
    }

    #[test]
    fn sibling_order_coalesces_battle_ratings() {
        // Variant 21 only has a simulator rating; it must still sort
        // between the arcade-only siblings.
        let mut a = vehicle(20, "A", 2, None);
        a.folder_of = Some(1);
        a.battle_ratings.br_ab = Some(2.0);
        let mut b = vehicle(21, "B", 2, None);
        b.folder_of = Some(1);
        b.battle_ratings.br_sb = Some(2.3);
        let mut c = vehicle(22, "C", 2, None);
        c.folder_of = Some(1);
        c.battle_ratings.br_rb = Some(2.7);
        let catalog = Catalog::new(vec![vehicle(1, "Folder", 2, None), c, b, a], vec![]).unwrap();

        let order: Vec<DbId> = folder_variants(&catalog, 1).iter().map(|v| v.id).collect();
        assert_eq!(order, vec![20, 21, 22]);
    }

    // -- immediate_prerequisites --

    #[test]
    fn immediate_includes_edge_parents() {
        let catalog = tree();
        assert_eq!(immediate_prerequisites(&catalog, 3), BTreeSet::from([2]));
    }

    #[test]
    fn immediate_includes_folder_parent_and_previous_sibling() {
        let catalog = tree();
        assert_eq!(immediate_prerequisites(&catalog, 10), BTreeSet::from([3]));
        assert_eq!(immediate_prerequisites(&catalog, 11), BTreeSet::from([3, 10]));
    }

    #[test]
    fn immediate_is_empty_for_unknown_vehicle() {
        let catalog = tree();
        assert!(immediate_prerequisites(&catalog, 999).is_empty());
    }

    // -- transitive_prerequisites --

    #[test]
    fn transitive_walks_edges_and_folder_chain() {
        let catalog = tree();
        assert_eq!(
            transitive_prerequisites(&catalog, 12),
            BTreeSet::from([1, 2, 3, 10, 11])
        );
    }

    #[test]
    fn transitive_excludes_start_and_is_idempotent() {
        let catalog = tree();
        for id in [1, 2, 3, 4, 10, 11, 12] {
            let first = transitive_prerequisites(&catalog, id);
            assert!(!first.contains(&id));
            assert_eq!(first, transitive_prerequisites(&catalog, id));
        }
    }

    #[test]
    fn transitive_contains_immediate() {
        let catalog = tree();
        for id in [2, 3, 11, 12] {
            let all = transitive_prerequisites(&catalog, id);
            assert!(immediate_prerequisites(&catalog, id).is_subset(&all));
        }
    }

    #[test]
    fn transitive_terminates_on_cycles() {
        let catalog = Catalog::new(
            vec![
                vehicle(1, "A", 1, None),
                vehicle(2, "B", 1, None),
                vehicle(3, "C", 1, None),
            ],
            vec![edge(1, 2), edge(2, 3), edge(3, 1)],
        )
        .unwrap();
        assert_eq!(transitive_prerequisites(&catalog, 1), BTreeSet::from([2, 3]));
    }

    #[test]
    fn transitive_is_empty_for_root_and_unknown() {
        let catalog = tree();
        assert!(transitive_prerequisites(&catalog, 1).is_empty());
        assert!(transitive_prerequisites(&catalog, 999).is_empty());
    }
}
