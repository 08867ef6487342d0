//! Catalog import from a JSON document.
//!
//! The document lists nations, classes, ranks and vehicles. Vehicles are
//! referenced by a string `key` and receive sequential ids in document
//! order. Edges may be declared from either side (`parents` or
//! `children`); the same edge declared twice is merged. Dangling edge keys
//! are reported as warnings, everything else that is malformed fails the
//! whole import so a broken document never replaces a working catalog.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::types::DbId;
use crate::vehicle::{
    validate_rank, BattleRatings, Vehicle, VehicleClass, VehicleEdge, VehicleType,
};

// ── Document types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub nations: Vec<NationInput>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub ranks: Vec<RankInput>,
    #[serde(default)]
    pub vehicles: Vec<VehicleInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NationInput {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flag_url: Option<String>,
}

/// Ranks may be given as bare numbers or as `{ "id": 1, "label": "I" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RankInput {
    Id(i64),
    Labeled {
        id: i64,
        #[serde(default)]
        label: Option<String>,
    },
}

impl RankInput {
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) | Self::Labeled { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdgesInput {
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleInput {
    pub key: String,
    pub name: String,
    pub nation: String,
    pub class: String,
    pub rank: i64,
    #[serde(rename = "type", default)]
    pub vehicle_type: Option<String>,
    #[serde(flatten)]
    pub battle_ratings: BattleRatings,
    #[serde(default)]
    pub rp_cost: Option<i64>,
    #[serde(default)]
    pub ge_cost: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    /// Key of the folder parent.
    #[serde(default)]
    pub folder_of: Option<String>,
    /// Override applied to every edge leading into this vehicle.
    #[serde(default)]
    pub unlock_rp: Option<i64>,
    #[serde(default)]
    pub edges: EdgesInput,
}

/// Counts and warnings from an import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub nations: usize,
    pub classes: usize,
    pub ranks: usize,
    pub vehicles: usize,
    pub edges: usize,
    pub warnings: Vec<String>,
}

// ── Parsing ──────────────────────────────────────────────────────────

/// Parse an import document from JSON text.
pub fn parse_document(json: &str) -> Result<ImportDocument, CoreError> {
    serde_json::from_str(json)
        .map_err(|e| CoreError::Validation(format!("Invalid catalog document: {e}")))
}

fn validate_non_negative_cost(value: Option<i64>, field: &str, key: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if v < 0 => Err(CoreError::Validation(format!(
            "Vehicle '{key}' has negative {field}: {v}"
        ))),
        _ => Ok(()),
    }
}

// ── Import ───────────────────────────────────────────────────────────

/// Build a [`Catalog`] from a parsed document.
pub fn import_document(doc: &ImportDocument) -> Result<(Catalog, ImportReport), CoreError> {
    let mut report = ImportReport::default();

    // 1) Dictionaries.
    let mut nations: BTreeSet<String> = BTreeSet::new();
    for n in &doc.nations {
        if n.slug.trim().is_empty() {
            return Err(CoreError::Validation("Nation slug must not be empty".into()));
        }
        nations.insert(n.slug.to_ascii_lowercase());
    }

    let mut classes: HashSet<VehicleClass> = HashSet::new();
    for c in &doc.classes {
        classes.insert(VehicleClass::from_str_value(c)?);
    }

    let mut ranks: BTreeSet<u8> = BTreeSet::new();
    for r in &doc.ranks {
        ranks.insert(validate_rank(r.id())?);
    }

    // 2) Vehicles.
    let mut key_to_id: HashMap<&str, DbId> = HashMap::with_capacity(doc.vehicles.len());
    for (idx, v) in doc.vehicles.iter().enumerate() {
        if key_to_id.insert(v.key.as_str(), idx as DbId + 1).is_some() {
            return Err(CoreError::Conflict(format!("Duplicate vehicle key '{}'", v.key)));
        }
    }

    let mut vehicles = Vec::with_capacity(doc.vehicles.len());
    for v in &doc.vehicles {
        let id = key_to_id[v.key.as_str()];
        let class = VehicleClass::from_str_value(&v.class)?;
        let rank = validate_rank(v.rank)?;
        let vehicle_type = match &v.vehicle_type {
            Some(t) => VehicleType::from_str_value(t)?,
            None => VehicleType::Tree,
        };
        validate_non_negative_cost(v.rp_cost, "rp_cost", &v.key)?;
        validate_non_negative_cost(v.ge_cost, "ge_cost", &v.key)?;
        validate_non_negative_cost(v.unlock_rp, "unlock_rp", &v.key)?;

        let folder_of = match &v.folder_of {
            Some(folder_key) => Some(*key_to_id.get(folder_key.as_str()).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Vehicle '{}' is in unknown folder '{folder_key}'",
                    v.key
                ))
            })?),
            None => None,
        };

        nations.insert(v.nation.to_ascii_lowercase());
        classes.insert(class);
        ranks.insert(rank);

        vehicles.push(Vehicle {
            id,
            name: v.name.clone(),
            nation: v.nation.to_ascii_lowercase(),
            class,
            rank,
            vehicle_type,
            battle_ratings: v.battle_ratings,
            rp_cost: v.rp_cost,
            ge_cost: v.ge_cost,
            folder_of,
            image_url: v.image_url.clone(),
            wiki_url: v.wiki_url.clone(),
        });
    }

    // 3) Edges, from both sides.
    let unlock_by_id: HashMap<DbId, Option<i64>> = doc
        .vehicles
        .iter()
        .map(|v| (key_to_id[v.key.as_str()], v.unlock_rp))
        .collect();
    let mut collector = EdgeCollector::new(unlock_by_id);

    for v in &doc.vehicles {
        let id = key_to_id[v.key.as_str()];
        for child_key in &v.edges.children {
            match key_to_id.get(child_key.as_str()) {
                Some(&child_id) => collector.add(id, child_id, &v.key, &mut report),
                None => report
                    .warnings
                    .push(format!("child '{child_key}' not found for '{}'", v.key)),
            }
        }
        for parent_key in &v.edges.parents {
            match key_to_id.get(parent_key.as_str()) {
                Some(&parent_id) => collector.add(parent_id, id, &v.key, &mut report),
                None => report
                    .warnings
                    .push(format!("parent '{parent_key}' not found for '{}'", v.key)),
            }
        }
    }
    let edges = collector.edges;

    report.nations = nations.len();
    report.classes = classes.len();
    report.ranks = ranks.len();
    report.vehicles = vehicles.len();
    report.edges = edges.len();

    let catalog = Catalog::new(vehicles, edges)?;
    Ok((catalog, report))
}

/// Deduplicates edges declared from both ends.
struct EdgeCollector {
    unlock_by_id: HashMap<DbId, Option<i64>>,
    seen: HashSet<(DbId, DbId)>,
    edges: Vec<VehicleEdge>,
}

impl EdgeCollector {
    fn new(unlock_by_id: HashMap<DbId, Option<i64>>) -> Self {
        Self {
            unlock_by_id,
            seen: HashSet::new(),
            edges: Vec::new(),
        }
    }

    fn add(&mut self, parent_id: DbId, child_id: DbId, key: &str, report: &mut ImportReport) {
        if parent_id == child_id {
            report
                .warnings
                .push(format!("'{key}' lists itself as a prerequisite; ignored"));
            return;
        }
        if self.seen.insert((parent_id, child_id)) {
            self.edges.push(VehicleEdge {
                parent_id,
                child_id,
                unlock_rp: self.unlock_by_id.get(&child_id).copied().flatten(),
            });
        }
    }
}

/// Parse and import in one step.
pub fn import_json(json: &str) -> Result<(Catalog, ImportReport), CoreError> {
    import_document(&parse_document(json)?)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::prerequisites::{immediate_prerequisites, transitive_prerequisites};

    const SAMPLE: &str = r#"{
        "nations": [{"slug": "usa", "name": "USA"}],
        "classes": ["army", "aviation"],
        "ranks": [{"id": 1, "label": "I"}, 2, 3],
        "vehicles": [
            {"key": "m2", "name": "M2A4", "nation": "usa", "class": "army", "rank": 1,
             "br_rb": 1.0, "rp_cost": 0, "edges": {"children": ["m3"]}},
            {"key": "m3", "name": "M3 Lee", "nation": "usa", "class": "army", "rank": 2,
             "type": "tree", "br_rb": 2.7, "rp_cost": 12000, "unlock_rp": 11000,
             "edges": {"parents": ["m2"], "children": ["m4", "ghost"]}},
            {"key": "m4", "name": "M4 Sherman", "nation": "usa", "class": "army", "rank": 3,
             "br_rb": 3.7, "rp_cost": 20000},
            {"key": "m4_v1", "name": "M4 (Variant)", "nation": "USA", "class": "army", "rank": 3,
             "br_ab": 3.3, "rp_cost": 21000, "folder_of": "m4"},
            {"key": "m4_v2", "name": "M4 (Late)", "nation": "usa", "class": "army", "rank": 3,
             "br_ab": 4.0, "rp_cost": 22000, "folder_of": "m4"},
            {"key": "p47", "name": "P-47", "nation": "usa", "class": "aviation", "rank": 3,
             "type": "premium", "ge_cost": 2500}
        ]
    }"#;

    #[test]
    fn imports_sample_document() {
        let (catalog, report) = import_json(SAMPLE).unwrap();
        assert_eq!(report.vehicles, 6);
        assert_eq!(report.nations, 1);
        assert_eq!(report.classes, 2);
        assert_eq!(report.ranks, 3);
        // m2 -> m3 is declared from both sides and merged.
        assert_eq!(report.edges, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("ghost"));
        assert_eq!(catalog.stats().vehicles, 6);
    }

    #[test]
    fn ids_follow_document_order() {
        let (catalog, _) = import_json(SAMPLE).unwrap();
        assert_eq!(catalog.vehicle(1).unwrap().name, "M2A4");
        assert_eq!(catalog.vehicle(6).unwrap().vehicle_type, VehicleType::Premium);
        assert_eq!(catalog.vehicle(6).unwrap().ge_cost, Some(2500));
        assert_eq!(catalog.vehicle(4).unwrap().nation, "usa");
    }

    #[test]
    fn edge_override_comes_from_child() {
        let (catalog, _) = import_json(SAMPLE).unwrap();
        let edge = catalog
            .edges()
            .iter()
            .find(|e| e.parent_id == 1 && e.child_id == 2)
            .unwrap();
        assert_eq!(edge.unlock_rp, Some(11_000));
    }

    #[test]
    fn imported_folders_feed_the_resolver() {
        let (catalog, _) = import_json(SAMPLE).unwrap();
        assert_eq!(immediate_prerequisites(&catalog, 5), BTreeSet::from([3, 4]));
        assert_eq!(transitive_prerequisites(&catalog, 5), BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn duplicate_keys_fail() {
        let doc = r#"{"vehicles": [
            {"key": "a", "name": "A", "nation": "usa", "class": "army", "rank": 1},
            {"key": "a", "name": "A2", "nation": "usa", "class": "army", "rank": 1}
        ]}"#;
        assert_matches!(import_json(doc), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn unknown_folder_and_bad_enums_fail() {
        let folder = r#"{"vehicles": [
            {"key": "a", "name": "A", "nation": "usa", "class": "army", "rank": 1, "folder_of": "x"}
        ]}"#;
        assert_matches!(import_json(folder), Err(CoreError::Validation(_)));

        let class = r#"{"vehicles": [
            {"key": "a", "name": "A", "nation": "usa", "class": "submarine", "rank": 1}
        ]}"#;
        assert_matches!(import_json(class), Err(CoreError::Validation(_)));

        let rank = r#"{"ranks": [12]}"#;
        assert_matches!(import_json(rank), Err(CoreError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert_matches!(import_json("{not json"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn self_reference_is_a_warning() {
        let doc = r#"{"vehicles": [
            {"key": "a", "name": "A", "nation": "usa", "class": "army", "rank": 1,
             "edges": {"parents": ["a"]}}
        ]}"#;
        let (catalog, report) = import_json(doc).unwrap();
        assert_eq!(report.edges, 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(catalog.edges().is_empty());
    }

    #[test]
    fn empty_document_gives_empty_catalog() {
        let (catalog, report) = import_json("{}").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(report, ImportReport::default());
    }
}
