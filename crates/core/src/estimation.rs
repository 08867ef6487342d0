//! Grind estimation: remaining RP to battles, playtime and golden eagles.
//!
//! Both entry points take a catalog snapshot, a [`BonusProfile`] and the
//! injected [`BonusConfig`]. A zero effective rate with RP still to earn is
//! not an error: it produces an estimate with `status = indeterminate` and
//! null battle/minute/hour fields.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::bonus::{resolve_baseline, Baseline, BonusConfig, BonusProfile};
use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::prerequisites::{immediate_prerequisites, transitive_prerequisites};
use crate::progress::ProgressMap;
use crate::types::DbId;
use crate::vehicle::{Vehicle, VehicleType};

/// Minutes per hour (60.0).
pub const MINUTES_PER_HOUR: f64 = 60.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Nothing left to research.
    Complete,
    /// Battle count computed from a positive rate.
    Estimated,
    /// RP remains but the effective rate is zero.
    Indeterminate,
}

/// Battles, time and currency for an amount of remaining RP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrindTotals {
    pub status: EstimateStatus,
    pub effective_rp_per_battle: f64,
    pub battles_needed: Option<u64>,
    pub minutes_needed: Option<u64>,
    pub hours_needed: Option<f64>,
    /// Golden eagles needed to skip the remaining research.
    pub golden_eagles_to_finish: i64,
}

/// Compact vehicle description embedded in estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    pub id: DbId,
    pub name: String,
    pub rank: u8,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub rp_cost: Option<i64>,
    pub battle_rating: f64,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            rank: v.rank,
            vehicle_type: v.vehicle_type,
            rp_cost: v.rp_cost,
            battle_rating: v.battle_ratings.sort_value(),
        }
    }
}

/// Estimate for researching a single vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct SingleEstimate {
    pub vehicle: VehicleSummary,
    pub rp_current: i64,
    pub rp_remaining: i64,
    #[serde(flatten)]
    pub totals: GrindTotals,
    pub baseline: Baseline,
    pub prerequisite_ids: Vec<DbId>,
}

/// One vehicle's share of a cascade.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeItem {
    pub vehicle: VehicleSummary,
    pub rp_current: i64,
    pub done: bool,
    pub rp_remaining: i64,
    pub is_target: bool,
}

/// Estimate for a target plus everything it depends on.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeEstimate {
    pub target: VehicleSummary,
    pub required_ids: Vec<DbId>,
    pub rp_total_remaining: i64,
    #[serde(flatten)]
    pub totals: GrindTotals,
    pub baseline: Baseline,
    /// Sorted by rank, battle rating, name.
    pub items: Vec<CascadeItem>,
    /// Required vehicles with no RP cost; they contribute nothing.
    pub missing_cost_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Golden eagles needed to buy `remaining` RP outright, rounded up.
pub fn golden_eagles_for(config: &BonusConfig, remaining: i64) -> i64 {
    if remaining <= 0 {
        return 0;
    }
    let per = config.rp_per_golden_eagle.max(1);
    remaining / per + i64::from(remaining % per != 0)
}

/// Convert remaining RP into battles, minutes, hours and golden eagles.
pub fn grind_totals(config: &BonusConfig, baseline: &Baseline, remaining: i64) -> GrindTotals {
    let rate = baseline.effective_rp_per_battle;
    let remaining = remaining.max(0);

    let (status, battles) = if remaining == 0 {
        (EstimateStatus::Complete, Some(0))
    } else if rate <= 0.0 {
        (EstimateStatus::Indeterminate, None)
    } else {
        (
            EstimateStatus::Estimated,
            Some((remaining as f64 / rate).ceil() as u64),
        )
    };

    let minutes =
        battles.map(|b| (b as f64 * baseline.avg_battle_minutes).round().max(0.0) as u64);
    let hours = minutes.map(|m| round2(m as f64 / MINUTES_PER_HOUR));

    GrindTotals {
        status,
        effective_rp_per_battle: rate,
        battles_needed: battles,
        minutes_needed: minutes,
        hours_needed: hours,
        golden_eagles_to_finish: golden_eagles_for(config, remaining),
    }
}

fn validate_rp_current(rp_current: i64, vehicle_id: DbId) -> Result<(), CoreError> {
    if rp_current < 0 {
        return Err(CoreError::Validation(format!(
            "rp_current for vehicle {vehicle_id} must be non-negative, got {rp_current}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Single vehicle
// ---------------------------------------------------------------------------

/// Estimate the grind for one vehicle given the RP already earned on it.
///
/// Prerequisites are reported but not costed; use [`estimate_cascade`]
/// for the full path.
pub fn estimate_single(
    catalog: &Catalog,
    vehicle_id: DbId,
    rp_current: i64,
    profile: &BonusProfile,
    config: &BonusConfig,
) -> Result<SingleEstimate, CoreError> {
    profile.validate()?;
    validate_rp_current(rp_current, vehicle_id)?;

    let vehicle = catalog.require_vehicle(vehicle_id)?;
    let rp_cost = vehicle
        .rp_cost
        .ok_or(CoreError::MissingRpCost { id: vehicle_id })?;

    let baseline = resolve_baseline(config, profile);
    let remaining = (rp_cost - rp_current).max(0);

    Ok(SingleEstimate {
        vehicle: VehicleSummary::from(vehicle),
        rp_current,
        rp_remaining: remaining,
        totals: grind_totals(config, &baseline, remaining),
        baseline,
        prerequisite_ids: immediate_prerequisites(catalog, vehicle_id)
            .into_iter()
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

/// Estimate the grind for a target and every vehicle it transitively needs.
///
/// Vehicles marked `done` contribute nothing; vehicles without progress
/// start at zero RP. One effective rate is used for the whole path.
pub fn estimate_cascade(
    catalog: &Catalog,
    target_id: DbId,
    profile: &BonusProfile,
    progress: &ProgressMap,
    config: &BonusConfig,
) -> Result<CascadeEstimate, CoreError> {
    profile.validate()?;
    for (id, entry) in progress {
        validate_rp_current(entry.rp_current, *id)?;
    }

    let target = catalog.require_vehicle(target_id)?;

    let mut required: BTreeSet<DbId> = transitive_prerequisites(catalog, target_id);
    required.insert(target_id);

    let mut vehicles: Vec<&Vehicle> = required
        .iter()
        .filter_map(|id| catalog.vehicle(*id))
        .collect();
    vehicles.sort_by(|a, b| a.presentation_cmp(b));

    let mut total: i64 = 0;
    let mut missing_cost_ids = Vec::new();
    let mut items = Vec::with_capacity(vehicles.len());

    for v in vehicles {
        let entry = progress.get(&v.id).copied().unwrap_or_default();
        let remaining = match v.rp_cost {
            _ if entry.done => 0,
            Some(cost) => (cost - entry.rp_current).max(0),
            None => {
                missing_cost_ids.push(v.id);
                0
            }
        };
        total = total.checked_add(remaining).ok_or_else(|| {
            CoreError::Validation(format!(
                "Remaining RP for vehicle {target_id} exceeds the supported range"
            ))
        })?;
        items.push(CascadeItem {
            vehicle: VehicleSummary::from(v),
            rp_current: entry.rp_current,
            done: entry.done,
            rp_remaining: remaining,
            is_target: v.id == target_id,
        });
    }

    let baseline = resolve_baseline(config, profile);

    Ok(CascadeEstimate {
        target: VehicleSummary::from(target),
        required_ids: required.into_iter().collect(),
        rp_total_remaining: total,
        totals: grind_totals(config, &baseline, total),
        baseline,
        items,
        missing_cost_ids,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
