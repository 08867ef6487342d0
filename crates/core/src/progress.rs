//! Per-user research progress.
//!
//! [`ProgressEntry`] is what the estimator reads; [`ProgressRecord`] is what
//! the API stores for a user and updates as new reports come in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const STATUS_LOCKED: &str = "locked";
pub const STATUS_RESEARCHING: &str = "researching";
pub const STATUS_UNLOCKED: &str = "unlocked";

/// Research state of one vehicle for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    Locked,
    Researching,
    Unlocked,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => STATUS_LOCKED,
            Self::Researching => STATUS_RESEARCHING,
            Self::Unlocked => STATUS_UNLOCKED,
        }
    }

    /// Derive the status from earned RP and the `done` override.
    pub fn derive(rp_earned: i64, done: bool, rp_cost: Option<i64>) -> Self {
        if done || rp_cost.is_some_and(|cost| rp_earned >= cost) {
            Self::Unlocked
        } else if rp_earned > 0 {
            Self::Researching
        } else {
            Self::Locked
        }
    }
}

/// Estimator input for one vehicle. Missing entries mean no progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(default)]
    pub rp_current: i64,
    /// Treat the vehicle as unlocked regardless of RP.
    #[serde(default)]
    pub done: bool,
}

/// Vehicle id -> progress.
pub type ProgressMap = HashMap<DbId, ProgressEntry>;

/// A progress report sent by the user.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProgressReport {
    pub rp_earned: i64,
    /// `None` keeps the previous override.
    #[serde(default)]
    pub done: Option<bool>,
}

/// Stored progress for one (user, vehicle) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    pub vehicle_id: DbId,
    pub rp_earned: i64,
    pub done: bool,
    pub status: ProgressStatus,
    pub updated_at: Timestamp,
}

impl ProgressRecord {
    /// Create or update a record from a report.
    ///
    /// `existing` is the previously stored record, if any. `rp_cost` is the
    /// vehicle's research cost, used only to derive the status.
    pub fn apply_report(
        existing: Option<&ProgressRecord>,
        vehicle_id: DbId,
        report: &ProgressReport,
        rp_cost: Option<i64>,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if report.rp_earned < 0 {
            return Err(CoreError::Validation(format!(
                "rp_earned must be non-negative, got {}",
                report.rp_earned
            )));
        }
        let done = report
            .done
            .or(existing.map(|r| r.done))
            .unwrap_or(false);

        Ok(Self {
            vehicle_id,
            rp_earned: report.rp_earned,
            done,
            status: ProgressStatus::derive(report.rp_earned, done, rp_cost),
            updated_at: now,
        })
    }

    pub fn entry(&self) -> ProgressEntry {
        ProgressEntry {
            rp_current: self.rp_earned,
            done: self.done,
        }
    }
}

/// Collapse stored records into the estimator's input map.
pub fn to_progress_map<'a>(records: impl IntoIterator<Item = &'a ProgressRecord>) -> ProgressMap {
    records
        .into_iter()
        .map(|r| (r.vehicle_id, r.entry()))
        .collect()
}
