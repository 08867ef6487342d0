//! RP bonus model: premium, boosters and skill bonuses.
//!
//! All bonuses multiply. Recent battle samples are reported with whatever
//! bonuses were active at the time, so they are divided back down to a
//! bonus-free baseline before the caller's current bonuses are applied.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Premium account RP multiplier (+100%).
pub const DEFAULT_PREMIUM_MULTIPLIER: f64 = 2.0;
/// RP bought per golden eagle when finishing research instantly.
pub const DEFAULT_RP_PER_GOLDEN_EAGLE: i64 = 45;
/// Battle length assumed when no sample reports a duration.
pub const DEFAULT_BATTLE_MINUTES: f64 = 9.0;
/// Size of the recent battle window.
pub const DEFAULT_MAX_RECENT_BATTLES: usize = 5;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable constants for the bonus model, loaded once at startup and
/// passed into every estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BonusConfig {
    pub premium_multiplier: f64,
    pub rp_per_golden_eagle: i64,
    pub default_battle_minutes: f64,
    pub max_recent_battles: usize,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            premium_multiplier: DEFAULT_PREMIUM_MULTIPLIER,
            rp_per_golden_eagle: DEFAULT_RP_PER_GOLDEN_EAGLE,
            default_battle_minutes: DEFAULT_BATTLE_MINUTES,
            max_recent_battles: DEFAULT_MAX_RECENT_BATTLES,
        }
    }
}

impl BonusConfig {
    /// Reject values that would make every estimate meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.premium_multiplier.is_nan() || self.premium_multiplier < 1.0 {
            return Err(CoreError::Validation(format!(
                "premium_multiplier must be at least 1.0, got {}",
                self.premium_multiplier
            )));
        }
        if self.rp_per_golden_eagle <= 0 {
            return Err(CoreError::Validation(format!(
                "rp_per_golden_eagle must be positive, got {}",
                self.rp_per_golden_eagle
            )));
        }
        if self.default_battle_minutes.is_nan() || self.default_battle_minutes <= 0.0 {
            return Err(CoreError::Validation(format!(
                "default_battle_minutes must be positive, got {}",
                self.default_battle_minutes
            )));
        }
        if self.max_recent_battles == 0 {
            return Err(CoreError::Validation(
                "max_recent_battles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Combined multiplier for one set of bonuses.
    pub fn multiplier(
        &self,
        has_premium: bool,
        booster_percent: Option<f64>,
        skill_bonus_percent: Option<f64>,
    ) -> f64 {
        let mut mult = 1.0;
        if has_premium {
            mult *= self.premium_multiplier;
        }
        if let Some(pct) = booster_percent {
            mult *= 1.0 + pct / 100.0;
        }
        if let Some(pct) = skill_bonus_percent {
            mult *= 1.0 + pct / 100.0;
        }
        mult
    }
}

// ---------------------------------------------------------------------------
// Profile types
// ---------------------------------------------------------------------------

/// One reported battle, with the bonuses active during it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentBattle {
    #[serde(default)]
    pub rp: f64,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub booster_percent: Option<f64>,
    #[serde(default)]
    pub skill_bonus_percent: Option<f64>,
}

/// The caller's account bonuses and grinding pace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusProfile {
    #[serde(default)]
    pub has_premium: bool,
    /// `50` means +50%.
    #[serde(default)]
    pub booster_percent: Option<f64>,
    #[serde(default)]
    pub skill_bonus_percent: Option<f64>,
    /// Bonus-free RP per battle.
    #[serde(default)]
    pub avg_rp_per_battle: Option<f64>,
    #[serde(default)]
    pub avg_battle_minutes: Option<f64>,
    /// When any sample has positive RP, these replace the explicit averages.
    #[serde(default)]
    pub recent_battles: Vec<RecentBattle>,
}

impl BonusProfile {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_non_negative(self.booster_percent, "booster_percent")?;
        validate_non_negative(self.skill_bonus_percent, "skill_bonus_percent")?;
        validate_non_negative(self.avg_rp_per_battle, "avg_rp_per_battle")?;
        validate_non_negative(self.avg_battle_minutes, "avg_battle_minutes")?;
        for (i, b) in self.recent_battles.iter().enumerate() {
            validate_non_negative(b.booster_percent, &format!("recent_battles[{i}].booster_percent"))?;
            validate_non_negative(
                b.skill_bonus_percent,
                &format!("recent_battles[{i}].skill_bonus_percent"),
            )?;
        }
        Ok(())
    }
}

fn validate_non_negative(value: Option<f64>, name: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {v}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Effective rate
// ---------------------------------------------------------------------------

/// RP per battle after applying the given bonuses to `base_avg`.
///
/// Missing percentages count as no bonus. Never negative.
pub fn effective_rp_per_battle(
    config: &BonusConfig,
    base_avg: f64,
    has_premium: bool,
    booster_percent: Option<f64>,
    skill_bonus_percent: Option<f64>,
) -> f64 {
    let value = base_avg * config.multiplier(has_premium, booster_percent, skill_bonus_percent);
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

// ---------------------------------------------------------------------------
// Recent battle normalization
// ---------------------------------------------------------------------------

/// Bonus-free averages derived from recent battles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecentBattleSummary {
    pub avg_rp_per_battle: f64,
    pub avg_battle_minutes: f64,
    /// Number of samples that contributed to the RP average.
    pub samples: usize,
}

/// Strip each sample's own bonuses and average what is left.
///
/// Only the newest `max_recent_battles` samples (the tail of the slice)
/// are considered. Samples without positive RP are ignored for the RP
/// average; samples without positive minutes are ignored for the minutes
/// average, which falls back to `default_battle_minutes`.
pub fn normalize_recent_battles(config: &BonusConfig, samples: &[RecentBattle]) -> RecentBattleSummary {
    let window = &samples[samples.len().saturating_sub(config.max_recent_battles)..];

    let mut rp_sum = 0.0;
    let mut rp_count = 0usize;
    let mut minutes_sum = 0.0;
    let mut minutes_count = 0usize;

    for b in window {
        if b.rp > 0.0 {
            let denom = config.multiplier(b.premium, b.booster_percent, b.skill_bonus_percent);
            rp_sum += if denom > 0.0 { b.rp / denom } else { b.rp };
            rp_count += 1;
        }
        if b.minutes > 0.0 {
            minutes_sum += b.minutes;
            minutes_count += 1;
        }
    }

    RecentBattleSummary {
        avg_rp_per_battle: if rp_count > 0 {
            rp_sum / rp_count as f64
        } else {
            0.0
        },
        avg_battle_minutes: if minutes_count > 0 {
            minutes_sum / minutes_count as f64
        } else {
            config.default_battle_minutes
        },
        samples: rp_count,
    }
}

// ---------------------------------------------------------------------------
// Baseline selection
// ---------------------------------------------------------------------------

/// Where the bonus-free averages came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSource {
    Profile,
    RecentBattles,
}

/// The pace an estimate is computed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    pub source: BaselineSource,
    /// Bonus-free RP per battle.
    pub avg_rp_per_battle: f64,
    pub avg_battle_minutes: f64,
    /// With the profile's current bonuses applied.
    pub effective_rp_per_battle: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent: Option<RecentBattleSummary>,
}

/// Pick the averages for `profile` and apply its current bonuses.
pub fn resolve_baseline(config: &BonusConfig, profile: &BonusProfile) -> Baseline {
    let recent = (!profile.recent_battles.is_empty())
        .then(|| normalize_recent_battles(config, &profile.recent_battles));

    let (source, avg_rp, avg_minutes) = match recent {
        Some(summary) if summary.samples > 0 => (
            BaselineSource::RecentBattles,
            summary.avg_rp_per_battle,
            summary.avg_battle_minutes,
        ),
        _ => (
            BaselineSource::Profile,
            profile.avg_rp_per_battle.unwrap_or(0.0),
            profile
                .avg_battle_minutes
                .unwrap_or(config.default_battle_minutes),
        ),
    };

    Baseline {
        source,
        avg_rp_per_battle: avg_rp,
        avg_battle_minutes: avg_minutes,
        effective_rp_per_battle: effective_rp_per_battle(
            config,
            avg_rp,
            profile.has_premium,
            profile.booster_percent,
            profile.skill_bonus_percent,
        ),
        recent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
