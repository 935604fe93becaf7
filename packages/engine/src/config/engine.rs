//! Engine tuning knobs loaded from `GUESSMOJI_*` environment variables.
//!
//! Unset or blank variables fall back to defaults; present-but-invalid
//! values are configuration errors, never silently corrected.

use std::env;

use crate::domain::rules::{WinCondition, DEFAULT_MAX_ROUNDS, DEFAULT_TARGET_SCORE};
use crate::errors::gateway::GatewayError;
use crate::notify::DEFAULT_NOTIFY_CAPACITY;

/// Commit attempts per mutation before reporting a conflict.
pub const DEFAULT_MUTATION_RETRIES: u32 = 5;

/// Knobs for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How sessions end. `GUESSMOJI_WIN_CONDITION` selects the policy
    /// (`fixed_rounds` or `score_threshold`); `GUESSMOJI_MAX_ROUNDS` and
    /// `GUESSMOJI_TARGET_SCORE` tune whichever one is selected.
    pub win_condition: WinCondition,
    /// `GUESSMOJI_MUTATION_RETRIES`: commit attempts before a mutation
    /// gives up with an optimistic-lock conflict.
    pub mutation_retries: u32,
    /// `GUESSMOJI_NOTIFY_CAPACITY`: broadcast buffer per session channel.
    pub notify_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_condition: WinCondition::default(),
            mutation_retries: DEFAULT_MUTATION_RETRIES,
            notify_capacity: DEFAULT_NOTIFY_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from any variable source. Tests drive this with closures
    /// instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
        let win_condition = match lookup("GUESSMOJI_WIN_CONDITION").as_deref().map(str::trim) {
            None | Some("") | Some("fixed_rounds") => WinCondition::FixedRounds {
                max_rounds: parse_positive_u32(
                    &lookup,
                    "GUESSMOJI_MAX_ROUNDS",
                    DEFAULT_MAX_ROUNDS,
                )?,
            },
            Some("score_threshold") => WinCondition::ScoreThreshold {
                target_score: parse_positive_u32(
                    &lookup,
                    "GUESSMOJI_TARGET_SCORE",
                    DEFAULT_TARGET_SCORE,
                )?,
            },
            Some(other) => {
                return Err(GatewayError::config(format!(
                    "GUESSMOJI_WIN_CONDITION must be 'fixed_rounds' or 'score_threshold', got: '{other}'"
                )))
            }
        };

        let mutation_retries = parse_positive_u32(
            &lookup,
            "GUESSMOJI_MUTATION_RETRIES",
            DEFAULT_MUTATION_RETRIES,
        )?;
        let notify_capacity = parse_positive_u32(
            &lookup,
            "GUESSMOJI_NOTIFY_CAPACITY",
            DEFAULT_NOTIFY_CAPACITY as u32,
        )? as usize;

        Ok(Self {
            win_condition,
            mutation_retries,
            notify_capacity,
        })
    }
}

fn parse_positive_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
) -> Result<u32, GatewayError> {
    let raw = match lookup(name) {
        Some(raw) => raw,
        None => return Ok(default),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    match trimmed.parse::<u32>() {
        Ok(0) => Err(GatewayError::config(format!("{name} must be at least 1"))),
        Ok(value) => Ok(value),
        Err(_) => Err(GatewayError::config(format!(
            "{name} must be a positive integer, got: '{trimmed}'"
        ))),
    }
}
