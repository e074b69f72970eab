//! Price oracle adapter
//!
//! Validates raw feed rounds into `PriceReading`s the rest of the engine
//! can trust. Readings are fetched fresh for every conversion, never
//! cached, and a failed read aborts the operation that needed it: there
//! is no fallback source and no retry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::asset::OracleRef;

use crate::errors::OracleError;

/// Raw round data as published by an external feed, before validation.
///
/// `answer` is signed because misbehaving feeds can publish zero or
/// negative quotes; the adapter has to be able to represent them in order
/// to reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    /// Round the price was updated in
    pub round_id: u64,
    /// Quoted price in `decimals` fixed-point
    pub answer: i128,
    /// Unix timestamp of the update, seconds
    pub updated_at: u64,
    /// Round the answer was computed in
    pub answered_in_round: u64,
    /// Fractional digits of `answer`
    pub decimals: u8,
}

impl RawReading {
    /// A healthy reading answered in its own round.
    pub fn fresh(round_id: u64, answer: i128, updated_at: u64, decimals: u8) -> Self {
        Self {
            round_id,
            answer,
            updated_at,
            answered_in_round: round_id,
            decimals,
        }
    }
}

/// A validated price: strictly positive, from a live round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReading {
    pub price: u128,
    pub price_decimals: u8,
    pub updated_at_round: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// External price source collaborator.
///
/// Implementations front one or more feeds keyed by `OracleRef`. An `Err`
/// models a feed that reverts or cannot answer at all; the reason string
/// is carried into `OracleError::FeedUnavailable`.
pub trait PriceSource {
    fn latest_reading(&self, feed: &OracleRef) -> Result<RawReading, String>;
}

/// Fetch and validate the latest reading from `feed`.
///
/// Non-positive answers, zero round ids and zero timestamps are rejected
/// as `InvalidPrice`; an answer computed before the round it was reported
/// in is rejected as `StalePrice`.
pub fn fetch(source: &dyn PriceSource, feed: &OracleRef) -> Result<PriceReading, OracleError> {
    let raw = source
        .latest_reading(feed)
        .map_err(|reason| OracleError::FeedUnavailable { reason })?;

    if raw.answer <= 0 || raw.round_id == 0 || raw.updated_at == 0 {
        return Err(OracleError::InvalidPrice {
            answer: raw.answer,
            round_id: raw.round_id,
            updated_at: raw.updated_at,
        });
    }
    if raw.answered_in_round < raw.round_id {
        return Err(OracleError::StalePrice {
            answered_in_round: raw.answered_in_round,
            updated_at_round: raw.round_id,
        });
    }

    Ok(PriceReading {
        price: raw.answer as u128,
        price_decimals: raw.decimals,
        updated_at_round: raw.round_id,
        updated_at: raw.updated_at,
        answered_in_round: raw.answered_in_round,
    })
}

/// Fixture source backed by an in-memory feed table.
///
/// Set a round per feed, overwrite it to model price movement, remove it
/// to model an unreachable feed.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rounds: HashMap<OracleRef, RawReading>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, feed: OracleRef, reading: RawReading) {
        self.rounds.insert(feed, reading);
    }

    pub fn remove(&mut self, feed: &OracleRef) {
        self.rounds.remove(feed);
    }
}

impl PriceSource for StaticSource {
    fn latest_reading(&self, feed: &OracleRef) -> Result<RawReading, String> {
        self.rounds
            .get(feed)
            .copied()
            .ok_or_else(|| format!("no feed registered at {feed}"))
    }
}
