//! Weighted game recommendation.
//!
//! Filters the catalog down to games playable by the group in the time
//! available, weights them by the selected preferences, and draws a
//! handful without replacement. The draw is hand-rolled rather than
//! delegated to a library sampler so that seeded runs reproduce the
//! exact renormalize-and-draw sequence.

use chrono::{Local, NaiveDate};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::models::{GameRecord, PreferenceSet, Suggestion};

/// Uniform weight mass spread evenly across all eligible games.
///
/// Keeps every eligible game at a non-zero probability even when both
/// preference boosts are active.
pub const BASE_WEIGHT_MODIFIER: f64 = 0.2;

/// Failure modes of a recommendation request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    /// No catalog entry satisfies the player-count and duration filter.
    /// An expected, user-visible condition rather than a fault.
    #[error("no games match the requested player count and time")]
    NoMatch,
}

/// Parameters of one recommendation request.
#[derive(Debug, Clone, Copy)]
pub struct RecommendRequest {
    /// Size of the group that wants to play.
    pub player_count: u32,
    /// Time budget in minutes.
    pub available_minutes: u32,
    /// Soft preference boosts.
    pub preferences: PreferenceSet,
    /// Upper bound on the number of suggestions returned.
    pub requested_count: usize,
}

/// Recommend against today's date. See [`recommend`].
pub fn recommend_today<R: Rng>(
    records: &[GameRecord],
    request: &RecommendRequest,
    rng: &mut R,
) -> Result<Vec<Suggestion>, RecommendError> {
    recommend(records, request, Local::now().date_naive(), rng)
}

/// Draw up to `requested_count` eligible games, weighted by preference.
///
/// Returns `min(requested_count, eligible)` suggestions in draw order.
/// The catalog is read-only here; suggestions are derived values.
pub fn recommend<R: Rng>(
    records: &[GameRecord],
    request: &RecommendRequest,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Suggestion>, RecommendError> {
    let mut pool: Vec<&GameRecord> = records
        .iter()
        .filter(|game| {
            game.supports_players(request.player_count)
                && game.fits_within(request.available_minutes)
        })
        .collect();
    if pool.is_empty() {
        return Err(RecommendError::NoMatch);
    }

    let mut weights = eligible_weights(&pool, request.preferences, today);
    debug!(eligible = pool.len(), ?weights, "weighted eligible games");

    let count = request.requested_count.min(pool.len());
    let mut suggestions = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = draw_index(&weights, rng);
        let picked = pool.remove(idx);
        weights.remove(idx);
        renormalize(&mut weights);
        suggestions.push(Suggestion::from(picked));
    }
    Ok(suggestions)
}

/// Normalized selection weights for an eligible set, in input order.
///
/// Exposed so tests can assert the sum-to-one invariant and the
/// degenerate equal-weight cases directly.
pub fn eligible_weights(
    eligible: &[&GameRecord],
    preferences: PreferenceSet,
    today: NaiveDate,
) -> Vec<f64> {
    let n = eligible.len();
    let mut weights = vec![BASE_WEIGHT_MODIFIER / n as f64; n];

    if preferences.favor_stale {
        let days: Vec<i64> = eligible
            .iter()
            .map(|game| (today - game.last_played).num_days().max(0))
            .collect();
        let denom = days.iter().sum::<i64>().max(1) as f64;
        for (weight, days_since) in weights.iter_mut().zip(&days) {
            *weight += *days_since as f64 / denom;
        }
    }

    if preferences.favor_underplayed {
        let most_played = eligible
            .iter()
            .map(|game| game.times_played)
            .max()
            .unwrap_or(0);
        let total_plays = eligible
            .iter()
            .map(|game| u64::from(game.times_played))
            .sum::<u64>()
            .max(1) as f64;
        let inverse: Vec<f64> = eligible
            .iter()
            .map(|game| f64::from(most_played - game.times_played) / total_plays)
            .collect();
        let denom = inverse.iter().sum::<f64>().max(1.0);
        for (weight, contribution) in weights.iter_mut().zip(&inverse) {
            *weight += contribution / denom;
        }
    }

    renormalize(&mut weights);
    weights
}

fn renormalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for weight in weights.iter_mut() {
            *weight /= total;
        }
    }
}

fn draw_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let mut target = rng.random_range(0.0..1.0);
    for (idx, weight) in weights.iter().enumerate() {
        if target < *weight {
            return idx;
        }
        target -= weight;
    }
    // Floating point slack can push the walk past the last bucket.
    weights.len() - 1
}
