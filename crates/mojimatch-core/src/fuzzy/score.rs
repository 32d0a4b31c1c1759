//! Score aggregation

use super::align::Match;

/// Multiplier applied once per query token left out of every match
pub const MISSED_TOKEN_PENALTY: f64 = 0.9;

/// Sum of match weights over the target token count; 0 for an empty target
pub fn base_score(matches: &[Match], target_len: usize) -> f64 {
    if target_len == 0 {
        return 0.0;
    }
    let total: f64 = matches.iter().map(|m| m.weight).sum();
    total / target_len as f64
}

/// Global factor `1 - reversed / |target|`, applied uniformly to every match
pub fn reversal_penalty(reversed_count: usize, target_len: usize) -> f64 {
    if target_len == 0 {
        return 1.0;
    }
    (1.0 - reversed_count as f64 / target_len as f64).max(0.0)
}

/// `0.9 ^ missed`
pub fn missed_penalty(missed_query_tokens: usize) -> f64 {
    let exponent = i32::try_from(missed_query_tokens).unwrap_or(i32::MAX);
    MISSED_TOKEN_PENALTY.powi(exponent)
}
