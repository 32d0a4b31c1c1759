//! Catalog search
//!
//! A linear scan: every candidate is matched against the query over each of
//! its title fields, the best title wins, and the ranked list is sliced.

use serde::Serialize;
use tracing::debug;

use crate::fuzzy::{FuzzyMatchResult, Matcher};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Anything with one or more searchable titles
pub trait SearchTarget {
    /// Titles to match against, in priority order (the first wins ties)
    fn titles(&self) -> impl Iterator<Item = &str> + '_;
}

impl SearchTarget for String {
    fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.as_str())
    }
}

impl SearchTarget for &str {
    fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(*self)
    }
}

impl SearchTarget for Vec<String> {
    fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(String::as_str)
    }
}

/// A candidate together with the result of its best-matching title
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch<'a, T> {
    pub item: &'a T,
    pub result: FuzzyMatchResult,
}

/// Search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Candidates scoring below this are dropped before ranking
    pub min_score: f64,
    /// Catalog size from which scoring fans out over threads (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            parallel_threshold: 256,
        }
    }
}

/// Best result over all titles of `item`; `None` if it has no titles
pub fn best_title_match<T: SearchTarget>(matcher: &Matcher, item: &T) -> Option<FuzzyMatchResult> {
    let mut best: Option<FuzzyMatchResult> = None;
    for title in item.titles() {
        let result = matcher.match_target(title);
        if best.as_ref().map_or(true, |b| result.score > b.score) {
            best = Some(result);
        }
    }
    best
}

/// Rank `candidates` against `query` and return `[offset, offset + limit)`
/// of the list sorted by score descending. Equal scores keep catalog order.
pub fn search_all<'a, T: SearchTarget + Sync>(
    query: &str,
    candidates: &'a [T],
    limit: usize,
    offset: usize,
) -> Vec<RankedMatch<'a, T>> {
    search_with(&SearchConfig::default(), query, candidates, limit, offset)
}

/// [`search_all`] with explicit configuration
pub fn search_with<'a, T: SearchTarget + Sync>(
    config: &SearchConfig,
    query: &str,
    candidates: &'a [T],
    limit: usize,
    offset: usize,
) -> Vec<RankedMatch<'a, T>> {
    let matcher = Matcher::new(query);
    let mut ranked = score_candidates(&matcher, candidates, config);

    // Stable sort: ties stay in catalog order
    ranked.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        query = query,
        candidates = candidates.len(),
        ranked = ranked.len(),
        limit = limit,
        offset = offset,
        "catalog search"
    );

    ranked.into_iter().skip(offset).take(limit).collect()
}

/// Score candidates - parallel on large catalogs when enabled
#[cfg(feature = "parallel")]
fn score_candidates<'a, T: SearchTarget + Sync>(
    matcher: &Matcher,
    candidates: &'a [T],
    config: &SearchConfig,
) -> Vec<RankedMatch<'a, T>> {
    if candidates.len() >= config.parallel_threshold {
        candidates
            .par_iter()
            .filter_map(|item| rank(matcher, item, config.min_score))
            .collect()
    } else {
        score_sequential(matcher, candidates, config)
    }
}

/// Score candidates sequentially (parallel feature disabled)
#[cfg(not(feature = "parallel"))]
fn score_candidates<'a, T: SearchTarget + Sync>(
    matcher: &Matcher,
    candidates: &'a [T],
    config: &SearchConfig,
) -> Vec<RankedMatch<'a, T>> {
    score_sequential(matcher, candidates, config)
}

fn score_sequential<'a, T: SearchTarget>(
    matcher: &Matcher,
    candidates: &'a [T],
    config: &SearchConfig,
) -> Vec<RankedMatch<'a, T>> {
    candidates
        .iter()
        .filter_map(|item| rank(matcher, item, config.min_score))
        .collect()
}

fn rank<'a, T: SearchTarget>(
    matcher: &Matcher,
    item: &'a T,
    min_score: f64,
) -> Option<RankedMatch<'a, T>> {
    best_title_match(matcher, item)
        .filter(|result| result.score >= min_score)
        .map(|result| RankedMatch { item, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<String> {
        vec![
            "ロキ".to_string(),
            "しゃけ".to_string(),
            "Tell Your World".to_string(),
            "メルト".to_string(),
        ]
    }

    #[test]
    fn test_best_candidate_first() {
        let titles = catalog();
        let ranked = search_all("shake", &titles, 10, 0);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].item, "しゃけ");
    }

    #[test]
    fn test_sorted_descending() {
        let titles = catalog();
        let ranked = search_all("tell world", &titles, 10, 0);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].result.score >= w[1].result.score));
        assert_eq!(ranked[0].item, "Tell Your World");
    }

    #[test]
    fn test_limit_and_offset() {
        let titles = catalog();
        let all = search_all("shake", &titles, 10, 0);
        let page = search_all("shake", &titles, 2, 1);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].item, all[1].item);
        assert_eq!(page[1].item, all[2].item);
        assert!(search_all("shake", &titles, 10, 10).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let titles = vec!["xyz".to_string(), "uvw".to_string(), "rst".to_string()];
        let ranked = search_all("a", &titles, 10, 0);
        let order: Vec<&str> = ranked.iter().map(|m| m.item.as_str()).collect();
        assert_eq!(order, vec!["xyz", "uvw", "rst"]);
    }

    #[test]
    fn test_best_alias_wins() {
        let records = vec![
            vec!["千本桜".to_string(), "senbonzakura".to_string()],
            vec!["メルト".to_string(), "meruto".to_string()],
        ];
        let ranked = search_all("meruto", &records, 10, 0);
        assert_eq!(ranked[0].item[0], "メルト");
        assert_eq!(ranked[0].result.target, "meruto");
        assert_eq!(ranked[0].result.score, 1.0);
    }

    #[test]
    fn test_first_title_wins_ties() {
        let records = vec![vec!["abc".to_string(), "abc".to_string()]];
        let matcher = Matcher::new("abc");
        let best = best_title_match(&matcher, &records[0]).unwrap();
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_min_score_filters() {
        let titles = catalog();
        let config = SearchConfig {
            min_score: 0.5,
            ..Default::default()
        };
        let ranked = search_with(&config, "shake", &titles, 10, 0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item, "しゃけ");
    }

    #[test]
    fn test_no_titles() {
        let records: Vec<Vec<String>> = vec![Vec::new()];
        assert!(search_all("a", &records, 10, 0).is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.min_score, 0.0);
        assert_eq!(config.parallel_threshold, 256);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let titles: Vec<String> = (0..64)
            .map(|i| format!("しゃけ {i} hikari"))
            .collect();
        let sequential = search_with(
            &SearchConfig {
                parallel_threshold: usize::MAX,
                ..Default::default()
            },
            "hikari 3",
            &titles,
            20,
            0,
        );
        let fanned_out = search_with(
            &SearchConfig {
                parallel_threshold: 1,
                ..Default::default()
            },
            "hikari 3",
            &titles,
            20,
            0,
        );
        let a: Vec<&String> = sequential.iter().map(|m| m.item).collect();
        let b: Vec<&String> = fanned_out.iter().map(|m| m.item).collect();
        assert_eq!(a, b);
    }
}
