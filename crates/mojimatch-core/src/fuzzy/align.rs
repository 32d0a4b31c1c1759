//! Alignment search
//!
//! Dynamic programming over `state[i][j][reversed]`: the best alignment of the
//! first `i` query tokens against the first `j` target tokens, split by
//! whether the path already used its out-of-order match. Transitions:
//!
//! - direct match of one query token, or a group of consecutive query tokens,
//!   onto the target token at the cursor
//! - reversed match onto a target token behind the cursor (once per path,
//!   only from the non-reversed layer)
//! - skip a target token / skip a query token
//!
//! Cells keep the candidate with the highest weight sum; the sum is divided
//! by `|target|` on every path so comparing sums is enough. A candidate only
//! replaces the incumbent when strictly better, so ties go to whichever
//! transition is tried first: direct single, direct groups from the longest
//! run down, reversed (nearest target position first, single before groups),
//! skip target, skip query.

use std::ops::Range;

use serde::Serialize;

use super::ranges::merge_ranges;
use super::score;
use super::weight::{token_weight, TokenGroup};
use crate::tokenize::Token;

/// One accepted pairing of a query token run with a target token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub query_range: Range<usize>,
    pub target_index: usize,
    pub weight: f64,
}

/// The winning alignment for one query/target pair
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchingStrategy {
    /// Matches in query order
    pub matches: Vec<Match>,
    /// Matches accepted out of the target's order
    pub reversed_count: usize,
    /// Sum of (penalized) match weights over the target token count
    pub score: f64,
}

impl MatchingStrategy {
    pub fn merged_query_ranges(&self) -> Vec<Range<usize>> {
        merge_ranges(self.matches.iter().map(|m| m.query_range.clone()).collect())
    }

    pub fn merged_target_ranges(&self) -> Vec<Range<usize>> {
        merge_ranges(
            self.matches
                .iter()
                .map(|m| m.target_index..m.target_index + 1)
                .collect(),
        )
    }

    /// Query tokens not covered by any match
    pub fn missed_query_tokens(&self, query_len: usize) -> usize {
        let covered: usize = self.merged_query_ranges().iter().map(|r| r.len()).sum();
        query_len.saturating_sub(covered)
    }

    /// Best weight each query token took part in; a token inside a group of
    /// `k` receives `weight / k`
    pub fn best_weight_per_query_token(&self, query_len: usize) -> Vec<f64> {
        let mut best = vec![0.0_f64; query_len];
        for m in &self.matches {
            let share = m.weight / m.query_range.len() as f64;
            for slot in &mut best[m.query_range.clone()] {
                *slot = slot.max(share);
            }
        }
        best
    }

    pub fn best_weight_per_target_token(&self, target_len: usize) -> Vec<f64> {
        let mut best = vec![0.0_f64; target_len];
        for m in &self.matches {
            best[m.target_index] = m.weight;
        }
        best
    }
}

/// A query run `[end - run, end)` with a nonzero weight against target token `target`
#[derive(Debug, Clone, Copy)]
struct Span {
    run: usize,
    target: usize,
    weight: f64,
}

/// Every compatible query run, grouped by the query position it ends at.
///
/// A run of two or more tokens can only match when its joined text, or its
/// joined equivalents, has exactly the char length of some target text or
/// equivalent. Walking a run's start leftwards only grows both lengths, so
/// the walk stops once both exceed the longest target spelling.
struct SpanWeights {
    by_end: Vec<Vec<Span>>,
}

impl SpanWeights {
    fn new(query: &[Token], target: &[Token]) -> Self {
        let mut lengths: Vec<usize> = target
            .iter()
            .flat_map(|t| {
                std::iter::once(t.char_len())
                    .chain(t.equivalents().iter().map(|e| e.chars().count()))
            })
            .collect();
        lengths.sort_unstable();
        lengths.dedup();
        let longest = lengths.last().copied().unwrap_or(0);
        let fits = |len: usize| lengths.binary_search(&len).is_ok();

        // Nearest query position at or before each index that has equivalents
        let mut last_spelled = Vec::with_capacity(query.len());
        let mut last = None;
        for (position, token) in query.iter().enumerate() {
            if !token.equivalents().is_empty() {
                last = Some(position);
            }
            last_spelled.push(last);
        }

        let by_end = (1..=query.len())
            .map(|end| {
                let mut spans = Vec::new();
                let mut text_len = 0;
                let mut spelled_len = 0;
                let mut start = end;

                while start > 0 {
                    start -= 1;
                    text_len += query[start].char_len();
                    spelled_len += query[start].spelled_len();
                    let run = end - start;

                    if run == 1 {
                        for (k, t) in target.iter().enumerate() {
                            push_span(&mut spans, run, k, token_weight(&query[start], t));
                        }
                    } else if fits(text_len) || (spelled_len > 0 && fits(spelled_len)) {
                        let group = TokenGroup::new(&query[start..end]);
                        for (k, t) in target.iter().enumerate() {
                            push_span(&mut spans, run, k, group.weight(t));
                        }
                    }

                    if text_len > longest {
                        if spelled_len > longest {
                            break;
                        }
                        if spelled_len == 0 {
                            // Plain tokens leave the spelling empty: resume at
                            // the next token to the left that has equivalents.
                            // text_len stays above `longest` either way.
                            match start.checked_sub(1).and_then(|p| last_spelled[p]) {
                                Some(p) => start = p + 1,
                                None => break,
                            }
                        }
                    }
                }

                // Transition order: nearest target first, then the single
                // token, then groups from the longest run down
                spans.sort_by_key(|span: &Span| {
                    let run_order = if span.run == 1 { 0 } else { usize::MAX - span.run };
                    (std::cmp::Reverse(span.target), run_order)
                });
                spans
            })
            .collect();

        Self { by_end }
    }

    /// Compatible runs ending at query position `end`, in transition order
    fn ending_at(&self, end: usize) -> &[Span] {
        &self.by_end[end - 1]
    }
}

fn push_span(spans: &mut Vec<Span>, run: usize, target: usize, weight: f64) {
    if weight > 0.0 {
        spans.push(Span { run, target, weight });
    }
}

#[derive(Debug, Clone, Copy)]
enum Link {
    Origin,
    Carry,
    Pair {
        query_start: usize,
        query_end: usize,
        target_index: usize,
        weight: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    total: f64,
    reversed: usize,
    prev: usize,
    link: Link,
}

/// Flat `[i][j][reversed]` arena. `None` marks an unreachable state.
///
/// Non-reversed cells also record which target tokens their path already
/// matched, so a reversed match never reuses a target token.
struct Lattice {
    cols: usize,
    words: usize,
    cells: Vec<Option<Cell>>,
    used: Vec<u64>,
}

impl Lattice {
    fn new(query_len: usize, target_len: usize) -> Self {
        let cols = target_len + 1;
        let positions = (query_len + 1) * cols;
        let words = target_len.div_ceil(64);
        Self {
            cols,
            words,
            cells: vec![None; positions * 2],
            used: vec![0; positions * words],
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize, reversed: usize) -> usize {
        (i * self.cols + j) * 2 + reversed
    }

    fn get(&self, index: usize) -> Option<Cell> {
        self.cells[index]
    }

    /// Keep `candidate` only if it beats what the cell already holds
    fn offer(&mut self, index: usize, candidate: Cell) {
        match self.cells[index] {
            Some(current) if current.total >= candidate.total => {}
            _ => self.cells[index] = Some(candidate),
        }
    }

    /// Extend the path ending at `from` with a match
    fn offer_pair(
        &mut self,
        from: usize,
        to: usize,
        query: Range<usize>,
        target_index: usize,
        weight: f64,
        reverses: bool,
    ) {
        if let Some(prev) = self.get(from) {
            self.offer(
                to,
                Cell {
                    total: prev.total + weight,
                    reversed: prev.reversed + usize::from(reverses),
                    prev: from,
                    link: Link::Pair {
                        query_start: query.start,
                        query_end: query.end,
                        target_index,
                        weight,
                    },
                },
            );
        }
    }

    /// Carry the path ending at `from` forward unchanged
    fn offer_carry(&mut self, from: usize, to: usize) {
        if let Some(prev) = self.get(from) {
            self.offer(
                to,
                Cell {
                    total: prev.total,
                    reversed: prev.reversed,
                    prev: from,
                    link: Link::Carry,
                },
            );
        }
    }

    fn is_used(&self, index: usize, target_index: usize) -> bool {
        let base = (index / 2) * self.words;
        self.used[base + target_index / 64] & (1u64 << (target_index % 64)) != 0
    }

    /// Record the matched targets of the settled non-reversed cell at `index`
    fn seal(&mut self, index: usize) {
        let Some(cell) = self.cells[index] else {
            return;
        };
        if self.words == 0 {
            return;
        }
        let base = (index / 2) * self.words;
        if !matches!(cell.link, Link::Origin) {
            let prev_base = (cell.prev / 2) * self.words;
            self.used.copy_within(prev_base..prev_base + self.words, base);
        }
        if let Link::Pair { target_index, .. } = cell.link {
            self.used[base + target_index / 64] |= 1u64 << (target_index % 64);
        }
    }

    /// Walk back from `index` and collect the matches in query order
    fn trace(&self, index: usize) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut cursor = index;
        while let Some(cell) = self.cells[cursor] {
            match cell.link {
                Link::Origin => break,
                Link::Carry => {}
                Link::Pair {
                    query_start,
                    query_end,
                    target_index,
                    weight,
                } => matches.push(Match {
                    query_range: query_start..query_end,
                    target_index,
                    weight,
                }),
            }
            cursor = cell.prev;
        }
        matches.reverse();
        matches
    }
}

/// Find the alignment of `query` onto `target` with the best final score.
///
/// Every match weight is scaled by `1 - reversed_count / |target|`. An empty
/// target yields an empty strategy with score 0.
pub fn align(query: &[Token], target: &[Token]) -> MatchingStrategy {
    let m = query.len();
    let n = target.len();
    if n == 0 {
        return MatchingStrategy::default();
    }

    let spans = SpanWeights::new(query, target);
    let mut lattice = Lattice::new(m, n);
    let origin = lattice.index(0, 0, 0);
    lattice.cells[origin] = Some(Cell {
        total: 0.0,
        reversed: 0,
        prev: origin,
        link: Link::Origin,
    });

    for i in 0..=m {
        for j in 0..=n {
            let here = [lattice.index(i, j, 0), lattice.index(i, j, 1)];

            if i > 0 && j > 0 {
                // Direct: runs ending at query token i-1 onto target token j-1,
                // single token first, then groups from the longest run down
                for span in spans.ending_at(i).iter().filter(|s| s.target == j - 1) {
                    let query_run = i - span.run..i;
                    for r in 0..2 {
                        let from = lattice.index(i - span.run, j - 1, r);
                        lattice.offer_pair(
                            from,
                            here[r],
                            query_run.clone(),
                            j - 1,
                            span.weight,
                            false,
                        );
                    }
                }
            }

            if i > 0 {
                // Reversed: onto a target token behind the cursor, only from
                // a path that has not reversed yet
                for span in spans.ending_at(i).iter().filter(|s| s.target < j) {
                    let from = lattice.index(i - span.run, j, 0);
                    if lattice.get(from).is_none() || lattice.is_used(from, span.target) {
                        continue;
                    }
                    lattice.offer_pair(
                        from,
                        here[1],
                        i - span.run..i,
                        span.target,
                        span.weight,
                        true,
                    );
                }
            }

            if j > 0 {
                for r in 0..2 {
                    let from = lattice.index(i, j - 1, r);
                    lattice.offer_carry(from, here[r]);
                }
            }

            if i > 0 {
                for r in 0..2 {
                    let from = lattice.index(i - 1, j, r);
                    lattice.offer_carry(from, here[r]);
                }
            }

            lattice.seal(here[0]);
        }
    }

    // Compare the two layers on their final score; ties keep the in-order one
    let mut best: Option<(f64, MatchingStrategy)> = None;
    for r in 0..2 {
        let index = lattice.index(m, n, r);
        let Some(cell) = lattice.get(index) else {
            continue;
        };
        let strategy = finish(lattice.trace(index), cell.reversed, n);
        let final_score =
            strategy.score * score::missed_penalty(strategy.missed_query_tokens(m));
        if best.as_ref().map_or(true, |(s, _)| final_score > *s) {
            best = Some((final_score, strategy));
        }
    }

    best.map(|(_, strategy)| strategy).unwrap_or_default()
}

/// Apply the global reversal penalty and compute the strategy score
fn finish(mut matches: Vec<Match>, reversed_count: usize, target_len: usize) -> MatchingStrategy {
    let penalty = score::reversal_penalty(reversed_count, target_len);
    for m in &mut matches {
        m.weight *= penalty;
    }
    let score = score::base_score(&matches, target_len);
    MatchingStrategy {
        matches,
        reversed_count,
        score,
    }
}
