//! Terminal presentation of search hits

use std::ops::Range;

use mojimatch_core::fuzzy::slice_chars;

use crate::engine::SearchHit;

/// Strings wrapped around each highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub open: &'static str,
    pub close: &'static str,
}

impl Markers {
    /// Bold yellow
    pub const ANSI: Markers = Markers {
        open: "\x1b[1;33m",
        close: "\x1b[0m",
    };

    pub const PLAIN: Markers = Markers {
        open: "[",
        close: "]",
    };
}

/// Wrap each char range of `text` in `markers`.
/// Ranges are expected sorted and disjoint, as matches report them.
pub fn highlight(text: &str, ranges: &[Range<usize>], markers: Markers) -> String {
    let len = text.chars().count();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for range in ranges {
        let start = range.start.clamp(cursor, len);
        let end = range.end.clamp(start, len);
        if start == end {
            continue;
        }
        out.push_str(slice_chars(text, cursor..start));
        out.push_str(markers.open);
        out.push_str(slice_chars(text, start..end));
        out.push_str(markers.close);
        cursor = end;
    }
    out.push_str(slice_chars(text, cursor..len));
    out
}

pub fn format_score(score: f64) -> String {
    format!("({score:.2})")
}

/// One hit as `- [id] title  (score)`; an alias match is shown on a second line
pub fn render_hit(hit: &SearchHit, markers: Markers) -> String {
    let result = &hit.result;
    let matched = highlight(&result.target, &result.target_ranges, markers);
    let score = format_score(result.score);

    if hit.matched_alias() {
        format!("- [{}] {}  {}\n    {}", hit.id, hit.title, score, matched)
    } else {
        format!("- [{}] {}  {}", hit.id, matched, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mojimatch_core::fuzzy_match;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_highlight_spans() {
        assert_eq!(highlight("千本桜", &[0..2], Markers::PLAIN), "[千本]桜");
        assert_eq!(
            highlight("Tell Your World", &[0..5, 10..15], Markers::PLAIN),
            "[Tell ]Your [World]"
        );
    }

    #[test]
    fn test_highlight_nothing() {
        assert_eq!(highlight("ロキ", &[], Markers::PLAIN), "ロキ");
        assert_eq!(highlight("", &[], Markers::PLAIN), "");
    }

    #[test]
    fn test_highlight_clamps_out_of_range() {
        assert_eq!(highlight("abc", &[2..9, 5..6], Markers::PLAIN), "ab[c]");
    }

    #[test]
    fn test_highlight_ansi() {
        assert_eq!(
            highlight("しゃけ", &[0..3], Markers::ANSI),
            "\x1b[1;33mしゃけ\x1b[0m"
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.9), "(0.90)");
        assert_eq!(format_score(2.0 / 3.0), "(0.67)");
    }

    #[test]
    fn test_render_title_hit() {
        let hit = SearchHit {
            id: 8,
            title: "しゃけ".to_string(),
            result: fuzzy_match("shake", "しゃけ"),
        };
        assert_eq!(render_hit(&hit, Markers::PLAIN), "- [8] [しゃけ]  (0.90)");
    }

    #[test]
    fn test_render_alias_hit() {
        let hit = SearchHit {
            id: 3,
            title: "千本桜".to_string(),
            result: fuzzy_match("senbon", "senbonzakura"),
        };
        assert_eq!(
            render_hit(&hit, Markers::PLAIN),
            "- [3] 千本桜  (0.50)\n    [senbon]zakura"
        );
    }
}
