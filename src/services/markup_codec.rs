//! Inline diff markup codec.
//!
//! Rewrites come back from the transformer as plain text in which every edit
//! is written as `~~removed~~**added**`. This module turns that string into
//! typed [`MarkupSpan`]s and back.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::{MarkupSpan, SpanKind};

/// A deletion immediately followed by its insertion. Whitespace just inside
/// the markers is not captured; nothing may sit between `~~` and `**`.
///
/// Deleted text may hold single `~` but never `~~`, and inserted text may
/// hold single `*` but never `**`, so a pair cannot swallow an unpaired
/// marker that precedes it.
static EDIT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"~~\s*((?:[^~]|~[^~])*?)\s*~~\*\*\s*((?:[^*]|\*[^*])*?)\s*\*\*")
        .unwrap_or_else(|err| unreachable!("edit pair pattern is valid: {err}"))
});

/// Decoder and renderer for `~~deleted~~**inserted**` markup.
///
/// Decoding never fails: markers that do not form a complete pair are kept
/// as literal unchanged text.
pub struct MarkupCodec;

impl MarkupCodec {
    /// Split raw transformer output into spans.
    ///
    /// Every matched pair yields a `Deleted` span then an `Inserted` span,
    /// either of which may be empty. Non-empty text between pairs yields one
    /// `Unchanged` span.
    pub fn decode(raw: &str) -> Vec<MarkupSpan> {
        let mut spans = Vec::new();
        let mut cursor = 0;

        for caps in EDIT_PAIR.captures_iter(raw) {
            let (Some(whole), Some(deleted), Some(inserted)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if whole.start() > cursor {
                spans.push(MarkupSpan::unchanged(&raw[cursor..whole.start()]));
            }
            spans.push(MarkupSpan::deleted(deleted.as_str()));
            spans.push(MarkupSpan::inserted(inserted.as_str()));
            cursor = whole.end();
        }

        if cursor < raw.len() {
            spans.push(MarkupSpan::unchanged(&raw[cursor..]));
        }
        spans
    }

    /// The text a reader sees after the edits: unchanged and inserted content.
    pub fn plain_text(spans: &[MarkupSpan]) -> String {
        spans
            .iter()
            .filter(|span| span.is_visible())
            .map(|span| span.content.as_str())
            .collect()
    }

    /// Shorthand for `plain_text(&decode(raw))`.
    pub fn plain_text_from_raw(raw: &str) -> String {
        Self::plain_text(&Self::decode(raw))
    }

    /// Approximate text before the edits: unchanged and deleted content.
    pub fn original_text(spans: &[MarkupSpan]) -> String {
        spans
            .iter()
            .filter(|span| span.kind != SpanKind::Inserted)
            .map(|span| span.content.as_str())
            .collect()
    }

    /// Write spans back out as markup.
    ///
    /// A deletion followed by an insertion renders as one pair. A deletion or
    /// insertion without a partner is paired with an empty counterpart so
    /// the output always decodes again.
    pub fn render(spans: &[MarkupSpan]) -> String {
        let mut out = String::new();
        let mut iter = spans.iter().peekable();

        while let Some(span) = iter.next() {
            match span.kind {
                SpanKind::Unchanged => out.push_str(&span.content),
                SpanKind::Deleted => {
                    let inserted = iter
                        .next_if(|next| next.kind == SpanKind::Inserted)
                        .map_or("", |next| next.content.as_str());
                    push_pair(&mut out, &span.content, inserted);
                }
                SpanKind::Inserted => push_pair(&mut out, "", &span.content),
            }
        }
        out
    }

    /// Number of edit pairs in `spans`.
    pub fn edit_count(spans: &[MarkupSpan]) -> usize {
        spans
            .iter()
            .filter(|span| span.kind == SpanKind::Deleted)
            .count()
    }
}

fn push_pair(out: &mut String, deleted: &str, inserted: &str) {
    out.push_str("~~");
    out.push_str(deleted);
    out.push_str("~~**");
    out.push_str(inserted);
    out.push_str("**");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_pair() {
        let spans = MarkupCodec::decode("~~The cat sat.~~**The feline was seated.**");
        assert_eq!(
            spans,
            vec![
                MarkupSpan::deleted("The cat sat."),
                MarkupSpan::inserted("The feline was seated."),
            ]
        );
    }

    #[test]
    fn test_decode_keeps_surrounding_text() {
        let spans = MarkupCodec::decode("I ~~is~~**am** happy.");
        assert_eq!(
            spans,
            vec![
                MarkupSpan::unchanged("I "),
                MarkupSpan::deleted("is"),
                MarkupSpan::inserted("am"),
                MarkupSpan::unchanged(" happy."),
            ]
        );
        assert_eq!(MarkupCodec::plain_text(&spans), "I am happy.");
        assert_eq!(MarkupCodec::original_text(&spans), "I is happy.");
    }

    #[test]
    fn test_marker_whitespace_is_trimmed() {
        let spans = MarkupCodec::decode("a ~~ old ~~** new ** b");
        assert_eq!(spans[1], MarkupSpan::deleted("old"));
        assert_eq!(spans[2], MarkupSpan::inserted("new"));
        assert_eq!(spans[0], MarkupSpan::unchanged("a "));
        assert_eq!(spans[3], MarkupSpan::unchanged(" b"));
    }

    #[test]
    fn test_empty_sides_are_kept() {
        let spans = MarkupCodec::decode("x~~gone~~****y");
        assert_eq!(
            spans,
            vec![
                MarkupSpan::unchanged("x"),
                MarkupSpan::deleted("gone"),
                MarkupSpan::inserted(""),
                MarkupSpan::unchanged("y"),
            ]
        );

        let spans = MarkupCodec::decode("~~~~**new**");
        assert_eq!(spans, vec![MarkupSpan::deleted(""), MarkupSpan::inserted("new")]);
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        for raw in [
            "a ~~dangling",
            "only **bold** here",
            "~~gap~~ **not a pair**",
            "~~open~~**never closed",
        ] {
            let spans = MarkupCodec::decode(raw);
            assert_eq!(spans, vec![MarkupSpan::unchanged(raw)], "input: {raw}");
            assert_eq!(MarkupCodec::plain_text(&spans), raw);
        }
    }

    #[test]
    fn test_single_markers_inside_pairs() {
        let spans = MarkupCodec::decode("Cost: ~~six~~**2*3** units");
        assert_eq!(
            spans,
            vec![
                MarkupSpan::unchanged("Cost: "),
                MarkupSpan::deleted("six"),
                MarkupSpan::inserted("2*3"),
                MarkupSpan::unchanged(" units"),
            ]
        );
        assert_eq!(MarkupCodec::plain_text(&spans), "Cost: 2*3 units");

        let spans = MarkupCodec::decode("~~about five~~**~5**");
        assert_eq!(spans, vec![MarkupSpan::deleted("about five"), MarkupSpan::inserted("~5")]);

        let spans = MarkupCodec::decode("~~2*3 or ~6~~**six**");
        assert_eq!(spans, vec![MarkupSpan::deleted("2*3 or ~6"), MarkupSpan::inserted("six")]);
    }

    #[test]
    fn test_pair_spans_lines() {
        let spans = MarkupCodec::decode("~~one\ntwo~~**uno\ndos**");
        assert_eq!(spans, vec![MarkupSpan::deleted("one\ntwo"), MarkupSpan::inserted("uno\ndos")]);
    }

    #[test]
    fn test_unpaired_marker_before_pair_stays_literal() {
        let spans = MarkupCodec::decode("~~gap~~ then ~~old~~**new**");
        assert_eq!(
            spans,
            vec![
                MarkupSpan::unchanged("~~gap~~ then "),
                MarkupSpan::deleted("old"),
                MarkupSpan::inserted("new"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(MarkupCodec::decode("").is_empty());
        assert_eq!(MarkupCodec::plain_text_from_raw(""), "");
    }

    #[test]
    fn test_adjacent_pairs() {
        let spans = MarkupCodec::decode("~~a~~**b**~~c~~**d**");
        assert_eq!(spans.len(), 4);
        assert_eq!(MarkupCodec::plain_text(&spans), "bd");
        assert_eq!(MarkupCodec::edit_count(&spans), 2);
    }

    #[test]
    fn test_render_pairs_orphans() {
        let spans = vec![
            MarkupSpan::unchanged("x "),
            MarkupSpan::deleted("old"),
            MarkupSpan::unchanged(" y "),
            MarkupSpan::inserted("new"),
        ];
        let rendered = MarkupCodec::render(&spans);
        assert_eq!(rendered, "x ~~old~~**** y ~~~~**new**");
        assert_eq!(
            MarkupCodec::plain_text_from_raw(&rendered),
            MarkupCodec::plain_text(&spans)
        );
    }
}
