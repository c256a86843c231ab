use proptest::prelude::*;
use redraft::domain::models::{MarkupSpan, SpanKind};
use redraft::services::MarkupCodec;

/// Edit content that starts and ends on a word character, may span lines
/// and may hold single `*` or `~`, but never a `~~` or `**` delimiter.
fn edit_content() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9]",
        ("[a-z0-9]", "[a-z0-9 .,!*~\n]{0,10}", "[a-z0-9]")
            .prop_map(|(first, middle, last)| format!("{first}{middle}{last}")),
    ]
    .prop_filter("content must not contain a delimiter", |content| {
        !content.contains("~~") && !content.contains("**")
    })
}

/// Unchanged run, deleted text, inserted text.
fn edit_segment() -> impl Strategy<Value = (String, String, String)> {
    ("[a-zA-Z ,.\n]{0,12}", edit_content(), edit_content())
}

fn build_raw(segments: &[(String, String, String)], tail: &str) -> String {
    let mut raw = String::new();
    for (unchanged, deleted, inserted) in segments {
        raw.push_str(unchanged);
        raw.push_str(&format!("~~{deleted}~~**{inserted}**"));
    }
    raw.push_str(tail);
    raw
}

proptest! {
    /// Text without markers decodes to itself.
    #[test]
    fn prop_marker_free_text_is_identity(text in "[a-zA-Z0-9 .,!?'\n-]{0,200}") {
        let spans = MarkupCodec::decode(&text);
        prop_assert!(spans.len() <= 1);
        prop_assert!(spans.iter().all(|span| span.kind == SpanKind::Unchanged));
        prop_assert_eq!(MarkupCodec::plain_text(&spans), text.clone());
        prop_assert_eq!(MarkupCodec::original_text(&spans), text);
    }

    /// n pairs and k non-empty unchanged runs yield exactly 2n + k spans.
    #[test]
    fn prop_span_count(
        segments in prop::collection::vec(edit_segment(), 0..8),
        tail in "[a-zA-Z ,.]{0,12}",
    ) {
        let raw = build_raw(&segments, &tail);
        let spans = MarkupCodec::decode(&raw);

        let unchanged_runs = segments.iter().filter(|(u, _, _)| !u.is_empty()).count()
            + usize::from(!tail.is_empty());
        prop_assert_eq!(spans.len(), 2 * segments.len() + unchanged_runs);
        prop_assert_eq!(MarkupCodec::edit_count(&spans), segments.len());
    }

    /// Plain text keeps insertions, original text keeps deletions.
    #[test]
    fn prop_plain_and_original_text(
        segments in prop::collection::vec(edit_segment(), 0..8),
        tail in "[a-zA-Z ,.]{0,12}",
    ) {
        let raw = build_raw(&segments, &tail);
        let spans = MarkupCodec::decode(&raw);

        let mut plain = String::new();
        let mut original = String::new();
        for (unchanged, deleted, inserted) in &segments {
            plain.push_str(unchanged);
            plain.push_str(inserted);
            original.push_str(unchanged);
            original.push_str(deleted);
        }
        plain.push_str(&tail);
        original.push_str(&tail);

        prop_assert_eq!(MarkupCodec::plain_text(&spans), plain);
        prop_assert_eq!(MarkupCodec::original_text(&spans), original);
        prop_assert!(!MarkupCodec::plain_text(&spans).contains("~~"));
    }

    /// Canonical markup renders back to itself and decodes to the same spans.
    #[test]
    fn prop_render_round_trip(
        segments in prop::collection::vec(edit_segment(), 0..8),
        tail in "[a-zA-Z ,.]{0,12}",
    ) {
        let raw = build_raw(&segments, &tail);
        let spans = MarkupCodec::decode(&raw);
        let rendered = MarkupCodec::render(&spans);
        prop_assert_eq!(&rendered, &raw);
        prop_assert_eq!(MarkupCodec::decode(&rendered), spans);
    }
}

#[test]
fn test_incomplete_markers_stay_literal() {
    for raw in ["a ~~b~~ c", "only **bold** here", "~~x~~ **y**", "~~open"] {
        assert_eq!(
            MarkupCodec::decode(raw),
            vec![MarkupSpan::unchanged(raw)],
            "{raw:?} should decode literally"
        );
    }
}

#[test]
fn test_whitespace_inside_markers_is_trimmed() {
    let spans = MarkupCodec::decode("Go ~~ quickly ~~** fast ** now");
    assert_eq!(
        spans,
        vec![
            MarkupSpan::unchanged("Go "),
            MarkupSpan::deleted("quickly"),
            MarkupSpan::inserted("fast"),
            MarkupSpan::unchanged(" now"),
        ]
    );
}

#[test]
fn test_render_pairs_orphans_with_empty_partner() {
    let spans = vec![
        MarkupSpan::inserted("new"),
        MarkupSpan::unchanged(" and "),
        MarkupSpan::deleted("old"),
    ];
    let rendered = MarkupCodec::render(&spans);
    assert_eq!(rendered, "~~~~**new** and ~~old~~****");
    assert_eq!(MarkupCodec::plain_text_from_raw(&rendered), "new and ");
}
