//! End-to-end indexing over a fixture vault, plus the batch/live
//! consistency property.

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tagmark_engine::io;
use tagmark_engine::{
    ExtractOptions, SpanKind, extract_from_document, extract_from_rendered_span, index_documents,
};

fn fixture_vault() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vault")
}

const OUTER_ON: ExtractOptions = ExtractOptions {
    inner: true,
    outer: true,
};

#[test]
fn vault_index_has_expected_records() {
    let index = io::index_vault(&fixture_vault(), OUTER_ON).unwrap();
    let summary: Vec<(&str, &str, Vec<&str>)> = index
        .all()
        .iter()
        .map(|r| {
            (
                r.file.as_str(),
                r.text.as_str(),
                r.tags.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("diary.md", "気持ちよかった", vec!["気分", "外出"]),
            ("diary.md", "夕食", vec!["食事"]),
            (
                "topics/travel.md",
                "harbour crossing",
                vec!["travel", "budget"]
            ),
            ("topics/travel.md", "checklist", vec!["todo"]),
        ]
    );
}

#[test]
fn vault_index_attrs_merge_per_span() {
    let index = io::index_vault(&fixture_vault(), OUTER_ON).unwrap();
    let diary = &index.all()[0];
    assert_eq!(diary.attrs.get("score").map(String::as_str), Some("8"));
    let travel = &index.all()[2];
    assert_eq!(travel.attrs.get("cost").map(String::as_str), Some("40"));
    assert_eq!(travel.kind, SpanKind::Mark);
}

#[test]
fn outer_tagged_span_skipped_when_outer_disabled() {
    let index = io::index_vault(&fixture_vault(), ExtractOptions::default()).unwrap();
    // The travel highlight is outer-tagged, so it drops out; everything
    // inner-tagged stays.
    assert!(
        index
            .all()
            .iter()
            .all(|r| r.text != "harbour crossing")
    );
    assert_eq!(index.len(), 3);
}

#[test]
fn export_round_trips_and_is_stable() {
    let first = io::index_vault(&fixture_vault(), OUTER_ON).unwrap();
    let second = io::index_vault(&fixture_vault(), OUTER_ON).unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let parsed: serde_json::Value = serde_json::from_str(&first.to_json().unwrap()).unwrap();
    let entry = &parsed.as_array().unwrap()[0];
    for key in ["file", "line", "from", "to", "text", "tags", "attrs", "kind"] {
        assert!(entry.get(key).is_some(), "missing export field {key}");
    }
}

/// The batch and live paths must agree on (tags, attrs, kind) for every
/// span they both see, even though the live path has no offsets.
#[test]
fn batch_and_live_paths_agree() {
    let text = "==日記: #気分 #外出==\n{{ menu : #食事(dish=soba) }}\n==plain==: #after";
    let batch = extract_from_document("note.md", text, OUTER_ON);

    // Simulate the rendering collaborator: it hands each span's interior
    // (and trailing text for mark spans) to the live primitive.
    let rendered = [
        (SpanKind::Mark, "日記: #気分 #外出", None),
        (SpanKind::Custom, " menu : #食事(dish=soba) ", None),
        (SpanKind::Mark, "plain", Some(": #after")),
    ];
    let live: Vec<_> = rendered
        .iter()
        .filter_map(|(kind, interior, trailing)| {
            extract_from_rendered_span(*kind, interior, *trailing, OUTER_ON)
                .map(|ex| (ex.tags.names, ex.tags.attrs, *kind))
        })
        .collect();

    let batch_triples: Vec<_> = batch
        .iter()
        .map(|r| (r.tags.clone(), r.attrs.clone(), r.kind))
        .collect();
    assert_eq!(batch_triples, live);
}

#[test]
fn index_documents_matches_vault_walk() {
    let vault = fixture_vault();
    let diary = std::fs::read_to_string(vault.join("diary.md")).unwrap();
    let travel = std::fs::read_to_string(vault.join("topics/travel.md")).unwrap();

    // Deliberately out of order; the rebuild sorts by identifier.
    let rebuilt = index_documents(
        vec![
            ("topics/travel.md", travel.as_str()),
            ("diary.md", diary.as_str()),
        ],
        OUTER_ON,
    );
    let walked = io::index_vault(&vault, OUTER_ON).unwrap();
    assert_eq!(rebuilt.to_json().unwrap(), walked.to_json().unwrap());
}
