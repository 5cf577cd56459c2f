use knowledge_core::dedup::{Deduplicator, DuplicateField, MalformedReason, Rejection};
use knowledge_core::record::{Metadata, RawRecord};
use knowledge_core::{Pipeline, PipelineConfig};

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::v0())
}

fn article(title: &str, content: &str, source: &str) -> RawRecord {
    RawRecord::new(title, content, source).with_category("Science")
}

const PHOTOSYNTHESIS: &str = "Photosynthesis converts light into chemical energy. \
     Plants use photosynthesis to build sugars from carbon dioxide and water.";

#[test]
fn byte_identical_records_yield_one_item() {
    let rec = article("Photosynthesis", PHOTOSYNTHESIS, "Wikipedia");
    let output = pipeline().process(vec![rec.clone(), rec]).unwrap();

    assert_eq!(output.items.len(), 1);
    assert_eq!(output.summary.accepted, 1);
    assert_eq!(output.summary.rejected_duplicate, 1);
    assert_eq!(output.summary.rejected_malformed, 0);
}

#[test]
fn whitespace_and_case_variants_yield_one_item() {
    let original = article("Photosynthesis", PHOTOSYNTHESIS, "Wikipedia");
    let shouted = article(
        "Light Reactions",
        &format!("  {}\n\n", PHOTOSYNTHESIS.to_uppercase().replace(' ', "   ")),
        "Blog",
    );

    let output = pipeline().process(vec![original, shouted]).unwrap();
    assert_eq!(output.items.len(), 1);
    assert_eq!(output.items[0].title, "Photosynthesis");
    assert_eq!(output.summary.rejected_duplicate, 1);
}

#[test]
fn first_ingested_duplicate_wins() {
    let content = "A".repeat(60);
    let records = vec![
        RawRecord::new("Cats", content.clone(), "Wikipedia"),
        RawRecord::new("Cats", content, "arXiv"),
    ];

    let output = pipeline().process(records).unwrap();
    assert_eq!(output.items.len(), 1);
    assert_eq!(output.items[0].source, "Wikipedia");

    // Reversed ingestion order keeps the other one.
    let content = "A".repeat(60);
    let reversed = vec![
        RawRecord::new("Cats", content.clone(), "arXiv"),
        RawRecord::new("Cats", content, "Wikipedia"),
    ];
    let output = pipeline().process(reversed).unwrap();
    assert_eq!(output.items[0].source, "arXiv");
}

#[test]
fn later_duplicate_with_better_metadata_is_still_dropped() {
    let plain = article("Photosynthesis", PHOTOSYNTHESIS, "Blog");
    let rich = article("Photosynthesis (botany)", PHOTOSYNTHESIS, "arXiv")
        .with_metadata(Metadata::new().with_authors(["Calvin", "Benson"]));

    let output = pipeline().process(vec![plain, rich]).unwrap();
    assert_eq!(output.items.len(), 1);
    assert_eq!(output.items[0].source, "Blog");
}

#[test]
fn short_content_is_malformed_not_duplicate() {
    let output = pipeline()
        .process(vec![RawRecord::new("Stub", "x".repeat(40), "Wikipedia")])
        .unwrap();

    assert!(output.items.is_empty());
    assert_eq!(output.summary.records_seen, 1);
    assert_eq!(output.summary.rejected_malformed, 1);
    assert_eq!(output.summary.rejected_duplicate, 0);
    assert!(output.aggregates.quick_lookup.by_confidence.is_empty());
}

#[test]
fn malformed_records_do_not_claim_hashes() {
    let mut gate = Deduplicator::new();

    let err = gate.try_accept(RawRecord::new("", PHOTOSYNTHESIS, "s")).unwrap_err();
    assert_eq!(err, Rejection::Malformed(MalformedReason::EmptyTitle));

    // Same content with a title is now accepted.
    let accepted = gate
        .try_accept(RawRecord::new("Photosynthesis", PHOTOSYNTHESIS, "s"))
        .unwrap();

    let err = gate
        .try_accept(RawRecord::new("Other", PHOTOSYNTHESIS, "s"))
        .unwrap_err();
    assert_eq!(
        err,
        Rejection::Duplicate {
            field: DuplicateField::Content,
            existing: accepted.id,
        }
    );
}

#[test]
fn item_ids_are_unique() {
    let records: Vec<RawRecord> = (0..50)
        .map(|i| {
            article(
                &format!("Topic {i}"),
                &format!("Topic number {i} has a description long enough to pass the gate."),
                "Wikipedia",
            )
        })
        .collect();

    let output = pipeline().process(records).unwrap();
    assert_eq!(output.items.len(), 50);

    let mut ids: Vec<_> = output.items.iter().map(|i| i.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}
