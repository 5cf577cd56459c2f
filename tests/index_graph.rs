use knowledge_core::index::GraphScope;
use knowledge_core::pipeline::ProcessOutput;
use knowledge_core::record::RawRecord;
use knowledge_core::{Pipeline, PipelineConfig};

fn run(records: Vec<RawRecord>, scope: GraphScope) -> ProcessOutput {
    let config = PipelineConfig {
        graph_scope: scope,
        ..PipelineConfig::v0()
    };
    Pipeline::new(config).process(records).unwrap()
}

fn physics() -> Vec<RawRecord> {
    vec![
        RawRecord::new(
            "Quantum Entanglement",
            "Quantum entanglement links particles. Quantum states stay correlated at a distance.",
            "Wikipedia",
        )
        .with_category("Physics"),
        RawRecord::new(
            "Quantum Computing",
            "Quantum computers use qubits. Quantum gates manipulate superposition directly.",
            "arXiv",
        )
        .with_category("Physics"),
        RawRecord::new(
            "Quantum Field Theory",
            "Quantum field theory unifies fields and particles. Quantum fields are operators.",
            "Wikipedia",
        )
        .with_category("Physics"),
    ]
}

#[test]
fn three_quantum_records_all_join_the_physics_set() {
    let output = run(physics(), GraphScope::Global);
    assert_eq!(output.items.len(), 3);

    let related: Vec<_> = output.indexes.related_in("Physics");
    assert_eq!(related.len(), 3);
    for item in &output.items {
        assert!(related.contains(&&item.id), "missing {}", item.id);
    }

    let quantum = output.indexes.items_for_keyword("quantum");
    assert_eq!(quantum.len(), 3);
}

#[test]
fn every_graph_id_is_in_the_keyword_index() {
    let mut records = physics();
    records.push(
        RawRecord::new(
            "Photosynthesis",
            "Photosynthesis captures energy from light. Energy is stored as sugar for the plant.",
            "Wikipedia",
        )
        .with_category("Biology"),
    );
    records.push(
        RawRecord::new(
            "Solar Energy",
            "Solar panels convert light into energy. Energy output depends on light intensity.",
            "Government Energy Office",
        )
        .with_category("Engineering"),
    );

    for scope in [GraphScope::Global, GraphScope::Category] {
        let output = run(records.clone(), scope);
        for (category, ids) in output.indexes.knowledge_graph.iter() {
            for id in ids {
                assert!(
                    output.indexes.keyword_index.contains_id(id),
                    "{id} in graph[{category}] but in no keyword set ({scope:?})"
                );
            }
        }
    }
}

#[test]
fn global_scope_links_other_categories() {
    let records = vec![
        RawRecord::new(
            "Photosynthesis",
            "Photosynthesis captures energy from light. Energy is stored as sugar for the plant.",
            "Wikipedia",
        )
        .with_category("Biology"),
        RawRecord::new(
            "Solar Energy",
            "Solar panels convert light into energy. Energy output depends on light intensity.",
            "Government",
        )
        .with_category("Engineering"),
    ];

    let global = run(records.clone(), GraphScope::Global);
    let biology_id = &global.items[0].id;
    assert!(global.indexes.related_in("Engineering").contains(&biology_id));
    assert!(global.indexes.related_in("Biology").is_empty());

    let scoped = run(records, GraphScope::Category);
    assert!(scoped.indexes.related_in("Engineering").is_empty());
    assert!(scoped.indexes.related_in("Biology").is_empty());
}

#[test]
fn item_ids_never_duplicate_full_items_in_indexes() {
    let output = run(physics(), GraphScope::Global);
    let json = serde_json::to_value(&output.indexes).unwrap();

    let keyword_index = json["keyword_index"].as_object().unwrap();
    for ids in keyword_index.values() {
        assert!(ids.as_array().unwrap().iter().all(|v| v.is_string()));
    }
    assert!(json["knowledge_graph"]["Physics"].is_array());
}
