//! Tests for snapshot persistence and the import/export document format.
mod common;
use common::*;
use funnelgraph::persistence::{parse_document, write_export};
use funnelgraph::prelude::*;
use std::fs;

#[test]
fn test_every_mutation_saves_a_full_snapshot() {
    let mut editor = memory_editor();
    assert_eq!(editor.store().save_count(), 0);

    let sales = editor.add_node(StepType::Sales, Position::default());
    let order = editor.add_node(StepType::Order, Position::new(0.0, 200.0));
    editor.connect(&sales, &order).unwrap();
    assert_eq!(editor.store().save_count(), 3);

    let saved = parse_document(editor.store().document().unwrap()).unwrap();
    assert_eq!(saved, editor.snapshot());

    // Rejected mutations and no-op batches do not save.
    assert!(editor.connect(&sales, &sales).is_err());
    editor.apply_node_changes(&[NodeChange::move_to("ghost", Position::default())]);
    assert_eq!(editor.store().save_count(), 3);

    editor.clear();
    assert_eq!(editor.store().save_count(), 4);
    let saved = parse_document(editor.store().document().unwrap()).unwrap();
    assert!(saved.is_empty());
}

#[test]
fn test_startup_restores_saved_snapshot() {
    let editor = editor_with(&create_linear_funnel());
    assert_eq!(editor.snapshot(), create_linear_funnel());
    assert_eq!(editor.status(), ValidationStatus::Ok);
}

#[test]
fn test_malformed_or_absent_snapshot_starts_empty() {
    for document in [
        "not json at all",
        r#"{ "nodes": [] }"#,
        r#"{ "nodes": {}, "edges": [] }"#,
        r#"{ "nodes": [{ "id": "x" }], "edges": [] }"#,
        r#"[1, 2, 3]"#,
    ] {
        let editor = FunnelEditor::builder(MemorySnapshotStore::with_document(document)).build();
        assert!(editor.snapshot().is_empty(), "document: {}", document);
    }

    let editor = FunnelEditor::builder(MemorySnapshotStore::new()).build();
    assert!(editor.snapshot().is_empty());
}

#[test]
fn test_export_then_import_reproduces_the_graph() {
    let mut source = memory_editor();
    source.load_example();
    let extra = source.add_node(StepType::Downsell, Position::new(320.5, -40.25));
    source.connect("order-1", &extra).unwrap();
    let exported = source.export_json().unwrap();

    let mut target = memory_editor();
    target.import_json(&exported).unwrap();

    assert_eq!(target.snapshot(), source.snapshot());
    let imported = target.graph().node(&extra).unwrap();
    assert_eq!(imported.title(), "Downsell 1");
    assert_eq!(imported.position, Position::new(320.5, -40.25));
    assert_eq!(target.issues(), source.issues());
}

#[test]
fn test_export_document_shape() {
    let mut editor = memory_editor();
    editor.load_example();
    let value: serde_json::Value = serde_json::from_str(&editor.export_json().unwrap()).unwrap();

    let first = &value["nodes"][0];
    assert_eq!(first["id"], "sales-1");
    assert_eq!(first["type"], "funnelNode");
    assert_eq!(first["position"]["x"], 80.0);
    assert_eq!(first["data"]["type"], "sales");
    assert_eq!(first["data"]["buttonLabel"], "Buy Now");
    assert!(first["data"].get("hasWarning").is_none());

    let edge = &value["edges"][0];
    assert_eq!(edge["id"], "e-sales-order");
    assert_eq!(edge["source"], "sales-1");
    assert_eq!(edge["target"], "order-1");
    assert_eq!(edge["type"], "smoothstep");
}

#[test]
fn test_import_tolerates_extra_fields() {
    let mut editor = memory_editor();
    editor.import_json(CANVAS_DOCUMENT_JSON).unwrap();

    assert_eq!(editor.graph().nodes().len(), 2);
    let upsell = editor.graph().node("upsell-7").unwrap();
    assert_eq!(upsell.step(), StepType::Upsell);
    assert_eq!(upsell.position, Position::new(80.0, 150.5));
    assert!(upsell.selected);
    assert!(editor.graph().has_connection("sales-1", "upsell-7"));

    // New upsells continue after the imported numbering.
    let next = editor.add_node(StepType::Upsell, Position::default());
    assert_eq!(editor.graph().node(&next).unwrap().title(), "Upsell 8");
}

#[test]
fn test_invalid_import_leaves_graph_unchanged() {
    let mut editor = editor_with(&create_linear_funnel());
    let saves_before = editor.store().save_count();

    let cases = [
        ("{ nope", "InvalidJson"),
        (r#"{ "edges": [] }"#, "MissingSequence"),
        (r#"{ "nodes": [], "edges": "none" }"#, "MissingSequence"),
        (
            r#"{ "nodes": [{ "id": "a", "position": { "x": 0, "y": 0 }, "data": { "type": "webinar", "title": "W", "buttonLabel": "Go" } }], "edges": [] }"#,
            "InvalidFormat",
        ),
        (
            r#"{ "nodes": [], "edges": [{ "id": "e", "source": "a", "target": "b" }] }"#,
            "DanglingEdge",
        ),
        (
            r#"{ "nodes": [
                { "id": "t", "position": { "x": 0, "y": 0 }, "data": { "type": "thankyou", "title": "Thank You", "buttonLabel": "View order" } },
                { "id": "s", "position": { "x": 0, "y": 200 }, "data": { "type": "sales", "title": "Sales Page", "buttonLabel": "Buy Now" } }
              ],
              "edges": [{ "id": "e", "source": "t", "target": "s" }] }"#,
            "ThankYouSource",
        ),
    ];
    for (document, expected) in cases {
        let err = editor.import_json(document).unwrap_err();
        assert!(
            format!("{:?}", err).starts_with(expected),
            "expected {} for {}, got {:?}",
            expected,
            document,
            err
        );
        assert_eq!(editor.snapshot(), create_linear_funnel());
    }
    assert_eq!(editor.store().save_count(), saves_before);
}

#[test]
fn test_import_rejects_duplicate_node_ids() {
    let mut snapshot = create_unconnected_funnel();
    snapshot.nodes.push(node("sales", StepType::Order, 5.0, 5.0));
    let document = serde_json::to_string(&snapshot).unwrap();

    assert_eq!(
        parse_document(&document),
        Err(InterchangeError::DuplicateNodeId("sales".to_string()))
    );
}

#[test]
fn test_import_rejects_duplicate_edge_ids() {
    let mut snapshot = create_unconnected_funnel();
    snapshot.edges.push(edge("e", "sales", "order"));
    snapshot.edges.push(edge("e", "sales", "thanks"));
    let document = serde_json::to_string(&snapshot).unwrap();

    assert_eq!(
        parse_document(&document),
        Err(InterchangeError::DuplicateEdgeId("e".to_string()))
    );

    let mut editor = editor_with(&create_linear_funnel());
    assert!(editor.import_json(&document).is_err());
    assert_eq!(editor.snapshot(), create_linear_funnel());
}

#[test]
fn test_file_store_uses_configured_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = FunnelConfig {
        storage_key: "my-funnel".to_string(),
        ..FunnelConfig::default()
    };
    let store = FileSnapshotStore::from_config(dir.path(), &config);
    assert_eq!(store.path(), dir.path().join("my-funnel.json").as_path());

    let mut editor = FunnelEditor::builder(store).with_config(config).build();
    editor.load_example();
    assert!(dir.path().join("my-funnel.json").exists());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path(), DEFAULT_STORAGE_KEY);
    assert!(store.load().unwrap().is_none());

    let mut editor = FunnelEditor::builder(store).build();
    editor.load_example();
    let path = dir.path().join("funnel-builder-state.json");
    assert_eq!(editor.store().path(), path.as_path());
    assert!(path.exists());

    let reopened =
        FunnelEditor::builder(FileSnapshotStore::new(dir.path(), DEFAULT_STORAGE_KEY)).build();
    assert_eq!(reopened.snapshot(), example_funnel());
}

#[test]
fn test_file_store_ignores_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path(), "funnel");
    fs::write(store.path(), "{ \"nodes\": 7 }").unwrap();

    assert!(store.load().is_err());
    let mut editor = FunnelEditor::builder(store).build();
    assert!(editor.snapshot().is_empty());

    // The next change overwrites the corrupt snapshot.
    editor.add_node(StepType::Sales, Position::default());
    let reloaded = FileSnapshotStore::new(dir.path(), "funnel").load().unwrap();
    assert_eq!(reloaded.unwrap().nodes.len(), 1);
}

#[test]
fn test_export_writes_funnel_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = memory_editor();
    editor.load_example();

    let path = editor.export_to_dir(dir.path()).unwrap();
    assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\n  \"nodes\""), "export is pretty-printed");
    assert_eq!(parse_document(&content).unwrap(), example_funnel());

    let nested = dir.path().join("exports");
    let nested_path = write_export(&nested, &editor.snapshot()).unwrap();
    assert!(nested_path.exists());
}

#[test]
fn test_boxed_store_works_as_a_store() {
    let store: Box<dyn SnapshotStore> = Box::new(MemorySnapshotStore::new());
    let mut editor = FunnelEditor::builder(store).build();
    editor.load_example();
    assert_eq!(editor.store().load().unwrap(), Some(example_funnel()));
}
