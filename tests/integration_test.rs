use std::fs;
use std::path::Path;

use tempfile::TempDir;

use lsifgen::config::EmitConfig;
use lsifgen::dialect::Dialect;
use lsifgen::errors::IndexerError;
use lsifgen::indexer::Indexer;
use lsifgen::protocol::Element;

const SYMBOLS_DUMP: &str = r#"{"symbol":{"file":"src/a.c","range":"1:0-1","hover":"int"}}
{"references":{"file":"src/b.c","ranges":["2:0-11"]}}
"#;

fn test_indexer(dialect: Dialect, root: &Path) -> Indexer {
    let config = EmitConfig {
        project_root: root.to_string_lossy().to_string(),
        language: "c".to_string(),
        ..EmitConfig::default()
    };
    Indexer::new(dialect, config)
}

fn read_elements(path: &Path) -> Vec<Element> {
    let output = fs::read_to_string(path).unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_symbols_dump_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json");
    let out = dir.path().join("dump.lsif");
    fs::write(&input, SYMBOLS_DUMP).unwrap();

    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let summary = indexer
        .run(&input.to_string_lossy(), &out)
        .await
        .unwrap();

    assert_eq!(summary.file_count, 1);
    assert_eq!(summary.fact_count, 2);
    assert_eq!(summary.document_count, 2);
    assert_eq!(summary.range_count, 2);

    let elements = read_elements(&out);
    assert_eq!(summary.element_count as usize, elements.len());

    // The stream starts with the metadata vertex and ends with the
    // project end event.
    assert_eq!(elements[0].id(), "meta");
    assert_eq!(elements.last().unwrap().id(), "end:project");

    let first = serde_json::to_value(&elements[0]).unwrap();
    assert_eq!(first["label"], "metaData");
    assert_eq!(first["version"], "0.4.3");
    assert_eq!(first["positionEncoding"], "utf-16");

    let ids: Vec<&str> = elements.iter().map(|e| e.id()).collect();
    assert!(ids.contains(&"resultSet:src/a.c:0:0"));
    assert!(ids.contains(&"contains:document:src/b.c"));
}

#[tokio::test]
async fn test_spans_dump_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("spans.json");
    let out = dir.path().join("dump.lsif");
    let dump = r#"{"file":"a.c","start":{"line":1,"col":0},"end":{"line":1,"col":4},"definition":{"file":"","pos":{"line":1,"col":0}},"type":"fn()"}
{"file":"b.c","start":{"line":3,"col":2},"end":{"line":3,"col":6},"definition":{"file":"a.c","pos":{"line":1,"col":0}}}
"#;
    fs::write(&input, dump).unwrap();

    let indexer = test_indexer(Dialect::Spans, dir.path());
    let summary = indexer
        .run(&input.to_string_lossy(), &out)
        .await
        .unwrap();

    assert_eq!(summary.fact_count, 2);
    assert_eq!(summary.document_count, 2);

    let elements = read_elements(&out);
    let ids: Vec<&str> = elements.iter().map(|e| e.id()).collect();
    assert!(ids.contains(&"hoverResult:a.c:0:0"));
    assert!(ids.contains(&"next:b.c:2:2:a.c:0:0"));
}

#[tokio::test]
async fn test_glob_pattern_merges_multiple_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dump.lsif");
    fs::write(
        dir.path().join("one.json"),
        r#"{"symbol":{"file":"a.c","range":"1:0-1"}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("two.json"),
        r#"{"symbol":{"file":"b.c","range":"1:0-1"}}"#,
    )
    .unwrap();

    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let pattern = dir.path().join("*.json");
    let summary = indexer
        .run(&pattern.to_string_lossy(), &out)
        .await
        .unwrap();

    assert_eq!(summary.file_count, 2);
    assert_eq!(summary.document_count, 2);
}

#[tokio::test]
async fn test_unmatched_pattern_is_empty_input_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dump.lsif");
    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let pattern = dir.path().join("*.nothing");

    let err = indexer
        .run(&pattern.to_string_lossy(), &out)
        .await
        .unwrap_err();
    match err {
        IndexerError::EmptyInput { pattern: p } => {
            assert!(p.ends_with("*.nothing"));
        }
        other => panic!("expected empty input error, got {:?}", other),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn test_stale_output_is_removed_before_parsing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json");
    let out = dir.path().join("dump.lsif");
    fs::write(&input, "not json at all\n").unwrap();
    fs::write(&out, "stale leftover\n").unwrap();

    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let err = indexer.run(&input.to_string_lossy(), &out).await.unwrap_err();
    assert!(matches!(err, IndexerError::Parse { .. }));

    // The stale file is gone even though this run failed before emitting.
    assert!(!out.exists());
}

#[tokio::test]
async fn test_reruns_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json");
    fs::write(&input, SYMBOLS_DUMP).unwrap();

    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let first_out = dir.path().join("first.lsif");
    let second_out = dir.path().join("second.lsif");
    indexer.run(&input.to_string_lossy(), &first_out).await.unwrap();
    indexer.run(&input.to_string_lossy(), &second_out).await.unwrap();

    let first = fs::read(&first_out).unwrap();
    let second = fs::read(&second_out).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_duplicate_facts_collapse_across_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dump.lsif");
    let line = r#"{"symbol":{"file":"a.c","range":"1:0-1"}}"#;
    fs::write(dir.path().join("one.json"), line).unwrap();
    fs::write(dir.path().join("two.json"), line).unwrap();

    let indexer = test_indexer(Dialect::Symbols, dir.path());
    let pattern = dir.path().join("*.json");
    let summary = indexer
        .run(&pattern.to_string_lossy(), &out)
        .await
        .unwrap();

    assert_eq!(summary.file_count, 2);
    assert_eq!(summary.fact_count, 1);
    assert_eq!(summary.range_count, 1);
}

#[tokio::test]
async fn test_embed_contents_reads_source_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json");
    let out = dir.path().join("dump.lsif");
    fs::write(&input, r#"{"symbol":{"file":"a.c","range":"1:0-1"}}"#).unwrap();
    fs::write(dir.path().join("a.c"), "int a;\n").unwrap();

    let config = EmitConfig {
        project_root: dir.path().to_string_lossy().to_string(),
        embed_contents: true,
        ..EmitConfig::default()
    };
    let indexer = Indexer::new(Dialect::Symbols, config);
    indexer.run(&input.to_string_lossy(), &out).await.unwrap();

    let elements = read_elements(&out);
    let document = elements
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .find(|v| v["id"] == "document:a.c")
        .unwrap();
    // base64 of "int a;\n"
    assert_eq!(document["contents"], "aW50IGE7Cg==");
}

#[tokio::test]
async fn test_missing_source_file_does_not_fail_embedding() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json");
    let out = dir.path().join("dump.lsif");
    fs::write(&input, r#"{"symbol":{"file":"gone.c","range":"1:0-1"}}"#).unwrap();

    let config = EmitConfig {
        project_root: dir.path().to_string_lossy().to_string(),
        embed_contents: true,
        ..EmitConfig::default()
    };
    let indexer = Indexer::new(Dialect::Symbols, config);
    indexer.run(&input.to_string_lossy(), &out).await.unwrap();

    let elements = read_elements(&out);
    let document = elements
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .find(|v| v["id"] == "document:gone.c")
        .unwrap();
    assert!(document.get("contents").is_none());
}
