// tests/walk_tests.rs

use serde_json::json;
use valpath::value::Node;
use valpath::{Error, Flow, IntoValue, Source, Value, Visit, walk};

fn value(json: serde_json::Value) -> Value {
    json.into_value(&Source::Unknown).unwrap()
}

fn event(visit: Visit, path: &str) -> String {
    format!("{:?} {}", visit, path)
}

/// Record every event, answering with `respond`.
fn record(
    root: &Value,
    mut respond: impl FnMut(&str, Visit) -> valpath::Result<Flow>,
) -> (valpath::Result<()>, Vec<String>) {
    let mut events = Vec::new();
    let result = walk(root, |path, _, visit| {
        let path = path.to_string();
        events.push(event(visit, &path));
        respond(&path, visit)
    });
    (result, events)
}

// ============================================================================
// Event order
// ============================================================================

#[test]
fn test_event_order() {
    let root = value(json!({"x": [1, 2]}));
    let (result, events) = record(&root, |_, _| Ok(Flow::Continue));
    result.unwrap();
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionStart, ".x"),
            event(Visit::Leaf, ".x[0]"),
            event(Visit::Leaf, ".x[1]"),
            event(Visit::CollectionEnd, ".x"),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

#[test]
fn test_leaf_root() {
    let root = value(json!("just a string"));
    let (result, events) = record(&root, |_, _| Ok(Flow::Continue));
    result.unwrap();
    assert_eq!(events, vec![event(Visit::Leaf, ".")]);
}

#[test]
fn test_maps_in_key_order() {
    let root = value(json!({"b": 1, "a": 2, "c": 3}));
    let (_, events) = record(&root, |_, _| Ok(Flow::Continue));
    let leaves: Vec<_> = events
        .iter()
        .filter(|e| e.starts_with("Leaf"))
        .cloned()
        .collect();
    assert_eq!(
        leaves,
        vec![
            event(Visit::Leaf, ".a"),
            event(Visit::Leaf, ".b"),
            event(Visit::Leaf, ".c"),
        ]
    );
}

#[test]
fn test_empty_collections_start_and_end() {
    let root = value(json!({"empty": []}));
    let (_, events) = record(&root, |_, _| Ok(Flow::Continue));
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionStart, ".empty"),
            event(Visit::CollectionEnd, ".empty"),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

#[test]
fn test_visitor_sees_values() {
    let root = value(json!({"n": 5}));
    let mut kinds = Vec::new();
    walk(&root, |_, node, _| {
        kinds.push(node.kind());
        Ok(Flow::Continue)
    })
    .unwrap();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds[1], valpath::Kind::Number);
}

// ============================================================================
// Control signals
// ============================================================================

#[test]
fn test_skip_children() {
    let root = value(json!({"x": [1, 2], "y": 3}));
    let (result, events) = record(&root, |path, visit| {
        if path == ".x" && visit == Visit::CollectionStart {
            Ok(Flow::SkipChildren)
        } else {
            Ok(Flow::Continue)
        }
    });
    result.unwrap();
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionStart, ".x"),
            event(Visit::CollectionEnd, ".x"),
            event(Visit::Leaf, ".y"),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

#[test]
fn test_skip_at_leaf_is_continue() {
    let root = value(json!([1, 2]));
    let (result, events) = record(&root, |_, visit| {
        if visit == Visit::Leaf {
            Ok(Flow::SkipChildren)
        } else {
            Ok(Flow::Continue)
        }
    });
    result.unwrap();
    assert_eq!(events.len(), 4);
}

#[test]
fn test_abort_is_clean_and_fires_pending_ends() {
    let root = value(json!({"x": [1, 2], "y": 3}));
    let (result, events) = record(&root, |path, _| {
        if path == ".x[0]" {
            Ok(Flow::Abort)
        } else {
            Ok(Flow::Continue)
        }
    });
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionStart, ".x"),
            event(Visit::Leaf, ".x[0]"),
            event(Visit::CollectionEnd, ".x"),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

#[test]
fn test_abort_at_start() {
    let root = value(json!([1]));
    let (result, events) = record(&root, |_, _| Ok(Flow::Abort));
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

// ============================================================================
// Errors and faults
// ============================================================================

#[test]
fn test_visitor_error_propagates() {
    let root = value(json!({"a": 1, "b": 2}));
    let (result, events) = record(&root, |path, _| {
        if path == ".a" {
            Err(Error::handler("stop here"))
        } else {
            Ok(Flow::Continue)
        }
    });
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Handler(_)));
    assert_eq!(err.to_string(), "stop here");
    // .b is never visited, the root end still fires
    assert_eq!(events.last().unwrap(), &event(Visit::CollectionEnd, "."));
    assert!(!events.contains(&event(Visit::Leaf, ".b")));
}

#[test]
fn test_panic_becomes_error() {
    let root = value(json!({"x": [1, 2]}));
    let (result, events) = record(&root, |path, _| {
        if path == ".x[0]" {
            panic!("boom");
        }
        Ok(Flow::Continue)
    });
    match result {
        Err(Error::Panic(message)) => assert_eq!(message, "boom"),
        other => panic!("expected panic error, got {:?}", other),
    }
    assert_eq!(
        events,
        vec![
            event(Visit::CollectionStart, "."),
            event(Visit::CollectionStart, ".x"),
            event(Visit::Leaf, ".x[0]"),
            event(Visit::CollectionEnd, ".x"),
            event(Visit::CollectionEnd, "."),
        ]
    );
}

#[test]
fn test_panic_at_leaf_root() {
    let root = value(json!(1));
    let result = walk(&root, |_, _, _| -> valpath::Result<Flow> {
        panic!("formatted {}", 42);
    });
    assert_eq!(result.unwrap_err().to_string(), "panic: formatted 42");
}
