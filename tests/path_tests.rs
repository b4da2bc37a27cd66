// tests/path_tests.rs

use std::borrow::Cow;

use serde_json::json;
use valpath::value::{Kind, Mutable, Node};
use valpath::{IntoValue, Path, PathError, Segment, Source, Value, ValueError};

fn doc() -> Value {
    json!({
        "foo": {"bar": 1},
        "baz": [{"qux": "a"}, {"qux": "b"}, {"qux": "c"}],
        "odd key": true
    })
    .into_value(&Source::named("doc.json"))
    .unwrap()
}

fn get(path: &str, root: &Value) -> serde_json::Value {
    Path::compile(path)
        .unwrap()
        .evaluate(root)
        .unwrap()
        .without_source()
}

fn eval_error(path: &str, root: &Value) -> PathError {
    Path::compile(path).unwrap().evaluate(root).unwrap_err()
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_root_returns_same_value() {
    let root = doc();
    let result = Path::root().evaluate(&root).unwrap();
    match result {
        Cow::Borrowed(value) => assert!(std::ptr::eq(value, &root)),
        Cow::Owned(_) => panic!("root evaluation should borrow"),
    }
}

#[test]
fn test_fields_and_indices() {
    let root = doc();
    assert_eq!(get(".foo.bar", &root), json!(1));
    assert_eq!(get(".baz[0].qux", &root), json!("a"));
    assert_eq!(get(".baz[-1].qux", &root), json!("c"));
    assert_eq!(get(r#"["odd key"]"#, &root), json!(true));
}

#[test]
fn test_ranges_build_arrays() {
    let root = doc();
    assert_eq!(get(".baz[1:]", &root), json!([{"qux": "b"}, {"qux": "c"}]));
    assert_eq!(get(".baz[:1]", &root), json!([{"qux": "a"}]));
    assert_eq!(get(".baz[-2:-1]", &root), json!([{"qux": "b"}]));
    assert_eq!(get(".baz[]", &root), get(".baz", &root));
    assert_eq!(get(".baz[3:]", &root), json!([]));
}

#[test]
fn test_path_after_range() {
    let root = doc();
    assert_eq!(get(".baz[1:][0].qux", &root), json!("b"));
}

#[test]
fn test_range_result_keeps_source() {
    let root = doc();
    let slice = Path::compile(".baz[:]").unwrap().evaluate(&root).unwrap();
    assert_eq!(slice.source(), &Source::named("doc.json"));
}

// ============================================================================
// Evaluation errors
// ============================================================================

#[test]
fn test_out_of_range_names_prefix() {
    let root = doc();
    let err = eval_error(".baz[3].qux", &root);
    assert_eq!(
        err,
        PathError::Evaluation {
            path: ".baz[3]".to_string(),
            cause: ValueError::OutOfRange { index: 3 },
        }
    );
    assert_eq!(
        err.to_string(),
        "error evaluating path '.baz[3]': index out of range: 3"
    );
}

#[test]
fn test_missing_field() {
    let root = doc();
    let err = eval_error(".foo.nope.deeper", &root);
    assert_eq!(
        err.value_error(),
        Some(&ValueError::FieldNotFound("nope".to_string()))
    );
    assert!(err.to_string().starts_with("error evaluating path '.foo.nope':"));
}

#[test]
fn test_kind_mismatch() {
    let root = doc();
    assert_eq!(
        eval_error(".foo[0]", &root).value_error(),
        Some(&ValueError::KindMismatch {
            expected: "Array",
            actual: Kind::Map,
        })
    );
    assert_eq!(
        eval_error(".foo.bar.x", &root).value_error(),
        Some(&ValueError::KindMismatch {
            expected: "Map",
            actual: Kind::Number,
        })
    );
    assert_eq!(
        eval_error(".foo[:]", &root).to_string(),
        "error evaluating path '.foo[:]': expected Array, but got Map"
    );
}

#[test]
fn test_bad_range_bounds() {
    let root = doc();
    assert_eq!(
        eval_error(".baz[4:]", &root).value_error(),
        Some(&ValueError::OutOfRange { index: 4 })
    );
    assert_eq!(
        eval_error(".baz[2:1]", &root).value_error(),
        Some(&ValueError::OutOfRange { index: 1 })
    );
}

#[test]
fn test_evaluation_does_not_mutate() {
    let root = doc();
    let before = root.clone();
    let _ = Path::compile(".baz[1:]").unwrap().evaluate(&root);
    let _ = Path::compile(".missing").unwrap().evaluate(&root);
    assert_eq!(root, before);
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_set_inserts_field() {
    let mut root = doc();
    Path::compile(".foo.added")
        .unwrap()
        .set(&mut root, Value::string("new", Source::Unknown))
        .unwrap();
    assert_eq!(get(".foo.added", &root), json!("new"));
}

#[test]
fn test_set_replaces_element() {
    let mut root = doc();
    Path::compile(".baz[-1]")
        .unwrap()
        .set(&mut root, Value::null(Source::Unknown))
        .unwrap();
    assert_eq!(get(".baz[2]", &root), json!(null));
}

#[test]
fn test_set_root() {
    let mut root = doc();
    Path::root()
        .set(&mut root, Value::bool(true, Source::Unknown))
        .unwrap();
    assert_eq!(root.kind(), Kind::Bool);
}

#[test]
fn test_set_errors() {
    let mut root = doc();
    let err = Path::compile(".baz[9]")
        .unwrap()
        .set(&mut root, Value::null(Source::Unknown))
        .unwrap_err();
    assert_eq!(err.value_error(), Some(&ValueError::OutOfRange { index: 9 }));

    let err = Path::compile(".nope.x")
        .unwrap()
        .set(&mut root, Value::null(Source::Unknown))
        .unwrap_err();
    assert_eq!(
        err,
        PathError::Evaluation {
            path: ".nope".to_string(),
            cause: ValueError::FieldNotFound("nope".to_string()),
        }
    );

    let err = Path::compile(".baz[:]")
        .unwrap()
        .set(&mut root, Value::null(Source::Unknown))
        .unwrap_err();
    assert!(matches!(
        err.value_error(),
        Some(ValueError::Unsupported(_))
    ));
}

#[test]
fn test_evaluate_mut() {
    let mut root = doc();
    let path = Path::compile(".baz[0].qux").unwrap();
    path.evaluate_mut(&mut root)
        .unwrap()
        .set_value(Value::string("z", Source::Unknown))
        .unwrap();
    assert_eq!(get(".baz[0].qux", &root), json!("z"));

    assert!(Path::compile(".baz[0:1]").unwrap().evaluate_mut(&mut root).is_err());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_join_and_collect() {
    let path = Path::root().join("spec").join(Segment::Index(-1));
    assert_eq!(path.to_string(), ".spec[-1]");

    let collected: Path = vec![Segment::field("a b"), Segment::all()].into_iter().collect();
    assert_eq!(collected.to_string(), r#"["a b"][:]"#);
    assert_eq!(Path::compile(&collected.to_string()).unwrap(), collected);
}
