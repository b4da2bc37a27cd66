/// Property-based tests for path rendering, index normalisation and the
/// tree engines.
///
/// Strategies generate:
/// - Random segments: arbitrary field names (identifiers, names needing
///   quotes, escapes, unicode), any i64 index, ranges with and without an end
/// - Random JSON trees up to a few levels deep
use std::cmp::Ordering;

use proptest::prelude::*;
use valpath::value::normalize_index;
use valpath::{IntoValue, Path, Segment, Source, compare, differences};

// ============================================================================
// Strategies
// ============================================================================

fn arb_field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,10}").unwrap(),
        prop::string::string_regex("[a-z0-9 .\\-/\"\\\\]{0,10}").unwrap(),
        Just(String::new()),
        Just("line1\nline2\ttab\r".to_string()),
        Just("caf\u{00e9}".to_string()),
        any::<String>(),
    ]
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        arb_field_name().prop_map(Segment::Field),
        any::<i64>().prop_map(Segment::Index),
        (any::<i64>(), proptest::option::of(any::<i64>()))
            .prop_map(|(start, end)| Segment::Range { start, end }),
        Just(Segment::all()),
    ]
}

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(|n| serde_json::Value::from(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| serde_json::Value::from(f)),
        "[a-z ]{0,8}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn rendered_paths_recompile(segments in prop::collection::vec(arb_segment(), 0..6)) {
        let path = Path::from(segments);
        let text = path.to_string();
        let compiled = Path::compile(&text).unwrap();
        prop_assert_eq!(&compiled, &path);
        prop_assert_eq!(compiled.to_string(), text);
    }

    #[test]
    fn canonical_text_starts_with_dot_or_bracket(segments in prop::collection::vec(arb_segment(), 1..4)) {
        let text = Path::from(segments).to_string();
        prop_assert!(text.starts_with('.') || text.starts_with('['));
    }

    #[test]
    fn normalize_index_accepts_exactly_valid_range(n in 0usize..64, i in -100i64..100) {
        let len = n as i64;
        match normalize_index(i, n) {
            Ok(resolved) => {
                prop_assert!(-len <= i && i < len);
                let expected = if i < 0 { len + i } else { i };
                prop_assert_eq!(resolved as i64, expected);
            }
            Err(_) => prop_assert!(i < -len || i >= len),
        }
    }

    #[test]
    fn identical_trees_have_no_differences(json in arb_json()) {
        let left = json.clone().into_value(&Source::named("left")).unwrap();
        let right = json.into_value(&Source::named("right")).unwrap();
        prop_assert!(differences(&left, &right).unwrap().is_empty());
        prop_assert_eq!(compare(&left, &right).unwrap(), Ordering::Equal);
    }

    #[test]
    fn root_evaluates_to_itself(json in arb_json()) {
        let value = json.into_value(&Source::Unknown).unwrap();
        let found = Path::root().evaluate(&value).unwrap();
        prop_assert_eq!(found.as_ref(), &value);
    }

    #[test]
    fn compare_is_antisymmetric(a in arb_json(), b in arb_json()) {
        let a = a.into_value(&Source::Unknown).unwrap();
        let b = b.into_value(&Source::Unknown).unwrap();
        let forward = compare(&a, &b).unwrap();
        let backward = compare(&b, &a).unwrap();
        prop_assert_eq!(forward, backward.reverse());
    }
}
