// tests/parser_tests.rs

use valpath::error::{Found, PathError, SyntaxError};
use valpath::{Path, Segment};

fn field(name: &str) -> Segment {
    Segment::field(name)
}

fn range(start: i64, end: Option<i64>) -> Segment {
    Segment::Range { start, end }
}

fn syntax_cause(text: &str) -> SyntaxError {
    match Path::compile(text) {
        Err(PathError::Syntax { cause, .. }) => cause,
        other => panic!("expected syntax error for {:?}, got {:?}", text, other),
    }
}

// ============================================================================
// Valid paths
// ============================================================================

#[test]
fn test_empty_and_dot_are_root() {
    assert!(Path::compile("").unwrap().is_root());
    assert!(Path::compile(".").unwrap().is_root());
    assert_eq!(Path::compile("").unwrap().to_string(), ".");
}

#[test]
fn test_field_chain() {
    let path = Path::compile(".foo.bar").unwrap();
    assert_eq!(path.segments(), &[field("foo"), field("bar")]);
}

#[test]
fn test_index() {
    let path = Path::compile(".baz[0].qux").unwrap();
    assert_eq!(
        path.segments(),
        &[field("baz"), Segment::Index(0), field("qux")]
    );
}

#[test]
fn test_negative_index_and_full_range() {
    let path = Path::compile(".foo[-1].bar[:].baz").unwrap();
    assert_eq!(
        path.segments(),
        &[
            field("foo"),
            Segment::Index(-1),
            field("bar"),
            range(0, None),
            field("baz"),
        ]
    );
    assert_eq!(path.to_string(), ".foo[-1].bar[:].baz");
}

#[test]
fn test_negative_range() {
    let path = Path::compile(".foo[-2:-1].bar[:].baz").unwrap();
    assert_eq!(path.segments()[1], range(-2, Some(-1)));
    assert_eq!(path.to_string(), ".foo[-2:-1].bar[:].baz");
}

#[test]
fn test_range_forms() {
    assert_eq!(Path::compile("[1:3]").unwrap().segments(), &[range(1, Some(3))]);
    assert_eq!(Path::compile("[:3]").unwrap().segments(), &[range(0, Some(3))]);
    assert_eq!(Path::compile("[:-1]").unwrap().segments(), &[range(0, Some(-1))]);
    assert_eq!(Path::compile("[2:]").unwrap().segments(), &[range(2, None)]);
    assert_eq!(Path::compile("[:]").unwrap().segments(), &[range(0, None)]);
}

#[test]
fn test_empty_brackets_and_star_mean_full_range() {
    let path = Path::compile("[].field[*]").unwrap();
    assert_eq!(path.segments(), &[range(0, None), field("field"), range(0, None)]);
    assert_eq!(path.to_string(), "[:].field[:]");
}

#[test]
fn test_leading_bracket() {
    let path = Path::compile("[0].name").unwrap();
    assert_eq!(path.segments(), &[Segment::Index(0), field("name")]);
}

#[test]
fn test_quoted_field() {
    let path = Path::compile(r#".metadata["app.kubernetes.io/name"]"#).unwrap();
    assert_eq!(
        path.segments(),
        &[field("metadata"), field("app.kubernetes.io/name")]
    );
    assert_eq!(path.to_string(), r#".metadata["app.kubernetes.io/name"]"#);
}

#[test]
fn test_quoted_identifier_renders_dotted() {
    let path = Path::compile(r#"["plain"]"#).unwrap();
    assert_eq!(path.to_string(), ".plain");
}

#[test]
fn test_from_str() {
    let path: Path = ".a[1]".parse().unwrap();
    assert_eq!(path.len(), 2);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_must_start_with_dot_or_bracket() {
    let err = Path::compile("0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid path '0': expected '. or [', but got '0' (after '')"
    );
}

#[test]
fn test_unclosed_index() {
    let err = Path::compile(".foo[0").unwrap_err();
    assert_eq!(
        err,
        PathError::Syntax {
            text: ".foo[0".to_string(),
            consumed: ".foo[0".to_string(),
            cause: SyntaxError::Unexpected {
                expected: ": or ]",
                found: Found::Eof,
            },
        }
    );
}

#[test]
fn test_trailing_dot() {
    let err = Path::compile(".foo[0].").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid path '.foo[0].': expected 'identifier', but got <EOF> (after '.foo[0].')"
    );
}

#[test]
fn test_whitespace_rejected() {
    let err = Path::compile(".foo bar").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid path '.foo bar': expected '. or [', but got ' ' (after '.foo')"
    );
    assert!(Path::compile(" .foo").is_err());
    assert!(Path::compile(".foo[ 1]").is_err());
}

#[test]
fn test_double_dot() {
    assert_eq!(
        syntax_cause(".."),
        SyntaxError::Unexpected {
            expected: "identifier",
            found: Found::Text(".".to_string()),
        }
    );
}

#[test]
fn test_range_missing_end() {
    assert_eq!(
        syntax_cause("[:"),
        SyntaxError::Unexpected {
            expected: "end index or ]",
            found: Found::Eof,
        }
    );
}

#[test]
fn test_lone_minus() {
    assert_eq!(
        syntax_cause("[-]"),
        SyntaxError::Unexpected {
            expected: "integer",
            found: Found::Text("]".to_string()),
        }
    );
}

#[test]
fn test_bad_bracket_contents() {
    assert_eq!(
        syntax_cause("[foo]"),
        SyntaxError::Unexpected {
            expected: "an index or range",
            found: Found::Text("foo".to_string()),
        }
    );
}

#[test]
fn test_integer_overflow() {
    assert_eq!(
        syntax_cause("[99999999999999999999]"),
        SyntaxError::IntegerOverflow("99999999999999999999".to_string())
    );
}

#[test]
fn test_lex_error_is_wrapped() {
    let err = Path::compile(r#"["abc"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid path '["abc': unterminated string starting at offset 1 (after '[')"#
    );
}
