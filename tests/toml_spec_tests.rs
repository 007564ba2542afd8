//! One test per documented behavior of the format: empty inputs, scalar
//! coercion, nesting, arrays, duplicate aggregation, and the fatal error
//! classes.

use chrono::{TimeZone, Utc};
use minitoml::{from_str, to_string, toml, DuplicateKey, Error, Table, Value};

fn table(entries: Vec<(&str, Value)>) -> Table {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn empty_input_is_an_empty_document() {
    assert!(from_str("").unwrap().is_empty());
}

#[test]
fn whitespace_only_inputs_are_empty_documents() {
    assert!(from_str("\n").unwrap().is_empty());
    assert!(from_str("\t").unwrap().is_empty());
    assert!(from_str("   \n  \n").unwrap().is_empty());
}

#[test]
fn comment_only_input_is_an_empty_document() {
    assert!(from_str("# comment").unwrap().is_empty());
    assert!(from_str("# one\n# two\n").unwrap().is_empty());
}

#[test]
fn integer_assignment() {
    assert_eq!(
        from_str("abc=123").unwrap(),
        table(vec![("abc", Value::Integer(123))])
    );
}

#[test]
fn string_assignment() {
    assert_eq!(
        from_str("abc = \"def\"").unwrap(),
        table(vec![("abc", Value::from("def"))])
    );
}

#[test]
fn boolean_assignment() {
    let doc = from_str("yes = true\nno = false").unwrap();
    assert_eq!(doc.get("yes"), Some(&Value::Boolean(true)));
    assert_eq!(doc.get("no"), Some(&Value::Boolean(false)));
}

#[test]
fn datetime_assignment_is_utc_without_offset() {
    let doc = from_str("dob = 1979-05-27T07:32:00Z").unwrap();
    let expected = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
    assert_eq!(doc.get("dob").and_then(|v| v.as_datetime()), Some(&expected));
}

#[test]
fn multiple_assignments_across_lines() {
    let doc = from_str("abc = 123\ndef=\"hello\"").unwrap();
    assert_eq!(doc.get("abc"), Some(&Value::Integer(123)));
    assert_eq!(doc.get("def"), Some(&Value::from("hello")));
}

#[test]
fn whitespace_around_equals_is_ignored() {
    assert_eq!(from_str("abc = 123").unwrap(), from_str("abc=123").unwrap());
}

#[test]
fn bare_group_header_creates_an_empty_table() {
    let doc = from_str("[group]").unwrap();
    assert_eq!(doc, table(vec![("group", toml!({}))]));
}

#[test]
fn group_with_assignment() {
    let doc = from_str("[group]\nabc=123").unwrap();
    assert_eq!(doc, table(vec![("group", toml!({ "abc": 123 }))]));
}

#[test]
fn assignments_then_group() {
    let doc = from_str("abc=123\n[group]").unwrap();
    assert_eq!(doc.get("abc"), Some(&Value::Integer(123)));
    assert_eq!(doc.get("group"), Some(&toml!({})));
}

#[test]
fn explicit_parent_then_nested_group() {
    let doc = from_str("[group]\n[group.subgroup]\nabc=123").unwrap();
    assert_eq!(
        doc,
        table(vec![("group", toml!({ "subgroup": { "abc": 123 } }))])
    );
}

#[test]
fn nested_group_without_explicit_parent() {
    let doc = from_str("[group.subgroup]").unwrap();
    assert_eq!(doc, table(vec![("group", toml!({ "subgroup": {} }))]));
}

#[test]
fn array_of_integers() {
    assert_eq!(
        from_str("abc=[1,2,3]").unwrap(),
        table(vec![("abc", toml!([1, 2, 3]))])
    );
}

#[test]
fn empty_array_with_and_without_whitespace() {
    assert_eq!(
        from_str("abc=[]").unwrap(),
        table(vec![("abc", toml!([]))])
    );
    assert_eq!(
        from_str(" abc = [ ] ").unwrap(),
        table(vec![("abc", toml!([]))])
    );
}

#[test]
fn array_preserves_order_and_duplicates() {
    assert_eq!(
        from_str("abc=[2, 1, 2]").unwrap(),
        table(vec![("abc", toml!([2, 1, 2]))])
    );
}

#[test]
fn array_of_strings() {
    assert_eq!(
        from_str(r#"abc=["x", "y"]"#).unwrap(),
        table(vec![("abc", toml!(["x", "y"]))])
    );
}

#[test]
fn escaped_quotes_in_strings() {
    let doc = from_str(r#"quote="say \"hello\"""#).unwrap();
    assert_eq!(doc.get("quote").and_then(|v| v.as_str()), Some("say \"hello\""));
}

#[test]
fn two_statements_on_one_line_fail() {
    assert!(matches!(
        from_str("abc=123 def=456"),
        Err(Error::UnexpectedToken { line: 1, .. })
    ));
}

#[test]
fn duplicate_key_names_the_key() {
    let err = from_str("abc=123\nabc=456").unwrap_err();
    assert_eq!(
        err,
        Error::Duplicates(vec![DuplicateKey {
            key: "abc".to_string(),
            line: 2,
        }])
    );
    assert_eq!(err.to_string(), "1 errors:\nLine 2: duplicate key 'abc'");
}

#[test]
fn duplicates_are_aggregated_across_the_whole_input() {
    let err = from_str("a=1\na=2\n[g]\nk=1\nk=2\nk=3").unwrap_err();
    match err {
        Error::Duplicates(dups) => {
            let seen: Vec<_> = dups.iter().map(|d| (d.key.as_str(), d.line)).collect();
            assert_eq!(seen, vec![("a", 2), ("k", 5), ("k", 6)]);
        }
        other => panic!("expected aggregate, got {:?}", other),
    }
}

#[test]
fn duplicate_table_header_fails() {
    let err = from_str("[group]\n[group]").unwrap_err();
    assert_eq!(
        err,
        Error::Duplicates(vec![DuplicateKey {
            key: "group".to_string(),
            line: 2,
        }])
    );
}

#[test]
fn header_colliding_with_scalar_fails() {
    let err = from_str("a=1\n[a]").unwrap_err();
    assert_eq!(
        err,
        Error::Duplicates(vec![DuplicateKey {
            key: "a".to_string(),
            line: 2,
        }])
    );
}

#[test]
fn illegal_character_fails_immediately() {
    assert_eq!(
        from_str("a=1\n$"),
        Err(Error::IllegalCharacter { ch: '$', line: 2 })
    );
    // a later duplicate is never reached
    assert_eq!(
        from_str("a=1\n$\na=2"),
        Err(Error::IllegalCharacter { ch: '$', line: 2 })
    );
}

#[test]
fn negative_integers_are_not_part_of_the_format() {
    assert_eq!(
        from_str("a = -1"),
        Err(Error::IllegalCharacter { ch: '-', line: 1 })
    );
}

#[test]
fn floats_are_not_part_of_the_format() {
    // "1.5" lexes as integer 1, then '.' matches nothing
    assert_eq!(
        from_str("a = 1.5"),
        Err(Error::IllegalCharacter { ch: '.', line: 1 })
    );
}

#[test]
fn unterminated_string_fails() {
    assert_eq!(
        from_str("a = \"oops"),
        Err(Error::UnterminatedString { line: 1 })
    );
    assert_eq!(
        from_str("a = \"oops\nb = 1"),
        Err(Error::UnterminatedString { line: 1 })
    );
}

#[test]
fn eof_mid_statement_fails() {
    assert_eq!(from_str("abc="), Err(Error::UnexpectedEof));
    assert_eq!(from_str("abc=[1"), Err(Error::UnexpectedEof));
}

#[test]
fn source_types_are_preserved_exactly() {
    let doc = from_str("i = 1\ns = \"1\"\nb = true\nd = 1979-05-27T07:32:00Z").unwrap();
    assert!(doc.get("i").unwrap().is_integer());
    assert!(doc.get("s").unwrap().is_string());
    assert!(doc.get("b").unwrap().is_boolean());
    assert!(doc.get("d").unwrap().is_datetime());
}

#[test]
fn reparse_of_rendering_is_equal() {
    let source = "abc = 123\nquote = \"say \\\"hello\\\"\"\nflag = false\n\
                  dob = 1979-05-27T07:32:00Z\nsizes = [1, 2, 3]\nnone = []\n\
                  [group]\n[group.subgroup]\nabc = 456\n";
    let doc = from_str(source).unwrap();
    let rendered = to_string(&doc);
    assert_eq!(from_str(&rendered).unwrap(), doc);
    // and the rendering is stable from then on
    assert_eq!(to_string(&from_str(&rendered).unwrap()), rendered);
}
