//! Error propagation: every failure leaves the editor usable at its prior
//! valid state.

use yaml_splice::{EditError, Editor, Path, PathSegment, YamlValue};

#[test]
fn test_initial_parse_failure() {
    let result = Editor::new("a: 'unterminated\n");
    assert!(matches!(result, Err(EditError::Parse(_))));
}

#[test]
fn test_missing_key_is_path_error() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    assert!(matches!(
        editor.remove(["missing"]),
        Err(EditError::Path(_))
    ));
    assert_eq!(editor.to_string(), "a: 1\n");
}

#[test]
fn test_index_out_of_range() {
    let mut editor = Editor::new("- a\n").unwrap();
    assert!(matches!(
        editor.update([5usize], "x"),
        Err(EditError::Path(_))
    ));
    assert!(matches!(editor.remove([5usize]), Err(EditError::Path(_))));
    assert!(matches!(
        editor.insert(Path::root(), 5, "x"),
        Err(EditError::Path(_))
    ));
}

#[test]
fn test_traversing_scalar_fails() {
    let editor = Editor::new("a: 1\n").unwrap();
    assert!(matches!(
        editor.parse_at(["a", "deeper"]),
        Err(EditError::Path(_))
    ));
}

#[test]
fn test_append_to_non_sequence_fails() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    assert!(matches!(
        editor.append_to(["a"], "x"),
        Err(EditError::Path(_))
    ));
}

#[test]
fn test_alias_traversal_is_alias_error() {
    let mut editor = Editor::new("base: &b\n  x: 1\nref: *b\n").unwrap();
    assert!(matches!(
        editor.parse_at(["ref"]),
        Err(EditError::Alias(_))
    ));
    assert!(matches!(
        editor.update(["ref", "x"], 2),
        Err(EditError::Alias(_))
    ));
    // Editing around the alias still works.
    editor.update(["base", "x"], 2).unwrap();
    assert_eq!(editor.to_string(), "base: &b\n  x: 2\nref: *b\n");
}

#[test]
fn test_non_scalar_key_is_invalid_scalar() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    let key = PathSegment::Key(YamlValue::sequence(vec![YamlValue::from(1)]));
    let result = editor.update(Path::from(vec![key]), "x");
    assert!(matches!(result, Err(EditError::InvalidScalar(_))));
}

#[test]
fn test_errors_do_not_disturb_state() {
    let source = "a: 1\nlist:\n  - x\n";
    let mut editor = Editor::new(source).unwrap();
    let _ = editor.remove(["nope"]);
    let _ = editor.update(["list", "9"], "x");
    let _ = editor.append_to(["a"], "x");
    assert_eq!(editor.to_string(), source);
    assert!(editor.edits().is_empty());

    editor.update(["a"], 2).unwrap();
    assert_eq!(editor.to_string(), "a: 2\nlist:\n  - x\n");
}

#[test]
fn test_remove_root_is_path_error() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    assert!(matches!(
        editor.remove(Path::root()),
        Err(EditError::Path(_))
    ));
}

#[test]
fn test_splice_rejects_bad_range_without_changes() {
    let mut editor = Editor::new("items:\n  - a\n  - b\n").unwrap();
    let before = editor.to_string();
    assert!(editor
        .splice(["items"], 5, 1, vec![YamlValue::from("x")])
        .is_err());
    assert_eq!(editor.to_string(), before);
    assert!(editor.edits().is_empty());
}

#[test]
fn test_error_messages_render() {
    let err = Editor::new("a: 'oops\n").unwrap_err();
    assert!(err.to_string().contains("parse error"));

    let editor = Editor::new("a: 1\n").unwrap();
    let err = editor.parse_at(["b"]).unwrap_err();
    assert!(err.to_string().contains("path error"));
}
