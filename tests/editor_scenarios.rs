//! End-to-end editing scenarios: the editor must produce exactly the
//! expected text, preserving comments and formatting outside the splice.

use yaml_splice::{Editor, Path, YamlValue};

#[test]
fn test_flow_map_update_with_dangerous_apostrophe() {
    let mut editor = Editor::new("{YAML: YAML}").unwrap();
    editor
        .update(["YAML"], "YAML Ain't Markup Language")
        .unwrap();
    assert_eq!(
        editor.to_string(),
        "{YAML: \"YAML Ain't Markup Language\"}"
    );
}

#[test]
fn test_remove_middle_element() {
    let mut editor = Editor::new("- a\n- b\n- c\n").unwrap();
    editor.remove([1usize]).unwrap();
    assert_eq!(editor.to_string(), "- a\n- c\n");
}

#[test]
fn test_remove_last_element_keeps_trailing_newline() {
    let mut editor = Editor::new("- a\n- b\n").unwrap();
    editor.remove([1usize]).unwrap();
    assert_eq!(editor.to_string(), "- a\n");
}

#[test]
fn test_alphabetical_insertion_at_end() {
    let mut editor = Editor::new("a: 1\nb: 2\n").unwrap();
    editor.update(["c"], 3).unwrap();
    assert_eq!(editor.to_string(), "a: 1\nb: 2\nc: 3\n");
}

#[test]
fn test_update_keeps_header_and_inline_comments() {
    let mut editor = Editor::new("# header\nkey: value  # inline\n").unwrap();
    editor.update(["key"], "other").unwrap();
    assert_eq!(editor.to_string(), "# header\nkey: other  # inline\n");
}

#[test]
fn test_nested_list_insert_redistributes_indent() {
    let mut editor = Editor::new("- - x\n  - y\n").unwrap();
    editor.insert([0usize], 0, "z").unwrap();
    assert_eq!(editor.to_string(), "- - z\n  - x\n  - y\n");
}

#[test]
fn test_identity_round_trip_before_mutation() {
    for source in [
        "a: 1\n",
        "# only comments\n",
        "- x\n- y # tail\n",
        "{flow: [1, 2]}\n",
        "key: |\n  block\n  scalar\n",
        "a: 1\r\nb: 2\r\n",
    ] {
        let editor = Editor::new(source).unwrap();
        assert_eq!(editor.to_string(), source, "identity failed for {:?}", source);
    }
}

#[test]
fn test_value_correctness_after_mutation() {
    let mut editor = Editor::new("server:\n  port: 8080\n  host: localhost\n").unwrap();
    editor.update(["server", "port"], 9090).unwrap();
    assert_eq!(
        editor.value_at(["server", "port"]).unwrap(),
        YamlValue::from(9090)
    );
    // The untouched sibling is still there.
    assert_eq!(
        editor.value_at(["server", "host"]).unwrap(),
        YamlValue::from("localhost")
    );
}

#[test]
fn test_local_change_property() {
    let source = "# top\nfirst: 1\nsecond: 2\nthird: 3\n# bottom\n";
    let mut editor = Editor::new(source).unwrap();
    editor.update(["second"], 22).unwrap();

    assert_eq!(editor.edits().len(), 1);
    let edit = &editor.edits()[0];
    let after = editor.to_string();

    // Every byte before the splice is unchanged.
    assert_eq!(&after[..edit.offset], &source[..edit.offset]);
    // Every byte after the splice is unchanged.
    assert_eq!(
        &after[edit.offset + edit.replacement.len()..],
        &source[edit.offset + edit.length..]
    );
}

#[test]
fn test_style_idempotence_plain() {
    let source = "key: value\n";
    let mut editor = Editor::new(source).unwrap();
    let current = editor.value_at(["key"]).unwrap();
    editor.update(["key"], current).unwrap();
    assert_eq!(editor.to_string(), source);
}

#[test]
fn test_style_idempotence_quoted() {
    let source = "key: 'value'\nother: \"x\"\n";
    let mut editor = Editor::new(source).unwrap();
    let current = editor.value_at(["key"]).unwrap();
    editor.update(["key"], current).unwrap();
    let current = editor.value_at(["other"]).unwrap();
    editor.update(["other"], current).unwrap();
    assert_eq!(editor.to_string(), source);
}

#[test]
fn test_style_idempotence_block_collection() {
    let source = "a:\n  - x\n  - y\n";
    let mut editor = Editor::new(source).unwrap();
    let current = editor.value_at(["a"]).unwrap();
    editor.update(["a"], current).unwrap();
    assert_eq!(editor.to_string(), source);
}

#[test]
fn test_root_replacement() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    editor.update(Path::root(), 42).unwrap();
    assert_eq!(editor.to_string(), "42\n");
    assert_eq!(editor.value_at(Path::root()).unwrap(), YamlValue::from(42));
}

#[test]
fn test_mutation_sequence_accumulates_edits() {
    let mut editor = Editor::new("a: 1\n").unwrap();
    editor.update(["a"], 2).unwrap();
    editor.update(["b"], 3).unwrap();
    editor.remove(["a"]).unwrap();
    assert_eq!(editor.to_string(), "b: 3\n");
    assert_eq!(editor.edits().len(), 3);
}
