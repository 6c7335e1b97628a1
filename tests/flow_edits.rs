//! Flow collection editing: `[a, b]` and `{k: v}` stay inline.

use yaml_splice::{Editor, YamlValue};

#[test]
fn test_flow_seq_append() {
    let mut editor = Editor::new("nums: [1, 2]\n").unwrap();
    editor.append_to(["nums"], 3).unwrap();
    assert_eq!(editor.to_string(), "nums: [1, 2, 3]\n");
}

#[test]
fn test_flow_seq_append_to_empty() {
    let mut editor = Editor::new("nums: []\n").unwrap();
    editor.append_to(["nums"], 1).unwrap();
    assert_eq!(editor.to_string(), "nums: [1]\n");
}

#[test]
fn test_flow_seq_prepend() {
    let mut editor = Editor::new("nums: [1, 2]\n").unwrap();
    editor.prepend_to(["nums"], 0).unwrap();
    assert_eq!(editor.to_string(), "nums: [0, 1, 2]\n");
}

#[test]
fn test_flow_seq_insert_middle() {
    let mut editor = Editor::new("nums: [1, 3]\n").unwrap();
    editor.insert(["nums"], 1, 2).unwrap();
    assert_eq!(editor.to_string(), "nums: [1, 2, 3]\n");
}

#[test]
fn test_flow_seq_update_element() {
    let mut editor = Editor::new("nums: [1, 2]\n").unwrap();
    editor.update(["nums", "1"], 9).unwrap();
    assert_eq!(editor.to_string(), "nums: [1, 9]\n");
}

#[test]
fn test_flow_seq_remove_first() {
    let mut editor = Editor::new("nums: [1, 2]\n").unwrap();
    editor.remove(["nums", "0"]).unwrap();
    assert_eq!(editor.to_string(), "nums: [2]\n");
}

#[test]
fn test_flow_seq_remove_last() {
    let mut editor = Editor::new("nums: [1, 2]\n").unwrap();
    editor.remove(["nums", "1"]).unwrap();
    assert_eq!(editor.to_string(), "nums: [1]\n");
}

#[test]
fn test_flow_seq_remove_only() {
    let mut editor = Editor::new("k: [x]\n").unwrap();
    editor.remove(["k", "0"]).unwrap();
    assert_eq!(editor.to_string(), "k: []\n");
}

#[test]
fn test_flow_map_replace_value() {
    let mut editor = Editor::new("m: {a: 1, b: 2}\n").unwrap();
    editor.update(["m", "a"], 9).unwrap();
    assert_eq!(editor.to_string(), "m: {a: 9, b: 2}\n");
}

#[test]
fn test_flow_map_add_appends_after_ordered_keys() {
    let mut editor = Editor::new("m: {a: 1}\n").unwrap();
    editor.update(["m", "b"], 2).unwrap();
    assert_eq!(editor.to_string(), "m: {a: 1, b: 2}\n");
}

#[test]
fn test_flow_map_add_alphabetical_front() {
    let mut editor = Editor::new("m: {b: 1}\n").unwrap();
    editor.update(["m", "a"], 0).unwrap();
    assert_eq!(editor.to_string(), "m: {a: 0, b: 1}\n");
}

#[test]
fn test_flow_map_add_to_empty() {
    let mut editor = Editor::new("m: {}\n").unwrap();
    editor.update(["m", "a"], 1).unwrap();
    assert_eq!(editor.to_string(), "m: {a: 1}\n");
}

#[test]
fn test_flow_map_remove_first() {
    let mut editor = Editor::new("m: {a: 1, b: 2}\n").unwrap();
    editor.remove(["m", "a"]).unwrap();
    assert_eq!(editor.to_string(), "m: {b: 2}\n");
}

#[test]
fn test_flow_map_remove_last() {
    let mut editor = Editor::new("m: {a: 1, b: 2}\n").unwrap();
    editor.remove(["m", "b"]).unwrap();
    assert_eq!(editor.to_string(), "m: {a: 1}\n");
}

#[test]
fn test_flow_map_remove_only() {
    let mut editor = Editor::new("m: {a: 1}\n").unwrap();
    editor.remove(["m", "a"]).unwrap();
    assert_eq!(editor.to_string(), "m: {}\n");
}

#[test]
fn test_nested_flow_edit() {
    let mut editor = Editor::new("outer: [{k: 1}, 2]\n").unwrap();
    editor.update(["outer", "0", "k"], 9).unwrap();
    assert_eq!(editor.to_string(), "outer: [{k: 9}, 2]\n");
}

#[test]
fn test_inserted_collections_into_flow_stay_flow() {
    let mut editor = Editor::new("xs: [1]\n").unwrap();
    editor
        .append_to(
            ["xs"],
            YamlValue::sequence(vec![YamlValue::from(2), YamlValue::from(3)]),
        )
        .unwrap();
    assert_eq!(editor.to_string(), "xs: [1, [2, 3]]\n");
}

#[test]
fn test_flow_preserved_inside_block_document() {
    let mut editor = Editor::new("# config\nports: [80, 443]\nname: app\n").unwrap();
    editor.append_to(["ports"], 8080).unwrap();
    assert_eq!(
        editor.to_string(),
        "# config\nports: [80, 443, 8080]\nname: app\n"
    );
}
