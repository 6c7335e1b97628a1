//! The editor façade: owns the source text and its parsed tree, resolves
//! paths, dispatches to the planners, and applies each splice atomically
//! (splice, re-parse, commit or revert).

use crate::error::{EditError, EditResult};
use crate::lex::{LexWarning, SyntaxKind};
use crate::mutation::{
    block_map_add, block_map_remove, block_map_set, block_seq_insert, block_seq_push,
    block_seq_remove, block_seq_set, flow_map_add, flow_map_remove, flow_map_set, flow_seq_insert,
    flow_seq_push, flow_seq_remove, flow_seq_set, replace_root, SourceEdit,
};
use crate::path::{Path, PathSegment};
use crate::scalar::{ScalarRepr, ScalarStyle};
use crate::scan::indent_step;
use crate::value::YamlValue;
use crate::yaml::{node_span, node_to_value, Document, Mapping, Scalar, Sequence, SyntaxNode, Yaml};
use crate::{Parse, ParseError};
use rowan::ast::AstNode;
use std::fmt;

/// What kind of node a path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A scalar value
    Scalar,
    /// A sequence
    Sequence,
    /// A mapping
    Mapping,
}

/// A read-only view of a node inside the editor's current tree.
///
/// Views are snapshots: they stay valid only until the next successful
/// mutation, which replaces the whole tree.
#[derive(Debug, Clone)]
pub struct Node {
    node: SyntaxNode,
}

impl Node {
    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        match self.node.kind() {
            SyntaxKind::SEQUENCE => NodeKind::Sequence,
            SyntaxKind::MAPPING => NodeKind::Mapping,
            _ => NodeKind::Scalar,
        }
    }

    /// The node's byte span in the current source.
    pub fn span(&self) -> (usize, usize) {
        node_span(&self.node)
    }

    /// The node's logical value.
    pub fn value(&self) -> EditResult<YamlValue> {
        node_to_value(&self.node)
    }

    /// The scalar style, when this node is a scalar.
    pub fn scalar_style(&self) -> Option<ScalarStyle> {
        Scalar::cast(self.node.clone()).map(|s| s.style())
    }
}

/// A comment-preserving YAML document editor.
///
/// The editor holds the source text and its parsed tree. Every mutation
/// computes a minimal text splice, applies it, re-parses, and either
/// commits the new state or reverts and reports the failure. All bytes
/// outside the splice are left untouched: comments, blank lines, quoting
/// and collection styles survive edits to unrelated parts of the document.
pub struct Editor {
    source: String,
    yaml: Yaml,
    edits: Vec<SourceEdit>,
    warnings: Vec<LexWarning>,
}

impl Editor {
    /// Parse `source` and build an editor over it. Fails on parse errors.
    pub fn new(source: impl Into<String>) -> EditResult<Self> {
        let source = source.into();
        let parse = Parse::<Yaml>::parse_yaml(&source);
        if parse.has_errors() {
            return Err(EditError::Parse(ParseError(parse.errors().to_vec())));
        }
        Ok(Editor {
            yaml: parse.tree(),
            warnings: parse.warnings().to_vec(),
            edits: Vec::new(),
            source,
        })
    }

    /// The current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The append-only log of applied splices, in application order.
    pub fn edits(&self) -> &[SourceEdit] {
        &self.edits
    }

    /// Lexer validation warnings from the most recent parse.
    pub fn warnings(&self) -> &[LexWarning] {
        &self.warnings
    }

    /// Resolve `path` and return a read-only view of the node there.
    pub fn parse_at(&self, path: impl Into<Path>) -> EditResult<Node> {
        let path = path.into();
        let node = self.resolve(path.segments())?;
        Ok(Node { node })
    }

    /// The logical value at `path`.
    pub fn value_at(&self, path: impl Into<Path>) -> EditResult<YamlValue> {
        self.parse_at(path)?.value()
    }

    /// Set the value at `path`. For a mapping path whose final key does not
    /// exist yet, the key is added (alphabetically when the existing keys
    /// are sorted, at the end otherwise). The empty path replaces the
    /// whole document body.
    pub fn update(&mut self, path: impl Into<Path>, value: impl Into<YamlValue>) -> EditResult<()> {
        let path = path.into();
        let value = value.into();
        let step = self.step_size();

        let Some((parent_segments, last)) = path.split_last() else {
            let edit = replace_root(&self.source, &self.document()?, &value, step)?;
            return self.apply(edit);
        };

        let parent = self.resolve(parent_segments)?;
        match self.container_slot(&parent, last)? {
            Slot::SequenceIndex(seq, index) => {
                if index >= seq.len() {
                    return Err(EditError::Path(format!(
                        "sequence index {} out of range (len {})",
                        index,
                        seq.len()
                    )));
                }
                let edit = if seq.is_flow() {
                    flow_seq_set(&self.source, &seq, index, &value)?
                } else {
                    block_seq_set(&self.source, &seq, index, &value, step)?
                };
                self.apply(edit)
            }
            Slot::MappingKey(map, key) => {
                let edit = match map.entry_for(&key) {
                    Some(entry) => {
                        if map.is_flow() {
                            flow_map_set(&self.source, &entry, &value)?
                        } else {
                            block_map_set(&self.source, &entry, &value, step)?
                        }
                    }
                    None => {
                        if key.as_scalar().is_none() {
                            return Err(EditError::InvalidScalar(
                                "new mapping keys must be scalars".to_string(),
                            ));
                        }
                        if map.is_flow() {
                            flow_map_add(&self.source, &map, &key, &value)?
                        } else {
                            block_map_add(&self.source, &map, &key, &value, step)?
                        }
                    }
                };
                self.apply(edit)
            }
        }
    }

    /// Append `value` to the sequence at `path`.
    pub fn append_to(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<YamlValue>,
    ) -> EditResult<()> {
        let value = value.into();
        let step = self.step_size();
        let seq = self.sequence_at(path.into())?;
        let edit = if seq.is_flow() {
            flow_seq_push(&self.source, &seq, &value)?
        } else {
            block_seq_push(&self.source, &seq, &value, step)?
        };
        self.apply(edit)
    }

    /// Insert `value` at the front of the sequence at `path`.
    pub fn prepend_to(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<YamlValue>,
    ) -> EditResult<()> {
        self.insert(path, 0, value)
    }

    /// Insert `value` before `index` in the sequence at `path`. An index
    /// equal to the length appends.
    pub fn insert(
        &mut self,
        path: impl Into<Path>,
        index: usize,
        value: impl Into<YamlValue>,
    ) -> EditResult<()> {
        let value = value.into();
        let step = self.step_size();
        let seq = self.sequence_at(path.into())?;
        let len = seq.len();
        if index > len {
            return Err(EditError::Path(format!(
                "insertion index {} out of range (len {})",
                index, len
            )));
        }
        let edit = if seq.is_flow() {
            flow_seq_insert(&self.source, &seq, index, &value)?
        } else {
            block_seq_insert(&self.source, &seq, index, &value, step)?
        };
        self.apply(edit)
    }

    /// Remove the node at `path` from its parent container.
    pub fn remove(&mut self, path: impl Into<Path>) -> EditResult<()> {
        let path = path.into();
        let Some((parent_segments, last)) = path.split_last() else {
            return Err(EditError::Path(
                "cannot remove the document root".to_string(),
            ));
        };
        let parent = self.resolve(parent_segments)?;
        match self.container_slot(&parent, last)? {
            Slot::SequenceIndex(seq, index) => {
                if index >= seq.len() {
                    return Err(EditError::Path(format!(
                        "sequence index {} out of range (len {})",
                        index,
                        seq.len()
                    )));
                }
                let edit = if seq.is_flow() {
                    flow_seq_remove(&self.source, &seq, index)?
                } else {
                    block_seq_remove(&self.source, &seq, index)?
                };
                self.apply(edit)
            }
            Slot::MappingKey(map, key) => {
                let index = map
                    .entries()
                    .position(|e| {
                        e.key_node()
                            .and_then(|k| node_to_value(&k).ok())
                            .is_some_and(|k| k == key)
                    })
                    .ok_or_else(|| {
                        EditError::Path(format!("key {:?} not found", key_display(&key)))
                    })?;
                let edit = if map.is_flow() {
                    flow_map_remove(&self.source, &map, index)?
                } else {
                    block_map_remove(&self.source, &map, index)?
                };
                self.apply(edit)
            }
        }
    }

    /// Remove `delete_count` elements of the sequence at `path` starting at
    /// `index`, then insert `values` there. The whole call is atomic: on
    /// any failure the editor reverts to its state before the splice.
    pub fn splice(
        &mut self,
        path: impl Into<Path>,
        index: usize,
        delete_count: usize,
        values: Vec<YamlValue>,
    ) -> EditResult<()> {
        let path = path.into();
        let seq = self.sequence_at(path.clone())?;
        let len = seq.len();
        if index > len || index + delete_count > len {
            return Err(EditError::Path(format!(
                "splice range {}..{} out of range (len {})",
                index,
                index + delete_count,
                len
            )));
        }

        let checkpoint_source = self.source.clone();
        let checkpoint_edits = self.edits.len();

        let result = (|| -> EditResult<()> {
            for _ in 0..delete_count {
                let mut elem = path.clone();
                elem.push(PathSegment::Index(index));
                self.remove(elem)?;
            }
            for (k, value) in values.into_iter().enumerate() {
                self.insert(path.clone(), index + k, value)?;
            }
            Ok(())
        })();

        if result.is_err() {
            self.restore(checkpoint_source, checkpoint_edits);
        }
        result
    }

    fn restore(&mut self, source: String, edits_len: usize) {
        let parse = Parse::<Yaml>::parse_yaml(&source);
        // The checkpoint text parsed when it was current.
        self.yaml = parse.tree();
        self.source = source;
        self.edits.truncate(edits_len);
    }

    fn document(&self) -> EditResult<Document> {
        self.yaml
            .document()
            .ok_or_else(|| EditError::Path("document is empty".to_string()))
    }

    fn step_size(&self) -> usize {
        match self.yaml.document() {
            Some(document) => indent_step(&self.source, &document),
            None => 2,
        }
    }

    fn sequence_at(&self, path: Path) -> EditResult<Sequence> {
        let node = self.resolve(path.segments())?;
        Sequence::cast(node)
            .ok_or_else(|| EditError::Path("expected a sequence at this path".to_string()))
    }

    fn resolve(&self, segments: &[PathSegment]) -> EditResult<SyntaxNode> {
        let mut node = self
            .document()?
            .root_node()
            .ok_or_else(|| EditError::Path("document has no content".to_string()))?;
        for segment in segments {
            node = self.step(&node, segment)?;
        }
        if node.kind() == SyntaxKind::ALIAS {
            let alias = crate::yaml::Alias::cast(node).expect("kind checked");
            return Err(EditError::Alias(alias.name()));
        }
        Ok(node)
    }

    fn step(&self, node: &SyntaxNode, segment: &PathSegment) -> EditResult<SyntaxNode> {
        if node.kind() == SyntaxKind::ALIAS {
            let alias = crate::yaml::Alias::cast(node.clone()).expect("kind checked");
            return Err(EditError::Alias(alias.name()));
        }
        match self.container_slot(node, segment)? {
            Slot::SequenceIndex(seq, index) => seq.items().nth(index).ok_or_else(|| {
                EditError::Path(format!(
                    "sequence index {} out of range (len {})",
                    index,
                    seq.len()
                ))
            }),
            Slot::MappingKey(map, key) => map.get(&key).ok_or_else(|| {
                EditError::Path(format!("key {:?} not found", key_display(&key)))
            }),
        }
    }

    /// Interpret a segment against a container node: indexes address
    /// sequences, keys address mappings, and a numeric key addresses a
    /// sequence by position (JSON-Pointer style).
    fn container_slot(&self, node: &SyntaxNode, segment: &PathSegment) -> EditResult<Slot> {
        match (node.kind(), segment) {
            (SyntaxKind::SEQUENCE, PathSegment::Index(i)) => Ok(Slot::SequenceIndex(
                Sequence::cast(node.clone()).expect("kind checked"),
                *i,
            )),
            (SyntaxKind::SEQUENCE, PathSegment::Key(key)) => {
                let index = segment_index(key).ok_or_else(|| {
                    EditError::Path(format!(
                        "key {:?} cannot index a sequence",
                        key_display(key)
                    ))
                })?;
                Ok(Slot::SequenceIndex(
                    Sequence::cast(node.clone()).expect("kind checked"),
                    index,
                ))
            }
            (SyntaxKind::MAPPING, PathSegment::Key(key)) => Ok(Slot::MappingKey(
                Mapping::cast(node.clone()).expect("kind checked"),
                key.clone(),
            )),
            (SyntaxKind::MAPPING, PathSegment::Index(i)) => {
                // An integer segment can still be a mapping key.
                Ok(Slot::MappingKey(
                    Mapping::cast(node.clone()).expect("kind checked"),
                    YamlValue::from(*i as i64),
                ))
            }
            (SyntaxKind::SCALAR, _) => Err(EditError::Path(
                "cannot traverse into a scalar".to_string(),
            )),
            _ => Err(EditError::Path("cannot traverse this node".to_string())),
        }
    }

    fn apply(&mut self, edit: SourceEdit) -> EditResult<()> {
        let mut next = self.source.clone();
        edit.apply(&mut next);
        let parse = Parse::<Yaml>::parse_yaml(&next);
        if parse.has_errors() {
            return Err(EditError::PostEditParse(ParseError(
                parse.errors().to_vec(),
            )));
        }
        self.yaml = parse.tree();
        self.warnings = parse.warnings().to_vec();
        self.source = next;
        self.edits.push(edit);
        Ok(())
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("source", &self.source)
            .field("edits", &self.edits.len())
            .finish()
    }
}

enum Slot {
    SequenceIndex(Sequence, usize),
    MappingKey(Mapping, YamlValue),
}

/// A path key that can serve as a sequence index: an integer, or a string
/// of digits (as produced by JSON-Pointer parsing).
fn segment_index(key: &YamlValue) -> Option<usize> {
    let scalar = key.as_scalar()?;
    match scalar.repr() {
        ScalarRepr::Int(i) if *i >= 0 => Some(*i as usize),
        ScalarRepr::Str(s) => s.parse::<usize>().ok(),
        _ => None,
    }
}

fn key_display(key: &YamlValue) -> String {
    key.as_scalar()
        .map(|s| s.coerce_string())
        .unwrap_or_else(|| format!("{:?}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let source = "# header\na: 1\nlist:\n  - x\n";
        let editor = Editor::new(source).unwrap();
        assert_eq!(editor.to_string(), source);
        assert!(editor.edits().is_empty());
    }

    #[test]
    fn test_parse_error_is_fatal() {
        assert!(matches!(
            Editor::new("a: 'unterminated\n"),
            Err(EditError::Parse(_))
        ));
    }

    #[test]
    fn test_path_resolution() {
        let editor = Editor::new("a:\n  b:\n    - 1\n    - 2\n").unwrap();
        let node = editor.parse_at(Path::from(["a", "b"])).unwrap();
        assert_eq!(node.kind(), NodeKind::Sequence);
        let value = editor
            .value_at(Path::parse("/a/b/1").unwrap())
            .unwrap();
        assert_eq!(value, YamlValue::from(2));
    }

    #[test]
    fn test_missing_path_is_recoverable() {
        let mut editor = Editor::new("a: 1\n").unwrap();
        assert!(matches!(
            editor.parse_at(["missing"]),
            Err(EditError::Path(_))
        ));
        // The editor is still usable afterwards.
        editor.update(["a"], 2).unwrap();
        assert_eq!(editor.to_string(), "a: 2\n");
    }

    #[test]
    fn test_alias_traversal_rejected() {
        let editor = Editor::new("base: &b 1\nref: *b\n").unwrap();
        assert!(matches!(
            editor.parse_at(["ref"]),
            Err(EditError::Alias(_))
        ));
    }

    #[test]
    fn test_edit_log_records_splices() {
        let mut editor = Editor::new("a: 1\n").unwrap();
        editor.update(["a"], 2).unwrap();
        editor.update(["b"], 3).unwrap();
        assert_eq!(editor.edits().len(), 2);
        assert_eq!(editor.edits()[0].offset, 3);
        assert_eq!(editor.edits()[0].length, 1);
        assert_eq!(editor.edits()[0].replacement, "2");
    }

    #[test]
    fn test_splice_rolls_back_on_failure() {
        let mut editor = Editor::new("items:\n  - a\n  - b\n").unwrap();
        let before = editor.to_string();
        // Out-of-range splice fails upfront.
        assert!(editor
            .splice(["items"], 5, 1, vec![YamlValue::from("x")])
            .is_err());
        assert_eq!(editor.to_string(), before);
    }

    #[test]
    fn test_splice_replaces_range() {
        let mut editor = Editor::new("items:\n  - a\n  - b\n  - c\n").unwrap();
        editor
            .splice(
                ["items"],
                1,
                1,
                vec![YamlValue::from("x"), YamlValue::from("y")],
            )
            .unwrap();
        assert_eq!(editor.to_string(), "items:\n  - a\n  - x\n  - y\n  - c\n");
    }
}
