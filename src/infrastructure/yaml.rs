//! YAML adapters: text → [`RawValue`] and [`TreeNode`] → outline text.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};
use yaml_rust2::parser::{Event, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

use crate::domain::{DocumentError, RawValue, TreeNode, CHILDREN_KEY, NAME_KEY};
use crate::infrastructure::traits::DocumentDeserializer;

/// Plain scalars YAML reads as null.
const NULL_FORMS: [&str; 5] = ["", "~", "null", "Null", "NULL"];

/// Document deserializer driven by yaml-rust2 parser events.
///
/// Values are assembled on an explicit stack, so nesting depth is bounded
/// only by memory and the tree builder's own limit decides what is too deep.
/// Mapping order is preserved, scalars keep their source text. Duplicate keys
/// and multi-document streams are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDeserializer;

impl DocumentDeserializer for YamlDeserializer {
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    fn deserialize(&self, text: &str) -> Result<RawValue, DocumentError> {
        let mut parser = Parser::new_from_str(text);
        let mut loader = Loader::default();
        loop {
            let (event, marker) = parser.next_token().map_err(scan_error)?;
            if matches!(event, Event::StreamEnd) {
                break;
            }
            loader.on_event(event, marker)?;
        }
        Ok(loader.finish())
    }
}

fn scan_error(e: ScanError) -> DocumentError {
    debug!("yaml error: {e}");
    located(e.info(), *e.marker())
}

/// Markers count columns from 0.
fn located(message: impl Into<String>, marker: Marker) -> DocumentError {
    DocumentError::at(message, marker.line(), marker.col() + 1)
}

/// Collection under construction.
enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<RawValue>,
    },
    Mapping {
        anchor: usize,
        entries: Vec<(String, RawValue)>,
        key: Option<String>,
    },
}

#[derive(Default)]
struct Loader {
    stack: Vec<Frame>,
    anchors: HashMap<usize, RawValue>,
    document: Option<RawValue>,
}

impl Loader {
    fn on_event(&mut self, event: Event, marker: Marker) -> Result<(), DocumentError> {
        match event {
            Event::Scalar(text, style, anchor, _) => {
                let text = if matches!(style, TScalarStyle::Plain)
                    && NULL_FORMS.contains(&text.as_str())
                {
                    String::new()
                } else {
                    text
                };
                self.complete(RawValue::Scalar(text), anchor, marker)
            }
            Event::SequenceStart(anchor, _) => {
                self.stack.push(Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                });
                Ok(())
            }
            Event::MappingStart(anchor, _) => {
                self.stack.push(Frame::Mapping {
                    anchor,
                    entries: Vec::new(),
                    key: None,
                });
                Ok(())
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (value, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence { anchor, items }) => (RawValue::Sequence(items), anchor),
                    Some(Frame::Mapping {
                        anchor, entries, ..
                    }) => (RawValue::Mapping(entries), anchor),
                    None => return Err(located("unbalanced collection end", marker)),
                };
                self.complete(value, anchor, marker)
            }
            Event::Alias(id) => {
                let value = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| located("unknown anchor", marker))?;
                self.complete(value, 0, marker)
            }
            _ => Ok(()),
        }
    }

    /// Attach a finished value to the enclosing collection.
    fn complete(&mut self, value: RawValue, anchor: usize, marker: Marker) -> Result<(), DocumentError> {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }
        match self.stack.last_mut() {
            None if self.document.is_some() => {
                Err(located("multiple documents are not supported", marker))
            }
            None => {
                self.document = Some(value);
                Ok(())
            }
            Some(Frame::Sequence { items, .. }) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                Some(name) => {
                    entries.push((name, value));
                    Ok(())
                }
                None => {
                    let name = key_text(&value).map_err(|m| located(m, marker))?;
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(located(format!("duplicate entry with key \"{name}\""), marker));
                    }
                    *key = Some(name);
                    Ok(())
                }
            },
        }
    }

    /// An empty stream reads as a null scalar.
    fn finish(self) -> RawValue {
        self.document.unwrap_or_else(|| RawValue::Scalar(String::new()))
    }
}

/// Mapping keys become text. An unquoted `[]` key parses as an empty flow
/// sequence and is read back as the marker text.
fn key_text(key: &RawValue) -> Result<String, &'static str> {
    match key {
        RawValue::Scalar(text) => Ok(text.clone()),
        RawValue::Sequence(items) if items.is_empty() => Ok(CHILDREN_KEY.to_string()),
        RawValue::Mapping(entries) if entries.is_empty() => Ok("{}".to_string()),
        RawValue::Sequence(_) | RawValue::Mapping(_) => Err("unsupported composite mapping key"),
    }
}

/// Serializes a tree back into the outline convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineWriter;

impl OutlineWriter {
    pub fn write(&self, tree: &TreeNode) -> Result<String, DocumentError> {
        let items = tree.children().unwrap_or_default();
        let mut document = Mapping::new();
        document.insert(
            Value::String(tree.name().to_string()),
            Value::Sequence(items.iter().map(item_value).collect()),
        );
        serde_yaml::to_string(&Value::Mapping(document))
            .map_err(|e| DocumentError::new(format!("serialize outline: {e}")))
    }
}

fn item_value(node: &TreeNode) -> Value {
    match node.children() {
        None => Value::String(node.name().to_string()),
        Some(children) => {
            let mut item = Mapping::new();
            item.insert(
                Value::String(NAME_KEY.to_string()),
                Value::String(node.name().to_string()),
            );
            item.insert(
                Value::String(CHILDREN_KEY.to_string()),
                Value::Sequence(children.iter().map(item_value).collect()),
            );
            Value::Mapping(item)
        }
    }
}
