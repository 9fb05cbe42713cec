//! Conversion between heap values and `serde_json::Value`.
//!
//! Import decides the variant of every node once, at the boundary. Export
//! rejects cycles, since JSON has no way to express a back-reference.
//! `Undefined` and `Function` properties are omitted from exported objects;
//! inside arrays they become `null`. A sequence holding a non-index key, or
//! with very sparse indices, is exported as an object keyed by its
//! properties.

use std::collections::HashSet;

use serde_json::{Map, Number, Value as Json};

use crate::container::Container;
use crate::error::{TypeError, TypeResult};
use crate::heap::Heap;
use crate::value::{ContainerKind, NodeId, Value};

/// Most `null` fillers a sequence may need to be exported as an array.
pub const MAX_SEQUENCE_HOLES: usize = 1024;

impl Heap {
    /// Build a value graph from JSON, allocating one container per object or
    /// array.
    pub fn import_json(&mut self, json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => {
                let values: Vec<Value> = items.iter().map(|item| self.import_json(item)).collect();
                self.sequence_from(values)
            }
            Json::Object(map) => {
                let entries: Vec<(String, Value)> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), self.import_json(v)))
                    .collect();
                self.map_from(entries)
            }
        }
    }

    /// Render a value graph as JSON.
    pub fn export_json(&self, value: &Value) -> TypeResult<Json> {
        match value {
            Value::Undefined => Err(TypeError::Unrepresentable("undefined")),
            Value::Function(_) => Err(TypeError::Unrepresentable("function")),
            _ => {
                let mut on_path = HashSet::new();
                self.export_inner(value, &mut on_path)
            }
        }
    }

    fn export_inner(&self, value: &Value, on_path: &mut HashSet<NodeId>) -> TypeResult<Json> {
        let id = match value {
            Value::Undefined | Value::Function(_) | Value::Null => return Ok(Json::Null),
            Value::Bool(b) => return Ok(Json::Bool(*b)),
            Value::Number(n) => return Ok(number_to_json(*n)),
            Value::String(s) => return Ok(Json::String(s.clone())),
            Value::Ref(id) => *id,
        };

        if !on_path.insert(id) {
            return Err(TypeError::CyclicGraph(id));
        }
        let container = self.get(id)?;
        let json = match container.kind() {
            ContainerKind::Sequence => match array_elements(container) {
                Some(elements) => {
                    let len = elements.last().map_or(0, |(i, _)| i + 1);
                    let mut items = vec![Json::Null; len];
                    for (i, v) in elements {
                        items[i] = self.export_inner(v, on_path)?;
                    }
                    Json::Array(items)
                }
                None => self.export_object(container, on_path)?,
            },
            ContainerKind::Map => self.export_object(container, on_path)?,
        };
        on_path.remove(&id);
        Ok(json)
    }

    fn export_object(&self, container: &Container, on_path: &mut HashSet<NodeId>) -> TypeResult<Json> {
        let mut map = Map::new();
        for (key, v) in container.iter() {
            if matches!(v, Value::Undefined | Value::Function(_)) {
                continue;
            }
            map.insert(key.to_owned(), self.export_inner(v, on_path)?);
        }
        Ok(Json::Object(map))
    }
}

/// Sequence elements sorted by index, or `None` when the sequence cannot be
/// written as an array: a key is not a canonical index, or filling the gaps
/// would take more than [`MAX_SEQUENCE_HOLES`] nulls.
fn array_elements(container: &Container) -> Option<Vec<(usize, &Value)>> {
    let mut elements = container
        .iter()
        .map(|(key, v)| array_index(key).map(|i| (i, v)))
        .collect::<Option<Vec<_>>>()?;
    elements.sort_by_key(|(i, _)| *i);

    let len = match elements.last() {
        Some((i, _)) => i.checked_add(1)?,
        None => 0,
    };
    (len - elements.len() <= MAX_SEQUENCE_HOLES).then_some(elements)
}

fn array_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

fn number_to_json(n: f64) -> Json {
    const I64_RANGE: std::ops::Range<f64> = -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;
    if n.fract() == 0.0 && I64_RANGE.contains(&n) {
        return Json::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(Json::Null, Json::Number)
}
