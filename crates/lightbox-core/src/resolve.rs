//! Argument normalization for noun references.
//!
//! Callers refer to nouns in four equivalent shapes: the concrete record, an
//! integer id, a numeric string, or a JSON map carrying an `id` key. All four
//! resolve to one canonical id before anything touches the network; any other
//! shape is a fatal argument error naming the call that received it.

use crate::error::{LightboxError, Result};
use crate::nouns::{Album, Field, KeywordCategory};
use serde_json::Value;

/// Nouns that can be referenced by id.
pub trait Identified {
    fn noun_id(&self) -> u64;
    /// Kind name used in error messages, e.g. `"Albums"`.
    fn noun_kind() -> &'static str;
}

impl Identified for Album {
    fn noun_id(&self) -> u64 {
        self.id
    }
    fn noun_kind() -> &'static str {
        "Albums"
    }
}

impl Identified for Field {
    fn noun_id(&self) -> u64 {
        self.id
    }
    fn noun_kind() -> &'static str {
        "Fields"
    }
}

impl Identified for KeywordCategory {
    fn noun_id(&self) -> u64 {
        self.id
    }
    fn noun_kind() -> &'static str {
        "KeywordCategories"
    }
}

/// A reference to a noun in one of the accepted shapes.
#[derive(Debug, Clone)]
pub enum NounRef<T> {
    /// The concrete record.
    Record(T),
    /// A bare integer id.
    Id(u64),
    /// A numeric string; a leading digit run is taken as the id and trailing
    /// noise is discarded (`"12abc"` resolves to 12).
    Text(String),
    /// A JSON map containing an `id` key (number or numeric string).
    Json(Value),
}

impl<T: Identified> NounRef<T> {
    /// Resolve to the canonical id, or fail with an argument error naming
    /// `context` (the operation that received the reference).
    pub fn resolve(&self, context: &str) -> Result<u64> {
        match self {
            NounRef::Record(record) => Ok(record.noun_id()),
            NounRef::Id(id) if *id > 0 => Ok(*id),
            NounRef::Text(text) => leading_id(text)
                .ok_or_else(|| Self::shape_error(context, &format!("{text:?}"))),
            NounRef::Json(value) => value
                .as_object()
                .and_then(|map| map.get("id"))
                .and_then(id_from_json)
                .ok_or_else(|| Self::shape_error(context, &value.to_string())),
            NounRef::Id(id) => Err(Self::shape_error(context, &id.to_string())),
        }
    }

    fn shape_error(context: &str, received: &str) -> LightboxError {
        LightboxError::argument(
            context,
            format!(
                "expected a {kind} record, an integer id, a numeric string, or a map \
                 containing an \"id\" key; instead got => {received}",
                kind = T::noun_kind()
            ),
        )
    }
}

impl<T> From<u64> for NounRef<T> {
    fn from(id: u64) -> Self {
        NounRef::Id(id)
    }
}

impl<T> From<&str> for NounRef<T> {
    fn from(text: &str) -> Self {
        NounRef::Text(text.to_string())
    }
}

impl<T> From<Value> for NounRef<T> {
    fn from(value: Value) -> Self {
        NounRef::Json(value)
    }
}

impl From<Album> for NounRef<Album> {
    fn from(album: Album) -> Self {
        NounRef::Record(album)
    }
}

impl From<Field> for NounRef<Field> {
    fn from(field: Field) -> Self {
        NounRef::Record(field)
    }
}

impl From<KeywordCategory> for NounRef<KeywordCategory> {
    fn from(category: KeywordCategory) -> Self {
        NounRef::Record(category)
    }
}

/// Keyword-category argument: a single reference or a list of them.
/// Downstream always sees a non-empty list.
#[derive(Debug, Clone)]
pub enum CategoryArg {
    One(NounRef<KeywordCategory>),
    Many(Vec<NounRef<KeywordCategory>>),
}

impl CategoryArg {
    /// Flatten into a non-empty list of references.
    pub fn into_refs(self, context: &str) -> Result<Vec<NounRef<KeywordCategory>>> {
        match self {
            CategoryArg::One(r) => Ok(vec![r]),
            CategoryArg::Many(refs) if !refs.is_empty() => Ok(refs),
            CategoryArg::Many(_) => Err(LightboxError::argument(
                context,
                "expected at least one keyword category reference; instead got an empty list",
            )),
        }
    }
}

impl From<NounRef<KeywordCategory>> for CategoryArg {
    fn from(r: NounRef<KeywordCategory>) -> Self {
        CategoryArg::One(r)
    }
}

impl From<u64> for CategoryArg {
    fn from(id: u64) -> Self {
        CategoryArg::One(NounRef::Id(id))
    }
}

impl From<KeywordCategory> for CategoryArg {
    fn from(category: KeywordCategory) -> Self {
        CategoryArg::One(NounRef::Record(category))
    }
}

impl From<Vec<NounRef<KeywordCategory>>> for CategoryArg {
    fn from(refs: Vec<NounRef<KeywordCategory>>) -> Self {
        CategoryArg::Many(refs)
    }
}

impl From<Vec<u64>> for CategoryArg {
    fn from(ids: Vec<u64>) -> Self {
        CategoryArg::Many(ids.into_iter().map(NounRef::Id).collect())
    }
}

/// Parse a leading run of digits as an id; zero and digit-less strings are
/// not valid ids.
fn leading_id(text: &str) -> Option<u64> {
    let digits: &str = {
        let end = text
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(text.len(), |(i, _)| i);
        &text[..end]
    };
    match digits.parse::<u64>() {
        Ok(id) if id > 0 => Some(id),
        _ => None,
    }
}

fn id_from_json(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().filter(|id| *id > 0),
        Value::String(s) => leading_id(s),
        _ => None,
    }
}
