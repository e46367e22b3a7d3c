//! Package manifest parsing for export map checks.
//!
//! This module reads `package.json` documents into a typed model that keeps
//! exactly what the export map checks need and nothing else.
//!
//! # Basic Structure
//!
//! ```json
//! {
//!   "type": "module",
//!   "exports": {
//!     ".": { "import": "./index.mjs", "require": "./index.cjs" },
//!     "./utils/*": "./lib/utils/*.js",
//!     "./package.json": "./package.json"
//!   }
//! }
//! ```
//!
//! # Export Map Shapes
//!
//! - **Object**: keyed by subpath, parsed into an [`ExportMap`]
//! - **String**: shorthand for `{ ".": "<string>" }`
//! - **Anything else**: kept as [`Exports::Invalid`] so the validator can
//!   report it instead of the loader failing
//!
//! Entry targets are an [`ExportTarget`]: a single path, an ordered list of
//! conditions, or an unsupported JSON value.
//!
//! # Ordering and Duplicates
//!
//! JSON object order is significant for conditions, and a hand-edited manifest
//! can repeat a key. Both survive parsing: [`ExportMap`] and
//! [`ExportTarget::Conditions`] are ordered vectors filled by custom
//! deserializers, not hash maps.

mod manifest_io;


use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::constants::{DOT_ENTRY, MODULE_TYPE};

/// A parsed package manifest.
///
/// Only the fields that influence export map checks are kept. The directory
/// the manifest was loaded from is recorded so that targets can be resolved
/// against it.
///
/// A top-level key that appears more than once keeps its last value, the way
/// `JSON.parse` reads it.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Package name, when present and a string.
    pub name: Option<String>,

    /// Package version, when present and a string.
    pub version: Option<String>,

    /// The `type` field. `"module"` makes `.js` files ES modules.
    pub package_type: Option<String>,

    /// The `exports` field. `None` when absent or `null`.
    pub exports: Option<Exports>,

    /// Directory containing the manifest file.
    pub manifest_dir: Option<PathBuf>,
}

impl Manifest {
    /// Create an empty manifest with no `exports` field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the export map.
    #[must_use]
    pub fn with_exports(mut self, exports: ExportMap) -> Self {
        self.exports = Some(Exports::Map(exports));
        self
    }

    /// Set the `type` field.
    #[must_use]
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// Whether `.js` files in this package are ES modules.
    pub fn is_module(&self) -> bool {
        self.package_type.as_deref() == Some(MODULE_TYPE)
    }

    /// Whether the manifest declares an `exports` field at all.
    pub fn has_exports(&self) -> bool {
        self.exports.is_some()
    }
}

/// Keep a field's value only when it is a string.
fn string_field(key: &str, value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => {
            tracing::warn!(field = key, value = %other, "ignoring non-string manifest field");
            None
        }
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a package manifest object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut manifest = Manifest::default();
        let mut seen = HashSet::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => manifest.name = string_field(&key, map.next_value()?),
                "version" => manifest.version = string_field(&key, map.next_value()?),
                "type" => manifest.package_type = string_field(&key, map.next_value()?),
                "exports" => manifest.exports = map.next_value::<Option<Exports>>()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            }

            if !seen.insert(key.clone()) {
                tracing::warn!(field = %key, "manifest repeats a top-level field, the last value is used");
            }
        }

        Ok(manifest)
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// Kind of a JSON value, used to describe shapes the checks cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// Any number
    Number,
    /// A string
    String,
    /// An array
    Array,
    /// An object
    Object,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "a boolean",
            JsonKind::Number => "a number",
            JsonKind::String => "a string",
            JsonKind::Array => "an array",
            JsonKind::Object => "an object",
        };
        f.write_str(name)
    }
}

/// The top-level `exports` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Exports {
    /// An object keyed by subpath, or the string shorthand normalized to one.
    Map(ExportMap),
    /// A value of a shape that cannot declare subpaths.
    Invalid(JsonKind),
}

impl Exports {
    /// The export map, if the field has a usable shape.
    pub fn as_map(&self) -> Option<&ExportMap> {
        match self {
            Exports::Map(map) => Some(map),
            Exports::Invalid(_) => None,
        }
    }
}

/// One `subpath -> target` pair of an export map.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEntry {
    /// The subpath specifier, e.g. `"."` or `"./utils/*"`.
    pub key: String,
    /// What the subpath maps to.
    pub target: ExportTarget,
}

/// An export map in declaration order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportMap {
    entries: Vec<ExportEntry>,
}

impl ExportMap {
    /// Create an empty export map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Existing entries with the same key are kept.
    pub fn push(&mut self, key: impl Into<String>, target: ExportTarget) {
        self.entries.push(ExportEntry {
            key: key.into(),
            target,
        });
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, target: ExportTarget) -> Self {
        self.push(key, target);
        self
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ExportEntry] {
        &self.entries
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExportEntry> {
        self.entries.iter()
    }

    /// First target declared for `key`.
    pub fn get(&self, key: &str) -> Option<&ExportTarget> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.target)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExportMap {
    type Item = &'a ExportEntry;
    type IntoIter = std::slice::Iter<'a, ExportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A named condition inside a conditional target.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Condition name, e.g. `"import"`, `"require"`, `"default"`.
    pub name: String,
    /// Target selected by this condition.
    pub target: ExportTarget,
}

/// What an export entry, or one of its conditions, points at.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// A single relative path.
    Path(String),
    /// Condition name to target, in declaration order.
    Conditions(Vec<Condition>),
    /// A JSON value that is neither a string nor an object.
    Unsupported(JsonKind),
}

impl ExportTarget {
    /// A path target.
    pub fn path(path: impl Into<String>) -> Self {
        ExportTarget::Path(path.into())
    }

    /// A conditional target from `(name, target)` pairs, order preserved.
    pub fn conditions<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = (S, ExportTarget)>,
        S: Into<String>,
    {
        ExportTarget::Conditions(
            conditions
                .into_iter()
                .map(|(name, target)| Condition {
                    name: name.into(),
                    target,
                })
                .collect(),
        )
    }

    /// The path, if this is a path target.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            ExportTarget::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Condition names in declaration order, or `None` for non-conditional targets.
    pub fn condition_names(&self) -> Option<Vec<&str>> {
        match self {
            ExportTarget::Conditions(conditions) => {
                Some(conditions.iter().map(|c| c.name.as_str()).collect())
            }
            _ => None,
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::Path(path) => f.write_str(path),
            ExportTarget::Conditions(conditions) => {
                let names: Vec<&str> = conditions.iter().map(|c| c.name.as_str()).collect();
                write!(f, "{{ {} }}", names.join(", "))
            }
            ExportTarget::Unsupported(kind) => write!(f, "{kind}"),
        }
    }
}

struct TargetVisitor;

impl<'de> Visitor<'de> for TargetVisitor {
    type Value = ExportTarget;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an export target")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ExportTarget::Path(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ExportTarget::Path(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut conditions = Vec::new();
        while let Some((name, target)) = map.next_entry::<String, ExportTarget>()? {
            conditions.push(Condition {
                name,
                target,
            });
        }
        Ok(ExportTarget::Conditions(conditions))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ExportTarget::Unsupported(JsonKind::Array))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Null))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Boolean))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Number))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Number))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(ExportTarget::Unsupported(JsonKind::Number))
    }
}

impl<'de> Deserialize<'de> for ExportTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TargetVisitor)
    }
}

struct ExportsVisitor;

impl<'de> Visitor<'de> for ExportsVisitor {
    type Value = Exports;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an export map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut exports = ExportMap::new();
        while let Some((key, target)) = map.next_entry::<String, ExportTarget>()? {
            exports.push(key, target);
        }
        Ok(Exports::Map(exports))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Exports::Map(ExportMap::new().entry(DOT_ENTRY, ExportTarget::path(v))))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Exports::Invalid(JsonKind::Array))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(Exports::Invalid(JsonKind::Boolean))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(Exports::Invalid(JsonKind::Number))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(Exports::Invalid(JsonKind::Number))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(Exports::Invalid(JsonKind::Number))
    }
}

impl<'de> Deserialize<'de> for Exports {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExportsVisitor)
    }
}
