//! # Structural JSON shape comparison
//!
//! `shapediff` compares the *shape* of two JSON documents returned by two
//! compatible info APIs, ignoring every scalar value. It is used to catch
//! structural drift between a reference exchange API and a reimplementation
//! of it.
//!
//! ## Examples
//!
//! **Compare two lookup tables keyed by coin**
//!
//! ```rust
//! use serde_json::json;
//!
//! let reference = json!({"BTC": "67012.5", "ETH": "3120.4"});
//! let candidate = json!({"SOL": "151.2"});
//!
//! let mut trace: Vec<shapediff::Diagnostic> = Vec::new();
//! assert!(shapediff::compare_shapes(&reference, &candidate, true, &mut trace));
//! ```
//!
//! **Compare two fixed-schema records**
//!
//! ```rust
//! use serde_json::json;
//!
//! let diff = shapediff::ShapeDiffBuilder::default()
//!     .left(json!({"coin": "BTC", "px": "1.0"}))
//!     .right(json!({"coin": "BTC", "price": "1.0"}))
//!     .detect_maps(false)
//!     .build()
//!     .unwrap();
//!
//! let mut trace: Vec<shapediff::Diagnostic> = Vec::new();
//! assert!(!diff.compare(&mut trace));
//! assert_eq!(trace.len(), 1);
//! ```
pub mod client;
pub mod config;
pub mod error;
pub mod path;
pub mod payload;
pub mod report;
pub mod scenario;

use std::fmt;

use derive_builder::Builder;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub use crate::error::Error;
pub use crate::path::{Path, PathElement};

/// Number of leading object keys inspected by the lookup table heuristic.
const SAMPLED_KEYS: usize = 10;

/// Keys at most this long count as identifiers (coin symbols, short ids).
const SHORT_KEY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Null,
    Array,
    #[serde(rename = "boolean")]
    Bool,
    Object,
    String,
    Number,
}

/// A single observation made while walking two documents.
///
/// Mismatch diagnostics explain a `false` outcome, the others record which
/// heuristic was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Values at `path` are of different kinds.
    KindMismatch { path: Path, left: Kind, right: Kind },
    /// Fixed-schema objects at `path` have different key sets.
    KeyMismatch {
        path: Path,
        only_left: Vec<String>,
        only_right: Vec<String>,
    },
    /// The object at `path` was treated as a lookup table and only one of its
    /// values was compared.
    LookupTable { path: Path },
    /// Lookup tables at `path` share no key, so one value was sampled from
    /// each side independently.
    DisjointSample {
        path: Path,
        left_key: String,
        right_key: String,
    },
}

impl Diagnostic {
    pub fn path(&self) -> &Path {
        match self {
            Diagnostic::KindMismatch { path, .. }
            | Diagnostic::KeyMismatch { path, .. }
            | Diagnostic::LookupTable { path }
            | Diagnostic::DisjointSample { path, .. } => path,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Diagnostic::KindMismatch { .. } | Diagnostic::KeyMismatch { .. }
        )
    }
}

/// Receives diagnostics as the comparator produces them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Discards everything.
impl DiagnosticSink for () {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Adapts a callback into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(Diagnostic)> DiagnosticSink for FnSink<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic)
    }
}

/// Forwards diagnostics to `tracing`: mismatches at `WARN`, heuristics at `INFO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_mismatch() {
            warn!(path = %diagnostic.path(), "{}", diagnostic);
        } else {
            info!(path = %diagnostic.path(), "{}", diagnostic);
        }
    }
}

/// Use [`ShapeDiffBuilder`] to build [`ShapeDiff`] first and run [`ShapeDiff::compare`]
/// to find out whether two JSON values share the same shape.
#[derive(Builder, Debug)]
pub struct ShapeDiff {
    /// Document returned by the reference backend.
    left: Value,

    /// Document returned by the backend under test.
    right: Value,

    /// If true, a root object whose leading keys look like identifiers
    /// (coin symbols, `@`-prefixed ids, upper-case names) is compared as a
    /// lookup table: key sets may differ and only one value is sampled.
    #[builder(default = true)]
    detect_maps: bool,

    /// Location the comparison starts from. Lookup table detection only
    /// applies at the root, so a non-root start always compares records.
    #[builder(default)]
    path: Path,
}

impl ShapeDiff {
    /// Compares both documents, reporting every diagnostic into `sink`.
    pub fn compare(&self, sink: &mut dyn DiagnosticSink) -> bool {
        Walker::new(self.path.clone(), self.detect_maps, sink).values(&self.left, &self.right)
    }

    /// Same as [`ShapeDiff::compare`] with diagnostics thrown away.
    pub fn matches(&self) -> bool {
        self.compare(&mut ())
    }
}

/// Compares two documents from the root path.
pub fn compare_shapes(
    left: &Value,
    right: &Value,
    detect_maps: bool,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    Walker::new(Path::root(), detect_maps, sink).values(left, right)
}

struct Walker<'s> {
    curr_path: Path,
    detect_maps: bool,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> Walker<'s> {
    fn new(curr_path: Path, detect_maps: bool, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            curr_path,
            detect_maps,
            sink,
        }
    }

    fn values(&mut self, left: &Value, right: &Value) -> bool {
        use serde_json::Value::{Array, Object};

        match (left, right) {
            (Object(left), Object(right)) => self.objects(left, right),
            (Array(left), Array(right)) => self.arrays(left, right),
            (left, right) => {
                let (left, right) = (Kind::from(left), Kind::from(right));
                if left == right {
                    return true;
                }
                self.sink.report(Diagnostic::KindMismatch {
                    path: self.curr_path.clone(),
                    left,
                    right,
                });
                false
            }
        }
    }

    fn arrays(&mut self, left: &[Value], right: &[Value]) -> bool {
        match (left.first(), right.first()) {
            (Some(left), Some(right)) => {
                self.descend(PathElement::Index(0), |walker| walker.values(left, right))
            }
            _ => true,
        }
    }

    fn objects(&mut self, left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
        if self.detect_maps && self.curr_path.is_root() && looks_like_lookup_table(left) {
            self.lookup_tables(left, right)
        } else {
            self.records(left, right)
        }
    }

    fn lookup_tables(&mut self, left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
        self.sink.report(Diagnostic::LookupTable {
            path: self.curr_path.clone(),
        });

        let shared = left
            .iter()
            .find_map(|(key, left)| right.get(key).map(|right| (left, right)));

        let (left, right) = match shared {
            Some(pair) => pair,
            None => match (left.iter().next(), right.iter().next()) {
                (Some((left_key, left)), Some((right_key, right))) => {
                    self.sink.report(Diagnostic::DisjointSample {
                        path: self.curr_path.clone(),
                        left_key: left_key.clone(),
                        right_key: right_key.clone(),
                    });
                    (left, right)
                }
                // Nothing sampled on one side, nothing to disprove.
                _ => return true,
            },
        };

        self.descend(PathElement::MapValue, |walker| walker.values(left, right))
    }

    fn records(&mut self, left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
        let only_left: Vec<String> = left
            .keys()
            .filter(|key| !right.contains_key(key.as_str()))
            .cloned()
            .collect();
        let only_right: Vec<String> = right
            .keys()
            .filter(|key| !left.contains_key(key.as_str()))
            .cloned()
            .collect();

        if !only_left.is_empty() || !only_right.is_empty() {
            self.sink.report(Diagnostic::KeyMismatch {
                path: self.curr_path.clone(),
                only_left,
                only_right,
            });
            return false;
        }

        left.iter().all(|(key, left)| match right.get(key) {
            Some(right) => {
                self.descend(PathElement::Key(key.clone()), |walker| walker.values(left, right))
            }
            None => false,
        })
    }

    fn descend(&mut self, elem: PathElement, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.curr_path.push(elem);
        let res = f(self);
        self.curr_path.pop();
        res
    }
}

/// Returns true if the leading keys of `map` look like data-dependent
/// identifiers rather than field names of a fixed schema. An empty object
/// qualifies; there is nothing in it to disprove.
fn looks_like_lookup_table(map: &Map<String, Value>) -> bool {
    map.keys().take(SAMPLED_KEYS).all(|key| is_identifier_key(key))
}

/// Length is counted in UTF-16 code units, the way JavaScript clients do.
fn is_identifier_key(key: &str) -> bool {
    key.starts_with('@')
        || key.to_uppercase() == key
        || key.encode_utf16().count() <= SHORT_KEY_LEN
}

impl From<&Value> for Kind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::Bool => "boolean",
            Kind::Object => "object",
            Kind::String => "string",
            Kind::Number => "number",
        })
    }
}

/// Renders a path for humans, naming the root explicitly.
struct At<'a>(&'a Path);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_root() {
            f.write_str("<root>")
        } else {
            self.0.fmt(f)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::KindMismatch { path, left, right } => {
                write!(f, "Type mismatch at {}: {} vs {}", At(path), left, right)
            }
            Diagnostic::KeyMismatch {
                path,
                only_left,
                only_right,
            } => {
                write!(f, "Key mismatch at {}:", At(path))?;
                if !only_left.is_empty() {
                    write!(f, "\n  Only in first: {:?}", only_left)?;
                }
                if !only_right.is_empty() {
                    write!(f, "\n  Only in second: {:?}", only_right)?;
                }
                Ok(())
            }
            Diagnostic::LookupTable { path } => write!(
                f,
                "Detected lookup table at {}, comparing value shapes only",
                At(path)
            ),
            Diagnostic::DisjointSample {
                path,
                left_key,
                right_key,
            } => write!(
                f,
                "No shared keys at {}, comparing {} vs {}",
                At(path),
                left_key,
                right_key
            ),
        }
    }
}
