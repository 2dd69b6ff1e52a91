use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::Serialize;

/// One step of a traversal through a JSON document.
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum PathElement {
    /// A named field of a fixed-schema object.
    Key(String),
    /// An array position. The comparator only ever descends into `[0]`.
    Index(usize),
    /// The sampled value of a lookup table, rendered as `.<value>`.
    MapValue,
}

/// Location of the comparator inside both documents, e.g. `.levels[0].px`.
///
/// The root path is empty and renders as an empty string.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Path(Vec<PathElement>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => write!(f, ".{}", key),
            PathElement::Index(idx) => write!(f, "[{}]", idx),
            PathElement::MapValue => f.write_str(".<value>"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|elem| elem.fmt(f))
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Deref for Path {
    type Target = Vec<PathElement>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Path {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(value: Vec<PathElement>) -> Self {
        Self(value)
    }
}
