//! Correlates the projections aggregate fields add to a query with the
//! fields that read them back.
//!
//! The alias is derived from the field's position in the response: the
//! chain of response keys from the root down to the field. Two field
//! occurrences in one response always differ in at least one key, so their
//! aliases differ too. List positions are not part of the alias; every
//! element of a list is produced by the same query projection.

use uuid::Uuid;

/// Longest alias used verbatim. PostgreSQL truncates identifiers at 63
/// bytes.
const MAX_ALIAS_LEN: usize = 60;

/// Position of a field occurrence in a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResponsePath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A response key: the field's alias if it has one, its name otherwise
    Key(String),

    /// An element of a list
    Index(usize),
}

impl ResponsePath {
    pub fn root() -> ResponsePath {
        ResponsePath::default()
    }

    /// The path of the child response key `key`.
    pub fn key(&self, key: impl Into<String>) -> ResponsePath {
        let mut ret = self.clone();
        ret.segments.push(PathSegment::Key(key.into()));
        ret
    }

    /// The path of list element `index`.
    pub fn index(&self, index: usize) -> ResponsePath {
        let mut ret = self.clone();
        ret.segments.push(PathSegment::Index(index));
        ret
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

/// The projection alias for the field occurrence at `path`.
///
/// Short paths made of plain names map to `@key1@key2...`. Anything else
/// maps to `__` followed by a name-based UUID of the length-prefixed keys.
pub fn safe_alias(path: &ResponsePath) -> String {
    let direct: String = path.keys().flat_map(|key| ["@", key]).collect();

    if direct.len() <= MAX_ALIAS_LEN && path.keys().all(is_plain_key) {
        return direct;
    }

    let mut encoded = String::new();
    for key in path.keys() {
        encoded.push_str(&key.len().to_string());
        encoded.push(':');
        encoded.push_str(key);
    }

    let hash = Uuid::new_v5(&Uuid::NAMESPACE_OID, encoded.as_bytes());
    format!("__{}", hash.simple())
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
