/// Tag flavor identifiers
use std::fmt;

/// Identifier of a tag flavor (e.g. `id3v1`, `id3v2`)
///
/// Opaque to the object model; only the engine interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlavorId(String);

impl FlavorId {
    /// Create a new flavor ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlavorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FlavorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FlavorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for FlavorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a tag was acquired from its file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOrigin {
    /// The engine's default tag for the file
    Default,
    /// A tag of an explicitly requested flavor
    Flavor(FlavorId),
}

impl TagOrigin {
    /// The requested flavor, if any
    pub fn flavor(&self) -> Option<&FlavorId> {
        match self {
            Self::Default => None,
            Self::Flavor(id) => Some(id),
        }
    }
}

impl fmt::Display for TagOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "<default>"),
            Self::Flavor(id) => write!(f, "'{}'", id),
        }
    }
}
