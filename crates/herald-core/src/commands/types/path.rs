//! Normalized command paths
//!
//! The registry is a flat namespace keyed by the space-joined, lower-cased
//! token sequence. Sub-commands are plain longer keys (`"guild invite"`), so
//! the resolver only needs one exact map probe per prefix length.

use std::fmt;

use crate::error::RegistrationError;

/// A normalized, non-empty command path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandPath(String);

impl CommandPath {
    /// Normalize a raw path: split on whitespace, lower-case, single-space join
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        let normalized = normalize_key(raw.split_whitespace());
        if normalized.is_empty() {
            return Err(RegistrationError::invalid_path(raw));
        }
        Ok(Self(normalized))
    }

    /// Build `parent + " " + name`, or just `name` when `parent` is blank
    pub fn from_parts(parent: &str, name: &str) -> Result<Self, RegistrationError> {
        if name.trim().is_empty() {
            return Err(RegistrationError::invalid_path(format!("{parent} {name}")));
        }
        if parent.trim().is_empty() {
            Self::parse(name)
        } else {
            Self::parse(&format!("{parent} {name}"))
        }
    }

    /// Path of a sub-command under this one
    pub fn child(&self, name: &str) -> Result<Self, RegistrationError> {
        Self::from_parts(&self.0, name)
    }

    /// The normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First token
    pub fn root(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }

    /// The token right after the root, if any
    pub fn sub_head(&self) -> Option<&str> {
        self.0.split(' ').nth(1)
    }

    /// All tokens in order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    /// Number of tokens
    pub fn depth(&self) -> usize {
        self.tokens().count()
    }

    /// Whether the first token equals `root` (already lower-cased)
    pub fn is_under(&self, root: &str) -> bool {
        self.root() == root
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lower-case each token and join with single spaces
pub(crate) fn normalize_key<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut key = String::new();
    for token in tokens {
        if !key.is_empty() {
            key.push(' ');
        }
        key.push_str(&token.to_lowercase());
    }
    key
}
