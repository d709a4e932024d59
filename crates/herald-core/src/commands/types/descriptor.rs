//! Command descriptor

/// Immutable metadata for one command or sub-command
///
/// `path` is stored as given and normalized by the registry at
/// registration time, which is also where a blank path is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Space-separated command path, root first
    pub path: String,
    /// Required permission node (empty = public)
    pub permission: String,
    /// One-line description for help listings
    pub description: String,
    /// Usage string for help listings
    pub usage: String,
    /// Run on the worker pool instead of the calling thread
    pub is_async: bool,
}

impl CommandDescriptor {
    /// Create a public, synchronous command descriptor
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            permission: String::new(),
            description: String::new(),
            usage: String::new(),
            is_async: false,
        }
    }

    /// Set the required permission
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set usage
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Mark as asynchronous
    pub fn asynchronous(self) -> Self {
        self.with_async(true)
    }

    /// Set the execution mode
    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    /// Whether any sender may use this command
    pub fn is_public(&self) -> bool {
        self.permission.is_empty()
    }

    /// Usage line shown in listings, falling back to `/<path>`
    pub fn display_usage(&self) -> String {
        if self.usage.is_empty() {
            format!("/{}", self.path)
        } else {
            self.usage.clone()
        }
    }
}
