//! Longest-match resolution
//!
//! Maps `(root, args)` onto the most specific registered command by probing
//! the flat key space from the longest candidate prefix down to the root.

use std::sync::Arc;
use tracing::debug;

use super::registry::{CommandEntry, Registry};
use super::types::normalize_key;

/// Result of resolving one invocation
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The most specific matching command and the arguments after its path
    Matched {
        entry: Arc<CommandEntry>,
        remaining_args: Vec<String>,
    },
    /// Nothing is registered on any prefix of the invocation
    NoMatch,
}

impl Resolution {
    /// The matched entry, if any
    pub fn entry(&self) -> Option<&Arc<CommandEntry>> {
        match self {
            Self::Matched { entry, .. } => Some(entry),
            Self::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

impl Registry {
    /// Resolve `root` plus `args` to the longest registered path
    ///
    /// Tokens are compared lower-cased; `remaining_args` keep the caller's
    /// casing. Registration order has no effect on the result.
    pub fn resolve(&self, root: &str, args: &[String]) -> Resolution {
        let root = root.trim();
        if root.is_empty() {
            return Resolution::NoMatch;
        }

        let tokens: Vec<&str> = std::iter::once(root)
            .chain(args.iter().map(String::as_str))
            .collect();

        for depth in (1..=tokens.len()).rev() {
            let key = normalize_key(tokens[..depth].iter().copied());
            if let Some(entry) = self.lookup_exact(&key) {
                debug!(path = %key, depth, "resolved command");
                return Resolution::Matched {
                    entry,
                    remaining_args: args[depth - 1..].to_vec(),
                };
            }
        }

        Resolution::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::OpenHost;
    use crate::commands::types::{CommandDescriptor, HandlerBinding};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn registry_with(paths: &[&str]) -> Registry {
        let registry = Registry::new(Arc::new(OpenHost));
        for path in paths {
            registry
                .register(
                    CommandDescriptor::new(*path),
                    HandlerBinding::callback(|_sender, _args| Ok(())),
                )
                .unwrap();
        }
        registry
    }

    fn matched(resolution: Resolution) -> (String, Vec<String>) {
        match resolution {
            Resolution::Matched {
                entry,
                remaining_args,
            } => (entry.path.to_string(), remaining_args),
            Resolution::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn test_longest_match_wins() {
        // Sub-command registered before its parent
        let registry = registry_with(&["guild invite", "guild"]);

        let (path, rest) = matched(registry.resolve("guild", &args(&["invite", "Bob"])));
        assert_eq!(path, "guild invite");
        assert_eq!(rest, vec!["Bob"]);

        let (path, rest) = matched(registry.resolve("guild", &args(&["info"])));
        assert_eq!(path, "guild");
        assert_eq!(rest, vec!["info"]);
    }

    #[test]
    fn test_case_insensitive_keeps_arg_casing() {
        let registry = registry_with(&["shop buy"]);

        let (path, rest) = matched(registry.resolve("SHOP", &args(&["Buy", "Diamond", "x2"])));
        assert_eq!(path, "shop buy");
        assert_eq!(rest, vec!["Diamond", "x2"]);
    }

    #[test]
    fn test_root_only() {
        let registry = registry_with(&["warp"]);

        let (path, rest) = matched(registry.resolve("warp", &[]));
        assert_eq!(path, "warp");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_no_match() {
        let registry = registry_with(&["guild invite"]);

        assert!(!registry.resolve("guild", &[]).is_match());
        assert!(!registry.resolve("guild", &args(&["kick"])).is_match());
        assert!(!registry.resolve("shop", &args(&["invite"])).is_match());
        assert!(!registry.resolve("  ", &args(&["invite"])).is_match());
    }

    #[test]
    fn test_deep_path() {
        let registry = registry_with(&["guild", "guild rank", "guild rank set"]);

        let (path, rest) = matched(registry.resolve("Guild", &args(&["RANK", "set", "Bob", "3"])));
        assert_eq!(path, "guild rank set");
        assert_eq!(rest, vec!["Bob", "3"]);
        assert!(registry.resolve("guild", &[]).entry().is_some());
    }
}
