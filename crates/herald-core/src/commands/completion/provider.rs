//! Tab-completion answers

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

use super::cache::{CompletionCache, CompletionCandidate, CompletionKey};
use crate::commands::permission::PermissionGuard;
use crate::commands::registry::Registry;
use crate::config::CompletionCacheConfig;
use crate::sender::CommandSender;

/// Answers completion queries from the registry
#[derive(Debug)]
pub struct CompletionProvider {
    registry: Arc<Registry>,
    cache: CompletionCache,
}

impl CompletionProvider {
    pub fn new(registry: Arc<Registry>, config: CompletionCacheConfig) -> Self {
        Self {
            registry,
            cache: CompletionCache::new(config),
        }
    }

    /// Suggestions for the token being typed after `root`
    ///
    /// A custom completer for the root gets the query as-is. Otherwise only
    /// the first argument position is completed, with the sub-command heads
    /// under `root` the sender may use.
    pub fn complete(&self, sender: &dyn CommandSender, root: &str, args: &[String]) -> Vec<String> {
        let root_key = root.trim().to_lowercase();
        if root_key.is_empty() {
            return Vec::new();
        }

        if let Some(completer) = self.registry.completer(&root_key) {
            let result = panic::catch_unwind(AssertUnwindSafe(|| completer(sender, root, args)));
            return result.unwrap_or_else(|_| {
                error!(root = %root_key, sender = sender.name(), "custom completer panicked");
                Vec::new()
            });
        }

        if args.len() > 1 {
            return Vec::new();
        }
        let partial = args.first().map(String::as_str).unwrap_or_default();

        let generation = self.registry.generation();
        let key = CompletionKey::new(&root_key, partial);
        let candidates = match self.cache.get(&key, generation) {
            Some(cached) => cached,
            None => {
                let candidates = self.candidates(&root_key, partial);
                self.cache.insert(key, candidates.clone(), generation);
                candidates
            }
        };

        // The cache holds every candidate; permission is checked per query
        let heads: BTreeSet<String> = candidates
            .into_iter()
            .filter(|candidate| {
                PermissionGuard::check_node(sender, &candidate.permission).is_allowed()
            })
            .map(|candidate| candidate.head)
            .collect();
        heads.into_iter().collect()
    }

    /// Every sub-command head under `root` matching `partial`, unfiltered
    fn candidates(&self, root: &str, partial: &str) -> Vec<CompletionCandidate> {
        let partial = partial.to_lowercase();
        self.registry
            .entries_under(root)
            .iter()
            .filter_map(|entry| {
                let head = entry.path.sub_head()?;
                head.starts_with(&partial)
                    .then(|| CompletionCandidate::new(head, entry.descriptor.permission.clone()))
            })
            .collect()
    }

    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }
}
