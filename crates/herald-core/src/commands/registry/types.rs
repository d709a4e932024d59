//! Registry types and core implementation

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use super::host::{CommandHost, RootClaim};
use crate::commands::types::{CommandDescriptor, CommandPath, HandlerBinding};
use crate::error::RegistrationError;
use crate::sender::CommandSender;

/// Custom per-root completer: `(sender, label, args) -> suggestions`
pub type Completer = Arc<dyn Fn(&dyn CommandSender, &str, &[String]) -> Vec<String> + Send + Sync>;

/// Routing state of a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootState {
    /// The host routes this root to the engine
    Claimed,
    /// Registered, but the host never declared the root
    Unreachable,
}

/// Identifier grouping registrations for bulk removal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One registered command
#[derive(Debug)]
pub struct CommandEntry {
    /// Normalized path (also the registry key)
    pub path: CommandPath,
    /// Descriptor with its path normalized
    pub descriptor: CommandDescriptor,
    /// The handler
    pub binding: HandlerBinding,
    /// Owner the command was registered under, if any
    pub owner: Option<OwnerId>,
}

/// Concurrent command registry
///
/// Write-rare, read-often: every map is a sharded [`DashMap`], so lookups
/// never wait on a global lock. Entries are handed out as `Arc`s and
/// handlers never run while a shard is locked.
pub struct Registry {
    /// Registered commands by normalized path
    entries: DashMap<String, Arc<CommandEntry>>,
    /// Roots seen so far and whether the host accepted them
    roots: DashMap<String, RootState>,
    /// Paths registered per owner
    owners: DashMap<OwnerId, BTreeSet<String>>,
    /// Custom completers by root
    completers: DashMap<String, Completer>,
    /// Host receiving root claims
    host: Arc<dyn CommandHost>,
    /// Bumped on every mutation of `entries`
    generation: AtomicU64,
}

impl Registry {
    /// Create an empty registry claiming roots from `host`
    pub fn new(host: Arc<dyn CommandHost>) -> Self {
        Self {
            entries: DashMap::new(),
            roots: DashMap::new(),
            owners: DashMap::new(),
            completers: DashMap::new(),
            host,
            generation: AtomicU64::new(0),
        }
    }

    /// Register a command
    pub fn register(
        &self,
        descriptor: CommandDescriptor,
        binding: HandlerBinding,
    ) -> Result<(), RegistrationError> {
        self.insert(None, descriptor, binding)
    }

    /// Register a command and record it under `owner`
    pub fn register_owned(
        &self,
        owner: impl Into<OwnerId>,
        descriptor: CommandDescriptor,
        binding: HandlerBinding,
    ) -> Result<(), RegistrationError> {
        self.insert(Some(owner.into()), descriptor, binding)
    }

    pub(super) fn insert(
        &self,
        owner: Option<OwnerId>,
        mut descriptor: CommandDescriptor,
        binding: HandlerBinding,
    ) -> Result<(), RegistrationError> {
        let path = CommandPath::parse(&descriptor.path)?;

        if let HandlerBinding::Method(method) = &binding {
            method
                .signature()
                .validate()
                .map_err(|reason| RegistrationError::invalid_signature(path.as_str(), reason))?;
        }

        descriptor.path = path.to_string();
        let key = path.to_string();
        let root = path.root().to_string();
        let entry = Arc::new(CommandEntry {
            path,
            descriptor,
            binding,
            owner: owner.clone(),
        });

        // Routable before resolvable
        self.claim_root(&root);

        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => return Err(RegistrationError::duplicate_path(key)),
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
        self.generation.fetch_add(1, Ordering::AcqRel);

        if let Some(owner) = owner {
            self.owners.entry(owner).or_default().insert(key.clone());
        }

        debug!(path = %key, "registered command");
        Ok(())
    }

    fn claim_root(&self, root: &str) {
        if self.roots.contains_key(root) {
            return;
        }
        // The shard stays locked while the host answers, so each root is
        // claimed exactly once.
        self.roots
            .entry(root.to_string())
            .or_insert_with(|| match self.host.claim_root(root) {
                RootClaim::Claimed => {
                    info!(root, "claimed command root");
                    RootState::Claimed
                }
                RootClaim::Undeclared => {
                    warn!(
                        root,
                        "command root is not declared by the host; its commands are registered but unreachable"
                    );
                    RootState::Unreachable
                }
            });
    }

    /// Remove one command; returns whether it existed
    pub fn unregister(&self, path: &str) -> bool {
        let Ok(path) = CommandPath::parse(path) else {
            return false;
        };
        let Some((key, entry)) = self.entries.remove(path.as_str()) else {
            return false;
        };
        self.generation.fetch_add(1, Ordering::AcqRel);

        if let Some(owner) = &entry.owner {
            let now_empty = self
                .owners
                .get_mut(owner)
                .map(|mut paths| {
                    paths.remove(&key);
                    paths.is_empty()
                })
                .unwrap_or(false);
            if now_empty {
                self.owners.remove_if(owner, |_, paths| paths.is_empty());
            }
        }

        debug!(path = %key, "unregistered command");
        true
    }

    /// Remove every command registered under `owner`; returns how many
    pub fn unregister_owner(&self, owner: &OwnerId) -> usize {
        let Some((_, paths)) = self.owners.remove(owner) else {
            return 0;
        };

        let mut removed = 0;
        for path in paths {
            let owned = self
                .entries
                .remove_if(&path, |_, entry| entry.owner.as_ref() == Some(owner));
            if owned.is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.generation.fetch_add(1, Ordering::AcqRel);
        }

        debug!(%owner, removed, "unregistered owner commands");
        removed
    }

    /// Exact lookup by an already-normalized key
    pub fn lookup_exact(&self, key: &str) -> Option<Arc<CommandEntry>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Lookup by a raw path, normalizing it first
    pub fn get(&self, path: &str) -> Option<Arc<CommandEntry>> {
        let path = CommandPath::parse(path).ok()?;
        self.lookup_exact(path.as_str())
    }

    /// Check if a command exists
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Every command whose root is `root` (lower-cased), sorted by path
    pub fn entries_under(&self, root: &str) -> Vec<Arc<CommandEntry>> {
        let mut entries: Vec<Arc<CommandEntry>> = self
            .entries
            .iter()
            .filter(|e| e.value().path.is_under(root))
            .map(|e| Arc::clone(e.value()))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Routing state of a root, if any command was ever registered under it
    pub fn root_state(&self, root: &str) -> Option<RootState> {
        self.roots.get(&root.to_lowercase()).map(|state| *state)
    }

    /// Whether the host routes `root` to this registry
    pub fn is_routable(&self, root: &str) -> bool {
        self.root_state(root) == Some(RootState::Claimed)
    }

    /// All known roots with their state, sorted
    pub fn roots(&self) -> Vec<(String, RootState)> {
        let mut roots: Vec<(String, RootState)> = self
            .roots
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        roots.sort_by(|a, b| a.0.cmp(&b.0));
        roots
    }

    /// Paths registered under `owner`, sorted
    pub fn owned_by(&self, owner: &OwnerId) -> Vec<String> {
        self.owners
            .get(owner)
            .map(|paths| paths.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Install a custom completer for `root`, replacing any previous one
    pub fn set_completer<F>(&self, root: &str, completer: F)
    where
        F: Fn(&dyn CommandSender, &str, &[String]) -> Vec<String> + Send + Sync + 'static,
    {
        self.completers
            .insert(root.trim().to_lowercase(), Arc::new(completer));
    }

    pub fn remove_completer(&self, root: &str) -> bool {
        self.completers
            .remove(&root.trim().to_lowercase())
            .is_some()
    }

    /// Custom completer for `root` (lower-cased), if one is installed
    pub fn completer(&self, root: &str) -> Option<Completer> {
        self.completers.get(root).map(|c| Arc::clone(c.value()))
    }

    /// Mutation counter; changes whenever a command is added or removed
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.entries.len())
            .field("roots", &self.roots.len())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}
