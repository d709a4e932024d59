//! Host-side contract for root claims

use parking_lot::Mutex;
use std::collections::{BTreeSet, HashSet};

/// Host answer to a root claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootClaim {
    /// The host routes this root to the engine from now on
    Claimed,
    /// The host never declared this root; it cannot be routed
    Undeclared,
}

/// The embedding application that owns the real command entry points
///
/// The registry calls [`CommandHost::claim_root`] exactly once per root, the
/// first time a command under it is registered. Implementations must not
/// call back into the registry from this method.
#[cfg_attr(test, mockall::automock)]
pub trait CommandHost: Send + Sync {
    fn claim_root(&self, root: &str) -> RootClaim;
}

/// Host that accepts every root
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenHost;

impl CommandHost for OpenHost {
    fn claim_root(&self, _root: &str) -> RootClaim {
        RootClaim::Claimed
    }
}

/// Host with a fixed manifest of pre-declared roots
#[derive(Debug, Default)]
pub struct ManifestHost {
    declared: HashSet<String>,
    claimed: Mutex<BTreeSet<String>>,
}

impl ManifestHost {
    /// Create a host declaring the given roots (case-insensitive)
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            declared: roots
                .into_iter()
                .map(|root| root.as_ref().trim().to_lowercase())
                .filter(|root| !root.is_empty())
                .collect(),
            claimed: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn is_declared(&self, root: &str) -> bool {
        self.declared.contains(&root.to_lowercase())
    }

    /// Roots the engine has claimed so far, sorted
    pub fn claimed(&self) -> Vec<String> {
        self.claimed.lock().iter().cloned().collect()
    }
}

impl CommandHost for ManifestHost {
    fn claim_root(&self, root: &str) -> RootClaim {
        if self.is_declared(root) {
            self.claimed.lock().insert(root.to_lowercase());
            RootClaim::Claimed
        } else {
            RootClaim::Undeclared
        }
    }
}
