//! Tab completion
//!
//! Completion reads the same registry the resolver routes through. Default
//! candidates are cached per root and partial token, invalidated by any
//! registry change, and filtered by permission on every query.

mod cache;
mod provider;


pub use cache::{
    CachedCompletion, CompletionCache, CompletionCacheStats, CompletionCandidate, CompletionKey,
};
pub use provider::CompletionProvider;
