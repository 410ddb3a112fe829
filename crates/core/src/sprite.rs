//! Sprite cache - interns sprite tokens into stable indices.
//!
//! The cache is append-only: an index, once handed out, keeps pointing at the
//! same token for as long as the cache lives. Lookups return the *first* entry
//! equal to the token, so identical tokens registered by different entities
//! share one index. Indices are rendering handles only and must never be used
//! as entity or state identity.

use crate::error::{EngineError, Result};

/// Index of a token inside a [`SpriteCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteIndex(pub u32);

impl SpriteIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Ordered, append-only table of sprite tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteCache {
    tokens: Vec<String>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append `token` and return the index of the new entry.
    ///
    /// Does not deduplicate.
    pub fn register(&mut self, token: impl Into<String>) -> SpriteIndex {
        let index = SpriteIndex(self.tokens.len() as u32);
        self.tokens.push(token.into());
        index
    }

    /// Index of the first entry equal to `token`.
    pub fn lookup(&self, token: &str) -> Result<SpriteIndex> {
        self.tokens
            .iter()
            .position(|t| t == token)
            .map(|i| SpriteIndex(i as u32))
            .ok_or_else(|| EngineError::NotFound {
                token: token.to_string(),
            })
    }

    pub fn get(&self, index: SpriteIndex) -> Option<&str> {
        self.tokens.get(index.as_usize()).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
