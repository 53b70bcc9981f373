// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Named lock registry for serializing remote mutations.
//!
//! The DNS Services API is not assumed safe under concurrent mutation of the
//! same custom resolver's secondary zone set, so Create, Update and Delete
//! serialize on a lock named after the parent resolver. The registry is an
//! injected service owned by the caller's composition root rather than a
//! process-wide global, and the guard it hands out releases on drop, i.e. on
//! every exit path including early error returns.
//!
//! Locks for distinct keys never contend; mutations against different
//! resolvers proceed fully in parallel.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pdns_secondary_zones::locks::LockRegistry;
//!
//! # async fn example() {
//! let locks = Arc::new(LockRegistry::new());
//! let guard = locks.acquire("instance-1resolver-1").await;
//! // ... issue the remote mutation ...
//! drop(guard);
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Table of named async mutexes, keyed by arbitrary strings.
///
/// Lock entries are created lazily on first acquisition and kept for the
/// lifetime of the registry; the key space here is bounded by the set of
/// `(instance, resolver)` pairs under management.
#[derive(Debug, Default)]
pub struct LockRegistry {
    entries: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Exclusive ownership of a named lock.
///
/// The lock is released when the guard is dropped.
#[derive(Debug)]
pub struct LockGuard {
    key: String,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        debug!(key = %self.key, "released named lock");
    }
}

impl LockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire exclusive ownership of the lock named `key`, waiting if
    /// another holder currently owns it.
    pub async fn acquire(&self, key: &str) -> LockGuard {
        let entry = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let guard = entry.lock_owned().await;
        debug!(key = %key, "acquired named lock");
        LockGuard {
            key: key.to_string(),
            _guard: guard,
        }
    }
}
