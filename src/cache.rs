//! Cache coherency for read-only leave views.
//!
//! After a ledger mutation, views that display balances or pending counts
//! must know to refetch. [`LeaveCache`] keeps a per-employee version number
//! and a subscriber list in process-local state; it is owned by the
//! application root and passed by reference to the components that need it,
//! never a module-level global. The state is not durable and resets on
//! restart, which affects only client-side staleness, never ledger
//! correctness.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

/// A callback invoked with the employee id whose views went stale.
pub type CacheListener = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct CacheInner {
    versions: HashMap<String, u64>,
    subscribers: HashMap<u64, CacheListener>,
    next_subscriber_id: u64,
}

/// Process-wide invalidation and version broadcaster.
///
/// # Example
///
/// ```
/// use leave_engine::cache::LeaveCache;
///
/// let cache = LeaveCache::new();
/// assert_eq!(cache.version("emp_001"), 0);
/// cache.invalidate("emp_001");
/// assert_eq!(cache.version("emp_001"), 1);
/// ```
#[derive(Clone, Default)]
pub struct LeaveCache {
    inner: Arc<Mutex<CacheInner>>,
}

/// Handle returned by [`LeaveCache::subscribe`]; dropping it does nothing,
/// unsubscribing is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

impl LeaveCache {
    /// Creates an empty cache with every employee at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current version for an employee. Employees never
    /// invalidated report version 0.
    pub fn version(&self, employee_id: &str) -> u64 {
        match self.inner.lock() {
            Ok(inner) => inner.versions.get(employee_id).copied().unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// Bumps the employee's version and notifies every subscriber.
    ///
    /// Versions only ever increase, so a reader holding an old version can
    /// always detect staleness by comparing.
    pub fn invalidate(&self, employee_id: &str) {
        let Ok(mut inner) = self.inner.lock() else {
            warn!(employee_id, "Cache lock poisoned, skipping invalidation");
            return;
        };
        let version = inner.versions.entry(employee_id.to_string()).or_insert(0);
        *version += 1;
        // Notify under the lock: subscriber callbacks are expected to be
        // cheap flag-setters, not long-running work.
        for listener in inner.subscribers.values() {
            listener(employee_id);
        }
    }

    /// Registers a listener for invalidations. Returns a handle for
    /// [`unsubscribe`](LeaveCache::unsubscribe).
    pub fn subscribe(&self, listener: CacheListener) -> Subscription {
        let Ok(mut inner) = self.inner.lock() else {
            warn!("Cache lock poisoned, subscription dropped");
            return Subscription(u64::MAX);
        };
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.insert(id, listener);
        Subscription(id)
    }

    /// Removes a previously registered listener. Unknown handles are
    /// ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.subscribers.remove(&subscription.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_versions_start_at_zero() {
        let cache = LeaveCache::new();
        assert_eq!(cache.version("emp_001"), 0);
    }

    #[test]
    fn test_invalidate_increments_monotonically() {
        let cache = LeaveCache::new();
        cache.invalidate("emp_001");
        cache.invalidate("emp_001");
        cache.invalidate("emp_001");
        assert_eq!(cache.version("emp_001"), 3);
        assert_eq!(cache.version("emp_002"), 0);
    }

    #[test]
    fn test_versions_are_per_employee() {
        let cache = LeaveCache::new();
        cache.invalidate("emp_001");
        cache.invalidate("emp_002");
        cache.invalidate("emp_002");
        assert_eq!(cache.version("emp_001"), 1);
        assert_eq!(cache.version("emp_002"), 2);
    }

    #[test]
    fn test_subscribers_are_notified() {
        let cache = LeaveCache::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        cache.subscribe(Box::new(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        }));

        cache.invalidate("emp_001");
        cache.invalidate("emp_002");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let cache = LeaveCache::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let subscription = cache.subscribe(Box::new(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        }));

        cache.invalidate("emp_001");
        cache.unsubscribe(subscription);
        cache.invalidate("emp_001");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_receives_employee_id() {
        let cache = LeaveCache::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        cache.subscribe(Box::new(move |employee_id| {
            seen_clone.lock().unwrap().push(employee_id.to_string());
        }));

        cache.invalidate("emp_007");
        assert_eq!(seen.lock().unwrap().as_slice(), ["emp_007"]);
    }

    #[test]
    fn test_cache_clones_share_state() {
        let cache = LeaveCache::new();
        let clone = cache.clone();
        clone.invalidate("emp_001");
        assert_eq!(cache.version("emp_001"), 1);
    }
}
