use dashmap::DashMap;
use folio_model::ProjectID;
use std::{fmt, hash::Hash, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key async mutexes.
///
/// Callers holding the same key run one after another in arrival order;
/// different keys never contend. Entries are dropped once no guard or
/// waiter references them.
pub struct KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Clone for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }
}

impl<K> fmt::Debug for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedLocks")
            .field("held", &self.inner.len())
            .finish()
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: K) -> KeyedLockGuard<K> {
        let lock = self.inner.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;

        KeyedLockGuard {
            key,
            guard: Some(guard),
            locks: Arc::clone(&self.inner),
        }
    }

    /// Number of keys currently locked or awaited.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Serializes media syncs of one project.
pub type ProjectLocks = KeyedLocks<ProjectID>;

pub struct KeyedLockGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> fmt::Debug for KeyedLockGuard<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedLockGuard")
            .field("key", &self.key)
            .finish()
    }
}

impl<K> Drop for KeyedLockGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map's own reference left: nobody holds or awaits the key.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn same_key_is_serialized() {
        let locks = KeyedLocks::<u32>::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = locks.acquire(7).await;
        let waiter = {
            let locks = locks.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(7).await;
                tx.send("second").unwrap();
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send("first").unwrap();
        drop(first);
        waiter.await.unwrap();

        assert_eq!(rx.recv().await, Some("first"));
        assert_eq!(rx.recv().await, Some("second"));
    }

    #[tokio::test]
    async fn distinct_keys_do_not_block() {
        let locks = KeyedLocks::<u32>::new();
        let _a = locks.acquire(1).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2))
            .await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_keys_are_forgotten() {
        let locks = KeyedLocks::<u32>::new();
        {
            let _guard = locks.acquire(3).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }
}
