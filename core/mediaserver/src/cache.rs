//! Single-slot TTL cache shared by the library name lookups and the
//! library statistics snapshot.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

struct Slot<T> {
    value: Option<Arc<T>>,
    /// Time of the last refresh attempt, successful or not
    stamped_at: Option<Instant>,
}

impl<T> Slot<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stamped_at.is_some_and(|at| at.elapsed() < ttl)
    }
}

/// Holds one value and refreshes it at most once per TTL window.
///
/// Readers share a read lock while the value is fresh. Expired readers
/// queue on the write lock and re-check freshness once they hold it, so a
/// burst of concurrent callers triggers a single refresh.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Slot<T>>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(Slot {
                value: None,
                stamped_at: None,
            }),
        }
    }

    /// Return the cached value, calling `fetch` when the TTL has passed.
    ///
    /// A failed refresh still stamps the slot and keeps the previous value,
    /// which is returned instead of the error. `Ok(None)` means the last
    /// refresh failed inside the current window and nothing was ever cached.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<Option<Arc<T>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        {
            let slot = self.slot.read().await;
            if slot.is_fresh(self.ttl) {
                return Ok(slot.value.clone());
            }
        }

        let mut slot = self.slot.write().await;
        if slot.is_fresh(self.ttl) {
            return Ok(slot.value.clone());
        }

        let result = fetch().await;
        slot.stamped_at = Some(Instant::now());

        match result {
            Ok(value) => {
                let value = Arc::new(value);
                slot.value = Some(Arc::clone(&value));
                Ok(Some(value))
            }
            Err(e) => match &slot.value {
                Some(previous) => {
                    tracing::warn!("Cache refresh failed, keeping previous value: {}", e);
                    Ok(Some(Arc::clone(previous)))
                }
                None => Err(e),
            },
        }
    }
}
