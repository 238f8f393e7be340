//! Bounded concurrent fan-out

use std::future::Future;

use futures::future::join_all;
use tokio::sync::Semaphore;

/// Default number of concurrent calls in one fan-out
pub const DEFAULT_FANOUT_LIMIT: usize = 4;

/// Run `task` once per item with at most `limit` calls in flight.
///
/// Waits for every call before returning. Outputs are in input order,
/// independent of completion order. A limit of 0 is treated as 1.
pub async fn bounded<I, F, Fut>(items: I, limit: usize, task: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future,
{
    let semaphore = Semaphore::new(limit.max(1));
    let semaphore = &semaphore;
    let task = &task;

    join_all(items.into_iter().map(|item| async move {
        // the semaphore is never closed
        let _permit = semaphore.acquire().await.ok();
        task(item).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_limit_caps_in_flight_calls() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let outputs = bounded(0..10u64, 3, |i| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10 * (10 - i))).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i * 2
            }
        })
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(outputs, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_zero_limit_still_progresses() {
        let outputs = bounded(["a", "b"], 0, |s| async move { s.len() }).await;
        assert_eq!(outputs, vec![1, 1]);
    }
}
