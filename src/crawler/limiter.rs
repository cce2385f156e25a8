//! Bounded-concurrency task execution
//!
//! A generic executor that runs one task per input item while never holding
//! more than a fixed number of tasks in flight, built on a counting
//! semaphore. Permits are acquired in the submission loop, before each task
//! is spawned, so items *start* in input order; completion order is
//! unspecified.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs `task` over every item with at most `limit` tasks in flight
///
/// A `limit` below 1 is clamped to 1. The call returns only once every task
/// has completed. The limiter does not interpret task outcomes: task bodies
/// are expected to be infallible and to capture their own failures in the
/// value they return.
///
/// # Arguments
///
/// * `items` - Inputs, one task each, started in this order
/// * `limit` - Maximum number of concurrently running tasks
/// * `task` - Task constructor invoked once per item
///
/// # Returns
///
/// The collected task outputs; callers must not rely on any ordering.
pub async fn run_bounded<T, F, Fut, R>(items: Vec<T>, limit: usize, task: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let limit = limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        // Acquire before spawning so the start order is the input order.
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let future = task(item);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            future.await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!("bounded task aborted: {}", e);
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[tokio::test]
    async fn test_all_items_complete() {
        let results = run_bounded(vec![1, 2, 3, 4, 5], 2, |n| async move { n * 10 }).await;

        let mut sorted = results.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![10, 20, 30, 40, 50]);
    }

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let current = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..20).collect();
        let limit = 3;

        let current_outer = current.clone();
        let max_outer = max_seen.clone();
        run_bounded(items, limit, move |_| {
            let current = current_outer.clone();
            let max_seen = max_outer.clone();
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert!(max_seen.load(Ordering::SeqCst) <= limit);
        assert_eq!(current.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_limit_zero_clamped_to_one() {
        let results = run_bounded(vec![1, 2, 3], 0, |n| async move { n }).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_above_input_behaves_fully_parallel() {
        let current = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let current_outer = current.clone();
        let max_outer = max_seen.clone();
        run_bounded((0..4).collect(), 100, move |_| {
            let current = current_outer.clone();
            let max_seen = max_outer.clone();
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        // With a generous limit and a long task body, the whole batch
        // overlaps.
        assert_eq!(max_seen.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_starts_in_input_order() {
        let started = Arc::new(Mutex::new(Vec::new()));

        let started_outer = started.clone();
        run_bounded(vec!["a", "b", "c", "d"], 1, move |name| {
            let started = started_outer.clone();
            async move {
                started.lock().unwrap().push(name);
            }
        })
        .await;

        assert_eq!(*started.lock().unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<u32> = run_bounded(Vec::<u32>::new(), 4, |n| async move { n }).await;
        assert!(results.is_empty());
    }
}
