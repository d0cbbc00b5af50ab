//! Trailing-edge debounce with one pending slot per key.
//!
//! Scheduling work for a key that already has work pending aborts the
//! pending timer and replaces its value. Only the latest value for a key is
//! ever handed to the handler, once, after the key has been quiet for the
//! full delay.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

type Handler<K, V> = Arc<dyn Fn(K, V) + Send + Sync>;

struct Slot {
    generation: u64,
    timer: JoinHandle<()>,
}

/// Per-key trailing-edge debouncer.
pub struct Debouncer<K, V> {
    delay: Duration,
    slots: Arc<Mutex<HashMap<K, Slot>>>,
    handler: Handler<K, V>,
    next_generation: AtomicU64,
}

impl<K, V> Debouncer<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    pub fn new(delay: Duration, handler: impl Fn(K, V) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            slots: Arc::new(Mutex::new(HashMap::new())),
            handler: Arc::new(handler),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Replace any pending work for `key` with `value` and restart its timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, key: K, value: V) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let slots = Arc::clone(&self.slots);
        let handler = Arc::clone(&self.handler);
        let delay = self.delay;

        // The slot lock is held across spawn + insert so the timer can never
        // observe the map before its own slot is in it.
        let mut guard = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let timer_key = key.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
                match slots.get(&timer_key) {
                    Some(slot) if slot.generation == generation => {
                        slots.remove(&timer_key);
                    }
                    _ => return,
                }
            }
            handler(timer_key, value);
        });

        if let Some(previous) = guard.insert(key, Slot { generation, timer }) {
            previous.timer.abort();
        }
    }

    /// Number of keys with work pending.
    pub fn pending(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop all pending work without running it.
    pub fn cancel_all(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, slot) in slots.drain() {
            slot.timer.abort();
        }
    }
}

impl<K, V> Drop for Debouncer<K, V> {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, slot) in slots.drain() {
            slot.timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<(u32, String)>>>, impl Fn(u32, String) + Send + Sync) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |k, v| sink.lock().unwrap().push((k, v)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_events_coalesce_to_latest() {
        let (calls, handler) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(750), handler);

        for text in ["S", "SEARCH_", "SEARCH_KEYWORDS: [a", "SEARCH_KEYWORDS: [a, b]"] {
            debouncer.schedule(1, text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(1, "SEARCH_KEYWORDS: [a, b]".to_string())]
        );
        assert_eq!(debouncer.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let (calls, handler) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), handler);

        debouncer.schedule(1, "one".to_string());
        debouncer.schedule(2, "two".to_string());
        assert_eq!(debouncer.pending(), 2);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let mut seen = calls.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec![(1, "one".to_string()), (2, "two".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_periods_fire_separately() {
        let (calls, handler) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), handler);

        debouncer.schedule(1, "first".to_string());
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.schedule(1, "second".to_string());
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_drops_pending_work() {
        let (calls, handler) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), handler);

        debouncer.schedule(1, "x".to_string());
        debouncer.cancel_all();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(debouncer.pending(), 0);
    }
}
