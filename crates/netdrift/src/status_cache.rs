use std::collections::HashMap;
use std::sync::Mutex;

/// Cache key: (baseline capture id, snapshot capture id, command).
///
/// Capture ids are immutable and unique per capture, so an entry can never
/// go stale; a re-capture gets a new id and therefore a new key.
type StatusKey = (String, String, String);

/// Memoized has-difference answers for one comparison session.
///
/// Scoped to the session that owns it and discarded with it; never a
/// process-wide singleton. The mutex makes concurrent fills from a parallel
/// batch safe.
#[derive(Debug, Default)]
pub struct DiffStatusCache {
    entries: Mutex<HashMap<StatusKey, bool>>,
}

impl DiffStatusCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a memoized answer
    pub fn get(&self, baseline_id: &str, snapshot_id: &str, command: &str) -> Option<bool> {
        let entries = self.entries.lock().expect("status cache lock poisoned");

        entries
            .get(&key(baseline_id, snapshot_id, command))
            .copied()
    }

    /// Return the memoized answer, computing and storing it on first request.
    ///
    /// The computation runs outside the lock; if two threads race on the same
    /// key the first stored answer wins (both compute the same value from the
    /// same immutable captures).
    pub fn get_or_insert_with<F>(
        &self,
        baseline_id: &str,
        snapshot_id: &str,
        command: &str,
        compute: F,
    ) -> bool
    where
        F: FnOnce() -> bool,
    {
        let key = key(baseline_id, snapshot_id, command);

        {
            let entries = self.entries.lock().expect("status cache lock poisoned");
            if let Some(&cached) = entries.get(&key) {
                return cached;
            }
        }

        let value = compute();

        let mut entries = self.entries.lock().expect("status cache lock poisoned");
        *entries.entry(key).or_insert(value)
    }

    /// Get the number of memoized entries
    pub fn len(&self) -> usize {
        self.entries.lock().expect("status cache lock poisoned").len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(baseline_id: &str, snapshot_id: &str, command: &str) -> StatusKey {
    (
        baseline_id.to_string(),
        snapshot_id.to_string(),
        command.to_string(),
    )
}
