//! Memoization backing singleton bindings.

use crate::error::{ContainerError, Result};
use crate::instance::Instance;

use dashmap::DashMap;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

static NEXT_MEMOIZER_ID: AtomicU64 = AtomicU64::new(1);

// Initializations in progress across every memoizer in the process. A
// thread only blocks on a cell after checking that the wait would not close
// a cycle through the threads already waiting.
static PENDING: Lazy<Pending> = Lazy::new(Pending::default);

type CellKey = (u64, String);

#[derive(Default)]
struct Pending {
  state: Mutex<PendingState>,
  finished: Condvar,
}

#[derive(Default)]
struct PendingState {
  owners: HashMap<CellKey, ThreadId>,
  waiting: HashMap<ThreadId, CellKey>,
}

impl PendingState {
  /// Follows owner and waiter links from `key`. Returns the keys on the
  /// path if it leads back to `me`.
  fn cycle_through(&self, key: &CellKey, me: ThreadId) -> Option<Vec<String>> {
    let mut walked = vec![key.1.clone()];
    let mut current = key;

    for _ in 0..=self.owners.len() {
      let owner = self.owners.get(current)?;
      if *owner == me {
        let mut chain = Vec::with_capacity(walked.len() + 1);
        chain.push(current.1.clone());
        chain.extend(walked);
        return Some(chain);
      }
      current = self.waiting.get(owner)?;
      walked.push(current.1.clone());
    }
    None
  }
}

// Held by the thread running an initializer.
struct Claim {
  key: CellKey,
}

impl Drop for Claim {
  fn drop(&mut self) {
    PENDING.state.lock().owners.remove(&self.key);
    PENDING.finished.notify_all();
  }
}

enum Slot {
  Ready(Instance),
  Claimed(Claim),
}

/// Caches the first successful result per key.
///
/// Failures are not cached; a later call retries the initializer. A thread
/// that would wait on an initialization which is itself waiting on this
/// thread gets `CircularDependency` instead of blocking.
pub(crate) struct Memoizer {
  id: u64,
  cells: DashMap<String, Arc<OnceCell<Instance>>>,
}

impl Default for Memoizer {
  fn default() -> Self {
    Self {
      id: NEXT_MEMOIZER_ID.fetch_add(1, Ordering::Relaxed),
      cells: DashMap::new(),
    }
  }
}

impl Memoizer {
  pub(crate) fn get_or_try_init(
    &self,
    key: &str,
    init: impl FnOnce() -> Result<Instance>,
  ) -> Result<Instance> {
    // Clone the cell out so the initializer can re-enter the container
    // without holding a shard lock.
    let cell = self
      .cells
      .entry(key.to_owned())
      .or_insert_with(|| Arc::new(OnceCell::new()))
      .clone();

    if let Some(value) = cell.get() {
      return Ok(value.clone());
    }

    match self.claim(key, &cell)? {
      Slot::Ready(value) => Ok(value),
      Slot::Claimed(_claim) => {
        let value = init()?;
        Ok(cell.get_or_init(|| value).clone())
      }
    }
  }

  fn claim(&self, key: &str, cell: &OnceCell<Instance>) -> Result<Slot> {
    let me = thread::current().id();
    let pending_key = (self.id, key.to_owned());
    let mut state = PENDING.state.lock();

    loop {
      if let Some(value) = cell.get() {
        return Ok(Slot::Ready(value.clone()));
      }
      if !state.owners.contains_key(&pending_key) {
        state.owners.insert(pending_key.clone(), me);
        return Ok(Slot::Claimed(Claim { key: pending_key }));
      }
      if let Some(chain) = state.cycle_through(&pending_key, me) {
        return Err(ContainerError::CircularDependency { chain });
      }

      state.waiting.insert(me, pending_key.clone());
      PENDING.finished.wait(&mut state);
      state.waiting.remove(&me);
    }
  }

  /// Drops the cached value for `key` so the next call initializes anew.
  pub(crate) fn forget(&self, key: &str) {
    self.cells.remove(key);
  }

  #[cfg(test)]
  pub(crate) fn contains(&self, key: &str) -> bool {
    self.cells.get(key).is_some_and(|cell| cell.value().get().is_some())
  }
}
