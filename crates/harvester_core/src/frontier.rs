use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct FrontierState<T> {
    pending: VecDeque<T>,
    in_flight: usize,
}

impl<T> FrontierState<T> {
    fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.in_flight == 0
    }
}

/// Shared queue of pending work plus a count of claimed-but-unfinished items.
///
/// All transitions happen under one lock, so "drained" (nothing pending and
/// nothing in flight) is observed atomically. Waiters are woken through a
/// condition variable rather than by polling.
#[derive(Debug)]
pub struct Frontier<T> {
    state: Mutex<FrontierState<T>>,
    changed: Condvar,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState {
                pending: VecDeque::new(),
                in_flight: 0,
            }),
            changed: Condvar::new(),
        }
    }

    pub fn push(&self, item: T) {
        let mut state = self.lock();
        state.pending.push_back(item);
        drop(state);
        // Claimers and the drain waiter share the condvar.
        self.changed.notify_all();
    }

    pub fn extend<I: IntoIterator<Item = T>>(&self, items: I) {
        let mut state = self.lock();
        state.pending.extend(items);
        drop(state);
        self.changed.notify_all();
    }

    /// Takes the next pending item, blocking while the queue is empty but
    /// other items are still in flight. Returns `None` once drained.
    ///
    /// The returned claim keeps the item in flight until it is dropped.
    pub fn claim(&self) -> Option<Claim<'_, T>> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.pending.pop_front() {
                state.in_flight += 1;
                return Some(Claim {
                    frontier: self,
                    item,
                });
            }
            if state.in_flight == 0 {
                return None;
            }
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until nothing is pending and nothing is in flight.
    pub fn wait_drained(&self) {
        let state = self.lock();
        let _state = self
            .changed
            .wait_while(state, |state| !state.is_drained())
            .unwrap_or_else(PoisonError::into_inner);
    }

    pub fn is_drained(&self) -> bool {
        self.lock().is_drained()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    fn complete(&self) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        drop(state);
        self.changed.notify_all();
    }

    // A worker panicking mid-item must not wedge the others.
    fn lock(&self) -> MutexGuard<'_, FrontierState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Frontier<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let frontier = Self::new();
        frontier.extend(iter);
        frontier
    }
}

/// An item taken from a [`Frontier`]; marks it complete when dropped,
/// including during unwinding.
#[derive(Debug)]
pub struct Claim<'a, T> {
    frontier: &'a Frontier<T>,
    item: T,
}

impl<T> Claim<'_, T> {
    pub fn item(&self) -> &T {
        &self.item
    }
}

impl<T> Deref for Claim<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T> Drop for Claim<'_, T> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}
