// SPDX-License-Identifier: GPL-3.0-only
//! Per-connection session state
//!
//! The transport and the sequence counter live behind one mutex, so neither
//! can be touched without holding the guard. An exchange holds the guard
//! from report construction until its last transaction completes.
//!
//! The counter starts at [`INITIAL_COUNTER`] and is never advanced. Every
//! report sent over a connection carries the same value.

use std::sync::{Mutex, MutexGuard};

use crate::error::{EizoError, Result};
use crate::protocols::Transport;

use super::INITIAL_COUNTER;

#[derive(Debug)]
struct Session<T> {
    counter: u16,
    transport: T,
}

/// State owned by one open device connection
#[derive(Debug)]
pub struct SessionState<T> {
    inner: Mutex<Session<T>>,
}

/// Exclusive access to a session, released on drop
pub struct SessionGuard<'a, T> {
    session: MutexGuard<'a, Session<T>>,
}

impl<T: Transport> SessionState<T> {
    /// Take ownership of a freshly opened transport
    pub fn new(transport: T) -> Self {
        Self {
            inner: Mutex::new(Session {
                counter: INITIAL_COUNTER,
                transport,
            }),
        }
    }

    /// Block until no other exchange holds the session
    pub fn acquire(&self) -> Result<SessionGuard<'_, T>> {
        let session = self
            .inner
            .lock()
            .map_err(|e| EizoError::ResourceUnavailable(format!("session lock poisoned: {e}")))?;
        Ok(SessionGuard { session })
    }
}

impl<T: Transport> SessionGuard<'_, T> {
    pub fn current_counter(&self) -> u16 {
        self.session.counter
    }

    pub fn transport(&mut self) -> &mut T {
        &mut self.session.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::mock::MockTransport;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[test]
    fn test_counter_starts_at_one() {
        let state = SessionState::new(MockTransport::new());
        let guard = state.acquire().unwrap();
        assert_eq!(guard.current_counter(), 0x0001);
    }

    #[test]
    fn test_counter_is_a_fixed_constant() {
        let state = SessionState::new(MockTransport::new());
        for _ in 0..10 {
            let guard = state.acquire().unwrap();
            assert_eq!(guard.current_counter(), INITIAL_COUNTER);
        }
    }

    #[test]
    fn test_acquire_is_exclusive() {
        let state = Arc::new(SessionState::new(MockTransport::new()));
        let released = Arc::new(AtomicBool::new(false));

        let guard = state.acquire().unwrap();

        let waiter = {
            let state = Arc::clone(&state);
            let released = Arc::clone(&released);
            std::thread::spawn(move || {
                let _guard = state.acquire().unwrap();
                // Only reachable after the main thread dropped its guard
                released.load(Ordering::SeqCst)
            })
        };

        std::thread::sleep(Duration::from_millis(50));
        released.store(true, Ordering::SeqCst);
        drop(guard);

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_resource_unavailable() {
        let state = Arc::new(SessionState::new(MockTransport::new()));

        let poisoner = Arc::clone(&state);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.acquire().unwrap();
            panic!("transport blew up");
        })
        .join();

        assert!(matches!(
            state.acquire(),
            Err(EizoError::ResourceUnavailable(_))
        ));
    }
}
