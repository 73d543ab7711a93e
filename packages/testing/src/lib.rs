#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for tests in this workspace.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Runs a test body on a helper thread and panics if it does not finish in time.
///
/// A multi-threaded test of a synchronization-heavy component tends to hang
/// rather than fail when the code under test is wrong. The watchdog converts
/// such hangs into ordinary test failures so the suite never wedges a build
/// machine.
///
/// The deadline is 10 seconds normally and 60 seconds under Miri, where
/// thread synchronization is dramatically slower.
///
/// # Panics
///
/// Panics if the test body exceeds the deadline.
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// let result = with_watchdog(|| 2 + 2);
/// assert_eq!(result, 4);
/// ```
pub fn with_watchdog<F, R>(body: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let deadline = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    let (result_tx, result_rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        // If the send fails, the watchdog has already given up on us.
        drop(result_tx.send(body()));
    });

    match result_rx.recv_timeout(deadline) {
        Ok(result) => {
            worker
                .join()
                .expect("test body cannot panic after reporting its result");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => panic!(
            "test body exceeded the {}s watchdog deadline",
            deadline.as_secs()
        ),
        Err(mpsc::RecvTimeoutError::Disconnected) => match worker.join() {
            Ok(()) => panic!("test body dropped its result channel without reporting a result"),
            Err(payload) => std::panic::resume_unwind(payload),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_the_result_through() {
        let result = with_watchdog(|| "hello watchdog");

        assert_eq!(result, "hello watchdog");
    }

    #[test]
    #[should_panic]
    fn propagates_panics_from_the_body() {
        with_watchdog(|| panic!("intentional"));
    }
}
