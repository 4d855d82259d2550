// ============================================================
// Layer 6 — Extractor Timeout Guard
// ============================================================
// A hung model call must not block the whole batch. The guard
// runs each extraction on a short-lived worker thread and waits
// at most `timeout` for the result; past the deadline the call
// counts as ExtractionError::Timeout and the orchestrator moves
// on with an empty answer. The abandoned worker finishes (or not)
// on its own and its result is discarded.
//
// Threads cannot be killed, so abandoned workers are counted. Once
// MAX_STALLED_WORKERS of them are still running, further calls fail
// fast with a Transport error instead of spawning more threads.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use crate::domain::answer::{Answer, ExtractionError};
use crate::domain::traits::AnswerExtractor;

/// Workers allowed to be running at once; all but the current call
/// are ones that already timed out.
const MAX_STALLED_WORKERS: usize = 4;

pub struct TimeoutGuard<E> {
    inner:     Arc<E>,
    timeout:   Duration,
    in_flight: Arc<AtomicUsize>,
}

impl<E> TimeoutGuard<E> {
    pub fn new(inner: E, timeout: Duration) -> Self {
        Self {
            inner:     Arc::new(inner),
            timeout,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Held by a worker thread; releases its slot when the thread ends,
/// including by panic.
struct WorkerSlot(Arc<AtomicUsize>);

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<E> AnswerExtractor for TimeoutGuard<E>
where
    E: AnswerExtractor + Send + Sync + 'static,
{
    fn extract(
        &self,
        question:          &str,
        context:           &str,
        max_answer_length: usize,
    ) -> Result<Answer, ExtractionError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst);
        let slot    = WorkerSlot(Arc::clone(&self.in_flight));
        if running >= MAX_STALLED_WORKERS {
            return Err(ExtractionError::Transport(format!(
                "{running} earlier extractor calls are still running"
            )));
        }

        let (tx, rx) = mpsc::channel();
        let inner    = Arc::clone(&self.inner);
        let question = question.to_string();
        let context  = context.to_string();

        thread::Builder::new()
            .name("qa-extract".into())
            .spawn(move || {
                let _slot = slot;
                // The receiver may be gone after a timeout; nothing to do then
                let _ = tx.send(inner.extract(&question, &context, max_answer_length));
            })
            .map_err(|e| ExtractionError::Transport(format!("cannot spawn extractor thread: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ExtractionError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(ExtractionError::Model("extractor thread panicked".into()))
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Condvar, Mutex};

    struct Sleepy(Duration);

    impl AnswerExtractor for Sleepy {
        fn extract(&self, _: &str, _: &str, _: usize) -> Result<Answer, ExtractionError> {
            thread::sleep(self.0);
            Ok(Answer::new("late but here", Some(1.0)))
        }
    }

    struct Panicky;

    impl AnswerExtractor for Panicky {
        fn extract(&self, _: &str, _: &str, _: usize) -> Result<Answer, ExtractionError> {
            panic!("model crashed");
        }
    }

    #[test]
    fn test_fast_extractor_passes_through() {
        let guard = TimeoutGuard::new(Sleepy(Duration::from_millis(0)), Duration::from_secs(5));
        let a = guard.extract("q", "c", 10).unwrap();
        assert_eq!(a.text, "late but here");
    }

    #[test]
    fn test_slow_extractor_times_out() {
        let guard = TimeoutGuard::new(Sleepy(Duration::from_millis(500)), Duration::from_millis(20));
        let r = guard.extract("q", "c", 10);
        assert!(matches!(r, Err(ExtractionError::Timeout(_))));
    }

    /// Blocks every call until the gate is opened.
    struct Gate(Arc<(Mutex<bool>, Condvar)>);

    impl AnswerExtractor for Gate {
        fn extract(&self, _: &str, _: &str, _: usize) -> Result<Answer, ExtractionError> {
            let (lock, cv) = &*self.0;
            let mut open = lock.lock().unwrap();
            while !*open {
                open = cv.wait(open).unwrap();
            }
            Ok(Answer::new("released", None))
        }
    }

    #[test]
    fn test_stalled_workers_are_capped() {
        let state = Arc::new((Mutex::new(false), Condvar::new()));
        let guard = TimeoutGuard::new(Gate(Arc::clone(&state)), Duration::from_millis(10));

        for _ in 0..MAX_STALLED_WORKERS {
            assert!(matches!(guard.extract("q", "c", 10), Err(ExtractionError::Timeout(_))));
        }
        assert!(matches!(guard.extract("q", "c", 10), Err(ExtractionError::Transport(_))));
        assert_eq!(guard.in_flight.load(Ordering::SeqCst), MAX_STALLED_WORKERS);

        // Release the hung workers; their slots free up as they finish
        *state.0.lock().unwrap() = true;
        state.1.notify_all();
        for _ in 0..200 {
            if guard.in_flight.load(Ordering::SeqCst) == 0 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(guard.in_flight.load(Ordering::SeqCst), 0);

        let guard = TimeoutGuard { timeout: Duration::from_secs(5), ..guard };
        assert_eq!(guard.extract("q", "c", 10).unwrap().text, "released");
    }

    #[test]
    fn test_panicking_extractor_is_a_failure_not_a_crash() {
        let guard = TimeoutGuard::new(Panicky, Duration::from_secs(5));
        assert!(matches!(guard.extract("q", "c", 10), Err(ExtractionError::Model(_))));
    }
}
