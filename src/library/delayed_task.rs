use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Pending {
    generation: u64,
    cancel: Sender<()>,
}

/// A single cancellable deferred task.
///
/// At most one task is pending at a time: `schedule` replaces whatever was
/// pending. Once `cancel` returns, the cancelled task is guaranteed not to run.
/// A task that has already started running is not interrupted.
#[derive(Clone, Default)]
pub struct DelayedTask {
    pending: Arc<Mutex<Option<Pending>>>,
    generation: Arc<AtomicU64>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (cancel_sender, cancel_receiver) = channel();

        {
            let mut slot = lock(&self.pending);
            if let Some(previous) = slot.take() {
                let _ = previous.cancel.send(());
            }
            *slot = Some(Pending {
                generation,
                cancel: cancel_sender,
            });
        }

        let pending = Arc::clone(&self.pending);
        std::thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancel_receiver.recv_timeout(delay) {
                let fire = {
                    let mut slot = lock(&pending);
                    match slot.as_ref() {
                        Some(current) if current.generation == generation => {
                            *slot = None;
                            true
                        }
                        _ => false,
                    }
                };

                if fire {
                    task();
                }
            }
        });
    }

    /// Returns whether a pending task was cancelled.
    pub fn cancel(&self) -> bool {
        match lock(&self.pending).take() {
            Some(pending) => {
                let _ = pending.cancel.send(());
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_fires_after_delay() {
        let task = DelayedTask::new();
        let (tx, rx) = channel();

        task.schedule(Duration::from_millis(20), move || {
            tx.send("fired").unwrap();
        });

        assert!(task.is_pending());
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok("fired"));
        assert!(!task.is_pending());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let task = DelayedTask::new();
        let (tx, rx) = channel::<()>();

        task.schedule(Duration::from_millis(50), move || {
            tx.send(()).unwrap();
        });

        assert!(task.cancel());
        assert!(!task.is_pending());
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }

    #[test]
    fn test_cancel_without_pending() {
        let task = DelayedTask::new();

        assert!(!task.cancel());
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let task = DelayedTask::new();
        let (tx, rx) = channel();
        let first = tx.clone();

        task.schedule(Duration::from_millis(100), move || {
            first.send("first").unwrap();
        });
        task.schedule(Duration::from_millis(10), move || {
            tx.send("second").unwrap();
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok("second"));
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}
