//! Input reader thread.
//!
//! A dedicated OS thread performs the blocking reads and forwards keys into a bounded
//! channel. The prompt holds the gate while it dispatches and redraws so that no new
//! read is issued in the meantime, and raises shutdown when its loop ends.

use crate::error::Result;
use crate::input::raw::{InputEvent, Key, KeySource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::{Sender, UnboundedSender};

/// Pause between checks while the gate is held.
const HOLD_BACKOFF: Duration = Duration::from_millis(10);

/// Flags shared between the prompt loop and the reader thread.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    hold: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend new reads until [`InputGate::release`].
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
    }

    pub fn is_held(&self) -> bool {
        self.hold.load(Ordering::SeqCst)
    }

    /// Ask the reader thread to exit after its current poll.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Spawn the reader thread.
///
/// Keys and read failures go to `keys`; resize notifications go to `resizes`. The thread
/// exits on shutdown, after forwarding a read failure, or once the prompt drops its
/// receivers.
pub fn spawn_input_thread(
    mut source: Box<dyn KeySource>,
    keys: Sender<Result<Key>>,
    resizes: UnboundedSender<()>,
    gate: InputGate,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !gate.is_shut_down() {
            if gate.is_held() {
                thread::sleep(HOLD_BACKOFF);
                continue;
            }

            match source.next_event(poll_interval) {
                Ok(Some(InputEvent::Key(key))) => {
                    if keys.blocking_send(Ok(key)).is_err() {
                        return;
                    }
                }
                Ok(Some(InputEvent::Resize)) => {
                    if resizes.send(()).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::debug!("input thread stopping after read error: {err}");
                    let _ = keys.blocking_send(Err(err));
                    return;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use std::collections::VecDeque;
    use tokio::sync::mpsc;

    struct Script(VecDeque<Result<Option<InputEvent>>>);

    impl KeySource for Script {
        fn next_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
            match self.0.pop_front() {
                Some(event) => event,
                None => {
                    thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    fn script(events: Vec<Result<Option<InputEvent>>>) -> Box<dyn KeySource> {
        Box::new(Script(events.into()))
    }

    #[test]
    fn forwards_keys_and_resizes() {
        let (key_tx, mut key_rx) = mpsc::channel(4);
        let (resize_tx, mut resize_rx) = mpsc::unbounded_channel();
        let gate = InputGate::new();
        let source = script(vec![
            Ok(Some(InputEvent::Key(Key::Char('a')))),
            Ok(None),
            Ok(Some(InputEvent::Resize)),
            Ok(Some(InputEvent::Key(Key::Enter))),
        ]);

        let handle = spawn_input_thread(
            source,
            key_tx,
            resize_tx,
            gate.clone(),
            Duration::from_millis(5),
        );

        assert_eq!(key_rx.blocking_recv().unwrap().unwrap(), Key::Char('a'));
        assert_eq!(resize_rx.blocking_recv(), Some(()));
        assert_eq!(key_rx.blocking_recv().unwrap().unwrap(), Key::Enter);

        gate.shutdown();
        handle.join().unwrap();
    }

    #[test]
    fn read_errors_end_the_thread() {
        let (key_tx, mut key_rx) = mpsc::channel(4);
        let (resize_tx, _resize_rx) = mpsc::unbounded_channel();
        let source = script(vec![Err(PromptError::input("tty closed"))]);

        let handle = spawn_input_thread(
            source,
            key_tx,
            resize_tx,
            InputGate::new(),
            Duration::from_millis(5),
        );

        assert!(matches!(
            key_rx.blocking_recv(),
            Some(Err(PromptError::Input { .. }))
        ));
        handle.join().unwrap();
        assert!(key_rx.blocking_recv().is_none());
    }

    #[test]
    fn held_gate_suspends_reads() {
        let (key_tx, mut key_rx) = mpsc::channel(4);
        let (resize_tx, _resize_rx) = mpsc::unbounded_channel();
        let gate = InputGate::new();
        gate.hold();

        let handle = spawn_input_thread(
            script(vec![Ok(Some(InputEvent::Key(Key::Char('q'))))]),
            key_tx,
            resize_tx,
            gate.clone(),
            Duration::from_millis(5),
        );

        thread::sleep(Duration::from_millis(40));
        assert!(key_rx.try_recv().is_err());

        gate.release();
        assert_eq!(key_rx.blocking_recv().unwrap().unwrap(), Key::Char('q'));

        gate.shutdown();
        handle.join().unwrap();
    }
}
