//! The render/dispatch loop.
//!
//! One reader thread feeds keys into a bounded queue. The loop waits, in priority order,
//! for a stop request, the next key, a terminal resize or list population progress. Keys
//! are dispatched with the input gate held so that handlers running external commands
//! never see stale input or a concurrent redraw.

use super::{Control, KeyOutcome, Mode, Prompt};
use crate::error::{PromptError, Result};
use crate::input::{spawn_input_thread, CrosstermKeys, InputGate, Key, KeySource};
use crate::list::{Item, Progress};
use crate::render::{Screen, TerminalScreen};
use parking_lot::Mutex;
use ratatui::text::Line;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver};

/// Capacity of the key queue between the reader thread and the loop.
pub const EVENT_QUEUE_CAPACITY: usize = 20;

/// How long the reader blocks before re-checking its gate.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Rows reserved for the info panel in the terminal viewport.
const INFO_ROWS: usize = 6;

/// What the loop does after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

impl<T: Item> Prompt<T> {
    /// Run the prompt until it is stopped, interrupted or a handler fails.
    ///
    /// The terminal is restored on every exit path; the exit message is only printed
    /// when the loop ended without an error.
    pub async fn run(&mut self) -> Result<()> {
        let screen = self.screen_handle();
        let keys = self
            .keys
            .take()
            .unwrap_or_else(|| Box::new(CrosstermKeys::new()) as Box<dyn KeySource>);

        screen.lock().enter()?;

        let gate = InputGate::new();
        let (key_tx, mut key_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let (resize_tx, mut resize_rx) = mpsc::unbounded_channel();
        // the reader exits on its own once the gate is shut down
        let _reader = spawn_input_thread(keys, key_tx, resize_tx, gate.clone(), POLL_INTERVAL);

        let outcome = self
            .main_loop(&screen, &gate, &mut key_rx, &mut resize_rx)
            .await;
        gate.shutdown();

        let farewell = if outcome.is_ok() {
            std::mem::take(&mut self.exit_message)
        } else {
            Vec::new()
        };
        let left = screen.lock().leave(&farewell);

        outcome?;
        left
    }

    fn screen_handle(&mut self) -> Arc<Mutex<Box<dyn Screen>>> {
        let height = self.screen_height();
        let screen = self.screen.get_or_insert_with(|| {
            let screen: Box<dyn Screen> = Box::new(TerminalScreen::new(height));
            Arc::new(Mutex::new(screen))
        });
        Arc::clone(screen)
    }

    fn screen_height(&self) -> u16 {
        let list_rows = self.list.size() + 2 + INFO_ROWS;
        let help_rows = self.controls().len() + 2;
        u16::try_from(list_rows.max(help_rows)).unwrap_or(u16::MAX)
    }

    async fn main_loop(
        &mut self,
        screen: &Mutex<Box<dyn Screen>>,
        gate: &InputGate,
        keys: &mut Receiver<Result<Key>>,
        resizes: &mut UnboundedReceiver<()>,
    ) -> Result<()> {
        let stop = self.stop.notifier();
        let mut progress = self.list.take_progress();
        self.render(screen)?;

        loop {
            tokio::select! {
                biased;

                _ = stop.notified() => break,
                event = keys.recv() => {
                    let key = match event {
                        Some(Ok(key)) => key,
                        Some(Err(err)) => return Err(err),
                        None => return Err(PromptError::input("key reader stopped")),
                    };

                    gate.hold();
                    if self.dispatch(key)? == Flow::Stop {
                        break;
                    }
                    if let Some(rx) = self.list.take_progress() {
                        progress = Some(rx);
                    }
                    self.render(screen)?;
                    gate.release();
                }
                Some(()) = resizes.recv() => self.render(screen)?,
                update = next_progress(&mut progress) => match update {
                    Some(update) => {
                        log::debug!("list progress: {update:?}");
                        self.render(screen)?;
                    }
                    None => progress = None,
                },
            }
        }

        screen.lock().clear()
    }

    fn render(&self, screen: &Mutex<Box<dyn Screen>>) -> Result<()> {
        let frame = self.frame();
        screen.lock().draw(&frame)
    }

    /// Apply one key to the prompt.
    fn dispatch(&mut self, key: Key) -> Result<Flow> {
        if key == Key::Interrupt {
            return Ok(Flow::Stop);
        }

        if self.mode == Mode::Help {
            self.mode = Mode::Normal;
            return Ok(Flow::Continue);
        }

        if key == Key::Enter {
            return self.on_select();
        }

        self.on_key(key)
    }

    fn on_select(&mut self) -> Result<Flow> {
        let Some(item) = self.list.selection() else {
            return Ok(Flow::Continue);
        };

        let mut control = Control::new();
        match self.selection_handler.as_mut() {
            Some(handler) => {
                call_handler(|| handler(&*item, &mut control))
                    .map_err(PromptError::from_handler)?
            }
            None => {
                control.set_exit_message(vec![Line::from(item.text())]);
                control.stop();
            }
        }
        self.apply(control)
    }

    fn on_key(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Up => self.list.prev(),
            Key::Down => self.list.next(),
            Key::Left | Key::PageDown => self.list.page_down(),
            Key::Right | Key::PageUp => self.list.page_up(),
            Key::Char('/') => self.toggle_search(),
            _ if self.mode == Mode::Search => self.edit_query(key),
            _ => return self.on_normal_key(key),
        }
        Ok(Flow::Continue)
    }

    fn toggle_search(&mut self) {
        self.mode = match self.mode {
            Mode::Search => Mode::Normal,
            _ => Mode::Search,
        };
        log::debug!("mode changed to {:?}", self.mode);
    }

    fn edit_query(&mut self, key: Key) {
        match key {
            Key::Backspace => {
                self.query.pop();
            }
            Key::ClearLine => self.query.clear(),
            Key::Esc => {
                self.mode = Mode::Normal;
                self.query.clear();
                self.list.cancel_search();
                return;
            }
            Key::Char(ch) => self.query.push(ch),
            _ => return,
        }
        self.list.search(&self.query);
    }

    fn on_normal_key(&mut self, key: Key) -> Result<Flow> {
        if key == Key::Char('?') {
            self.mode = Mode::Help;
            return Ok(Flow::Continue);
        }

        if let Some(handler) = self.key_handler.as_mut() {
            let selection = self.list.selection();
            let mut control = Control::new();
            let outcome = call_handler(|| handler(key, selection.as_deref(), &mut control))
                .map_err(PromptError::from_handler)?;
            let flow = self.apply(control)?;
            if outcome == KeyOutcome::Handled || flow == Flow::Stop {
                return Ok(flow);
            }
        }

        if self.options.vim_keys {
            match key {
                Key::Char('k') => self.list.prev(),
                Key::Char('j') => self.list.next(),
                Key::Char('h') => self.list.page_down(),
                Key::Char('l') => self.list.page_up(),
                _ => return self.on_binding(key),
            }
            return Ok(Flow::Continue);
        }

        self.on_binding(key)
    }

    fn on_binding(&mut self, key: Key) -> Result<Flow> {
        let Key::Char(ch) = key else {
            return Ok(Flow::Continue);
        };
        let Some(item) = self.list.selection() else {
            return Ok(Flow::Continue);
        };
        let Some(binding) = self.bindings.iter_mut().find(|binding| binding.key == ch) else {
            return Ok(Flow::Continue);
        };

        let mut control = Control::new();
        call_handler(|| (binding.handler)(&*item, &mut control))
            .map_err(PromptError::from_handler)?;
        self.apply(control)
    }

    /// Carry out what a handler asked for.
    fn apply(&mut self, mut control: Control) -> Result<Flow> {
        if let Some(lines) = control.take_exit_message() {
            self.exit_message = lines;
        }
        if control.reload_requested() && !self.reload_list()? {
            return Ok(Flow::Stop);
        }
        if control.stop_requested() {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }
}

/// Run a user hook. On a multi-threaded runtime the worker's other tasks are handed to
/// another thread for the duration of the call, so hooks may block.
pub(super) fn call_handler<R>(call: impl FnOnce() -> R) -> R {
    match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(call),
        _ => call(),
    }
}

async fn next_progress(progress: &mut Option<UnboundedReceiver<Progress>>) -> Option<Progress> {
    match progress {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
