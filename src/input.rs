//! Input subsystem.
//!
//! [`raw`] decodes terminal events into [`Key`]s; [`service`] runs the reader thread that
//! feeds them to the prompt loop.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use raw::{CrosstermKeys, InputEvent, Key, KeySource};
pub use service::{spawn_input_thread, InputGate};
