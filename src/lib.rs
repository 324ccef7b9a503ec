//! # listprompt - Interactive Fuzzy List Prompts
//!
//! A terminal prompt that shows a scrollable, fuzzy-searchable list of items, lets the
//! user pick one and runs pluggable handlers on it.
//!
//! ## Features
//!
//! - **Fuzzy Search**: Smart-case ranking with highlighted match positions
//! - **Streaming Lists**: Items can arrive from a live stream while the prompt is shown
//! - **Key Bindings**: Letter keys bound to handlers, listed in a help overlay
//! - **Reload**: Handlers can refresh the items without losing cursor or query
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`list`] - In-memory and stream-backed lists with cursor and search
//! - [`input`] - Key decoding and the reader thread
//! - [`render`] - Frame composition and the inline terminal screen
//! - [`config`] - Prompt options
//! - [`app`] - The prompt itself and its event loop

// Core modules
pub mod config;
pub mod error;
pub mod list;

// Subsystems
pub mod input;
pub mod render;

// Prompt core
pub mod app;

// Re-export commonly used types for convenience
pub use error::{PromptError, Result};

// Public API surface for external usage
pub use app::{selected, Control, KeyOutcome, Mode, Prompt, PromptState, StopHandle};
pub use config::Options;
pub use input::{InputEvent, Key, KeySource};
pub use list::{Item, List, Listing, Progress, StreamList};
pub use render::{Screen, Theme};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
