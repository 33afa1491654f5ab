//! Agent Chat GUI Library
//!
//! View-state core of the agent chat window: catalog, selection state
//! machine, conversation log and panel layout. The egui front end is in
//! `src/main.rs`.

pub mod config;
pub mod error;
/// Application state management
///
/// Catalog store, selection state, conversation log and layout.
pub mod state;
