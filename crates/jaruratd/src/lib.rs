//! Jarurat Care daemon library - exposes modules for testing.

pub mod config;
pub mod error;
pub mod intake;
pub mod llm;
pub mod prompts;
pub mod reconciler;
pub mod routes;
pub mod server;
pub mod state;
pub mod triage;
