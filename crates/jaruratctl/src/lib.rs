//! Jarurat Care control library - API client and output rendering.

pub mod client;
pub mod display;

pub use client::{ApiClient, DEFAULT_SERVER};
