//! PaintCritic - HTTP gateway that relays painting critiques from a hosted vision model.
//!
//! Features:
//! - Accepts a base64 image or data URI and forwards it to an OpenAI-compatible
//!   vision chat API (xAI Grok by default)
//! - Keeps the upstream API key on the server
//! - Fixed single-origin CORS policy
//! - Typed JSON error envelope for every failure

pub mod api;
pub mod config;
pub mod critique;
pub mod error;
pub mod http;
pub mod time;
pub mod upstream;
