//! # zonebot
//!
//! Chat console for Cloudflare DNS. An operator pages through zones and records
//! with inline buttons and edits, creates, deletes or proxies records by
//! replying with short text messages.
//!
//! - [`controller::MenuController`] is the per-chat state machine.
//! - [`transport`] holds the chat boundary and its Telegram implementation.
//! - [`screen`] renders every menu; [`callback`] encodes the button payloads.

pub mod app;
pub mod callback;
pub mod config;
pub mod controller;
pub mod screen;
pub mod session;
pub mod transport;
