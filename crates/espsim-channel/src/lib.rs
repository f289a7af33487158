//! Realtime echo channel for the device web simulator.
//!
//! Provides:
//! - Text frame protocol (`command:value` records)
//! - WebSocket echo loop, one task per accepted channel

pub mod protocol;
pub mod websocket;

pub use protocol::TextCommand;
pub use websocket::run_channel;
