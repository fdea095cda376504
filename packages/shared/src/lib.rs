//! Utilities shared by the Tsunagi server and client.

pub mod logger;
pub mod time;
