//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "signal> ";

/// Redisplay the prompt after printing an event
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
