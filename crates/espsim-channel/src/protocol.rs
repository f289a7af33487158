//! Text frame protocol for the echo channel.
//!
//! Frames are colon-delimited `command:value` records. Only the first two
//! segments are meaningful: a value that itself contains a colon is
//! truncated at it, matching the device firmware's parser.

/// A parsed text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCommand<'a> {
    /// Command token, everything before the first colon.
    pub command: &'a str,
    /// Argument value, the segment between the first and second colon.
    pub value: Option<&'a str>,
}

impl<'a> TextCommand<'a> {
    /// Parse a text frame payload.
    #[must_use]
    pub fn parse(payload: &'a str) -> Self {
        let mut segments = payload.split(':');
        let command = segments.next().unwrap_or_default();
        let value = segments.next();
        Self { command, value }
    }

    /// Reply for this command.
    ///
    /// `ping` answers `pong` whatever the value; any other command is
    /// acknowledged by name.
    #[must_use]
    pub fn reply(&self) -> String {
        if self.command == "ping" {
            "pong".to_owned()
        } else {
            format!("I've received your '{}' message", self.command)
        }
    }
}
