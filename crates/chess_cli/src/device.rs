//! A search device whose output has already been captured as text.

use std::io::{self, Read};

use chess_rules::{MoveSearch, SearchRequest};
use tracing::debug;

/// Reads the device's whole reply from `reader` on the first request.
pub struct CapturedOutput<R> {
    reader: R,
}

impl<R: Read> CapturedOutput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> MoveSearch for CapturedOutput<R> {
    type Error = io::Error;

    fn search(&mut self, request: &SearchRequest) -> Result<String, Self::Error> {
        debug!(command = %request.command_line(), think_time = ?request.think_time, "reading captured reply");
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        Ok(text)
    }
}
