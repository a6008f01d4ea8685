use super::{Drain, Stream};
use std::io::Write;

/// Writes lines to the process STDOUT/STDERR.
pub struct StdioDrain {}

impl StdioDrain {
    pub fn new() -> Self {
        Self {}
    }
}

impl Drain for StdioDrain {
    fn write_line(&self, stream: Stream, line: &str) {
        // Write errors (closed pipe) are ignored.
        match stream {
            Stream::Stdout => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                writeln!(lock, "{}", line).ok();
            }
            Stream::Stderr => {
                let stderr = std::io::stderr();
                let mut lock = stderr.lock();
                writeln!(lock, "{}", line).ok();
            }
        }
    }
}
