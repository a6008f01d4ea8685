use super::{Drain, Stream};
use crate::utils::strip_ansi;
use std::sync::{Arc, Mutex};

// Similar to the stdio drain, but keeps every line in memory so it can be
// inspected later. Colors are stripped unless asked otherwise.
#[derive(Clone)]
pub struct StringDrain {
    pub output: Arc<Mutex<Vec<(Stream, String)>>>,
    strip_ansi: bool,
}

impl StringDrain {
    pub fn new() -> Self {
        Self {
            output: Arc::new(Mutex::new(vec![])),
            strip_ansi: true,
        }
    }

    pub fn keep_ansi(mut self) -> Self {
        self.strip_ansi = false;
        self
    }

    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.output.lock().expect("poisoned lock").clone()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.stream(Stream::Stdout)
    }

    pub fn stderr(&self) -> Vec<String> {
        self.stream(Stream::Stderr)
    }

    fn stream(&self, stream: Stream) -> Vec<String> {
        self.output
            .lock()
            .expect("poisoned lock")
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

impl Drain for StringDrain {
    fn write_line(&self, stream: Stream, line: &str) {
        let line = if self.strip_ansi {
            strip_ansi(line)
        } else {
            line.to_string()
        };
        self.output
            .lock()
            .expect("poisoned lock")
            .push((stream, line));
    }
}

/// Every line in write order, STDERR lines marked with `!`.
impl std::fmt::Display for StringDrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self.output.lock().expect("poisoned lock");
        for (stream, line) in lines.iter() {
            let marker = match stream {
                Stream::Stdout => ' ',
                Stream::Stderr => '!',
            };
            writeln!(f, "{} {}", marker, line)?;
        }
        Ok(())
    }
}
