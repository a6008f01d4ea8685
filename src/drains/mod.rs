pub mod stdio;
pub mod string;

pub use stdio::StdioDrain;
pub use string::StringDrain;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Final destination of rendered lines. Implementations serialize their
/// own writes, renderers never lock around them.
pub trait Drain: Send + Sync {
    fn write_line(&self, stream: Stream, line: &str);
}
