//! Robust I/O: unbuffered full transfers and the buffered read handle.

pub mod buffer;
pub mod line;
pub mod stream;
pub mod unbuffered;

pub use buffer::RioBuffer;
pub use line::{Line, LineEnd};
pub use stream::RioStream;
pub use unbuffered::{readn, writen};

/// Default internal buffer size of a [`RioStream`].
pub const RIO_BUFSIZE: usize = 8192;

/// Line delimiter recognised by the line reader.
pub const NEWLINE: u8 = b'\n';
