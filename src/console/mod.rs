//! Serial command console
//!
//! Blocking reader loop on its own thread.
//! Zero heap allocation - all static buffers.

pub mod dispatcher;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod reader;

pub use dispatcher::{Dispatcher, SCAN_COMPLETE};
pub use error::CommandError;
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, Command};
pub use reader::SerialReader;
