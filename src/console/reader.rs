//! Serial reader: turns the byte stream into command lines
//!
//! Owns the line buffer, applies the framing policy, and hands each
//! completed line to the parser and dispatcher. Over-long input is dropped
//! up to the next terminator and reported once.

use core::fmt::Write;

use log::{error, info, warn};

use super::{parse_line, CommandError, Dispatcher, LineBuffer};
use crate::config::{BridgeConfig, Framing, READ_CHUNK, VERSION};
use crate::transport::{PortWriter, SerialPort, TransportError};
use crate::wireless::WirelessControl;

/// Command loop state
pub struct SerialReader<'a, W> {
    line: LineBuffer,
    framing: Framing,
    echo: bool,
    read_timeout_ms: u32,
    /// Dropping the tail of an over-long line
    discarding: bool,
    dispatcher: Dispatcher<'a, W>,
}

impl<'a, W: WirelessControl> SerialReader<'a, W> {
    pub fn new(dispatcher: Dispatcher<'a, W>, config: &BridgeConfig) -> Self {
        Self {
            line: LineBuffer::new(),
            framing: config.framing,
            echo: config.echo,
            read_timeout_ms: config.read_timeout_ms,
            discarding: false,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<'a, W> {
        &self.dispatcher
    }

    /// Bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.line.len()
    }

    /// Run the command loop forever
    pub fn run<P: SerialPort + ?Sized>(&mut self, port: &mut P) -> ! {
        self.print_banner(&mut PortWriter::new(&mut *port));
        loop {
            if let Err(e) = self.poll(port) {
                error!("{}", e);
            }
        }
    }

    /// One bounded-wait read, then process whatever arrived
    ///
    /// Returns the number of bytes read; 0 is the idle case.
    pub fn poll<P: SerialPort + ?Sized>(&mut self, port: &mut P) -> Result<usize, TransportError> {
        let mut rx = [0u8; READ_CHUNK];
        let n = port.read(&mut rx, self.read_timeout_ms)?;
        if n > 0 {
            self.process_chunk(&rx[..n], &mut PortWriter::new(port));
        }
        Ok(n)
    }

    /// Process one read's worth of bytes
    ///
    /// Returns how many lines were completed (dispatched or rejected).
    pub fn process_chunk(&mut self, chunk: &[u8], out: &mut dyn Write) -> usize {
        match self.framing {
            Framing::Delimited => chunk
                .iter()
                .filter_map(|&b| self.process_byte(b, out))
                .count(),
            Framing::Chunk => self.process_whole(chunk, out).map_or(0, |_| 1),
        }
    }

    /// Process a single input byte (delimited framing)
    ///
    /// Returns Some(result) if a line completed, None if more input needed.
    pub fn process_byte(&mut self, byte: u8, out: &mut dyn Write) -> Option<Result<(), CommandError>> {
        match byte {
            b'\r' | b'\n' => {
                if self.discarding {
                    self.discarding = false;
                    self.line.clear();
                    return None;
                }
                if self.line.is_empty() {
                    return None;
                }
                if self.echo {
                    let _ = writeln!(out);
                }
                Some(self.complete_line(out))
            }

            // Backspace
            0x7F | 0x08 => {
                if !self.discarding && !self.line.is_empty() {
                    self.line.backspace();
                    if self.echo {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                None
            }

            b'\t' | 0x20..=0x7E | 0x80..=0xFF => {
                if self.discarding {
                    return None;
                }
                if self.line.push(byte).is_err() {
                    return Some(self.overflow(true, out));
                }
                if self.echo && byte.is_ascii() {
                    let _ = write!(out, "{}", byte as char);
                }
                None
            }

            _ => None,
        }
    }

    /// Chunk framing: the whole read is one line
    ///
    /// A read that fills the chunk without a terminator is the head of an
    /// over-long input. The reads after it are dropped up to a terminator or
    /// a short read.
    fn process_whole(&mut self, chunk: &[u8], out: &mut dyn Write) -> Option<Result<(), CommandError>> {
        let terminated = matches!(chunk.last(), Some(b'\r' | b'\n'));
        let full = chunk.len() >= READ_CHUNK;

        if self.discarding {
            self.discarding = full && !terminated;
            return None;
        }
        if full && !terminated {
            return Some(self.overflow(true, out));
        }

        let trimmed = chunk.trim_ascii_end();
        if trimmed.is_empty() {
            return None;
        }
        self.line.clear();
        if self.line.extend(trimmed).is_err() {
            return Some(self.overflow(false, out));
        }
        Some(self.complete_line(out))
    }

    /// Drop the buffered line and report it; `discard` skips input up to
    /// the end of the over-long line.
    fn overflow(&mut self, discard: bool, out: &mut dyn Write) -> Result<(), CommandError> {
        warn!("input exceeded {} bytes, line discarded", self.line.capacity());
        self.line.clear();
        self.discarding = discard;
        if self.echo {
            let _ = writeln!(out);
        }
        report(out, CommandError::LineOverflow, None);
        Err(CommandError::LineOverflow)
    }

    /// Parse and dispatch the buffered line, then reset the buffer
    fn complete_line(&mut self, out: &mut dyn Write) -> Result<(), CommandError> {
        let result = match self.line.as_str() {
            Some(text) => {
                let result = parse_line(text).and_then(|cmd| {
                    info!("received command: {}", cmd.name());
                    self.dispatcher.execute(&cmd, out)
                });
                if let Err(e) = result {
                    report(out, e, Some(text));
                }
                result
            }
            None => {
                warn!("discarding non-UTF-8 line ({} bytes)", self.line.len());
                report(out, CommandError::UnknownCommand, None);
                Err(CommandError::UnknownCommand)
            }
        };
        self.line.clear();
        result
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "{}", VERSION);
        let _ = writeln!(out, "Commands: scan | connect <ssid> <credential> | status");
    }
}

/// Write an error response line
fn report(out: &mut dyn Write, err: CommandError, line: Option<&str>) {
    match (err, line) {
        (CommandError::UnknownCommand, Some(raw)) => {
            let _ = writeln!(out, "ERR {}: {}", err, raw);
        }
        _ => {
            let _ = writeln!(out, "ERR {}", err);
        }
    }
}
