//! Command line parser
//!
//! Keyword prefix match, case-sensitive, keyword at the start of the line.
//! No I/O, no side effects.

use heapless::String;

use super::CommandError;
use crate::config::{CREDENTIAL_MAX, SSID_MAX};

pub const CMD_SCAN: &str = "scan";
pub const CMD_CONNECT: &str = "connect";
pub const CMD_STATUS: &str = "status";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Scan,
    Connect {
        ssid: String<SSID_MAX>,
        credential: String<CREDENTIAL_MAX>,
    },
    Status,
    /// Line matched no keyword
    Unknown { raw: &'a str },
}

impl Command<'_> {
    /// Keyword name, safe to log (never includes arguments)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scan => CMD_SCAN,
            Self::Connect { .. } => CMD_CONNECT,
            Self::Status => CMD_STATUS,
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Parse a command line
///
/// `connect` needs exactly two whitespace-separated tokens after the keyword;
/// anything else is an error rather than a partial command.
pub fn parse_line(line: &str) -> Result<Command<'_>, CommandError> {
    if line.starts_with(CMD_SCAN) {
        Ok(Command::Scan)
    } else if let Some(rest) = line.strip_prefix(CMD_CONNECT) {
        parse_connect(rest)
    } else if line.starts_with(CMD_STATUS) {
        Ok(Command::Status)
    } else {
        Ok(Command::Unknown { raw: line })
    }
}

fn parse_connect(rest: &str) -> Result<Command<'static>, CommandError> {
    if !rest.starts_with(char::is_whitespace) {
        return Err(CommandError::InvalidArguments);
    }

    let mut tokens = rest.split_whitespace();
    let (ssid, credential) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(ssid), Some(credential), None) => (ssid, credential),
        _ => return Err(CommandError::InvalidArguments),
    };

    Ok(Command::Connect {
        ssid: bounded(ssid)?,
        credential: bounded(credential)?,
    })
}

fn bounded<const N: usize>(token: &str) -> Result<String<N>, CommandError> {
    let mut s = String::new();
    s.push_str(token).map_err(|_| CommandError::ArgumentTooLong)?;
    Ok(s)
}
