//! Point-placement marker handling.
//!
//! A template's entry file carries one sentinel character where the cursor
//! should land. [`take_marker`] strips the first occurrence and reports where
//! it was. Files are handled as bytes, so an entry file in any
//! ASCII-compatible encoding keeps every other byte intact.

use std::path::Path;

use super::DomainError;

/// Default marker character.
pub const DEFAULT_MARKER: char = '$';

/// Cursor location inside a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// Byte offset into the file.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters. Each invalid UTF-8 byte
    /// counts as one.
    pub column: usize,
}

impl CursorPosition {
    /// Position of byte `offset` within `text`.
    pub fn locate(text: &[u8], offset: usize) -> Self {
        let before = &text[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl std::fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Entry file contents with the marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSource {
    pub contents: Vec<u8>,
    pub cursor: CursorPosition,
}

/// Remove the first `marker` from `contents`.
///
/// `file` is only used for the error message.
pub fn take_marker(contents: &[u8], marker: char, file: &Path) -> Result<MarkedSource, DomainError> {
    let mut buf = [0u8; 4];
    let needle = marker.encode_utf8(&mut buf).as_bytes();

    let offset = contents
        .windows(needle.len())
        .position(|w| w == needle)
        .ok_or_else(|| DomainError::MarkerMissing {
            file: file.to_path_buf(),
            marker,
        })?;

    let mut stripped = Vec::with_capacity(contents.len());
    stripped.extend_from_slice(&contents[..offset]);
    stripped.extend_from_slice(&contents[offset + needle.len()..]);

    Ok(MarkedSource {
        cursor: CursorPosition::locate(contents, offset),
        contents: stripped,
    })
}
