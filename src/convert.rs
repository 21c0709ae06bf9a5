//! Translation between the server's wire coordinates and host-native ranges.

use tower_lsp::lsp_types::{Position, Range};

/// A position in the host's coordinate space.
///
/// Lines are zero-based and characters count UTF-16 code units, matching the
/// wire convention; only the representation type differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostPosition {
    pub line: u32,
    pub character: u32,
}

impl HostPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A span of a document in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRange {
    pub start: HostPosition,
    pub end: HostPosition,
}

impl HostRange {
    pub fn new(start: HostPosition, end: HostPosition) -> Self {
        Self { start, end }
    }
}

/// Translate a wire range into the host representation.
///
/// Total and field-preserving: `server_range(host_range(r)) == r` for every
/// input.
pub fn host_range(range: Range) -> HostRange {
    HostRange {
        start: HostPosition::new(range.start.line, range.start.character),
        end: HostPosition::new(range.end.line, range.end.character),
    }
}

/// Reverse translation, used when handing ranges back to the server space.
pub fn server_range(range: HostRange) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}

/// Translate a response sequence elementwise.
///
/// Order is preserved and the output length equals the input length; the
/// decoration renderer relies on index correspondence with the wire
/// response.
pub fn host_ranges(ranges: Vec<Range>) -> Vec<HostRange> {
    ranges.into_iter().map(host_range).collect()
}
