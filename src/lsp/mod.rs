//! Host-facing feature adapters.
//!
//! This module provides the bridge's host-consumable capabilities:
//! - Document colors for the picker UI
//! - The range feed for the decoration renderer
//! - Version-guarded application of server-proposed fixes

mod code_action;
mod color;
mod decorations;

pub use code_action::{CommandError, FixApplicator, FixOutcome};
pub use color::{
    ColorProvider, ColorQueryError, ColorSymbol, DocumentColorSource, HostColor, HEX_FORMAT,
    PLACEHOLDER_COLOR,
};
pub use decorations::DecorationFeed;
