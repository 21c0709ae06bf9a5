//! Capability traits for the text-editing host.
//!
//! The host owns documents, versions, configuration, and user-facing UI.
//! The bridge reads through these traits and never holds host state of its
//! own; [`crate::workspace::Workspace`] is a ready-made in-memory
//! implementation.

use std::sync::Arc;

use tower_lsp::lsp_types::Url;

use crate::convert::HostRange;
use crate::language::LanguageId;

/// Identity of a host document: URI plus the version integer the host bumps
/// on every edit. Owned by the host; the bridge only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub uri: Url,
    pub version: i32,
    pub language: LanguageId,
}

/// A single replacement within an edit batch, in host coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEdit {
    pub range: HostRange,
    pub new_text: String,
}

/// An editor currently presenting a document.
#[tower_lsp::async_trait]
pub trait HostEditor: Send + Sync {
    /// The document shown in this editor, as of editor resolution.
    fn document(&self) -> DocumentRef;

    /// Apply the batch as one transaction.
    ///
    /// Either every replacement lands or none does; `false` means the host
    /// rejected the whole batch.
    async fn apply_edits(&self, edits: &[HostEdit]) -> bool;
}

/// The host environment: editors, configuration, and user-facing messages.
#[tower_lsp::async_trait]
pub trait Host: Send + Sync {
    /// The editor currently in focus, if any.
    fn active_editor(&self) -> Option<Arc<dyn HostEditor>>;

    /// Read a boolean configuration flag; `None` when unset.
    fn config_flag(&self, key: &str) -> Option<bool>;

    /// Surface a non-fatal informational message to the user.
    async fn show_information(&self, message: &str);

    /// Surface a non-fatal error message to the user.
    async fn show_error(&self, message: &str);
}
