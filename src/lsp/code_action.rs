//! Version-guarded application of server-proposed fixes.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tower_lsp::lsp_types::{TextEdit, Url};

use crate::convert::host_range;
use crate::host::{Host, HostEdit};

/// Shown when the document moved on since the fix was computed.
const OUTDATED_MESSAGE: &str = "The CSS fix is outdated and can't be applied to the document.";

/// Shown when the host refuses the edit transaction.
const REJECTED_MESSAGE: &str = "Failed to apply the CSS fix to the document. \
     Please consider opening an issue with steps to reproduce.";

/// How an [`FixApplicator::apply_fix`] invocation ended.
///
/// User-visible messaging goes through the host; the outcome is returned for
/// callers that want to observe or log the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// The batch was applied in full.
    Applied,
    /// No editor is showing the target document; nothing to do.
    NoActiveEditor,
    /// The document version moved on since the fix was computed.
    Stale,
    /// The host refused the transaction.
    Rejected,
}

/// Malformed `_css.applyCodeAction` command arguments.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("expected (uri, documentVersion, edits) arguments, got {0}")]
    Arity(usize),

    #[error("invalid command argument: {0}")]
    Argument(#[from] serde_json::Error),

    #[error("invalid document uri: {0}")]
    Uri(String),
}

/// Applies server-proposed edit batches behind a document-version guard.
pub struct FixApplicator {
    host: Arc<dyn Host>,
}

impl FixApplicator {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// Apply `edits` to `uri`, provided the live document still carries
    /// `expected_version`.
    ///
    /// The version check is the only concurrency control: one optimistic
    /// attempt, no retry, no merge. A mismatch means the edit ranges may no
    /// longer correspond to the live content, so nothing is applied.
    pub async fn apply_fix(
        &self,
        uri: &Url,
        expected_version: i32,
        edits: Vec<TextEdit>,
    ) -> FixOutcome {
        // The user may have closed or switched documents between fix
        // computation and application; that is an expected race, not a
        // fault.
        let Some(editor) = self.host.active_editor() else {
            return FixOutcome::NoActiveEditor;
        };
        let document = editor.document();
        if document.uri != *uri {
            return FixOutcome::NoActiveEditor;
        }

        if document.version != expected_version {
            self.host.show_information(OUTDATED_MESSAGE).await;
            return FixOutcome::Stale;
        }

        let batch: Vec<HostEdit> = edits
            .into_iter()
            .map(|edit| HostEdit {
                range: host_range(edit.range),
                new_text: edit.new_text,
            })
            .collect();

        if editor.apply_edits(&batch).await {
            FixOutcome::Applied
        } else {
            log::warn!("host rejected the fix transaction for {}", uri);
            self.host.show_error(REJECTED_MESSAGE).await;
            FixOutcome::Rejected
        }
    }

    /// Decode and dispatch a `_css.applyCodeAction` host-command invocation.
    ///
    /// Arguments are positional: `[uri, documentVersion, edits]`. Malformed
    /// arguments are an error and never touch any document.
    pub async fn handle_command(&self, arguments: &[Value]) -> Result<FixOutcome, CommandError> {
        let [uri_arg, version_arg, edits_arg] = arguments else {
            return Err(CommandError::Arity(arguments.len()));
        };

        let uri: String = serde_json::from_value(uri_arg.clone())?;
        let uri = Url::parse(&uri).map_err(|_| CommandError::Uri(uri))?;
        let version: i32 = serde_json::from_value(version_arg.clone())?;
        let edits: Vec<TextEdit> = serde_json::from_value(edits_arg.clone())?;

        Ok(self.apply_fix(&uri, version, edits).await)
    }
}
