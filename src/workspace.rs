//! Reference in-memory host implementation.
//!
//! Gives embedders (and this crate's own tests) a concrete [`Host`]: open
//! documents keyed by URI, an active-editor designation, live-updatable
//! settings, and captured user-facing messages. A real editor front end
//! would implement [`Host`] directly against its own UI instead.

use std::sync::{Arc, Mutex, RwLock};

use tower_lsp::lsp_types::Url;

use crate::document::{DocumentStore, OpenDocument};
use crate::host::{DocumentRef, Host, HostEdit, HostEditor};
use crate::language::LanguageId;
use crate::settings::Settings;

/// Severity of a captured user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Information,
    Error,
}

/// A user-facing message captured by the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Default)]
struct WorkspaceInner {
    documents: DocumentStore,
    active: RwLock<Option<Url>>,
    settings: RwLock<Settings>,
    messages: Mutex<Vec<UserMessage>>,
}

/// In-memory host: documents, active editor, settings, messages.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    inner: Arc<WorkspaceInner>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document (or replace its content) at the given host version.
    pub fn open_document(
        &self,
        uri: Url,
        text: impl Into<String>,
        version: i32,
        language: LanguageId,
    ) {
        self.inner
            .documents
            .open(uri, text.into(), version, language);
    }

    /// Close a document, clearing the active designation if it pointed
    /// there.
    pub fn close_document(&self, uri: &Url) {
        self.inner.documents.close(uri);
        let mut active = lock_write(&self.inner.active);
        if active.as_ref() == Some(uri) {
            *active = None;
        }
    }

    /// Designate which open document the active editor shows.
    pub fn set_active_document(&self, uri: Option<Url>) {
        *lock_write(&self.inner.active) = uri;
    }

    /// Snapshot an open document.
    pub fn document(&self, uri: &Url) -> Option<OpenDocument> {
        self.inner.documents.get(uri)
    }

    /// Current text of an open document.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        self.document(uri).map(|doc| doc.text().to_string())
    }

    /// Replace the settings backing [`Host::config_flag`].
    ///
    /// Takes effect on the next read; nothing in the bridge caches flags.
    pub fn update_settings(&self, settings: Settings) {
        *lock_write(&self.inner.settings) = settings;
    }

    /// Drain the captured user-facing messages.
    pub fn take_messages(&self) -> Vec<UserMessage> {
        std::mem::take(&mut lock_mutex(&self.inner.messages))
    }

    fn push_message(&self, kind: MessageKind, text: &str) {
        lock_mutex(&self.inner.messages).push(UserMessage {
            kind,
            text: text.to_string(),
        });
    }

    /// Apply an edit batch to `uri` as one transaction.
    ///
    /// Every range must resolve to a byte span of the current text and the
    /// spans must not overlap; otherwise nothing is applied and the version
    /// stays put.
    fn apply_transaction(&self, uri: &Url, edits: &[HostEdit]) -> bool {
        self.inner
            .documents
            .with_document_mut(uri, |doc| {
                let mut spans = Vec::with_capacity(edits.len());
                for edit in edits {
                    match doc.line_index().span_for(&edit.range) {
                        Some(span) => spans.push((span, edit.new_text.as_str())),
                        None => return false,
                    }
                }

                // Apply bottom-up so earlier spans stay valid.
                spans.sort_by(|a, b| b.0.start.cmp(&a.0.start));
                for pair in spans.windows(2) {
                    if pair[1].0.end > pair[0].0.start {
                        return false;
                    }
                }

                let mut text = doc.text().to_string();
                for (span, new_text) in &spans {
                    text.replace_range(span.clone(), new_text);
                }
                doc.replace_text(text);
                true
            })
            .unwrap_or(false)
    }
}

/// Editor handle bound to the document that was active at resolution time.
struct WorkspaceEditor {
    workspace: Workspace,
    document: DocumentRef,
}

#[tower_lsp::async_trait]
impl HostEditor for WorkspaceEditor {
    fn document(&self) -> DocumentRef {
        self.document.clone()
    }

    async fn apply_edits(&self, edits: &[HostEdit]) -> bool {
        self.workspace.apply_transaction(&self.document.uri, edits)
    }
}

#[tower_lsp::async_trait]
impl Host for Workspace {
    fn active_editor(&self) -> Option<Arc<dyn HostEditor>> {
        let uri = lock_read(&self.inner.active).clone()?;
        let doc = self.inner.documents.get(&uri)?;
        Some(Arc::new(WorkspaceEditor {
            workspace: self.clone(),
            document: DocumentRef {
                uri,
                version: doc.version(),
                language: doc.language(),
            },
        }))
    }

    fn config_flag(&self, key: &str) -> Option<bool> {
        lock_read(&self.inner.settings).flag(key)
    }

    async fn show_information(&self, message: &str) {
        self.push_message(MessageKind::Information, message);
    }

    async fn show_error(&self, message: &str) {
        self.push_message(MessageKind::Error, message);
    }
}

// Poisoning only marks a panic elsewhere; recover the guard.
fn lock_read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn lock_write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn lock_mutex<T>(lock: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{HostPosition, HostRange};

    fn uri(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn edit(sl: u32, sc: u32, el: u32, ec: u32, text: &str) -> HostEdit {
        HostEdit {
            range: HostRange::new(HostPosition::new(sl, sc), HostPosition::new(el, ec)),
            new_text: text.to_string(),
        }
    }

    #[test]
    fn active_editor_requires_open_document() {
        let workspace = Workspace::new();
        assert!(workspace.active_editor().is_none());

        workspace.set_active_document(Some(uri("file:///a.css")));
        assert!(workspace.active_editor().is_none());

        workspace.open_document(uri("file:///a.css"), "a { }", 1, LanguageId::Css);
        let editor = workspace.active_editor().unwrap();
        assert_eq!(editor.document().version, 1);
    }

    #[test]
    fn closing_the_active_document_clears_focus() {
        let workspace = Workspace::new();
        workspace.open_document(uri("file:///a.css"), "a { }", 1, LanguageId::Css);
        workspace.set_active_document(Some(uri("file:///a.css")));

        workspace.close_document(&uri("file:///a.css"));
        assert!(workspace.active_editor().is_none());
    }

    #[tokio::test]
    async fn transaction_applies_bottom_up() {
        let workspace = Workspace::new();
        workspace.open_document(uri("file:///a.css"), "a red b red", 1, LanguageId::Css);
        workspace.set_active_document(Some(uri("file:///a.css")));

        let editor = workspace.active_editor().unwrap();
        let applied = editor
            .apply_edits(&[edit(0, 2, 0, 5, "blue"), edit(0, 8, 0, 11, "teal")])
            .await;

        assert!(applied);
        assert_eq!(
            workspace.document_text(&uri("file:///a.css")).unwrap(),
            "a blue b teal"
        );
        assert_eq!(workspace.document(&uri("file:///a.css")).unwrap().version(), 2);
    }

    #[tokio::test]
    async fn overlapping_batch_is_rejected_whole() {
        let workspace = Workspace::new();
        workspace.open_document(uri("file:///a.css"), "abcdef", 1, LanguageId::Css);
        workspace.set_active_document(Some(uri("file:///a.css")));

        let editor = workspace.active_editor().unwrap();
        let applied = editor
            .apply_edits(&[edit(0, 0, 0, 4, "x"), edit(0, 2, 0, 6, "y")])
            .await;

        assert!(!applied);
        assert_eq!(
            workspace.document_text(&uri("file:///a.css")).unwrap(),
            "abcdef"
        );
        assert_eq!(workspace.document(&uri("file:///a.css")).unwrap().version(), 1);
    }

    #[tokio::test]
    async fn out_of_bounds_batch_is_rejected_whole() {
        let workspace = Workspace::new();
        workspace.open_document(uri("file:///a.css"), "ab", 1, LanguageId::Css);
        workspace.set_active_document(Some(uri("file:///a.css")));

        let editor = workspace.active_editor().unwrap();
        let applied = editor
            .apply_edits(&[edit(0, 0, 0, 1, "x"), edit(4, 0, 4, 1, "y")])
            .await;

        assert!(!applied);
        assert_eq!(workspace.document_text(&uri("file:///a.css")).unwrap(), "ab");
    }

    #[test]
    fn config_flags_read_through_settings() {
        let workspace = Workspace::new();
        assert_eq!(workspace.config_flag("css.colorDecorators.enable"), None);

        let settings: Settings = toml::from_str(
            r#"
            [css.colorDecorators]
            enable = false
            "#,
        )
        .unwrap();
        workspace.update_settings(settings);

        assert_eq!(
            workspace.config_flag("css.colorDecorators.enable"),
            Some(false)
        );
    }
}
