//! Editor-side client bridge for CSS-family language servers.
//!
//! The bridge forwards color-symbol queries to the analysis server over a
//! shared [`TransportSession`], translates the server's wire ranges into
//! host-native ranges, feeds the host's color picker and decoration
//! renderer, and applies server-proposed fixes behind a document-version
//! guard.

use std::sync::Arc;

mod convert;
mod document;
mod host;
mod language;
mod lsp;
mod protocol;
mod session;
pub(crate) mod settings;
mod workspace;

pub use convert::{host_range, host_ranges, server_range, HostPosition, HostRange};
pub use document::{DocumentStore, LineIndex, OpenDocument};
pub use host::{DocumentRef, Host, HostEdit, HostEditor};
pub use language::{configuration, LanguageConfiguration, LanguageId};
pub use lsp::{
    ColorProvider, ColorQueryError, ColorSymbol, CommandError, DecorationFeed,
    DocumentColorSource, FixApplicator, FixOutcome, HostColor, HEX_FORMAT, PLACEHOLDER_COLOR,
};
pub use protocol::{ColorSymbolRequest, APPLY_CODE_ACTION_COMMAND};
pub use session::{request, SessionError, TransportSession};
pub use settings::{
    discover_settings, load_settings, ColorDecoratorSettings, LanguageSettings, Settings,
};
pub use workspace::{MessageKind, UserMessage, Workspace};

/// The bridge, wired at host activation.
///
/// Owns the shared session handle and the host-facing capabilities built
/// over it. Dropping the bridge is deactivation; tearing down the session
/// itself belongs to whoever created it.
pub struct Bridge {
    session: Arc<dyn TransportSession>,
    colors: Arc<ColorProvider>,
    decorations: DecorationFeed,
    fixes: FixApplicator,
}

impl Bridge {
    /// Wire the bridge over a session and a host.
    ///
    /// Awaits the session's ready signal once; every capability built here
    /// shares the same two handles for the bridge's lifetime.
    pub async fn activate(
        session: Arc<dyn TransportSession>,
        host: Arc<dyn Host>,
    ) -> Result<Self, SessionError> {
        session.ready().await?;
        Ok(Self {
            colors: Arc::new(ColorProvider::new(Arc::clone(&session))),
            decorations: DecorationFeed::new(Arc::clone(&session), Arc::clone(&host)),
            fixes: FixApplicator::new(host),
            session,
        })
    }

    /// The color supplier to register for the picker UI.
    pub fn color_source(&self) -> Arc<dyn DocumentColorSource> {
        self.colors.clone()
    }

    /// The accessor feed for the decoration renderer.
    pub fn decorations(&self) -> &DecorationFeed {
        &self.decorations
    }

    /// The applicator backing [`APPLY_CODE_ACTION_COMMAND`].
    pub fn fixes(&self) -> &FixApplicator {
        &self.fixes
    }

    /// The shared transport handle.
    pub fn session(&self) -> &Arc<dyn TransportSession> {
        &self.session
    }
}
