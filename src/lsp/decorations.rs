//! Range feed for the host's color-decoration renderer.

use std::sync::Arc;

use tower_lsp::lsp_types::Url;

use crate::convert::{host_ranges, HostRange};
use crate::host::Host;
use crate::language::LanguageId;
use crate::protocol::ColorSymbolRequest;
use crate::session::{self, SessionError, TransportSession};

/// Supplies `(uri) -> ranges` plus a per-language enable predicate to the
/// decoration renderer.
///
/// The renderer owns subscription and debouncing; every call here is a fresh
/// query whose result is order-stable with the wire response.
pub struct DecorationFeed {
    session: Arc<dyn TransportSession>,
    host: Arc<dyn Host>,
}

impl DecorationFeed {
    pub fn new(session: Arc<dyn TransportSession>, host: Arc<dyn Host>) -> Self {
        Self { session, host }
    }

    /// Ranges of the color literals currently in `uri`, in server order.
    ///
    /// The placeholder color payload is discarded; the renderer colors its
    /// swatches from the document text itself.
    pub async fn colors_for(&self, uri: &Url) -> Result<Vec<HostRange>, SessionError> {
        let ranges =
            session::request::<ColorSymbolRequest>(self.session.as_ref(), uri.to_string()).await?;
        Ok(host_ranges(ranges))
    }

    /// Whether color decorations are enabled for `language`.
    ///
    /// Reads the host flag on every call so configuration changes take
    /// effect immediately; an unset flag counts as enabled.
    pub fn decorations_enabled(&self, language: LanguageId) -> bool {
        self.host
            .config_flag(&language.decorators_setting_key())
            .unwrap_or(true)
    }
}
