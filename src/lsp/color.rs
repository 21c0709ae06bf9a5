//! Document color supply for the host's picker UI.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::convert::{host_ranges, HostRange};
use crate::host::DocumentRef;
use crate::protocol::ColorSymbolRequest;
use crate::session::{self, SessionError, TransportSession};

/// Hex-triplet presentation format advertised to the picker.
pub const HEX_FORMAT: &str = "#{red}{green}{blue}";

/// Placeholder color handed to the picker: opaque black.
///
/// The color-symbol response carries ranges only; the picker seeds its UI
/// from this constant and derives the real value from the document text.
pub const PLACEHOLDER_COLOR: HostColor = HostColor {
    red: 0.0,
    green: 0.0,
    blue: 0.0,
    alpha: 1.0,
};

/// A color value in the host's picker model, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

/// A color literal occurrence handed to the host's color-picker UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSymbol {
    pub range: HostRange,
    pub color: HostColor,
    pub format: String,
    /// Always exactly the one advertised format.
    pub available_formats: Vec<String>,
}

/// Why a color query produced no symbols.
#[derive(Debug, Error)]
pub enum ColorQueryError {
    /// The host cancelled the query; callers drop the update silently
    /// rather than surfacing an error.
    #[error("color query cancelled")]
    Cancelled,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Capability interface the host registers as its document-color supplier.
#[tower_lsp::async_trait]
pub trait DocumentColorSource: Send + Sync {
    /// Resolve the color symbols currently present in `document`.
    async fn provide_document_colors(
        &self,
        document: &DocumentRef,
        token: &CancellationToken,
    ) -> Result<Vec<ColorSymbol>, ColorQueryError>;
}

/// Session-backed [`DocumentColorSource`].
///
/// Emits one [`ColorSymbol`] per range in the server's response, in the same
/// order — no filtering, no reordering, no deduplication.
pub struct ColorProvider {
    session: Arc<dyn TransportSession>,
}

impl ColorProvider {
    pub fn new(session: Arc<dyn TransportSession>) -> Self {
        Self { session }
    }
}

#[tower_lsp::async_trait]
impl DocumentColorSource for ColorProvider {
    async fn provide_document_colors(
        &self,
        document: &DocumentRef,
        token: &CancellationToken,
    ) -> Result<Vec<ColorSymbol>, ColorQueryError> {
        let uri = document.uri.to_string();
        let ranges = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(ColorQueryError::Cancelled),
            response = session::request::<ColorSymbolRequest>(self.session.as_ref(), uri) => {
                response?
            }
        };

        // The response and the cancellation can land in the same poll; a
        // cancelled call must not produce an update.
        if token.is_cancelled() {
            return Err(ColorQueryError::Cancelled);
        }

        Ok(host_ranges(ranges)
            .into_iter()
            .map(|range| ColorSymbol {
                range,
                color: PLACEHOLDER_COLOR,
                format: HEX_FORMAT.to_string(),
                available_formats: vec![HEX_FORMAT.to_string()],
            })
            .collect())
    }
}
