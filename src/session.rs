//! Transport session abstraction over the channel to the language server.

use serde_json::Value;
use thiserror::Error;
use tower_lsp::lsp_types::request::Request;

/// Errors surfaced by the transport layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The channel failed to deliver the request or its response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A payload did not match the request's declared parameter or result
    /// type.
    #[error("invalid payload for '{method}': {source}")]
    Payload {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A live, bidirectional channel to the language server.
///
/// Created once at activation and shared by every component; components only
/// issue requests through it, never mutate it. The concrete transport
/// (process spawn, stdio framing, reconnection) is owned by the embedder.
#[tower_lsp::async_trait]
pub trait TransportSession: Send + Sync {
    /// Resolves once the channel is live and able to accept requests.
    async fn ready(&self) -> Result<(), SessionError>;

    /// Issue a raw request and await its response payload.
    async fn request(&self, method: &'static str, params: Value) -> Result<Value, SessionError>;
}

/// Issue a typed request over `session`.
///
/// Serializes the parameters declared by `R`, sends the raw request, and
/// deserializes the response into `R::Result`.
pub async fn request<R>(
    session: &dyn TransportSession,
    params: R::Params,
) -> Result<R::Result, SessionError>
where
    R: Request,
{
    let params = serde_json::to_value(params).map_err(|source| SessionError::Payload {
        method: R::METHOD,
        source,
    })?;

    log::debug!("sending '{}' request", R::METHOD);
    let response = session.request(R::METHOD, params).await?;

    serde_json::from_value(response).map_err(|source| SessionError::Payload {
        method: R::METHOD,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ColorSymbolRequest;
    use serde_json::json;

    /// Session that answers every request with a canned payload.
    struct CannedSession(Value);

    #[tower_lsp::async_trait]
    impl TransportSession for CannedSession {
        async fn ready(&self) -> Result<(), SessionError> {
            Ok(())
        }

        async fn request(
            &self,
            _method: &'static str,
            _params: Value,
        ) -> Result<Value, SessionError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn typed_request_deserializes_result() {
        let session = CannedSession(json!([
            { "start": { "line": 1, "character": 2 }, "end": { "line": 1, "character": 6 } }
        ]));
        let ranges = request::<ColorSymbolRequest>(&session, "file:///a.css".to_string())
            .await
            .unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start.line, 1);
        assert_eq!(ranges[0].end.character, 6);
    }

    #[tokio::test]
    async fn mismatched_result_is_a_payload_error() {
        let session = CannedSession(json!({ "not": "a range list" }));
        let err = request::<ColorSymbolRequest>(&session, "file:///a.css".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Payload {
                method: "css/colorSymbols",
                ..
            }
        ));
    }
}
