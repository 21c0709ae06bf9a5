//! Wire contracts between the bridge and the CSS language server.

use tower_lsp::lsp_types::request::Request;
use tower_lsp::lsp_types::Range;

/// Custom request asking the server which ranges in a document are color
/// literals.
///
/// The parameter is the document URI as a plain string; the response is the
/// list of ranges in the server's document order, stable for a given
/// document version. A URI the server does not know yields an empty list,
/// never an error.
pub enum ColorSymbolRequest {}

impl Request for ColorSymbolRequest {
    type Params = String;
    type Result = Vec<Range>;
    const METHOD: &'static str = "css/colorSymbols";
}

/// Host command id for applying a server-proposed code action.
///
/// Invoked with positional arguments `[uri, documentVersion, edits]`.
pub const APPLY_CODE_ACTION_COMMAND: &str = "_css.applyCodeAction";

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{Position, Range};

    #[test]
    fn color_symbol_response_shape() {
        let wire = r#"[{"start":{"line":0,"character":7},"end":{"line":0,"character":11}}]"#;
        let ranges: <ColorSymbolRequest as Request>::Result = serde_json::from_str(wire).unwrap();
        assert_eq!(
            ranges,
            vec![Range::new(Position::new(0, 7), Position::new(0, 11))]
        );
    }

    #[test]
    fn color_symbol_params_are_a_bare_uri_string() {
        let params: <ColorSymbolRequest as Request>::Params = "file:///a.css".to_string();
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#""file:///a.css""#
        );
    }
}
