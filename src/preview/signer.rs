//! Attachment URL signing.
//!
//! Attachment files are served behind the user's session, so thumbnail URLs
//! carry the user id and token as query parameters.

use url::Url;

use super::PreviewError;

/// Turns a raw attachment URL into one the image loader can fetch.
pub trait AttachmentUrlSigner {
    /// Combine `raw_url` with the session and the server base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::InvalidUrl`] if the result is not a valid URL.
    fn sign(
        &self,
        raw_url: &str,
        user_id: &str,
        token: &str,
        base_url: &str,
    ) -> Result<String, PreviewError>;
}

/// Appends `rc_uid` and `rc_token` query parameters.
///
/// Absolute `http(s)` URLs are used as-is; anything else is treated as a
/// path on the chat server. URLs that already carry a token are returned
/// without adding a second one.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryTokenSigner;

const USER_ID_PARAM: &str = "rc_uid";
const TOKEN_PARAM: &str = "rc_token";

impl AttachmentUrlSigner for QueryTokenSigner {
    fn sign(
        &self,
        raw_url: &str,
        user_id: &str,
        token: &str,
        base_url: &str,
    ) -> Result<String, PreviewError> {
        let absolute = if is_http(raw_url) {
            raw_url.to_owned()
        } else {
            join_server_path(base_url, raw_url)
        };

        let mut url = Url::parse(&absolute).map_err(|source| PreviewError::InvalidUrl {
            url: absolute.clone(),
            source,
        })?;

        if url.query_pairs().any(|(key, _)| key == TOKEN_PARAM) {
            return Ok(url.into());
        }

        url.query_pairs_mut()
            .append_pair(USER_ID_PARAM, user_id)
            .append_pair(TOKEN_PARAM, token);
        Ok(url.into())
    }
}

// Schemes are case-insensitive.
fn is_http(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

// Plain concatenation keeps any sub-path the server is mounted under.
fn join_server_path(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
