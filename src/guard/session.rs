//! Session record persistence and the cookie-backed store reader.
//!
//! The record lives client side as unpadded base64url JSON in a cookie. Reading
//! is infallible from the caller's point of view: a missing cookie and a record
//! that fails to decode are both reported as `None`.

use axum::http::{header::COOKIE, HeaderMap};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const DEFAULT_SESSION_COOKIE: &str = "trainbook_session";

const ROLE_FIELD: &str = "role";

/// Client-held snapshot of the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Permission class, e.g. `admin` or `passenger`.
    pub role: String,
    /// Identity fields written by the login flow, kept as-is.
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            identity: Map::new(),
        }
    }

    /// Add an identity field. `role` is reserved and ignored here.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ROLE_FIELD {
            self.identity.insert(key, value.into());
        }
        self
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("session value is not valid base64url")]
    Encoding,

    #[error("session value is not a valid record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session record has an empty role")]
    EmptyRole,

    #[error("session identity must not contain a `role` field")]
    ReservedField,
}

/// Decode a serialized session record.
///
/// # Errors
/// Returns an error if the value is not base64url, not a JSON object, lacks a
/// string `role`, or carries an empty role.
pub fn decode_session(raw: &str) -> Result<SessionRecord, SessionError> {
    let trimmed = raw.trim().trim_end_matches('=');
    let bytes = Base64UrlUnpadded::decode_vec(trimmed).map_err(|_| SessionError::Encoding)?;
    let record: SessionRecord = serde_json::from_slice(&bytes)?;

    if record.role.trim().is_empty() {
        return Err(SessionError::EmptyRole);
    }

    Ok(record)
}

/// Serialize a session record into the cookie format read by [`decode_session`].
///
/// # Errors
/// Returns an error if the identity map carries a `role` key, the role is
/// empty, or the record cannot be serialized to JSON.
pub fn encode_session(record: &SessionRecord) -> Result<String, SessionError> {
    if record.identity.contains_key(ROLE_FIELD) {
        return Err(SessionError::ReservedField);
    }
    if record.role.trim().is_empty() {
        return Err(SessionError::EmptyRole);
    }

    let json = serde_json::to_vec(record)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

/// Source of the current session for a request.
pub trait SessionStore: Send + Sync {
    /// Read the session carried by the request, if any.
    fn read(&self, headers: &HeaderMap) -> Option<SessionRecord>;
}

/// Reads the session record from a named cookie.
#[derive(Clone, Debug)]
pub struct CookieSessionStore {
    cookie_name: String,
}

impl CookieSessionStore {
    #[must_use]
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        // Browsers may split cookies over several headers.
        for header in headers.get_all(COOKIE) {
            let Ok(value) = header.to_str() else {
                continue;
            };
            for pair in value.split(';') {
                let mut parts = pair.trim().splitn(2, '=');
                let key = parts.next().map(str::trim);
                let val = parts.next().map(str::trim);
                if let (Some(key), Some(val)) = (key, val) {
                    if key == self.cookie_name {
                        // RFC 6265 allows a quoted cookie-value.
                        let val = val
                            .strip_prefix('"')
                            .and_then(|v| v.strip_suffix('"'))
                            .unwrap_or(val);
                        return Some(val.to_string());
                    }
                }
            }
        }
        None
    }
}

impl Default for CookieSessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionStore for CookieSessionStore {
    fn read(&self, headers: &HeaderMap) -> Option<SessionRecord> {
        let raw = self.extract(headers)?;
        match decode_session(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!("Ignoring unreadable session cookie: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn encode_raw(json: &str) -> String {
        Base64UrlUnpadded::encode_string(json.as_bytes())
    }

    #[test]
    fn decode_keeps_role_and_identity() {
        let raw = encode_raw(r#"{"role":"passenger","email":"ana@example.com","id":7}"#);
        let record = decode_session(&raw).unwrap();
        assert_eq!(record.role, "passenger");
        assert_eq!(record.identity["email"], "ana@example.com");
        assert_eq!(record.identity["id"], 7);
    }

    #[test]
    fn encode_then_decode_preserves_fields() {
        let record = SessionRecord::new("admin").with_field("name", "Root");
        let raw = encode_session(&record).unwrap();
        assert!(!raw.contains('='));
        assert_eq!(decode_session(&raw).unwrap(), record);
    }

    #[test]
    fn with_field_ignores_role_key() {
        let record = SessionRecord::new("passenger").with_field("role", "admin");
        assert_eq!(record.role, "passenger");
        assert!(record.identity.is_empty());

        let decoded = decode_session(&encode_session(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn encode_rejects_role_in_identity() {
        let mut record = SessionRecord::new("passenger");
        record.identity.insert("role".to_string(), "admin".into());
        assert!(matches!(
            encode_session(&record),
            Err(SessionError::ReservedField)
        ));
    }

    #[test]
    fn encode_rejects_empty_role() {
        assert!(matches!(
            encode_session(&SessionRecord::new(" ")),
            Err(SessionError::EmptyRole)
        ));
    }

    #[test]
    fn decode_tolerates_padding() {
        let raw = format!("{}==", encode_raw(r#"{"role":"admin"}"#));
        assert_eq!(decode_session(&raw).unwrap().role, "admin");
    }

    #[test]
    fn decode_rejects_malformed_values() {
        assert!(matches!(
            decode_session("not base64 at all!"),
            Err(SessionError::Encoding)
        ));
        assert!(matches!(
            decode_session(&encode_raw("plain text")),
            Err(SessionError::Json(_))
        ));
        assert!(matches!(
            decode_session(&encode_raw(r#"["admin"]"#)),
            Err(SessionError::Json(_))
        ));
        assert!(matches!(
            decode_session(&encode_raw(r#"{"user":"ana"}"#)),
            Err(SessionError::Json(_))
        ));
        assert!(matches!(
            decode_session(&encode_raw(r#"{"role":42}"#)),
            Err(SessionError::Json(_))
        ));
        assert!(matches!(
            decode_session(&encode_raw(r#"{"role":"  "}"#)),
            Err(SessionError::EmptyRole)
        ));
    }

    #[test]
    fn store_reads_named_cookie() {
        let raw = encode_raw(r#"{"role":"passenger"}"#);
        let headers = headers_with_cookie(&format!("theme=dark; trainbook_session={raw}"));
        let store = CookieSessionStore::default();
        assert_eq!(store.read(&headers), Some(SessionRecord::new("passenger")));
    }

    #[test]
    fn store_reads_quoted_cookie() {
        let raw = encode_raw(r#"{"role":"passenger"}"#);
        let headers = headers_with_cookie(&format!("trainbook_session=\"{raw}\""));
        let store = CookieSessionStore::default();
        assert_eq!(store.read(&headers), Some(SessionRecord::new("passenger")));
    }

    #[test]
    fn store_uses_configured_cookie_name() {
        let raw = encode_raw(r#"{"role":"passenger"}"#);
        let headers = headers_with_cookie(&format!("trainbook_session={raw}"));
        let store = CookieSessionStore::new("sid");
        assert_eq!(store.cookie_name(), "sid");
        assert_eq!(store.read(&headers), None);
    }

    #[test]
    fn store_reports_absent_without_cookie() {
        let store = CookieSessionStore::default();
        assert_eq!(store.read(&HeaderMap::new()), None);
        assert_eq!(store.read(&headers_with_cookie("theme=dark")), None);
    }

    #[test]
    fn store_reports_absent_for_corrupt_cookie() {
        let store = CookieSessionStore::default();
        let headers = headers_with_cookie("trainbook_session=%7Bnot-json");
        assert_eq!(store.read(&headers), None);
    }
}
