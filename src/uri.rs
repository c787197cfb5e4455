//! BitID URI construction, parsing, and binding checks.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::BitIdError;
use crate::nonce::generate_nonce;

pub const BITID_SCHEME: &str = "bitid";
pub const PARAM_NONCE: &str = "x";
pub const PARAM_UNSECURE: &str = "u";
const SECURE_SCHEME: &str = "https";
const QRCODE_SERVICE_URI: &str =
    "http://chart.apis.google.com/chart?cht=qr&chs=300x300&chl=";

/// The parsed form of a BitID challenge URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedUri {
    pub scheme: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub nonce: Option<String>,
    pub unsecure: Option<String>,
}

fn parse_url(uri: &str) -> Result<Url, BitIdError> {
    Url::parse(uri).map_err(|e| BitIdError::MalformedUri(e.to_string()))
}

/// Extracts the value of `x` from a BitID URI's query string, iff it
/// appears exactly once. Does not reject an empty value — `uri_valid`
/// layers that extra check on top, matching the reference implementation's
/// split between structural extraction and the stricter validity predicate.
pub fn extract_nonce(bitid_uri: &str) -> Option<String> {
    single_query_value(bitid_uri, PARAM_NONCE)
}

/// Extracts the value of `u` from a BitID URI's query string, iff it
/// appears exactly once and is `"0"` or `"1"`.
pub fn extract_unsecure(bitid_uri: &str) -> Option<String> {
    let value = single_query_value(bitid_uri, PARAM_UNSECURE)?;
    if value == "0" || value == "1" {
        Some(value)
    } else {
        None
    }
}

fn single_query_value(uri: &str, key: &str) -> Option<String> {
    let url = parse_url(uri).ok()?;
    let mut matches = url.query_pairs().filter(|(k, _)| k == key);
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.1.into_owned())
}

/// Fully parses a BitID URI into its structural components.
pub fn parse(bitid_uri: &str) -> Result<ParsedUri, BitIdError> {
    let url = parse_url(bitid_uri)?;
    Ok(ParsedUri {
        scheme: url.scheme().to_string(),
        host: url.host_str().map(str::to_string),
        port: url.port(),
        path: url.path().to_string(),
        nonce: extract_nonce(bitid_uri),
        unsecure: extract_unsecure(bitid_uri),
    })
}

/// Builds a `bitid://` challenge URI from a canonical callback URI.
///
/// Fails with [`BitIdError::InvalidCallback`] iff the callback is missing a
/// scheme, host, or path — this is the one error kind the façade lets
/// escape to the embedding application, since a bad callback is a
/// programmer error rather than something an attacker can trigger.
pub fn build_uri(callback_uri: &str, nonce: Option<&str>) -> Result<String, BitIdError> {
    let callback = Url::parse(callback_uri)
        .map_err(|e| BitIdError::InvalidCallback(e.to_string()))?;

    let host = callback.host_str().filter(|h| !h.is_empty()).ok_or_else(|| {
        BitIdError::InvalidCallback("callback uri has no host".to_string())
    })?;
    if callback.scheme().is_empty() {
        return Err(BitIdError::InvalidCallback(
            "callback uri has no scheme".to_string(),
        ));
    }
    let path = callback.path();
    if path.is_empty() {
        return Err(BitIdError::InvalidCallback(
            "callback uri has no path".to_string(),
        ));
    }

    let host_port = match callback.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let nonce = nonce.map(str::to_string).unwrap_or_else(generate_nonce);
    let mut query = format!("{PARAM_NONCE}={nonce}");
    if callback.scheme() != SECURE_SCHEME {
        query.push_str(&format!("&{PARAM_UNSECURE}=1"));
    }

    Ok(format!("{BITID_SCHEME}://{host_port}{path}?{query}"))
}

/// `true` iff `bitid_uri` is a structurally valid challenge for `callback_uri`.
pub fn uri_valid(bitid_uri: &str, callback_uri: &str) -> bool {
    let (Ok(bitid), Ok(callback)) = (parse_url(bitid_uri), parse_url(callback_uri)) else {
        return false;
    };

    let scheme_ok = bitid.scheme() == BITID_SCHEME;
    let host_ok = bitid.host_str() == callback.host_str() && bitid.port() == callback.port();
    let path_ok = bitid.path() == callback.path();

    let nonce_ok = extract_nonce(bitid_uri)
        .map(|n| !n.is_empty())
        .unwrap_or(false);

    let callback_is_unsecure = callback.scheme() != SECURE_SCHEME;
    let unsecure_param = extract_unsecure(bitid_uri);
    let unsecure_ok = if callback_is_unsecure {
        unsecure_param.as_deref() == Some("1")
    } else {
        unsecure_param.is_none()
    };

    scheme_ok && host_ok && path_ok && nonce_ok && unsecure_ok
}

/// The reserved characters `urllib.parse.quote`'s default `safe='/'` leaves
/// unescaped: alphanumerics, `_ . - ~` and `/`.
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Returns a URL pointing at an external QR-code renderer for `bitid_uri`.
/// This library never renders an image itself.
pub fn qrcode(bitid_uri: &str) -> String {
    let encoded = percent_encoding::utf8_percent_encode(bitid_uri, QUOTE_SAFE);
    format!("{QRCODE_SERVICE_URI}{encoded}")
}
