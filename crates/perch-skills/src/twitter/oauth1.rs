//! OAuth 1.0a request signing (RFC 5849) with HMAC-SHA1.
//!
//! Only what the `tweet` skill needs: build the signature base string from
//! the method, the bare endpoint URL, and the combined oauth/query
//! parameters, sign it with the consumer and token secrets, and render the
//! `Authorization: OAuth ...` header.

use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Static OAuth1 credentials read from the secret store.
#[derive(Debug, Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode per RFC 3986, the strict form OAuth requires
/// (spaces become `%20`, never `+`).
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Build the signature base string: METHOD&encoded-url&encoded-params,
/// parameters sorted after encoding.
fn signature_base(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// Sign a request with a caller-supplied nonce and timestamp and render
/// the `OAuth` authorization header value.
///
/// `url` is the endpoint without its query string; `query` is the query
/// parameters (they participate in the signature).
pub fn sign_with(
    creds: &OAuth1Credentials,
    method: &str,
    url: &str,
    query: &[(String, String)],
    nonce: &str,
    timestamp: u64,
) -> String {
    let mut params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), creds.consumer_key.clone()),
        ("oauth_nonce".into(), nonce.to_string()),
        ("oauth_signature_method".into(), "HMAC-SHA1".into()),
        ("oauth_timestamp".into(), timestamp.to_string()),
        ("oauth_token".into(), creds.access_token.clone()),
        ("oauth_version".into(), "1.0".into()),
    ];
    params.extend(query.iter().cloned());

    let base = signature_base(method, url, &params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(&creds.consumer_secret),
        percent_encode(&creds.access_token_secret)
    );
    let key = ring::hmac::Key::new(
        ring::hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        signing_key.as_bytes(),
    );
    let tag = ring::hmac::sign(&key, base.as_bytes());
    let signature = base64::engine::general_purpose::STANDARD.encode(tag.as_ref());

    // Only oauth_* parameters plus the signature go into the header.
    let mut header_params: Vec<(String, String)> = params
        .into_iter()
        .filter(|(k, _)| k.starts_with("oauth_"))
        .collect();
    header_params.push(("oauth_signature".into(), signature));
    header_params.sort();

    let rendered = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {rendered}")
}

/// Sign a request with a fresh nonce and the current time.
pub fn authorization_header(
    creds: &OAuth1Credentials,
    method: &str,
    url: &str,
    query: &[(String, String)],
) -> String {
    let nonce = nonce();
    let timestamp = chrono::Utc::now().timestamp().max(0) as u64;
    sign_with(creds, method, url, query, &nonce, timestamp)
}

fn nonce() -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
