//! OAuth 1.0a request signing (HMAC-SHA1), as required by the v1.1 API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use core_logic::Credential;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;

// RFC 3986 unreserved characters stay as-is.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Builds the `Authorization` header for one request.
///
/// `params` are the query or form parameters sent with the request; they
/// take part in the signature.
pub fn authorization_header(
    credential: &Credential,
    method: &str,
    url: &str,
    params: &[(String, String)],
) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    authorization_header_with(credential, method, url, params, &nonce, Utc::now().timestamp())
}

pub fn authorization_header_with(
    credential: &Credential,
    method: &str,
    url: &str,
    params: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> String {
    let mut oauth = oauth_params(credential, nonce, timestamp);
    let base = signature_base_string(method, url, params, &oauth);
    oauth.push(("oauth_signature", sign(credential, &base)));

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

fn oauth_params(credential: &Credential, nonce: &str, timestamp: i64) -> Vec<(&'static str, String)> {
    vec![
        ("oauth_consumer_key", credential.consumer_key.clone()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", "HMAC-SHA1".to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_token", credential.access_token.clone()),
        ("oauth_version", "1.0".to_string()),
    ]
}

pub fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(String, String)],
    oauth: &[(&'static str, String)],
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(oauth.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&joined)
    )
}

fn sign(credential: &Credential, base: &str) -> String {
    let key = format!(
        "{}&{}",
        encode(&credential.consumer_secret),
        encode(&credential.access_token_secret)
    );
    let mut mac =
        Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
