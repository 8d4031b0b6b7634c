//! OAuth 1.0a request signing (HMAC-SHA1), as required by the Twitter/X user-context API.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Consumer + access-token credential pair.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

/// RFC 3986 percent-encoding (everything except unreserved characters).
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Signature base string: METHOD&url&sorted-encoded-params.
pub fn signature_base(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// Base64 HMAC-SHA1 of the base string keyed by both secrets.
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| anyhow!("HMAC key error: {e}"))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Build the `Authorization: OAuth ...` header value.
///
/// `request_params` are query/form parameters that take part in the
/// signature; JSON bodies do not.
pub fn authorization_header(
    creds: &OAuthCredentials,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let timestamp = timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", creds.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", creds.token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut all: Vec<(&str, &str)> = oauth_params.to_vec();
    all.extend_from_slice(request_params);
    let base = signature_base(method, url, &all);
    let signature = sign(&base, &creds.consumer_secret, &creds.token_secret)?;

    let mut header: Vec<(&str, &str)> = oauth_params.to_vec();
    header.push(("oauth_signature", signature.as_str()));
    header.sort();

    let fields = header
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {}", fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the Twitter developer documentation.
    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const PARAMS: &[(&str, &str)] = &[
        ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ("include_entities", "true"),
        ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
        ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", "1318622958"),
        ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
        ("oauth_version", "1.0"),
    ];

    #[test]
    fn base_string_matches_reference() {
        let base = signature_base("post", URL, PARAMS);
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn signature_matches_reference() {
        let base = signature_base("POST", URL, PARAMS);
        let sig = sign(
            &base,
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
        .unwrap();
        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn header_lists_sorted_oauth_fields() {
        let creds = OAuthCredentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            token: "tk".into(),
            token_secret: "ts".into(),
        };
        let header =
            authorization_header(&creds, "POST", "https://api.twitter.com/2/tweets", &[], "abc", 1)
                .unwrap();
        assert!(header.starts_with(
            "OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"abc\", oauth_signature=\""
        ));
        assert!(
            header.ends_with("oauth_timestamp=\"1\", oauth_token=\"tk\", oauth_version=\"1.0\"")
        );
    }

    #[test]
    fn nonces_are_alphanumeric() {
        let n = nonce();
        assert_eq!(n.len(), 32);
        assert!(n.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
