//! OAuth 1.0a user-context request signing (HMAC-SHA1).

use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use tweetpulse_core::{CoreError, TwitterApiError, TwitterCredentials};
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal, everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct OAuth1Signer {
    credentials: TwitterCredentials,
}

impl OAuth1Signer {
    pub fn new(credentials: TwitterCredentials) -> Self {
        Self { credentials }
    }

    /// Build the `Authorization` header for a request with a fresh nonce and timestamp.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        params: &[(&str, String)],
    ) -> Result<String, CoreError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_with(method, url, params, &nonce, timestamp)
    }

    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        params: &[(&str, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, CoreError> {
        let consumer_key = require(&self.credentials.api_key, "TWITTER_API_KEY")?;
        let consumer_secret = require(&self.credentials.api_secret, "TWITTER_API_SECRET")?;
        let token = require(&self.credentials.access_token, "TWITTER_ACCESS_TOKEN")?;
        let token_secret = require(&self.credentials.access_secret, "TWITTER_ACCESS_SECRET")?;

        let mut oauth_params: Vec<(&str, String)> = vec![
            ("oauth_consumer_key", consumer_key.to_string()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", token.to_string()),
            ("oauth_version", "1.0".to_string()),
        ];

        let mut signed: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        signed.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));
        signed.extend(oauth_params.iter().map(|(k, v)| (k.to_string(), v.clone())));

        let base = signature_base_string(method, url, &signed);
        let signature = sign(&base, consumer_secret, token_secret);
        oauth_params.push(("oauth_signature", signature));
        oauth_params.sort();

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }
}

fn require<'a>(value: &'a Option<String>, var_name: &str) -> Result<&'a str, CoreError> {
    value.as_deref().ok_or_else(|| {
        CoreError::TwitterApi(TwitterApiError::AuthenticationFailed {
            reason: format!("{} is not set", var_name),
        })
    })
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// `scheme://host[:port]/path` with scheme and host lowercased, no query or fragment.
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    format!("{}://{}{}{}", url.scheme(), host, port, url.path())
}

pub(crate) fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
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
        encode(&base_url(url)),
        encode(&param_string)
    )
}

pub(crate) fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
