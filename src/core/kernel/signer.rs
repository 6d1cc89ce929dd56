use crate::core::config::Credentials;
use crate::core::errors::ExchangeError;
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::header::HeaderValue;
use sha2::Sha512;
use std::collections::HashMap;
use tracing::{debug, trace};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

pub const APIKEY_HEADER: &str = "apikey";
pub const TIMESTAMP_HEADER: &str = "timestamp";
pub const SIGNATURE_HEADER: &str = "signature";

/// Result type for signing operations
pub type SignatureResult = Result<SignedRequest, ExchangeError>;

/// A request that has been signed and is ready to transmit.
///
/// Lives for the duration of one call. `body` holds the exact text that was
/// signed and must be sent unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub path: String,
    pub body: Option<String>,
    pub timestamp: u64,
    pub string_to_sign: String,
    pub signature: String,
    /// Authentication headers: `apikey`, `timestamp`, `signature`
    pub headers: HashMap<String, String>,
}

/// Signer trait for request authentication
pub trait Signer: Send + Sync {
    /// Whether the signer holds a usable API key and private key
    fn has_credentials(&self) -> bool;

    /// Sign a request
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Pre-sorted `key=value&key=value` query, if any
    /// * `body` - Raw request body, if any
    /// * `timestamp` - Request timestamp in milliseconds
    fn sign_request(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        body: Option<&str>,
        timestamp: u64,
    ) -> SignatureResult;
}

/// Build the canonical string-to-sign.
///
/// Format: `path\n[query\n]timestamp\n[body]`. The timestamp line is always
/// terminated; the body, when present, is appended last with no trailing newline.
pub fn string_to_sign(
    path: &str,
    query_string: Option<&str>,
    body: Option<&str>,
    timestamp: u64,
) -> String {
    let mut canonical = String::with_capacity(
        path.len() + query_string.map_or(0, str::len) + body.map_or(0, str::len) + 24,
    );
    canonical.push_str(path);
    canonical.push('\n');
    if let Some(query) = query_string {
        canonical.push_str(query);
        canonical.push('\n');
    }
    canonical.push_str(&timestamp.to_string());
    canonical.push('\n');
    if let Some(body) = body {
        canonical.push_str(body);
    }
    canonical
}

/// HMAC-SHA512 signer keyed by a Base64-encoded private key
pub struct HmacSigner {
    credentials: Credentials,
}

impl HmacSigner {
    /// Create a new HMAC signer
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Compute the Base64 HMAC-SHA512 of `data` keyed by the decoded private key
    pub fn sign(&self, data: &str) -> Result<String, ExchangeError> {
        let key = Zeroizing::new(
            general_purpose::STANDARD
                .decode(self.credentials.private_key())
                .map_err(|e| {
                    ExchangeError::SigningError(format!("Invalid private key encoding: {}", e))
                })?,
        );

        let mut mac = HmacSha512::new_from_slice(&key)
            .map_err(|e| ExchangeError::SigningError(format!("Invalid private key: {}", e)))?;

        mac.update(data.as_bytes());
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl Signer for HmacSigner {
    fn has_credentials(&self) -> bool {
        self.credentials.has_credentials()
    }

    fn sign_request(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        body: Option<&str>,
        timestamp: u64,
    ) -> SignatureResult {
        let api_key = self.credentials.api_key();
        if HeaderValue::from_str(api_key).is_err() {
            return Err(ExchangeError::AuthError(
                "API key contains characters not allowed in a header".to_string(),
            ));
        }

        let string_to_sign = string_to_sign(endpoint, query_string, body, timestamp);
        debug!("String to sign:\n{}", string_to_sign);

        let signature = self.sign(&string_to_sign)?;
        trace!(signature = %signature, "Request signed");

        let timestamp_str = timestamp.to_string();
        let mut headers = HashMap::new();
        headers.insert(APIKEY_HEADER.to_string(), api_key.to_string());
        headers.insert(TIMESTAMP_HEADER.to_string(), timestamp_str);
        headers.insert(SIGNATURE_HEADER.to_string(), signature.clone());

        Ok(SignedRequest {
            path: endpoint.to_string(),
            body: body.map(str::to_string),
            timestamp,
            string_to_sign,
            signature,
            headers,
        })
    }
}
