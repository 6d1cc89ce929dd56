/// Kernel - signing and transport layer for authenticated requests
///
/// The kernel holds everything needed to put a signed request on the wire and
/// nothing about individual endpoints.
///
/// # Architecture
///
/// ## Authentication
/// - `Signer`: Pluggable authentication interface
/// - `HmacSigner`: HMAC-SHA512 over the canonical string-to-sign
/// - `string_to_sign`: `path\n[query\n]timestamp\n[body]`
///
/// ## Transport Layer
/// - `RestClient`: Signed request execution interface
/// - `ReqwestRest`: reqwest-backed implementation
///
/// # Key Principles
///
/// 1. **Sign what you send**: the signed body is moved into the request unchanged
/// 2. **Fail before transmitting**: missing credentials and bad keys never reach the network
/// 3. **No hidden retries**: order creation has side effects, so every failure is returned
///
/// # Usage
/// ```rust,no_run
/// use btcmarkets::core::config::Credentials;
/// use btcmarkets::core::kernel::*;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::from_key_file("keys.conf");
/// let rest = RestClientBuilder::new(RestClientConfig::default())
///     .with_signer(Arc::new(HmacSigner::new(credentials)))
///     .build()?;
///
/// let balance = rest.execute("/account/balance", None).await?;
/// println!("{}", balance);
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, DEFAULT_BASE_URL};
pub use signer::{string_to_sign, HmacSigner, SignatureResult, SignedRequest, Signer};
