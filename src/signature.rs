//! Request signing.
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Sign `body` with `secret`, returning `sha256=<lowercase hex HMAC-SHA256>`.
pub fn sign(secret: &[u8], body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| Error::InvalidSigningSecret)?;
    mac.update(body);
    let digest = mac.finalize().into_bytes();

    Ok(format!("{SIGNATURE_PREFIX}{}", hex::encode(digest)))
}
