//! Base64 armoring for ciphertext
//!
//! RSA ciphertext is raw binary of exactly the key's modulus size. For
//! textual transport and storage (`encrypted-message.txt`) it is armored
//! as standard base64 on a single line.

use crate::error::{ErrorCategory, ErrorKind, Result, RsaboxError};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Wrap ciphertext bytes in armor, returning the armored string
pub fn wrap(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Unwrap an armored string, returning the original ciphertext bytes
///
/// Surrounding ASCII whitespace is tolerated; text files routinely gain a
/// trailing newline from editors and shell redirection.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    let body = STANDARD.decode(armored.trim_ascii()).map_err(|e| {
        RsaboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::ArmoringDecode,
            format!("base64 decoding failed: {}", e),
            e,
        )
    })?;
    Ok(body)
}
