//! Content digests and `#hash#` substitution in target filenames.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::BundleError;

/// Token in a target filename replaced by the bundle content digest.
pub const HASH_PLACEHOLDER: &str = "#hash#";

/// Substitute every `#hash#` occurrence with the content digest.
///
/// Filenames without the placeholder are returned unchanged and no digest
/// is computed.
pub fn resolve_hashed_file_name(
    file_name: &str,
    content: &str,
    algorithm: &str,
) -> Result<String, BundleError> {
    if !file_name.contains(HASH_PLACEHOLDER) {
        return Ok(file_name.to_string());
    }
    let digest = digest_hex(content.as_bytes(), algorithm)?;
    Ok(file_name.replace(HASH_PLACEHOLDER, &digest))
}

/// Lowercase hex digest of `bytes` under the named algorithm.
///
/// Accepted names are `MD5`, `SHA-1` and `SHA-256`, case-insensitive and
/// with or without the dash. Anything else is a fatal configuration error.
pub fn digest_hex(bytes: &[u8], algorithm: &str) -> Result<String, BundleError> {
    let normalized = algorithm.to_ascii_lowercase().replace('-', "");
    match normalized.as_str() {
        "md5" => Ok(hex::encode(Md5::digest(bytes))),
        "sha1" => Ok(hex::encode(Sha1::digest(bytes))),
        "sha256" => Ok(hex::encode(Sha256::digest(bytes))),
        _ => Err(BundleError::UnsupportedHashAlgorithm {
            name: algorithm.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_substitution_produces_32_lowercase_hex_chars() {
        let resolved = resolve_hashed_file_name("app-#hash#.js", "x", "MD5").unwrap();
        let digest = resolved
            .strip_prefix("app-")
            .and_then(|rest| rest.strip_suffix(".js"))
            .unwrap();
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn every_occurrence_receives_the_same_digest() {
        let resolved = resolve_hashed_file_name("#hash#/app-#hash#.js", "content", "MD5").unwrap();
        let digest = digest_hex(b"content", "MD5").unwrap();
        assert_eq!(resolved, format!("{digest}/app-{digest}.js"));
    }

    #[test]
    fn digests_are_deterministic() {
        assert_eq!(
            digest_hex(b"payload", "SHA-256").unwrap(),
            digest_hex(b"payload", "sha256").unwrap()
        );
        assert_eq!(digest_hex(b"payload", "SHA-256").unwrap().len(), 64);
        assert_eq!(digest_hex(b"payload", "SHA-1").unwrap().len(), 40);
    }

    #[test]
    fn filenames_without_placeholder_are_untouched() {
        assert_eq!(
            resolve_hashed_file_name("app.js", "content", "MD5").unwrap(),
            "app.js"
        );
    }

    #[test]
    fn unsupported_algorithms_are_fatal() {
        let err = resolve_hashed_file_name("app-#hash#.js", "x", "CRC32").unwrap_err();
        assert!(matches!(err, BundleError::UnsupportedHashAlgorithm { .. }));
    }
}
