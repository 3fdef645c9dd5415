//! Solana address validation.
//!
//! An account address is the base58 (bitcoin alphabet) encoding of a 32-byte
//! public key. A string is valid exactly when it decodes to 32 bytes; nothing
//! is trimmed or normalized first.

use thiserror::Error;

/// Number of raw bytes behind an account address.
pub const ADDRESS_BYTES: usize = 32;

/// Why a string was rejected as an account address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("address is not valid base58: {0}")]
    InvalidBase58(String),
    #[error("address must decode to {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Decode an address string into its raw public key bytes.
pub fn decode(raw: &str) -> Result<[u8; ADDRESS_BYTES], AddressError> {
    if raw.is_empty() {
        return Err(AddressError::Empty);
    }

    let decoded = bs58::decode(raw)
        .into_vec()
        .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

    let actual = decoded.len();
    decoded
        .try_into()
        .map_err(|_| AddressError::InvalidLength {
            expected: ADDRESS_BYTES,
            actual,
        })
}

/// Check whether `raw` is a syntactically valid account address.
///
/// Never panics: decode failure is the negative answer.
///
/// ```
/// use solantics_explorer::identifier::validate;
///
/// assert!(validate("So11111111111111111111111111111111111111112"));
/// assert!(!validate("not-a-real-address"));
/// ```
pub fn validate(raw: &str) -> bool {
    decode(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";
    const BONK: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
    const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";

    #[test]
    fn test_accepts_known_addresses() {
        assert!(validate(WSOL));
        assert!(validate(BONK));
        assert!(validate(SYSTEM_PROGRAM));
        assert!(validate("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"));
        assert!(validate("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
    }

    #[test]
    fn test_decodes_to_public_key_bytes() {
        assert_eq!(decode(SYSTEM_PROGRAM).unwrap(), [0u8; ADDRESS_BYTES]);

        let wsol = decode(WSOL).unwrap();
        assert_eq!(wsol.len(), ADDRESS_BYTES);
        // Round-trip through the encoder gives back the exact input.
        assert_eq!(bs58::encode(wsol).into_string(), WSOL);
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert!(!validate("not-a-real-address"));
        // 0, O, I and l are not part of the base58 alphabet.
        assert!(!validate("0o11111111111111111111111111111111111111112"));
        assert!(!validate("So1111111111111111111111111111111111111111I"));
        assert!(matches!(
            decode("not-a-real-address"),
            Err(AddressError::InvalidBase58(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_length() {
        // 31 and 33 leading-zero bytes.
        assert_eq!(
            decode("1111111111111111111111111111111"),
            Err(AddressError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
        assert!(!validate("111111111111111111111111111111111"));
        // Valid base58, one byte too long.
        assert!(!validate("So11111111111111111111111111111111111111112a"));
        // Valid base58, one byte too short.
        assert!(!validate("So1111111111111111111111111111111111111111"));
    }

    #[test]
    fn test_does_not_normalize_input() {
        assert!(!validate(&format!(" {}", WSOL)));
        assert!(!validate(&format!("{}\n", WSOL)));
        // Case matters: the lowercased string is a different key.
        let lowered = WSOL.to_lowercase();
        assert_ne!(decode(&lowered).ok(), decode(WSOL).ok());
    }

    #[test]
    fn test_empty_and_odd_input_never_panics() {
        assert_eq!(decode(""), Err(AddressError::Empty));
        assert!(!validate(""));
        assert!(!validate("   "));
        assert!(!validate("ʕ•ᴥ•ʔ"));
        assert!(!validate(&"z".repeat(10_000)));
    }
}
