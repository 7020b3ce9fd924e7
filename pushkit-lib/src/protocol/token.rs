//! Identifier normalization and token hashing.
//!
//! The token is a short per-user directory name used in storage paths so the
//! raw identifier never appears in the shared database.

use sha2::{Digest, Sha256};

use crate::{PushkitError, Result};

/// Number of hex characters kept from the SHA-256 digest (48 bits).
pub const TOKEN_LENGTH: usize = 12;

/// Size of the token space, `16^TOKEN_LENGTH`.
const TOKEN_SPACE: f64 = 281_474_976_710_656.0;

/// Opaque, fixed-length token derived from a user identifier.
///
/// Always [`TOKEN_LENGTH`] lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HashedToken(String);

impl HashedToken {
    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for HashedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HashedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a user identifier.
///
/// Performs:
/// 1. Trim surrounding whitespace
/// 2. Reject empty input
/// 3. Lowercase one character at a time with the simple Unicode mapping,
///    independent of locale
///
/// The fold never changes the character count and ignores context: a final
/// `Σ` becomes `σ`, never `ς`, and `İ` becomes a plain `i`.
///
/// # Errors
///
/// Returns `PushkitError::InvalidArgument` if nothing is left after trimming.
///
/// # Example
///
/// ```
/// use pushkit_lib::protocol::normalize_identifier;
///
/// assert_eq!(normalize_identifier("  UserA ").unwrap(), "usera");
/// assert!(normalize_identifier("   ").is_err());
/// ```
pub fn normalize_identifier(identifier: &str) -> Result<String> {
    let trimmed = identifier.trim();

    if trimmed.is_empty() {
        return Err(PushkitError::invalid_argument(
            "identifier",
            "must not be empty or whitespace",
        ));
    }

    Ok(trimmed.chars().map(fold_char).collect())
}

fn fold_char(c: char) -> char {
    // The only character whose full lowercase mapping is longer than one.
    if c == '\u{130}' {
        return 'i';
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Compute the token for a user identifier.
///
/// `token = hex(sha256(utf8(normalize(identifier))))[..12]`
///
/// # Errors
///
/// Returns `PushkitError::InvalidArgument` if the identifier is empty or
/// whitespace-only.
///
/// # Example
///
/// ```
/// use pushkit_lib::protocol::hash_identifier;
///
/// let token = hash_identifier("user123").unwrap();
/// assert_eq!(token.as_str(), "e606e38b0d8c");
/// ```
pub fn hash_identifier(identifier: &str) -> Result<HashedToken> {
    let normalized = normalize_identifier(identifier)?;
    let token = compute_token(&normalized)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(token = %token, "hashed identifier");

    Ok(token)
}

fn compute_token(normalized: &str) -> Result<HashedToken> {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hex::encode(hasher.finalize());

    digest
        .get(..TOKEN_LENGTH)
        .map(|prefix| HashedToken(prefix.to_string()))
        .ok_or_else(|| PushkitError::Internal("sha256 digest shorter than token".into()))
}

/// Expected number of colliding pairs among `population` distinct identifiers.
///
/// Birthday bound: `n(n-1)/2 / 16^TOKEN_LENGTH`.
pub fn expected_collisions(population: u64) -> f64 {
    let n = population as f64;
    n * (n - 1.0) / 2.0 / TOKEN_SPACE
}

/// Probability that at least one collision exists among `population` identifiers.
pub fn collision_probability(population: u64) -> f64 {
    1.0 - (-expected_collisions(population)).exp()
}
