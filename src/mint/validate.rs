//! Input format predicates exposed to the HTTP boundary.
//!
//! The submitter itself does not re-validate; callers are expected to run
//! these checks before invoking it.

/// True iff the string is `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True iff the URI is non-empty and uses a supported scheme.
///
/// Accepted schemes: `ipfs://`, `http://`, `https://`.
pub fn is_valid_token_uri(uri: &str) -> bool {
    !uri.is_empty()
        && (uri.starts_with("ipfs://") || uri.starts_with("http://") || uri.starts_with("https://"))
}
