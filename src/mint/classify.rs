//! Best-effort classification of chain errors into operator-actionable
//! messages.
//!
//! # Design Decisions
//! - The upstream stack reports most failures as free text, not structured
//!   codes, so classification is substring matching over the error message.
//!   That makes it inherently fragile against upstream wording changes: the
//!   table below is ordered, advisory, and open for extension.
//! - Anything unmatched passes through verbatim rather than being collapsed
//!   into a generic message.

use crate::blockchain::types::ChainError;

/// What to report when a rule's needle is found in the error text.
enum Classification {
    /// A fixed replacement message.
    Static(&'static str),
    /// Extract a revert reason from the text, falling back to a generic
    /// contract-error message.
    RevertReason,
}

/// Ordered rule table. First match wins.
const RULES: &[(&str, Classification)] = &[
    ("insufficient funds", Classification::Static("Insufficient funds for gas")),
    ("execution reverted", Classification::RevertReason),
    ("403", Classification::Static("RPC access denied - check your API key")),
];

/// Map a chain error to the message relayed to callers.
pub fn classify(error: &ChainError) -> String {
    classify_message(&error.to_string())
}

/// Classify a raw error string. First matching rule wins; unmatched text is
/// passed through unchanged.
pub fn classify_message(raw: &str) -> String {
    for (needle, classification) in RULES {
        if raw.contains(needle) {
            return match classification {
                Classification::Static(message) => (*message).to_string(),
                Classification::RevertReason => format!(
                    "Smart contract error: {}",
                    extract_revert_reason(raw).unwrap_or("Contract reverted")
                ),
            };
        }
    }
    raw.to_string()
}

/// Pull a revert reason out of a `reason: <text>\n` fragment, the shape
/// upstream libraries embed in revert errors. Returns `None` when the
/// fragment is absent or empty.
fn extract_revert_reason(raw: &str) -> Option<&str> {
    let start = raw.find("reason: ")? + "reason: ".len();
    let rest = &raw[start..];
    let end = rest.find('\n')?;
    let reason = rest[..end].trim();
    (!reason.is_empty()).then_some(reason)
}
