//! Mint submission subsystem.
//!
//! # Data Flow
//! ```text
//! validated request (recipient, token URI)
//!     → events.rs (ABI-encode the mint call)
//!     → submitter.rs (estimate, price, sign, broadcast, confirm)
//!     → events.rs (token id from Transfer-from-zero logs)
//!     → classify.rs (failure text → operator-actionable message)
//!     → MintOutcome
//! ```
//!
//! Input format validation is the caller's job (the HTTP boundary uses the
//! predicates in `validate.rs`); the submitter assumes well-formed inputs.

pub mod classify;
pub mod events;
pub mod submitter;
pub mod types;
pub mod validate;

pub use submitter::MintSubmitter;
pub use types::MintOutcome;
pub use validate::{is_valid_address, is_valid_token_uri};
