//! Verification domain - phone ownership via SMS one-time codes
//!
//! Responsibilities:
//! - Phone number validation (including provider test numbers)
//! - Starting a verification (provider texts the code)
//! - Redeeming a code for a session and returning the caller's profile
//!
//! The profile row itself is provisioned by a database trigger
//! (see `migrations/`), never from here.

pub mod actions;
pub mod errors;
pub mod models;
pub mod types;

pub use actions::{start_verification, verify_code};
pub use errors::VerificationError;
