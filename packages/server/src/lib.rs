// Phone Verification - API Core
//
// This crate provides the backend for phone-number verification: a client asks
// for an SMS code, then redeems it for a session and its profile. OTP delivery
// and session issuance are delegated to the identity provider.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
