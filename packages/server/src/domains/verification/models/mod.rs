pub mod phone_number;
pub mod profile;

pub use phone_number::*;
pub use profile::*;
