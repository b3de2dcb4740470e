//! Shared helpers: identifier parsing, password hashing, token codec.

pub mod id;
pub mod password;
pub mod token;

pub use id::parse_id;
pub use password::{HashScheme, PasswordHasher};
pub use token::TokenCodec;
