//! # zenith-auth
//!
//! Authentication and authorization for Zenith Drive.
//!
//! ## Modules
//!
//! - `jwt`: bearer credential issuance and validation
//! - `password`: Argon2id password hashing
//! - `acl`: owner and grant checks on files

pub mod acl;
pub mod jwt;
pub mod password;

pub use acl::AclChecker;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
