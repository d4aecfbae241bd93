//! Account signup, login and profile.

pub mod service;

pub use service::{Credentials, LoginOutcome, UserService};
