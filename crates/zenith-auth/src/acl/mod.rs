//! File access checks for owners and grantees.

pub mod checker;

pub use checker::AclChecker;
