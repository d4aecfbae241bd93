//! File sharing permissions.

pub mod model;
pub mod role;

pub use model::{CreatePermission, Grantee, Permission, PermissionGrant};
pub use role::Role;
