//! Sharing roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role granted on a shared file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read access.
    Viewer,
    /// Read and write access.
    Editor,
}

impl Role {
    /// Whether this role grants everything `required` grants.
    ///
    /// `Editor` is a strict superset of `Viewer`.
    pub fn allows(&self, required: Role) -> bool {
        match required {
            Role::Viewer => true,
            Role::Editor => matches!(self, Role::Editor),
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = zenith_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            _ => Err(zenith_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: viewer, editor"
            ))),
        }
    }
}
