//! Liveness.

/// GET /
pub async fn root() -> &'static str {
    "Backend Server is Running!"
}
