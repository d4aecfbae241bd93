//! Data transfer objects for request bodies, query strings and responses.

pub mod request;
pub mod response;
