//! # zenith-service
//!
//! Business logic service layer for Zenith Drive. Each service
//! orchestrates the store traits, the object store and the auth
//! primitives to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references, so tests can swap any
//! store or provider for an in-memory or failing fake.

pub mod billing;
pub mod content;
pub mod context;
pub mod file;
pub mod folder;
pub mod share;
pub mod star;
pub mod user;

pub use billing::{BillingService, PaymentGateway, StripeGateway};
pub use content::ContentService;
pub use context::RequestContext;
pub use file::FileService;
pub use folder::FolderService;
pub use share::ShareService;
pub use star::StarService;
pub use user::UserService;
