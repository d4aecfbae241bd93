//! PostgreSQL implementations of the store traits.

pub mod content;
pub mod file;
pub mod folder;
pub mod permission;
pub mod star;
pub mod user;

pub use content::ContentRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
pub use permission::PermissionRepository;
pub use star::StarRepository;
pub use user::UserRepository;
