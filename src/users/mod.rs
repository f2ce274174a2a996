// Public API - what other modules can use
pub use errors::UserError;
pub use handlers::{get_user, register_user};
pub use models::{display_name, UserModel};
pub use repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
pub use service::UserService;

// Internal modules
mod errors;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
