pub mod project_repository;
pub mod user_repository;

pub use project_repository::ProjectRepository;
pub use user_repository::UserRepository;
