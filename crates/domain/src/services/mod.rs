pub mod like_service;
pub mod project_query_service;
pub mod project_service;
pub mod user_service;

pub use like_service::LikeService;
pub use project_query_service::{ProjectQueryService, DEFAULT_MAX_PAGE_SIZE};
pub use project_service::ProjectService;
pub use user_service::UserService;
