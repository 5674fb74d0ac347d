pub mod category;
pub mod page;
pub mod project;
pub mod user;

pub use category::*;
pub use page::*;
pub use project::*;
pub use user::*;
