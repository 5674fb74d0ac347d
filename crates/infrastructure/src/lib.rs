pub mod database;
pub mod image_host;
pub mod repositories;

pub use database::{Database, SqlitePool};
pub use image_host::{CloudinaryConfig, CloudinaryImageHost, DisabledImageHost, DEFAULT_CLOUDINARY_API};
pub use repositories::*;
