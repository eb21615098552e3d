//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Storage` as the first argument.

pub mod article_repo;
pub mod favorite_repo;
pub mod tag_repo;

pub use article_repo::ArticleRepo;
pub use favorite_repo::FavoriteRepo;
pub use tag_repo::TagRepo;
