pub mod article;
pub mod favorite;
pub mod migration;
pub mod tag;
