pub mod articles;
pub mod bulk;
pub mod export;
pub mod favorites;
pub mod migration;
pub mod pages;
pub mod search;
pub mod tags;
