pub mod cmc;
pub mod feed;
pub mod fixer;
pub mod types;
