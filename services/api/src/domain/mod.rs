pub mod phone;
pub mod repository;
pub mod types;
