pub mod recovery;
pub mod story;
pub mod user;
