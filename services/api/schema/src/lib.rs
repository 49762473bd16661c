pub mod favorites;
pub mod recovery_codes;
pub mod stories;
pub mod users;
