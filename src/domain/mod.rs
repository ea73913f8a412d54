pub mod error;
pub mod exercise;
pub mod id;
pub mod repository;
pub mod user;
pub mod validation;
pub mod workout;
