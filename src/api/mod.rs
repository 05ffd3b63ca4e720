pub mod document;
pub mod error;
pub mod health;
pub mod openapi;
pub mod screening;
