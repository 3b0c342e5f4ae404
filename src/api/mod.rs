pub mod catalog;
pub mod error;
pub mod framework;
pub mod health;
pub mod mapping;
pub mod openapi;
