pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod prompts;
pub mod reports;
pub mod social;
pub mod users;
