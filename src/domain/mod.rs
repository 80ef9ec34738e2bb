pub mod errors;
pub mod event;
pub mod prompt;
pub mod report;
pub mod social;
pub mod user;
