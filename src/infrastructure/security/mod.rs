pub mod password;
pub mod tokens;
pub mod two_factor;
