pub mod sign_up_request;
pub mod auth_request;

pub use sign_up_request::*;
pub use auth_request::*;
