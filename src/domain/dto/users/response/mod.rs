pub mod user_response;
pub mod kakao_oauth_response;

pub use user_response::*;
pub use kakao_oauth_response::*;
