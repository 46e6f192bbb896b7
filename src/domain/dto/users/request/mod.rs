pub mod login_request;
pub mod signup_request;
pub mod update_user_request;
pub mod user_search_query;

pub use login_request::LoginRequest;
pub use signup_request::SignupRequest;
pub use update_user_request::{UpdateProfileRequest, UpdateUserRequest};
pub use user_search_query::UserSearchQuery;
