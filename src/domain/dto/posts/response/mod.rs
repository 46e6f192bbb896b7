pub mod post_response;

pub use post_response::{CreatorResponse, PostResponse};
