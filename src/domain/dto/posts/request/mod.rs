pub mod post_query;
pub mod post_request;

pub use post_query::{CreatorQuery, OwnershipQuery, PageQuery, PostListQuery, PostSearchQuery};
pub use post_request::PostRequest;
