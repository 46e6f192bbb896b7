pub mod media_type;
pub mod post;
