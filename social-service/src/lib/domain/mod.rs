pub mod follow;
pub mod page;
pub mod post;
pub mod user;
