// HTTP routes
pub mod cache;
pub mod health;
pub mod jobs;

pub use cache::*;
pub use health::*;
pub use jobs::*;
