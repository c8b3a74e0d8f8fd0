pub mod error;
pub mod evolution;
pub mod ids;
pub mod manifest;
pub mod refs;
pub mod user_context;

pub use error::*;
pub use evolution::*;
pub use ids::*;
pub use manifest::*;
pub use refs::*;
pub use user_context::*;
