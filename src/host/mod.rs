pub mod github;
pub mod memory;
pub mod traits;

pub use github::*;
pub use memory::*;
pub use traits::*;
