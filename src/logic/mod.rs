pub mod branch_builder;
pub mod catalogue_resolver;
pub mod config_resolver;
pub mod evolution_builder;
pub mod extractor;
pub mod interface_resolver;
pub mod pipeline;
pub mod summary;

pub use branch_builder::*;
pub use catalogue_resolver::*;
pub use config_resolver::*;
pub use evolution_builder::*;
pub use extractor::*;
pub use interface_resolver::*;
pub use pipeline::*;
pub use summary::*;
