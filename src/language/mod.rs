// Types representing ConTeXt syntax trees

mod error;
pub mod inclusions;
mod tokens;
mod tree;
mod types;

// Re-export all public symbols
pub use error::*;
pub use inclusions::{Inclusion, Language, INCLUSIONS};
pub use tokens::*;
pub use tree::*;
pub use types::*;
