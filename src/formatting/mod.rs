// Classifying parsed ConTeXt for display

mod highlighter;
mod syntax;

// Re-export all public symbols
pub use highlighter::*;
pub use syntax::*;
