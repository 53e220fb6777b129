//! A C to V translator driven by the clang JSON AST.

/// Contains the AST node model and the cursor protocol.
pub mod ast;
/// Contains the code generator.
pub mod codegen;
/// Contains the command-line driver.
pub mod driver;
/// Contains the error types for the application.
pub mod error;
pub mod labels;
pub mod names;
pub mod registry;
pub mod session;
/// Contains the C type conversion rules.
pub mod types;

#[cfg(test)]
mod tests;
