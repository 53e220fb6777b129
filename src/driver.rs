//! Command-line driver: inputs, the clang front end and output files.

pub mod cli;
pub mod compiler;
pub mod frontend;
pub(crate) mod output;

pub use cli::{Cli, TranslateConfig};
pub use compiler::{DriverError, RunOutputs, TranslateDriver};
pub use frontend::{ClangFrontend, FrontendError};
