pub mod agents_md;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod schema;
pub mod template;
pub mod types;
pub mod validate;
pub mod workspace;

pub use error::{CspecError, Result};
