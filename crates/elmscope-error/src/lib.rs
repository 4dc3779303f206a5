//! # elmscope-error
//!
//! One error type for every fallible boundary of elmscope: tree providers,
//! settings loading, rename validation and the command-line driver.
//!
//! - **ErrorKind**: what went wrong (e.g. `ParseFailed`, `ConfigInvalid`)
//! - **ErrorStatus**: whether retrying can help
//! - **Context**: operation name plus key/value pairs for locating the cause
//! - **Source**: the wrapped underlying error, if any
//!
//! The binding engine itself never fails; absence is reported as an empty
//! sequence or an unresolved reference, not as an `Error`.
//!
//! ```rust
//! use elmscope_error::{Error, ErrorKind};
//!
//! fn load() -> elmscope_error::Result<()> {
//!     Err(Error::new(ErrorKind::ParseFailed, "unbalanced parenthesis")
//!         .with_operation("notation::parse")
//!         .with_context("offset", "42"))
//! }
//! # assert!(load().is_err());
//! ```

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the elmscope `Error`.
pub type Result<T> = std::result::Result<T, Error>;
