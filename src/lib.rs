//! Userexit: typed, user-facing exits for command-line programs.
//!
//! Expected failures (bad input, missing files, environment problems) are
//! declared once as [`Variant`]s with a stable exit status and a message
//! template. Application code raises them as ordinary errors; the
//! [`boundary`] around `main` renders the message to stderr and exits with
//! the declared status, without a backtrace. Errors that are not user exits
//! pass through the boundary untouched.
//!
//! ```no_run
//! use userexit::{Variant, handle};
//!
//! static BAD_INPUT: Variant = Variant::new(
//!     "BadInputError",
//!     Some(3),
//!     Some("
//!         Input {!r} should be set to {!r}. Please adjust
//!         your settings and re-run.
//!     "),
//! );
//!
//! fn run() -> anyhow::Result<()> {
//!     let color = "blue";
//!     if color != "red" {
//!         return Err(BAD_INPUT.raise().arg("color").arg("red").into());
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     handle(run)()
//! }
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod registry;
pub mod template;
pub mod user_exit;
pub mod variant;

#[cfg(test)]
mod test_support;

pub use boundary::{Boundary, Intercept, Outcome, Termination, handle, handle_args};
pub use config::{Catalog, Settings};
pub use error::{ConfigError, Defect, RenderError};
pub use registry::Registry;
pub use user_exit::{Arg, UserExit};
pub use variant::{ABORT, NORMAL_EXIT, Variant};
