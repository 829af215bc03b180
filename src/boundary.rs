//! Entry-point boundary.
//!
//! The boundary is the only place a [`UserExit`] turns into process
//! behaviour. Application code returns exits as ordinary errors; the boundary
//! wrapped around `main` renders the message to stderr and ends the process
//! with the variant's status. Every other error passes through untouched so
//! genuine bugs keep their full diagnostics.
//!
//! Two ways to use it:
//!
//! - [`handle`] / [`handle_args`] wrap an entry point and call
//!   `std::process::exit` on a user exit.
//! - [`Boundary::run`] returns an [`Outcome`], which can be returned from
//!   `main` directly (it implements [`std::process::Termination`]) or
//!   inspected in tests.

use crate::config::Settings;
use crate::error::Defect;
use crate::exit_codes;
use crate::user_exit::UserExit;
use std::fmt::Debug;
use std::io::{self, Write};
use std::process::ExitCode;

/// Errors that may carry a [`UserExit`].
pub trait Intercept {
    /// The exit to terminate with, or `None` to let the error propagate.
    fn user_exit(&self) -> Option<&UserExit>;
}

impl Intercept for UserExit {
    fn user_exit(&self) -> Option<&UserExit> {
        Some(self)
    }
}

impl Intercept for anyhow::Error {
    fn user_exit(&self) -> Option<&UserExit> {
        self.downcast_ref::<UserExit>()
    }
}

impl Intercept for Box<dyn std::error::Error + Send + Sync + 'static> {
    fn user_exit(&self) -> Option<&UserExit> {
        self.downcast_ref::<UserExit>()
    }
}

impl Intercept for Box<dyn std::error::Error + 'static> {
    fn user_exit(&self) -> Option<&UserExit> {
        self.downcast_ref::<UserExit>()
    }
}

/// A rendered exit, ready to be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub status: i32,
    pub message: Option<String>,
}

impl Termination {
    /// Resolve the status and render the message of `exit`.
    ///
    /// # Returns
    ///
    /// * `Ok(Termination)` - Status and optional message
    /// * `Err(Defect)` - The variant has no status or its template is broken
    pub fn from_user_exit(exit: &UserExit, settings: &Settings) -> Result<Self, Defect> {
        let status = exit.exit_status()?;
        let message = exit.render(settings).map_err(|source| Defect::Render {
            variant: exit.name().to_string(),
            source,
        })?;
        Ok(Self { status, message })
    }

    /// Write the message, newline-terminated, to `stream`.
    ///
    /// Nothing is written for a silent exit or an empty message.
    pub fn write_to<W: Write>(&self, stream: &mut W) -> io::Result<()> {
        let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) else {
            return Ok(());
        };
        stream.write_all(message.as_bytes())?;
        if !message.ends_with('\n') {
            stream.write_all(b"\n")?;
        }
        stream.flush()
    }

    pub fn exit_code(&self) -> ExitCode {
        exit_code(self.status)
    }
}

/// Status a process can report for `status`; anything outside 0..=255 becomes 1.
pub fn reportable_status(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(exit_codes::ABORT as u8)
}

/// Map a status to an [`ExitCode`].
pub fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(reportable_status(status))
}

/// What happened to a wrapped entry point.
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// The entry point returned normally.
    Completed(T),
    /// A user exit was reported; the process should exit with `status`.
    Terminated { status: i32 },
    /// An unrecognized error, exactly as the entry point returned it.
    Propagated(E),
    /// A user exit whose variant is broken.
    Defective(Defect),
}

impl<T, E> Outcome<T, E> {
    /// Exit status for a terminated outcome.
    pub fn status(&self) -> Option<i32> {
        match self {
            Outcome::Terminated { status } => Some(*status),
            _ => None,
        }
    }

    /// Finish the outcome in-process.
    ///
    /// A terminated outcome exits the process; a defective one panics. Only
    /// completed and propagated outcomes return.
    pub fn finish(self) -> Result<T, E> {
        match self {
            Outcome::Completed(value) => Ok(value),
            Outcome::Propagated(err) => Err(err),
            Outcome::Terminated { status } => std::process::exit(reportable_status(status).into()),
            Outcome::Defective(defect) => panic!("{defect}"),
        }
    }
}

impl<T, E> std::process::Termination for Outcome<T, E>
where
    T: std::process::Termination,
    E: Debug,
{
    fn report(self) -> ExitCode {
        match self {
            Outcome::Completed(value) => value.report(),
            Outcome::Terminated { status } => exit_code(status),
            // Same report as a `main` returning `Err`.
            Outcome::Propagated(err) => {
                eprintln!("Error: {err:?}");
                ExitCode::FAILURE
            }
            Outcome::Defective(defect) => {
                eprintln!("defective user exit: {defect}");
                exit_code(exit_codes::PANIC)
            }
        }
    }
}

/// Runs entry points and intercepts their user exits.
///
/// Each `run` is independent: it only looks at the result of the entry
/// point it was given.
#[derive(Debug)]
pub struct Boundary<W = io::Stderr> {
    stream: W,
    settings: Settings,
}

impl Boundary<io::Stderr> {
    /// A boundary writing to the process's stderr with [`Settings::from_env`].
    pub fn stderr() -> Self {
        Self::new(io::stderr(), Settings::from_env())
    }
}

impl<W: Write> Boundary<W> {
    /// A boundary writing exit messages to `stream`, rendered with `settings`.
    pub fn new(stream: W, settings: Settings) -> Self {
        Self { stream, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Give back the error stream.
    pub fn into_inner(self) -> W {
        self.stream
    }

    /// Call `entry` and sort its result into an [`Outcome`].
    pub fn run<T, E, F>(&mut self, entry: F) -> Outcome<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Intercept,
    {
        match entry() {
            Ok(value) => Outcome::Completed(value),
            Err(err) => self.intercept(err),
        }
    }

    /// Sort an error into an [`Outcome`], reporting it if it is a user exit.
    pub fn intercept<T, E: Intercept>(&mut self, err: E) -> Outcome<T, E> {
        let resolved = err.user_exit().map(|exit| {
            (
                exit.name().to_string(),
                Termination::from_user_exit(exit, &self.settings),
            )
        });

        match resolved {
            None => {
                tracing::debug!("propagating error outside the user exit hierarchy");
                Outcome::Propagated(err)
            }
            Some((variant, Err(defect))) => {
                tracing::debug!(%variant, "user exit cannot be reported");
                Outcome::Defective(defect)
            }
            Some((variant, Ok(termination))) => {
                tracing::debug!(%variant, status = termination.status, "intercepted user exit");
                if let Err(write_err) = termination.write_to(&mut self.stream) {
                    tracing::warn!(%variant, error = %write_err, "failed to write exit message");
                }
                Outcome::Terminated {
                    status: termination.status,
                }
            }
        }
    }
}

/// Wrap an entry point so user exits end the process.
///
/// The wrapped function returns whatever `entry` returns, except that a
/// [`UserExit`] error is written to stderr and the process exits with its
/// status. A defective exit panics. Any other error is returned unchanged.
///
/// ```no_run
/// use userexit::{Variant, handle};
///
/// static BAD_INPUT: Variant =
///     Variant::new("BadInputError", Some(3), Some("Input {} should be set to {}."));
///
/// fn run() -> anyhow::Result<()> {
///     Err(BAD_INPUT.raise().arg("color").arg("red").into())
/// }
///
/// fn main() -> anyhow::Result<()> {
///     handle(run)()
/// }
/// ```
pub fn handle<T, E, F>(entry: F) -> impl FnOnce() -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: Intercept,
{
    move || Boundary::stderr().run(entry).finish()
}

/// Like [`handle`], for entry points that take an argument.
pub fn handle_args<A, T, E, F>(entry: F) -> impl FnOnce(A) -> Result<T, E>
where
    F: FnOnce(A) -> Result<T, E>,
    E: Intercept,
{
    move |args| Boundary::stderr().run(|| entry(args)).finish()
}
