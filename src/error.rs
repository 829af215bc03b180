//! Error types for userexit.
//!
//! Uses thiserror for derive macros. None of these errors is a user-facing
//! exit: each one means a variant or catalog was authored incorrectly, and is
//! reported as a defect instead of being rendered as a message.

use thiserror::Error;

/// Failure to render a message template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A positional placeholder asked for more arguments than were supplied.
    #[error("placeholder at position {position} needs argument {index}, but only {supplied} supplied")]
    MissingArgument {
        index: usize,
        supplied: usize,
        position: usize,
    },

    /// A `{self.<name>}` placeholder named a field the instance does not have.
    #[error("placeholder at position {position} refers to unknown field 'self.{name}'")]
    UnknownField { name: String, position: usize },

    /// A placeholder that is neither positional, `self.*` nor `argv[N]`.
    #[error("unknown placeholder '{{{name}}}' at position {position}")]
    UnknownPlaceholder { name: String, position: usize },

    /// `{argv[N]}` with N past the end of the captured arguments.
    #[error("placeholder at position {position} refers to argv[{index}], but argv has {len} entries")]
    MissingArgv {
        index: usize,
        len: usize,
        position: usize,
    },

    /// A `{` without a matching `}`.
    #[error("unmatched '{{' at position {position}")]
    UnmatchedBrace { position: usize },

    /// `{}` and `{0}` used in the same template.
    #[error("cannot switch between automatic and manual argument numbering at position {position}")]
    MixedNumbering { position: usize },

    /// Conversion other than `!r` or `!s`.
    #[error("unknown conversion '!{conversion}' at position {position}")]
    UnknownConversion { conversion: String, position: usize },

    /// Format spec other than an optional alignment followed by a width.
    #[error("unsupported format spec ':{spec}' at position {position}")]
    UnsupportedSpec { spec: String, position: usize },
}

/// Invalid variant declaration, registry or catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variant reached termination without an exit status.
    #[error("variant '{name}' has no exit status; declare one or load it through a registry")]
    Unassigned { name: String },

    /// Two variants share a name.
    #[error("variant '{name}' is declared more than once")]
    DuplicateVariant { name: String },

    /// `extends` names a variant that was never declared.
    #[error("variant '{name}' extends unknown variant '{parent}'")]
    UnknownParent { name: String, parent: String },

    /// `extends` names a variant declared later in the list.
    #[error("variant '{name}' extends '{parent}', which must be declared before it")]
    ParentDeclaredLater { name: String, parent: String },

    /// A declared status outside 0..=255.
    #[error("variant '{name}' declares exit status {status}, outside 0..=255")]
    StatusOutOfRange { name: String, status: i32 },

    /// Every status in the automatic pool is already taken.
    #[error("no free exit status left in {start}..={end} for variant '{name}'")]
    PoolExhausted { name: String, start: i32, end: i32 },

    /// A message template with broken placeholder syntax.
    #[error("variant '{name}' has an invalid message template: {source}")]
    Template {
        name: String,
        #[source]
        source: RenderError,
    },

    /// Lookup of a name the registry does not know.
    #[error("unknown variant '{name}'")]
    UnknownVariant { name: String },

    /// A settings value failed validation.
    #[error("config validation failed: {0}")]
    Invalid(String),

    /// A catalog file could not be read.
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid YAML for the catalog schema.
    #[error("failed to parse catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A `UserExit` that cannot be turned into a termination.
///
/// This is an authoring bug in the variant, so the boundary reports it loudly
/// rather than showing it to the user as the exit message.
#[derive(Error, Debug)]
pub enum Defect {
    #[error("cannot render message for variant '{variant}': {source}")]
    Render {
        variant: String,
        #[source]
        source: RenderError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
