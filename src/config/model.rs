//! Settings and Catalog struct definitions and default implementations.

use crate::variant::Variant;
use serde::{Deserialize, Serialize};

/// Default wrap width for rendered messages.
pub const DEFAULT_WIDTH: usize = 70;

/// `{argv[0]}` when neither `program_name` nor a captured `argv[0]` is set.
pub const DEFAULT_PROGRAM: &str = "userexit";

/// Environment variable that overrides the wrap width.
pub const WIDTH_ENV: &str = "USEREXIT_WIDTH";

/// Rendering settings.
///
/// `argv` is never read from the process implicitly: it is captured once by
/// [`Settings::from_env`] (or set with [`Settings::with_argv`]) so rendering
/// stays a function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Column at which paragraphs are wrapped.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Name shown for `{argv[0]}`, instead of the invoked binary's file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,

    /// Captured process arguments.
    #[serde(skip)]
    pub argv: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: default_width(),
            program_name: None,
            argv: Vec::new(),
        }
    }
}

/// A YAML catalog of variant declarations.
///
/// This struct represents the contents of a `userexit.yaml` file:
///
/// ```yaml
/// width: 72
/// program_name: deploy
/// variants:
///   - name: BadInputError
///     exit_status: 3
///     message: "Input {!r} should be set to {!r}."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Layout settings applied to every variant in the catalog.
    #[serde(flatten)]
    pub settings: Settings,

    /// Declarations, in the order statuses are assigned.
    pub variants: Vec<Variant>,
}

pub(super) fn default_width() -> usize {
    DEFAULT_WIDTH
}
