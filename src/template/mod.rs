//! Message template rendering.
//!
//! Templates are written as ordinary indented string literals in source and
//! rendered in three passes:
//!
//! 1. **Normalize** - strip the shared indentation and surrounding blank lines
//! 2. **Reflow** - rejoin each paragraph and wrap it to the display width
//! 3. **Substitute** - fill `{}` placeholders from the instance
//!
//! # Placeholder syntax
//!
//! - `{}` - next positional argument; `{0}`, `{1}` - argument by index
//! - `{self.name}`, `{self.exit_status}`, `{self.<field>}` - the instance itself
//! - `{argv[0]}` - program name; `{argv[N]}` - process argument N
//! - `{x!r}` - the value's `Debug` form; `{x!s}` - its `Display` form
//! - `{x:>8}` - pad to a width, aligned with `<`, `>` or `^`
//! - `{{` and `}}` - literal braces
//!
//! Any placeholder that cannot be resolved is an error rather than an empty
//! substitution, so an authoring mistake never reaches the user as a
//! half-rendered message.

mod normalize;
mod substitute;


pub use normalize::{normalize, reflow};
pub use substitute::{check, substitute};

use crate::config::Settings;
use crate::error::RenderError;
use crate::user_exit::Arg;
use std::collections::BTreeMap;

/// Everything a template can refer to.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Positional arguments, in construction order.
    pub args: &'a [Arg],
    /// Fields visible as `{self.<name>}`.
    pub fields: &'a BTreeMap<String, Arg>,
    /// Width and argv.
    pub settings: &'a Settings,
}

/// Render `template` with `prefix` joined to its first paragraph.
///
/// # Returns
///
/// * `Ok(String)` - The wrapped, substituted message
/// * `Err(RenderError)` - If a placeholder is malformed or unresolvable
pub fn render(template: &str, prefix: &str, context: &Context<'_>) -> Result<String, RenderError> {
    let mut text = normalize(template);
    if !prefix.is_empty() {
        text.insert_str(0, prefix);
    }
    let wrapped = reflow(&text, context.settings.width);
    substitute(&wrapped, context)
}

/// Check a template's placeholder syntax without any arguments.
///
/// A template that passes can still fail to render if an instance is raised
/// with too few arguments or without a field it refers to.
pub fn lint(template: &str) -> Result<(), RenderError> {
    check(&normalize(template))
}
