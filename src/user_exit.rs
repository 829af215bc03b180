//! Raised exit instances.
//!
//! A [`UserExit`] is what application code returns as its error. It carries
//! the variant it was raised from, the positional arguments for the message
//! template and any named fields the template refers to as `{self.<name>}`.

use crate::config::Settings;
use crate::error::{ConfigError, RenderError};
use crate::template::{self, Context};
use crate::variant::Variant;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// A captured template argument.
///
/// Both renderings are taken at construction so the instance owns no
/// borrowed data and `{!r}` never needs the original value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    display: String,
    debug: String,
}

impl Arg {
    /// Capture both renderings of `value`.
    pub fn new<T: Display + Debug + ?Sized>(value: &T) -> Self {
        Self {
            display: value.to_string(),
            debug: format!("{:?}", value),
        }
    }

    /// The `Display` form, used by `{}` and `{!s}`.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The `Debug` form, used by `{!r}`.
    pub fn debug(&self) -> &str {
        &self.debug
    }
}

/// An exit raised from a [`Variant`].
///
/// Instances are built with consuming builder methods and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct UserExit {
    variant: Arc<Variant>,
    args: Vec<Arg>,
    fields: BTreeMap<String, Arg>,
}

impl UserExit {
    /// An instance of `variant` with no arguments or fields yet.
    ///
    /// Usually reached through [`Variant::raise`] or a registry.
    pub fn new(variant: Arc<Variant>) -> Self {
        Self {
            variant,
            args: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg<T: Display + Debug>(mut self, value: T) -> Self {
        self.args.push(Arg::new(&value));
        self
    }

    /// Append several positional arguments.
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display + Debug,
    {
        self.args.extend(values.into_iter().map(|value| Arg::new(&value)));
        self
    }

    /// Attach a named field, reachable from the template as `{self.<name>}`.
    pub fn with_field<T: Display + Debug>(mut self, name: impl Into<String>, value: T) -> Self {
        self.fields.insert(name.into(), Arg::new(&value));
        self
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn name(&self) -> &str {
        &self.variant.name
    }

    pub fn captured_args(&self) -> &[Arg] {
        &self.args
    }

    pub fn field(&self, name: &str) -> Option<&Arg> {
        self.fields.get(name)
    }

    /// The variant's exit status.
    ///
    /// # Returns
    ///
    /// * `Ok(i32)` - The declared (or registry-assigned) status
    /// * `Err(ConfigError::Unassigned)` - The variant never got a status
    pub fn exit_status(&self) -> Result<i32, ConfigError> {
        self.variant
            .exit_status
            .ok_or_else(|| ConfigError::Unassigned {
                name: self.variant.name.to_string(),
            })
    }

    /// Render the user-facing message.
    ///
    /// Returns `Ok(None)` when the variant has no message. Rendering depends
    /// only on the variant, the captured arguments and fields, and `settings`.
    pub fn render(&self, settings: &Settings) -> Result<Option<String>, RenderError> {
        let Some(message) = self.variant.message.as_deref() else {
            return Ok(None);
        };

        let fields = self.self_fields();
        let context = Context {
            args: &self.args,
            fields: &fields,
            settings,
        };
        template::render(message, &self.prefix(), &context).map(Some)
    }

    /// Prefix template placed in front of the message.
    fn prefix(&self) -> String {
        let mut prefix = String::new();
        if self.variant.prefix_name {
            prefix.push_str("{argv[0]}: ");
        }
        if self.variant.prefix_error && self.variant.exit_status != Some(0) {
            prefix.push_str("error: ");
        }
        prefix
    }

    /// Snapshot of everything `{self.<name>}` can see.
    fn self_fields(&self) -> BTreeMap<String, Arg> {
        let mut fields = self.fields.clone();
        fields.insert("name".to_string(), Arg::new(self.name()));
        if let Some(status) = self.variant.exit_status {
            fields.insert("exit_status".to_string(), Arg::new(&status));
        }
        fields
    }
}

impl Display for UserExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render(&Settings::default()) {
            Ok(Some(message)) => f.write_str(&message),
            Ok(None) => f.write_str(self.name()),
            Err(err) => write!(f, "{} (message not renderable: {})", self.name(), err),
        }
    }
}

impl std::error::Error for UserExit {}
