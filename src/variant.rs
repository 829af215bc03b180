//! Declared exit variants.
//!
//! A [`Variant`] is the type-level half of a user exit: its name, exit
//! status, message template and a few rendering flags. Variants are declared
//! once (as `static`s in code, or in a YAML catalog) and live for the whole
//! process. Raising one produces a [`UserExit`] instance.

use crate::exit_codes;
use crate::user_exit::UserExit;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Built-in variant for a normal, successful termination.
pub static NORMAL_EXIT: Variant = Variant {
    name: Cow::Borrowed("UserExit"),
    exit_status: Some(exit_codes::SUCCESS),
    message: Some(Cow::Borrowed("Execution ended normally.")),
    prefix_name: true,
    prefix_error: false,
    extends: None,
    family: false,
    auto_status: false,
};

/// Built-in variant for an aborted run.
///
/// It is a family base: variants that extend it get their own status from
/// the registry's pool instead of sharing status 1.
pub static ABORT: Variant = Variant {
    name: Cow::Borrowed("UserAbort"),
    exit_status: Some(exit_codes::ABORT),
    message: Some(Cow::Borrowed("Execution aborted with an error.")),
    prefix_name: true,
    prefix_error: false,
    extends: None,
    family: true,
    auto_status: false,
};

/// A declared kind of user exit.
///
/// Unknown fields in catalog YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Name used in diagnostics, registry lookups and `{self.name}`.
    pub name: Cow<'static, str>,

    /// Process exit status. `None` leaves it to the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,

    /// Message template. `None` exits silently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,

    /// Prefix the message with `"{argv[0]}: "`.
    #[serde(default)]
    pub prefix_name: bool,

    /// Prefix the message with `"error: "` when the status is not 0.
    #[serde(default)]
    pub prefix_error: bool,

    /// Parent variant whose status is inherited when none is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Cow<'static, str>>,

    /// Children of a family base are auto-assigned instead of inheriting.
    #[serde(default)]
    pub family: bool,

    /// Always auto-assign, even when `extends` is set.
    #[serde(default)]
    pub auto_status: bool,
}

impl Variant {
    /// Declare a variant with an optional status and message.
    ///
    /// ```
    /// use userexit::Variant;
    ///
    /// static BAD_INPUT: Variant =
    ///     Variant::new("BadInputError", Some(3), Some("Input {} should be set to {}."));
    ///
    /// let err = BAD_INPUT.raise().arg("color").arg("red");
    /// assert_eq!(err.to_string(), "Input color should be set to red.");
    /// ```
    pub const fn new(
        name: &'static str,
        exit_status: Option<i32>,
        message: Option<&'static str>,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            exit_status,
            message: match message {
                Some(message) => Some(Cow::Borrowed(message)),
                None => None,
            },
            prefix_name: false,
            prefix_error: false,
            extends: None,
            family: false,
            auto_status: false,
        }
    }

    /// Declare a variant whose message reads `"<program>: error: <message>"`.
    pub const fn prefixed(name: &'static str, exit_status: i32, message: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            exit_status: Some(exit_status),
            message: Some(Cow::Borrowed(message)),
            prefix_name: true,
            prefix_error: true,
            extends: None,
            family: false,
            auto_status: false,
        }
    }

    /// Declare a variant that exits without printing anything.
    pub const fn silent(name: &'static str, exit_status: i32) -> Self {
        Self::new(name, Some(exit_status), None)
    }

    /// Set the parent variant.
    pub fn extending(mut self, parent: impl Into<Cow<'static, str>>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Mark this variant as a family base.
    pub fn as_family(mut self) -> Self {
        self.family = true;
        self
    }

    /// Force automatic status assignment.
    pub fn with_auto_status(mut self) -> Self {
        self.auto_status = true;
        self
    }

    /// Set the status explicitly.
    pub fn with_status(mut self, exit_status: i32) -> Self {
        self.exit_status = Some(exit_status);
        self
    }

    /// Set both message prefixes.
    pub fn with_prefixes(mut self, name: bool, error: bool) -> Self {
        self.prefix_name = name;
        self.prefix_error = error;
        self
    }

    /// Raise this variant with no arguments yet.
    pub fn raise(&self) -> UserExit {
        UserExit::new(Arc::new(self.clone()))
    }

    /// Whether this is one of the built-in variants.
    pub fn is_builtin(&self) -> bool {
        self.name == NORMAL_EXIT.name || self.name == ABORT.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_have_fixed_statuses() {
        assert_eq!(NORMAL_EXIT.exit_status, Some(0));
        assert_eq!(ABORT.exit_status, Some(1));
        assert!(ABORT.family);
        assert!(!NORMAL_EXIT.family);
        assert!(NORMAL_EXIT.is_builtin());
        assert!(ABORT.is_builtin());
    }

    #[test]
    fn const_constructors() {
        const SILENT: Variant = Variant::silent("NormalExit", 0);
        assert_eq!(SILENT.exit_status, Some(0));
        assert!(SILENT.message.is_none());
        assert!(!SILENT.prefix_name);

        const LOUD: Variant = Variant::prefixed("Missing", 4, "gone");
        assert!(LOUD.prefix_name);
        assert!(LOUD.prefix_error);
        assert_eq!(LOUD.message.as_deref(), Some("gone"));
    }

    #[test]
    fn builder_methods() {
        let variant = Variant::new("BarAbortVariantC", None, Some("C"))
            .extending("BarAbort")
            .with_auto_status();
        assert_eq!(variant.extends.as_deref(), Some("BarAbort"));
        assert!(variant.auto_status);
        assert!(!variant.is_builtin());
    }

    #[test]
    fn parse_minimal_yaml() {
        let variant: Variant = serde_yaml::from_str("name: BarAbort\n").unwrap();
        assert_eq!(variant.name, "BarAbort");
        assert_eq!(variant.exit_status, None);
        assert_eq!(variant.message, None);
        assert!(!variant.prefix_name);
        assert!(!variant.family);
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let yaml = r#"
name: BadInputError
exit_status: 3
message: "Input {} should be set to {}."
future_option: true
"#;
        let variant: Variant = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(variant.exit_status, Some(3));
        assert_eq!(variant.message.as_deref(), Some("Input {} should be set to {}."));
    }

    #[test]
    fn raise_keeps_the_declaration() {
        static MISSING: Variant =
            Variant::new("TargetFileMissingError", Some(4), Some("Please ensure {} exists."));
        let err = MISSING.raise();
        assert_eq!(err.variant(), &MISSING);
        assert!(err.captured_args().is_empty());
    }
}
