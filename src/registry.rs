//! Load-time registry of variants.
//!
//! A [`Registry`] is built once at startup from every declared variant. It
//! checks the declarations and gives each variant a definite exit status:
//!
//! 1. A declared `exit_status` is kept as is.
//! 2. A variant that `extends` a non-family parent inherits the parent's
//!    status, unless it sets `auto_status`.
//! 3. Everything else gets the lowest unused status from
//!    [`exit_codes::AUTO_POOL`], in declaration order.
//!
//! Message templates are linted at the same time, so a broken placeholder is
//! caught at startup rather than when the exit is first raised.
//!
//! Every declared status is collected before any automatic assignment, so
//! adding a manual status later in the list never collides with an earlier
//! automatic one. The built-in [`NORMAL_EXIT`] and [`ABORT`] variants are
//! always registered first.

use crate::error::{ConfigError, Result};
use crate::exit_codes;
use crate::template;
use crate::user_exit::UserExit;
use crate::variant::{ABORT, NORMAL_EXIT, Variant};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Variants with their exit statuses resolved.
#[derive(Debug, Clone)]
pub struct Registry {
    variants: Vec<Arc<Variant>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Resolve `declared` (after the built-ins) into a registry.
    ///
    /// # Returns
    ///
    /// * `Ok(Registry)` - Every variant has a status
    /// * `Err(ConfigError)` - Duplicate names, bad parents, out-of-range
    ///   statuses, or an exhausted pool
    pub fn load<I>(declared: I) -> Result<Self>
    where
        I: IntoIterator<Item = Variant>,
    {
        let declarations: Vec<Variant> = [NORMAL_EXIT.clone(), ABORT.clone()]
            .into_iter()
            .chain(declared)
            .collect();

        let mut index = HashMap::with_capacity(declarations.len());
        for (i, variant) in declarations.iter().enumerate() {
            if index.insert(variant.name.to_string(), i).is_some() {
                return Err(ConfigError::DuplicateVariant {
                    name: variant.name.to_string(),
                });
            }
        }

        let mut used = BTreeSet::new();
        for variant in &declarations {
            if let Some(message) = variant.message.as_deref() {
                template::lint(message).map_err(|source| ConfigError::Template {
                    name: variant.name.to_string(),
                    source,
                })?;
            }
            if let Some(status) = variant.exit_status {
                check_range(variant, status)?;
                if exit_codes::SHELL_RESERVED.contains(&status) {
                    tracing::warn!(
                        variant = %variant.name,
                        status,
                        "exit status has a shell meaning and may confuse callers"
                    );
                }
                used.insert(status);
            }
        }

        let mut variants: Vec<Arc<Variant>> = Vec::with_capacity(declarations.len());
        for (i, mut variant) in declarations.into_iter().enumerate() {
            if variant.exit_status.is_none() {
                let status = match inherited_status(&variant, i, &index, &variants)? {
                    Some(status) => status,
                    None => next_free(&variant, &mut used)?,
                };
                tracing::debug!(variant = %variant.name, status, "assigned exit status");
                variant.exit_status = Some(status);
            }
            variants.push(Arc::new(variant));
        }

        Ok(Self { variants, index })
    }

    /// Look up a variant by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Variant>> {
        self.index.get(name).map(|&i| &self.variants[i])
    }

    /// Resolved exit status of a variant.
    pub fn status_of(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|variant| variant.exit_status)
    }

    /// Raise the named variant.
    ///
    /// # Returns
    ///
    /// * `Ok(UserExit)` - An instance with no arguments yet
    /// * `Err(ConfigError::UnknownVariant)` - No variant has that name
    pub fn raise(&self, name: &str) -> Result<UserExit> {
        self.get(name)
            .map(|variant| UserExit::new(Arc::clone(variant)))
            .ok_or_else(|| ConfigError::UnknownVariant {
                name: name.to_string(),
            })
    }

    /// Variants in declaration order, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.variants.iter()
    }

    /// Variants the caller declared, without the built-ins.
    pub fn declared(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.variants.iter().filter(|variant| !variant.is_builtin())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

fn check_range(variant: &Variant, status: i32) -> Result<()> {
    if exit_codes::VALID.contains(&status) {
        Ok(())
    } else {
        Err(ConfigError::StatusOutOfRange {
            name: variant.name.to_string(),
            status,
        })
    }
}

/// Status inherited from the parent, if this variant inherits at all.
fn inherited_status(
    variant: &Variant,
    position: usize,
    index: &HashMap<String, usize>,
    resolved: &[Arc<Variant>],
) -> Result<Option<i32>> {
    let Some(parent) = variant.extends.as_deref() else {
        return Ok(None);
    };

    let &parent_position = index.get(parent).ok_or_else(|| ConfigError::UnknownParent {
        name: variant.name.to_string(),
        parent: parent.to_string(),
    })?;
    if parent_position >= position {
        return Err(ConfigError::ParentDeclaredLater {
            name: variant.name.to_string(),
            parent: parent.to_string(),
        });
    }

    let parent = &resolved[parent_position];
    if variant.auto_status || parent.family {
        return Ok(None);
    }
    Ok(parent.exit_status)
}

fn next_free(variant: &Variant, used: &mut BTreeSet<i32>) -> Result<i32> {
    let status = exit_codes::AUTO_POOL
        .clone()
        .find(|status| !used.contains(status))
        .ok_or_else(|| ConfigError::PoolExhausted {
            name: variant.name.to_string(),
            start: exit_codes::AUTO_POOL_START,
            end: exit_codes::AUTO_POOL_END,
        })?;
    used.insert(status);
    Ok(status)
}
