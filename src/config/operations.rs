//! Settings and catalog loading, validation, and utility operations.

use super::model::{Catalog, DEFAULT_PROGRAM, Settings, WIDTH_ENV};
use crate::error::{ConfigError, Result};
use crate::registry::Registry;
use std::ffi::OsString;
use std::path::Path;

impl Settings {
    /// Settings for the running process.
    ///
    /// Captures the process arguments and honours `USEREXIT_WIDTH`. An
    /// unparsable or zero width is ignored with a warning.
    pub fn from_env() -> Self {
        let mut settings = Self::default().with_argv(lossy_argv(std::env::args_os()));

        if let Ok(raw) = std::env::var(WIDTH_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(width) if width > 0 => settings.width = width,
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", WIDTH_ENV),
            }
        }

        settings
    }

    pub fn with_argv(mut self, argv: Vec<String>) -> Self {
        self.argv = argv;
        self
    }

    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Value of `{argv[index]}`.
    ///
    /// Index 0 is the program name: `program_name` if set, otherwise the file
    /// name of the captured `argv[0]`, otherwise [`DEFAULT_PROGRAM`]. It is
    /// always available.
    pub fn argv_at(&self, index: usize) -> Option<&str> {
        if index == 0 {
            if let Some(name) = &self.program_name {
                return Some(name.as_str());
            }
            let arg0 = self.argv.first().map(|arg0| {
                Path::new(arg0)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(arg0)
            });
            return Some(arg0.unwrap_or(DEFAULT_PROGRAM));
        }
        self.argv.get(index).map(String::as_str)
    }

    /// Number of entries `{argv[N]}` can reach.
    pub fn argv_len(&self) -> usize {
        self.argv.len().max(1)
    }

    /// Validate settings values.
    ///
    /// Validation rules:
    /// - `width` must be greater than 0
    /// - `program_name`, if set, must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(ConfigError::Invalid(
                "width must be greater than 0".to_string(),
            ));
        }

        if self.program_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "program_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Process arguments as strings; invalid Unicode is replaced, never fatal.
pub(crate) fn lossy_argv<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    /// Declarations are not resolved here; call [`Catalog::registry`] once
    /// the catalog is loaded.
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - Successfully loaded catalog with valid settings
    /// * `Err(ConfigError::Read)` - The file could not be read
    /// * `Err(ConfigError)` - Parse error or invalid settings
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string and validate its settings.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.settings.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the settings and every declaration.
    ///
    /// Declarations are checked by resolving them into a [`Registry`], so a
    /// catalog that validates can always be loaded.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        self.registry().map(|_| ())
    }

    /// Resolve the declarations into a registry with every status assigned.
    ///
    /// This is where duplicate names, bad parents, out-of-range statuses and
    /// broken templates are reported.
    pub fn registry(&self) -> Result<Registry> {
        Registry::load(self.variants.iter().cloned())
    }
}
