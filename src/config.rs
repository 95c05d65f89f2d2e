//! Configuration for latex-scan.
//!
//! This module provides the macro names the document model treats specially.
//! Use [`ConfigBuilder`] at application startup to override them.

use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Runtime configuration for latex-scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Commands defining user macros.
    pub definition_commands: Vec<String>,
    /// Commands splicing another file in place.
    pub inclusion_commands: Vec<String>,
    /// Command recording cross-references in `.aux` files.
    pub label_command: String,
    /// Marker after which comment stripping discards the text.
    pub end_marker: String,
    /// Token removed from label section titles.
    pub relax_marker: String,
    /// Extension appended to inclusion identifiers without one.
    pub default_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definition_commands: strings(&[r"\newcommand", r"\renewcommand", r"\providecommand"]),
            inclusion_commands: strings(&[r"\input", r"\include"]),
            label_command: r"\newlabel".to_string(),
            end_marker: r"\end{document}".to_string(),
            relax_marker: r"\relax".to_string(),
            default_extension: "tex".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    definition_commands: Option<Vec<String>>,
    inclusion_commands: Option<Vec<String>>,
    label_command: Option<String>,
    end_marker: Option<String>,
    relax_marker: Option<String>,
    default_extension: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the macro-defining commands.
    ///
    /// Default: `\newcommand`, `\renewcommand`, `\providecommand`
    ///
    /// # Example
    ///
    /// ```ignore
    /// use latex_scan::config::ConfigBuilder;
    ///
    /// ConfigBuilder::new()
    ///     .definition_commands([r"\newcommand", r"\DeclareRobustCommand"])
    ///     .init();
    /// ```
    pub fn definition_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition_commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    /// Set the inclusion commands.
    ///
    /// Default: `\input`, `\include`
    pub fn inclusion_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inclusion_commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    /// Set the cross-reference command of `.aux` files.
    pub fn label_command(mut self, command: impl Into<String>) -> Self {
        self.label_command = Some(command.into());
        self
    }

    /// Set the end-of-document marker.
    pub fn end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = Some(marker.into());
        self
    }

    /// Set the token stripped from label section titles.
    pub fn relax_marker(mut self, marker: impl Into<String>) -> Self {
        self.relax_marker = Some(marker.into());
        self
    }

    /// Set the extension appended to bare inclusion identifiers.
    pub fn default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = Some(extension.into());
        self
    }

    /// Build the configuration without installing it.
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            definition_commands: self
                .definition_commands
                .unwrap_or(defaults.definition_commands),
            inclusion_commands: self.inclusion_commands.unwrap_or(defaults.inclusion_commands),
            label_command: self.label_command.unwrap_or(defaults.label_command),
            end_marker: self.end_marker.unwrap_or(defaults.end_marker),
            relax_marker: self.relax_marker.unwrap_or(defaults.relax_marker),
            default_extension: self.default_extension.unwrap_or(defaults.default_extension),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once, before the configuration is first read.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        CONFIG.set(self.build()).is_ok()
    }
}

/// Initialize latex-scan with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
