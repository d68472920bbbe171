//! Generator configuration.
//!
//! The configuration is read once, when the processor is created, and passed
//! by value into every component. Nothing reads options after that.
//!
//! ## Option keys
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `rxhttp_package` | `rxhttp.wrapper.param` | Package of the generated types |
//! | `rxhttp_rxjava` | `rxjava3` | Reactive integration (`rxjava2`, `rxjava3`, or `false`) |
//! | `rxhttp_incremental` | on | Off only when the value is exactly `false` |
//! | `rxhttp_debug` | off | On only when the value is exactly `true` |

use std::collections::HashMap;

use strum::{Display, EnumIter, EnumString};

use crate::errors::{GeneratorError, Result};

pub const PACKAGE_OPTION: &str = "rxhttp_package";
pub const RXJAVA_OPTION: &str = "rxhttp_rxjava";
pub const INCREMENTAL_OPTION: &str = "rxhttp_incremental";
pub const DEBUG_OPTION: &str = "rxhttp_debug";

/// Marker option reported when the generator runs as an aggregating
/// incremental processor.
pub const AGGREGATING_OPTION: &str = "org.gradle.annotation.processing.aggregating";

/// Package used when `rxhttp_package` is not set.
pub const DEFAULT_PACKAGE: &str = "rxhttp.wrapper.param";

/// Which reactive-extensions integration the generated code targets.
///
/// ## Examples
///
/// ```
/// use rxgen_gen::config::ReactiveMode;
///
/// assert_eq!("2".parse::<ReactiveMode>().unwrap(), ReactiveMode::RxJava2);
/// assert_eq!("false".parse::<ReactiveMode>().unwrap(), ReactiveMode::Disabled);
/// assert_eq!(
///     ReactiveMode::RxJava3.observable_class(),
///     Some("io.reactivex.rxjava3.core.Observable")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReactiveMode {
    #[strum(to_string = "disabled", serialize = "false", serialize = "none")]
    Disabled,
    #[strum(to_string = "rxjava2", serialize = "2")]
    RxJava2,
    #[default]
    #[strum(to_string = "rxjava3", serialize = "3")]
    RxJava3,
}

impl ReactiveMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// The observable class accessors return, or `None` when disabled.
    pub fn observable_class(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => None,
            Self::RxJava2 => Some("io.reactivex.Observable"),
            Self::RxJava3 => Some("io.reactivex.rxjava3.core.Observable"),
        }
    }
}

/// Immutable generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Package the generated types are emitted into.
    pub package: String,
    pub reactive: ReactiveMode,
    pub incremental: bool,
    /// Report a note describing each round.
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            reactive: ReactiveMode::default(),
            incremental: true,
            debug: false,
        }
    }
}

impl GeneratorConfig {
    /// Builds a configuration from host processor options.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use rxgen_gen::config::{GeneratorConfig, ReactiveMode};
    ///
    /// let options = HashMap::from([
    ///     ("rxhttp_package".to_string(), "com.example.http".to_string()),
    ///     ("rxhttp_rxjava".to_string(), "rxjava2".to_string()),
    ///     ("rxhttp_incremental".to_string(), "false".to_string()),
    /// ]);
    ///
    /// let config = GeneratorConfig::from_options(&options).unwrap();
    /// assert_eq!(config.package, "com.example.http");
    /// assert_eq!(config.reactive, ReactiveMode::RxJava2);
    /// assert!(!config.incremental);
    /// assert!(!config.debug);
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Config` for an unrecognized `rxhttp_rxjava`
    /// value or an empty package name.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(package) = options.get(PACKAGE_OPTION) {
            config = config.with_package(package)?;
        }
        if let Some(value) = options.get(RXJAVA_OPTION) {
            config.reactive = value.parse().map_err(|_| {
                GeneratorError::Config(format!(
                    "unknown {RXJAVA_OPTION} value '{value}' (expected rxjava2, rxjava3 or false)"
                ))
            })?;
        }
        config.incremental = options.get(INCREMENTAL_OPTION).map(String::as_str) != Some("false");
        config.debug = options.get(DEBUG_OPTION).map(String::as_str) == Some("true");

        Ok(config)
    }

    /// Returns a copy targeting `package`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Config` when the package is empty or has an
    /// empty segment.
    pub fn with_package(mut self, package: &str) -> Result<Self> {
        if package.is_empty() || package.split('.').any(str::is_empty) {
            return Err(GeneratorError::Config(format!(
                "invalid package name '{package}'"
            )));
        }
        self.package = package.to_string();
        Ok(self)
    }

    pub fn with_reactive(mut self, reactive: ReactiveMode) -> Self {
        self.reactive = reactive;
        self
    }

    /// The option keys the generator understands.
    pub fn supported_options(&self) -> Vec<&'static str> {
        let mut options = vec![RXJAVA_OPTION, PACKAGE_OPTION, INCREMENTAL_OPTION, DEBUG_OPTION];
        if self.incremental {
            options.push(AGGREGATING_OPTION);
        }
        options
    }

    /// Qualified name of a generated type in the target package.
    pub fn qualified(&self, simple_name: &str) -> String {
        format!("{}.{}", self.package, simple_name)
    }
}
