//! CLI configuration: a thin layer over `gearloan_config`.
//!
//! Resolves the active profile and applies `GlobalOpts` overrides
//! (--endpoint, --insecure, --timeout) on top of it.

use std::io::{self, IsTerminal};

use clap::ValueEnum;

use gearloan_core::StoreConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use gearloan_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_store_config, save_config,
};

/// Everything a command handler needs besides its own arguments.
pub struct Context {
    pub config: Config,
    pub profile_name: String,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Context {
    pub fn resolve(global: &GlobalOpts) -> Self {
        let config = load_config_or_default();
        let profile_name = active_profile_name(global, &config);

        let output = global.output.clone().unwrap_or_else(|| {
            OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
        });

        let color_mode = match global.color {
            ColorMode::Auto => {
                ColorMode::from_str(&config.defaults.color, true).unwrap_or(ColorMode::Auto)
            }
            ref explicit => explicit.clone(),
        };

        Self {
            config,
            profile_name,
            output,
            color: should_color(&color_mode),
            quiet: global.quiet,
            yes: global.yes,
        }
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Build a `StoreConfig` from the active profile plus flag overrides.
///
/// `--endpoint` alone is enough; without it the profile must exist.
pub fn build_store_config(global: &GlobalOpts, ctx: &Context) -> Result<StoreConfig, CliError> {
    let mut profile = match (
        ctx.config.profiles.get(&ctx.profile_name),
        global.endpoint.as_deref(),
    ) {
        (Some(profile), _) => profile.clone(),
        (None, Some(_)) => Profile::default(),
        (None, None) => {
            // An explicitly named profile that does not exist gets its own error.
            if global.profile.is_some() {
                ctx.config.profile(&ctx.profile_name)?;
            }
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(endpoint) = &global.endpoint {
        profile.endpoint.clone_from(endpoint);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    Ok(profile_to_store_config(&profile, &ctx.config.defaults)?)
}
