//! Config subcommand handlers. None of these touch the record store.

use std::fmt::Write as _;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config::{self, Config, Context, Profile};
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

// ── Helpers ─────────────────────────────────────────────────────────

fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    for name in cfg.profile_names() {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "endpoint = \"{}\"", p.endpoint);
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(ref label) = p.ready_label {
            let _ = writeln!(out, "ready_label = \"{label}\"");
        }
        if let Some(ref label) = p.borrowed_label {
            let _ = writeln!(out, "borrowed_label = \"{label}\"");
        }
    }

    out.trim_end().to_owned()
}

fn save(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Ask for an optional value; an empty answer keeps the default.
fn optional_input(prompt: &str) -> Result<Option<String>, CliError> {
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_owned()))
}

fn init(ctx: &Context) -> Result<(), CliError> {
    util::require_terminal("config init", "use `gearloan config set endpoint <url>` instead")?;

    let path = config::config_path();
    eprintln!("gearloan configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let endpoint: String = Input::new()
        .with_prompt("Record store endpoint")
        .validate_with(|raw: &String| {
            gearloan_config::parse_endpoint(raw)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    eprintln!("\n   Status labels must match the text the store writes.");
    eprintln!("   Leave blank to keep the defaults.\n");
    let ready_label = optional_input("Label for ready items")?;
    let borrowed_label = optional_input("Label for borrowed items")?;

    let profile = Profile {
        endpoint,
        ready_label,
        borrowed_label,
        ..Profile::default()
    };

    let mut cfg = ctx.config.clone();
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    save(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: gearloan list");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, ctx: &Context) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(ctx),

        ConfigCommand::Show => {
            let out = output::render_single(&ctx.output, &ctx.config, format_config, |_| {
                "config".into()
            })?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = ctx.config.clone();
            let profile_name = ctx.profile_name.clone();
            cfg.profiles
                .entry(profile_name.clone())
                .or_default()
                .set(&key, value)?;
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            save(&cfg)?;
            if !ctx.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let default = ctx.config.default_profile.as_deref().unwrap_or("default");
            let names = ctx.config.profile_names();
            if names.is_empty() {
                eprintln!("No profiles configured. Run: gearloan config init");
            }
            for name in names {
                let marker = if name == default { " *" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = ctx.config.clone();
            cfg.use_profile(&name)?;
            save(&cfg)?;
            if !ctx.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_lists_profiles_in_order() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                endpoint: "https://store.example/exec".into(),
                ready_label: Some("Ready".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert("annex".into(), Profile::default());

        let text = format_config(&cfg);
        let annex = text.find("[profiles.annex]");
        let lab = text.find("[profiles.lab]");
        assert!(annex < lab && annex.is_some());
        assert!(text.contains("ready_label = \"Ready\""));
        assert!(!text.contains("borrowed_label"));
    }
}
