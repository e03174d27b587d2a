//! Config command handler

use crate::args::ConfigSubcommand;
use nu_board::config::Config;
use nu_board::info;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a user-facing message for unknown keys, invalid values or save failures
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

/// Print one value, or the whole configuration
fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value).map_err(|e| format!("✗ {e}"))?;
    persist(config)?;
    info!("Config updated: {key}");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults).map_err(|e| format!("✗ {e}"))?;
    persist(config)?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Remove the config file after a y/yes confirmation read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if confirmed(&response) {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn confirmed(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed("y\n"));
        assert!(confirmed(" YES "));
        assert!(!confirmed("n"));
        assert!(!confirmed(""));
    }
}
