//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<String> {
    match args.action {
        ProfileAction::List => Ok(list_profiles(config, formatter)),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            api_key,
            utc_offset,
        } => {
            let profile = Profile {
                api_url: url,
                api_key,
                utc_offset_minutes: utc_offset,
            };
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

fn describe(profile: &Profile, indent: &str) -> Vec<String> {
    let mut lines = vec![format!("{}URL: {}", indent, profile.api_url)];
    lines.push(format!(
        "{}API key: {}",
        indent,
        if profile.api_key.is_some() { "set" } else { "not set" }
    ));
    match profile.utc_offset_minutes {
        Some(offset) => lines.push(format!("{}UTC offset: {} min", indent, offset)),
        None => lines.push(format!("{}UTC offset: host", indent)),
    }
    lines
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> String {
    if config.profiles.is_empty() {
        return formatter.info("No profiles configured");
    }

    let mut lines = vec!["Available profiles:".to_string()];
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            lines.push(format!("* {}", formatter.success(name)));
        } else {
            lines.push(format!("  {}", name));
        }
        lines.extend(describe(profile, "    "));
    }
    lines.join("\n")
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<String> {
    let profile = config.get_active_profile()?;

    let mut lines = vec![format!("Active profile: {}", formatter.success(&config.active_profile))];
    lines.extend(describe(profile, "  "));
    Ok(lines.join("\n"))
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<String> {
    config.switch_profile(name.clone())?;
    config.save()?;
    Ok(formatter.success(&format!("Switched to profile '{}'", name)))
}

/// Create or update a profile.
fn set_profile(config: &mut Config, name: String, profile: Profile, formatter: &Formatter) -> Result<String> {
    if !(profile.api_url.starts_with("http://") || profile.api_url.starts_with("https://")) {
        return Err(CliError::InvalidInput(format!(
            "URL must start with http:// or https://, got '{}'",
            profile.api_url
        )));
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    Ok(formatter.success(&format!("{} profile '{}'", action, name)))
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<String> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted("Cannot delete the active profile".to_string()));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        Ok(formatter.success(&format!("Deleted profile '{}'", name)))
    } else {
        Ok(formatter.warning(&format!("Profile '{}' does not exist", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load_from(&dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = set_profile(&mut config, "local".to_string(), Profile::new("http://localhost:8080"), &formatter)
            .unwrap();
        assert_eq!(output, "✓ Created profile 'local'");

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
    }

    #[test]
    fn test_set_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = set_profile(&mut config, "bad".to_string(), Profile::new("localhost"), &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(matches!(result, Err(CliError::NotPermitted(_))));
    }

    #[test]
    fn test_show_active_profile() {
        let config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = show_active_profile(&config, &formatter).unwrap();
        assert!(output.contains("https://api.eatsavvy.org"));
        assert!(output.contains("UTC offset: host"));
    }
}
