//! Command implementations

pub mod generate;
pub mod init;
pub mod rules;

use makeplan::util::config::{global_config_path, load_config, project_config_path, Config};
use makeplan::util::shell::{ColorChoice, Shell};

use crate::cli::GlobalArgs;

/// Load global and project configuration for the current directory.
pub fn current_config() -> Config {
    let cwd = std::env::current_dir().unwrap_or_default();
    load_config(global_config_path().as_deref(), &project_config_path(&cwd))
}

/// Build the status shell. CLI flags override config.
pub fn make_shell(global: &GlobalArgs, config: &Config, json: bool) -> Shell {
    let color = global
        .color
        .or_else(|| config.color())
        .unwrap_or(ColorChoice::Auto);

    Shell::from_flags(global.quiet, global.verbose, color, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_color_overrides_config() {
        let mut config = Config::default();
        config.shell.color = Some("always".to_string());

        let global = GlobalArgs {
            color: Some(ColorChoice::Never),
            ..GlobalArgs::default()
        };
        assert!(!make_shell(&global, &config, false).use_color());

        let shell = make_shell(&GlobalArgs::default(), &config, false);
        assert!(shell.use_color());
    }

    #[test]
    fn test_json_shell() {
        let shell = make_shell(&GlobalArgs::default(), &Config::default(), true);
        assert!(shell.is_json());
    }
}
