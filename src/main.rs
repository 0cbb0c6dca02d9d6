//! growbar - demo chat around the auto-resizing input bar

use clap::Parser;
use growbar::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ResolvedConfig,
};
use growbar::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// growbar - chat input bar that grows with its text
#[derive(Parser, Debug)]
#[command(name = "growbar")]
#[command(version)]
#[command(about = "Terminal chat demo with an auto-resizing input bar")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed growth bound for the text area, in rows (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_height: Option<u16>,

    /// Keep the text area pinned to its growth bound
    #[arg(long)]
    pub force_max: bool,

    /// Draw the bar without a background fill
    #[arg(long)]
    pub translucent: bool,
}

/// Resolve configuration with full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);

    // Boolean flags only override when explicitly set
    let force_override = args.force_max.then_some(true);
    let translucent_override = args.translucent.then_some(true);

    Ok(apply_cli_overrides(
        with_env,
        args.max_height,
        force_override,
        translucent_override,
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    growbar::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    growbar::view::run(&config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["growbar", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["growbar", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["growbar"]);
        assert_eq!(args.config, None);
        assert_eq!(args.max_height, None);
        assert!(!args.force_max);
        assert!(!args.translucent);
    }

    #[test]
    fn test_max_height_flag() {
        let args = Args::parse_from(["growbar", "--max-height", "6"]);
        assert_eq!(args.max_height, Some(6));
    }

    #[test]
    fn test_max_height_rejects_zero() {
        let result = Args::try_parse_from(["growbar", "--max-height", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_max_height_rejects_negative() {
        let result = Args::try_parse_from(["growbar", "--max-height", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["growbar", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "growbar",
            "--max-height",
            "3",
            "--force-max",
            "--translucent",
        ]);
        assert_eq!(args.max_height, Some(3));
        assert!(args.force_max);
        assert!(args.translucent);
    }

    #[test]
    fn test_cli_flags_flow_through_precedence_chain() {
        use growbar::config::ConfigFile;

        let config_file = ConfigFile {
            max_height: Some(9),
            translucent: Some(false),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.max_height, Some(9), "Config file should override default");

        let args = Args::parse_from(["growbar", "--max-height", "3", "--translucent"]);
        let with_cli = apply_cli_overrides(
            merged,
            args.max_height,
            args.force_max.then_some(true),
            args.translucent.then_some(true),
        );
        assert_eq!(with_cli.max_height, Some(3), "CLI should override all other sources");
        assert!(with_cli.translucent);
        assert!(!with_cli.force_max_height, "Unset flag must not override");
    }
}
