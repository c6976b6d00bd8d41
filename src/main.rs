//! hexmark - Entry Point

use clap::Parser;
use hexmark::layout::GroupingSize;
use hexmark::model::AppError;
use hexmark::session::Session;
use hexmark::view::{ColorConfig, ShellOptions};
use std::path::PathBuf;
use tracing::info;

/// hexmark - inspect a binary file as a byte grid and annotate selections
#[derive(Parser, Debug)]
#[command(name = "hexmark")]
#[command(version)]
#[command(about = "Terminal byte-grid viewer with re-validated sidecar annotations")]
pub struct Args {
    /// File to inspect
    pub file: Option<PathBuf>,

    /// Bytes per group: 1, 2 or 4
    #[arg(short, long, value_parser = parse_grouping)]
    pub grouping: Option<GroupingSize>,

    /// Annotation log to write to and load from (default: <FILE>.txt next to the file)
    #[arg(long)]
    pub annotations: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn parse_grouping(value: &str) -> Result<GroupingSize, String> {
    let n: u8 = value
        .parse()
        .map_err(|_| format!("{:?} is not a grouping size", value))?;
    GroupingSize::try_from(n).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = hexmark::config::load_config_with_precedence(args.config.clone())?;
        let merged = hexmark::config::merge_config(config_file);
        let with_env = hexmark::config::apply_env_overrides(merged)?;
        hexmark::config::apply_cli_overrides(with_env, args.grouping)
    };

    hexmark::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut session = Session::new(config.grouping);
    if let Some(path) = &args.file {
        session.open(path).map_err(AppError::from)?;
    }

    let options = ShellOptions {
        scroll_lines: config.scroll_lines.max(1),
        annotations_path: args.annotations.clone(),
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    hexmark::view::run(session, options)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn help_does_not_error() {
        let err = Args::try_parse_from(["hexmark", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_does_not_error() {
        let err = Args::try_parse_from(["hexmark", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn no_args_defaults() {
        let args = Args::parse_from(["hexmark"]);
        assert_eq!(args.file, None);
        assert_eq!(args.grouping, None);
        assert_eq!(args.annotations, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
    }

    #[test]
    fn file_path_populates_file_field() {
        let args = Args::parse_from(["hexmark", "firmware.bin"]);
        assert_eq!(args.file, Some(PathBuf::from("firmware.bin")));
    }

    #[test]
    fn grouping_short_and_long() {
        let args = Args::parse_from(["hexmark", "-g", "2"]);
        assert_eq!(args.grouping, Some(GroupingSize::Two));
        let args = Args::parse_from(["hexmark", "--grouping", "4"]);
        assert_eq!(args.grouping, Some(GroupingSize::Four));
    }

    #[test]
    fn grouping_rejects_unsupported_sizes() {
        for bad in ["0", "3", "8", "-1", "256", "two"] {
            let arg = format!("--grouping={}", bad);
            let err = Args::try_parse_from(["hexmark", arg.as_str()]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "value {:?}", bad);
        }
    }

    #[test]
    fn dash_value_after_short_flag_is_an_unknown_argument() {
        let err = Args::try_parse_from(["hexmark", "-g", "-1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn annotations_path() {
        let args = Args::parse_from(["hexmark", "a.bin", "--annotations", "notes.txt"]);
        assert_eq!(args.annotations, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn config_path() {
        let args = Args::parse_from(["hexmark", "--config", "/tmp/hexmark.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/hexmark.toml")));
    }

    #[test]
    fn no_color_flag() {
        let args = Args::parse_from(["hexmark", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn combined_flags() {
        let args = Args::parse_from([
            "hexmark",
            "dump.bin",
            "-g",
            "1",
            "--annotations",
            "log.txt",
            "--no-color",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("dump.bin")));
        assert_eq!(args.grouping, Some(GroupingSize::One));
        assert_eq!(args.annotations, Some(PathBuf::from("log.txt")));
        assert!(args.no_color);
    }

    #[test]
    fn cli_grouping_flows_through_config_precedence_chain() {
        let args = Args::parse_from(["hexmark", "-g", "2"]);
        let merged = hexmark::config::merge_config(Some(hexmark::config::ConfigFile {
            grouping_size: Some(GroupingSize::Four),
            ..Default::default()
        }));
        let resolved = hexmark::config::apply_cli_overrides(merged, args.grouping);
        assert_eq!(resolved.grouping, GroupingSize::Two);
    }
}
