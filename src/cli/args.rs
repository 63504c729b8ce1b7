use clap::Parser;
use std::path::PathBuf;
use termenu::{ColorChoice, Config};

/// Interactive numbered menu demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Do not clear the screen before the first render
    #[arg(long)]
    pub no_clear: bool,

    /// When to color menu output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Session options selected on the command line.
    pub fn config(&self) -> Config {
        Config {
            clear_screen: !self.no_clear,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["termenu"]).unwrap();
        let config = cli.config();
        assert!(config.clear_screen);
        assert_eq!(config.color, ColorChoice::Auto);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "termenu",
            "--no-clear",
            "--color",
            "never",
            "--log-file",
            "/tmp/termenu.log",
        ])
        .unwrap();
        let config = cli.config();
        assert!(!config.clear_screen);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/termenu.log")));
    }

    #[test]
    fn test_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["termenu", "--color", "purple"]).is_err());
    }
}
