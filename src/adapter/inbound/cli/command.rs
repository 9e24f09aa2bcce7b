//! Command-line interface definitions.
//!
//! Defines the CLI structure for krent using `clap`: quote analysis, the
//! legal rate cap, the built-in region table, and configuration management.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;

/// Wolse (monthly rent) quote checker backed by MOLIT real transactions
#[derive(Parser, Debug)]
#[command(name = "krent")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a deposit/rent quote against recent transactions
    Analyze(Box<AnalyzeArgs>),

    /// Show the legal maximum conversion rate
    LegalRate(ConfigPathArg),

    /// List built-in district codes
    Regions,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `krent config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// City or province
    #[arg(long, default_value = "서울특별시")]
    pub city: String,

    /// District name (마포구) or 5-digit MOLIT code
    #[arg(long)]
    pub district: String,

    /// Neighborhood (법정동)
    #[arg(long)]
    pub dong: Option<String>,

    /// Apartment complex name
    #[arg(long)]
    pub apartment: Option<String>,

    /// Exclusive area in square meters
    #[arg(long)]
    pub area: Option<Decimal>,

    /// Deposit in won
    #[arg(long)]
    pub deposit: String,

    /// Monthly rent in won
    #[arg(long)]
    pub rent: String,

    /// Analyze as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Read raw transactions from a JSON file instead of the MOLIT API
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn analyze(args: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["krent", "analyze"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Analyze(args) => *args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_analyze_minimal() {
        let args = analyze(&["--district", "마포구", "--deposit", "50000000", "--rent", "1500000"]);
        assert_eq!(args.city, "서울특별시");
        assert_eq!(args.district, "마포구");
        assert_eq!(args.deposit, "50000000");
        assert!(args.dong.is_none());
        assert!(args.file.is_none());
        assert_eq!(args.config, paths::default_config());
    }

    #[test]
    fn test_parse_analyze_full() {
        let args = analyze(&[
            "--city", "서울", "--district", "11440", "--dong", "공덕동", "--apartment",
            "공덕래미안", "--area", "84.9", "--deposit", "50,000,000", "--rent", "1500000",
            "--as-of", "2024-06-30", "--file", "rows.json", "-c", "krent.toml",
        ]);
        assert_eq!(args.area, Some(dec!(84.9)));
        assert_eq!(args.apartment.as_deref(), Some("공덕래미안"));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(args.file, Some(PathBuf::from("rows.json")));
        assert_eq!(args.config, PathBuf::from("krent.toml"));
    }

    #[test]
    fn test_analyze_requires_quote() {
        assert!(Cli::try_parse_from(["krent", "analyze", "--district", "마포구"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["krent", "--json", "-vv", "regions"]).unwrap();
        assert!(cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Regions));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["krent", "--color", "never", "regions"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli = Cli::try_parse_from(["krent", "config", "init", "out.toml", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommand::Init(args)) => {
                assert_eq!(args.path, PathBuf::from("out.toml"));
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_legal_rate_config_path() {
        let cli = Cli::try_parse_from(["krent", "legal-rate", "--config", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::LegalRate(ConfigPathArg { ref config }) if config == &PathBuf::from("x.toml")
        ));
    }
}
