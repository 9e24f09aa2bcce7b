//! Command dispatch.

use crate::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::adapter::inbound::cli::{analyze, config, diagnostic, legal, regions};
use crate::infrastructure::config::logging::LoggingConfig;

fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

fn init_logging(logging: &LoggingConfig, verbose: u8) {
    logging.with_verbosity(verbose).init();
}

/// Run a parsed command line.
pub async fn execute(cli: Cli) -> miette::Result<()> {
    apply_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Analyze(args) => {
            let config = config::load(&args.config, false)?;
            init_logging(&config.logging, cli.verbose);
            analyze::execute(&args, &config)
                .await
                .map_err(diagnostic::report)
        }
        Commands::LegalRate(args) => {
            let config = config::load(&args.config, false)?;
            legal::show(&config);
            Ok(())
        }
        Commands::Regions => {
            regions::list();
            Ok(())
        }
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force).map_err(diagnostic::report)
        }
        Commands::Config(ConfigCommand::Show(args)) => {
            let loaded = config::load(&args.config, false)?;
            config::execute_show(&loaded);
            Ok(())
        }
        Commands::Config(ConfigCommand::Validate(args)) => {
            let loaded = config::load(&args.config, true)?;
            config::execute_validate(&args.config, &loaded);
            Ok(())
        }
    }
}
