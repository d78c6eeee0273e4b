use clap::Parser;
use smart_ios::cli::commands::cmd_run;
use smart_ios::cli::config::{Cli, load_config, resolve_appium};
use smart_ios::cli::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    // Resolve Appium settings: CLI > config > env > defaults
    let appium = resolve_appium(cli.appium_url.as_deref(), &config);

    let outcome = cmd_run(&cli.command, &appium, &config, cli.session.as_deref())?;
    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }

    Ok(())
}
