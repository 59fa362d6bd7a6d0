use clap::Parser;

mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::load(cli.config.as_deref())?.with_data_file(cli.data_file.clone());
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level(cli.verbose)?)
        .with_writer(std::io::stderr)
        .init();
    commands::run_command(cli, &config)
}
