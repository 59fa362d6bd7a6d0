use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shortdial",
    about = "Employee short-number directory",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory file (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Config file [default: ./shortdial.toml if present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List employees, optionally filtered by name or short number
    #[command(alias = "ls")]
    List(ListArgs),
    /// Add an employee
    Add(AddArgs),
    /// Change an employee's name and short number
    Edit(EditArgs),
    /// Remove an employee
    #[command(alias = "rm")]
    Remove(RemoveArgs),
    /// Show one employee
    Show(ShowArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive name match or exact short-number substring
    pub query: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    pub short: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Employee id or a unique prefix of it
    pub id: String,
    pub name: String,
    pub short: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Employee id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Employee id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct ConfigArgs {}
