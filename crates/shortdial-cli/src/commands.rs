use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use shortdial_store::{EmployeeRecord, EmployeeStore, JsonFilePersistence, LoadReport, Saved};
use tracing::info;

use crate::cli::*;
use crate::config::CliConfig;

type FileStore = EmployeeStore<JsonFilePersistence>;

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::List(args) => cmd_list(config, args, format),
        Command::Add(args) => cmd_add(config, args, format),
        Command::Edit(args) => cmd_edit(config, args, format),
        Command::Remove(args) => cmd_remove(config, args, format),
        Command::Show(args) => cmd_show(config, args, format),
        Command::Config(_) => cmd_config(config, format),
    }
}

fn open_store(config: &CliConfig) -> (FileStore, LoadReport) {
    let (store, report) = EmployeeStore::open(JsonFilePersistence::new(&config.data_file));
    if let LoadReport::Recovered { error } = &report {
        eprintln!(
            "{} could not read {}: {error}; continuing with an empty directory",
            "warning:".yellow().bold(),
            config.data_file.display()
        );
    }
    (store, report)
}

/// Write back ids assigned at load so the ids we print stay valid.
fn persist_assigned_ids(store: &FileStore, report: &LoadReport) {
    if !report.needs_save() {
        return;
    }
    match store.save() {
        Ok(()) => info!(path = %store.persistence().path().display(), "stored newly assigned ids"),
        Err(e) => eprintln!(
            "{} ids shown here are temporary: {e}",
            "warning:".yellow().bold()
        ),
    }
}

/// Unwrap a mutation, failing if its save did not reach disk.
///
/// Each invocation is its own process, so an unsaved change is lost on exit.
fn persisted<T>(saved: Saved<T>, path: &Path) -> anyhow::Result<T> {
    let (value, status) = saved.into_parts();
    status.with_context(|| format!("failed to write {}; the change was not saved", path.display()))?;
    Ok(value)
}

fn cmd_list(config: &CliConfig, args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (store, report) = open_store(config);
    persist_assigned_ids(&store, &report);
    let query = args.query.unwrap_or_default();
    let matches: Vec<&EmployeeRecord> = store.search(&query).collect();
    print!("{}", render_list(&matches, &query, format)?);
    Ok(())
}

fn cmd_add(config: &CliConfig, args: AddArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (mut store, _) = open_store(config);
    let saved = store.add(&args.name, &args.short).context("cannot add employee")?;
    let record = persisted(saved, &config.data_file)?;
    if format == OutputFormat::Text {
        println!("{} Added", "✓".green().bold());
    }
    print!("{}", render_record(&record, format)?);
    Ok(())
}

fn cmd_edit(config: &CliConfig, args: EditArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (mut store, _) = open_store(config);
    let id = store.resolve(&args.id).context("cannot edit employee")?;
    let saved = store
        .edit(&id, &args.name, &args.short)
        .context("cannot edit employee")?;
    let record = persisted(saved, &config.data_file)?;
    if format == OutputFormat::Text {
        println!("{} Updated", "✓".green().bold());
    }
    print!("{}", render_record(&record, format)?);
    Ok(())
}

fn cmd_remove(config: &CliConfig, args: RemoveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (mut store, _) = open_store(config);
    let id = store.resolve(&args.id).context("cannot remove employee")?;
    let saved = store.remove(&id).context("cannot remove employee")?;
    let record = persisted(saved, &config.data_file)?;
    if format == OutputFormat::Text {
        println!("{} Removed", "✓".green().bold());
    }
    print!("{}", render_record(&record, format)?);
    Ok(())
}

fn cmd_show(config: &CliConfig, args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (store, report) = open_store(config);
    persist_assigned_ids(&store, &report);
    let id = store.resolve(&args.id).context("cannot show employee")?;
    let record = store.get(&id).context("employee disappeared")?;
    print!("{}", render_record(record, format)?);
    Ok(())
}

fn cmd_config(config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", config.to_toml()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}

fn render_list(
    records: &[&EmployeeRecord],
    query: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(records)?));
    }
    if records.is_empty() {
        return Ok(if query.is_empty() {
            "No employees.\n".to_string()
        } else {
            format!("No employees match '{query}'.\n")
        });
    }
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{}  {} - {}\n",
            record.id.short_id().dimmed(),
            record.name.bold(),
            record.short.cyan()
        ));
    }
    Ok(out)
}

fn render_record(record: &EmployeeRecord, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => format!(
            "{} - {}\n  id: {}\n",
            record.name.bold(),
            record.short.cyan(),
            record.id
        ),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(record)?),
    })
}
