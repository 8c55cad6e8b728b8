use super::print::{print_config, print_path, print_result};
use super::setup::{Cli, Commands, TagCommands};
use super::styles::Styles;
use clap::Parser;
use jt::api::{ConfigAction, JtApi};
use jt::config::{default_config_dir, default_db_path, JtConfig};
use jt::error::{JtError, Result};
use jt::interact::ExternalTools;
use jt::store::fs::FileStore;
use jt::vault::Vault;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ENV_CONFIG_DIR: &str = "JT_CONFIG_DIR";
const ENV_VAULT: &str = "JT_VAULT";
const ENV_DB: &str = "JT_DB";

struct AppContext {
    api: JtApi<FileStore>,
    cwd: PathBuf,
    ui: ExternalTools,
    styles: Styles,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Tags { command } => match command {
            TagCommands::Add { key, name } => handle_tags_add(&mut ctx, key, name),
            TagCommands::Rm { key } => handle_tags_rm(&mut ctx, key),
            TagCommands::Mv { old, new } => handle_tags_mv(&mut ctx, old, new),
            TagCommands::Rename { key, name } => handle_tags_rename(&mut ctx, key, name),
            TagCommands::List { all, key } => handle_tags_list(&ctx, key, all),
            TagCommands::Cd { ext } => handle_tags_cd(&ctx, ext),
        },
        Commands::Add => handle_add(&mut ctx),
        Commands::Rm => handle_rm(&mut ctx),
        Commands::Nav => handle_nav(&mut ctx),
        Commands::Ls { all } => handle_ls(&ctx, all),
        Commands::Preview { id } => handle_preview(&ctx, id),
        Commands::Append => handle_append(&mut ctx),
        Commands::Rename { name } => handle_rename(&mut ctx, name),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config_dir = env_path(ENV_CONFIG_DIR)
        .or_else(default_config_dir)
        .ok_or_else(|| JtError::Config("Could not determine config directory".to_string()))?;
    let config = JtConfig::load(&config_dir)?;

    let vault = cli
        .vault
        .clone()
        .or_else(|| env_path(ENV_VAULT))
        .unwrap_or_else(|| PathBuf::from(&config.vault));

    let db_path = match cli.db.clone().or_else(|| env_path(ENV_DB)) {
        Some(path) => path,
        None => match (&config.db_path, default_db_path()) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => path,
            (None, None) => {
                return Err(JtError::Config(
                    "Could not determine database path; set db_path or pass --db".to_string(),
                ))
            }
        },
    };
    debug!(vault = %vault.display(), db = %db_path.display(), config = %config_dir.display(), "context resolved");

    let styles = Styles::new(config.palette);
    let api = JtApi::new(FileStore::new(db_path), Vault::new(vault), config_dir);
    Ok(AppContext {
        api,
        cwd,
        ui: ExternalTools,
        styles,
    })
}

fn handle_tags_add(ctx: &mut AppContext, key: String, name: Vec<String>) -> Result<()> {
    let result = ctx.api.add_tag(&key, &name.join(" "))?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_tags_rm(ctx: &mut AppContext, key: String) -> Result<()> {
    let result = ctx.api.remove_tag(&key)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_tags_mv(ctx: &mut AppContext, old: String, new: String) -> Result<()> {
    let result = ctx.api.move_tag(&old, &new)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_tags_rename(ctx: &mut AppContext, key: String, name: Vec<String>) -> Result<()> {
    let result = ctx.api.rename_tag(&key, &name.join(" "))?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_tags_list(ctx: &AppContext, key: Option<String>, all: bool) -> Result<()> {
    let result = ctx.api.list_tags(key.as_deref(), all)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_tags_cd(ctx: &AppContext, ext: String) -> Result<()> {
    let result = ctx.api.tag_path(&ext)?;
    print_path(&ctx.styles, &result);
    Ok(())
}

fn handle_add(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.tag_dir(&ctx.cwd, &mut ctx.ui)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.untag_dir(&ctx.cwd, &mut ctx.ui)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_nav(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.navigate(&ctx.cwd, &mut ctx.ui)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_ls(ctx: &AppContext, all: bool) -> Result<()> {
    let result = ctx.api.list_dir(&ctx.cwd, all)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_preview(ctx: &AppContext, id: Option<String>) -> Result<()> {
    let result = ctx.api.preview(id.as_deref())?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_append(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.append_dir(&mut ctx.ui)?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, name: Vec<String>) -> Result<()> {
    let result = ctx.api.name_dir(&ctx.cwd, name.join(" ").trim())?;
    print_result(&ctx.styles, &result);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config(action)?;
    print_config(&ctx.styles, &result, show_all);
    Ok(())
}
