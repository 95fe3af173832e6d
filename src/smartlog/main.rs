use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use smartlog::api::LogbookApi;
use smartlog::clipboard::copy_to_clipboard;
use smartlog::config::SmartlogConfig;
use smartlog::error::{Result, SmartlogError};
use smartlog::logbook::Logbook;
use smartlog::persistence::LoadSource;
use smartlog::store::fs::FileStore;
use smartlog::view::SortOrder;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod args;
mod cli;
use args::{Cli, Commands};
use cli::print::{print_full_record, print_messages, print_view};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

struct AppContext {
    api: LogbookApi<FileStore>,
    config: SmartlogConfig,
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;

    // Config edits must not open (and possibly seed) the log book.
    let command = match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&data_dir, key, value),
        other => other,
    };

    let mut ctx = init_context(data_dir)?;

    match command {
        Some(Commands::Add { title, content }) => handle_add(&mut ctx, title, content),
        Some(Commands::List {
            search,
            desc,
            asc,
            expand,
        }) => handle_list(&mut ctx, search, desc, asc, expand),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Delete { ids, yes }) => handle_delete(&mut ctx, ids, yes),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Copy { id }) => handle_copy(&ctx, id),
        Some(Commands::Export {
            format,
            output,
            stdout,
        }) => handle_export(&ctx, format.into(), output, stdout),
        Some(Commands::Import { path }) => handle_import(&mut ctx, &path),
        Some(Commands::Backup { output }) => handle_backup(&ctx, output),
        Some(Commands::Restore { path }) => handle_restore(&mut ctx, &path),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&mut ctx, None, false, false, false),
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os("SMARTLOG_HOME") {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "smartlog", "smartlog")
        .ok_or_else(|| SmartlogError::Store("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context(data_dir: PathBuf) -> Result<AppContext> {
    let config = SmartlogConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, using defaults");
        SmartlogConfig::default()
    });

    let store = FileStore::new(&data_dir);
    let book = Logbook::open_with(store, &config.logbook_options());
    tracing::debug!(
        root = %book.store().root().display(),
        source = ?book.load_source(),
        "opened log book"
    );
    if book.load_source() == LoadSource::Recovered {
        eprintln!(
            "{}",
            "Stored logs could not be read; starting with an empty log book.".yellow()
        );
    }

    let api = LogbookApi::new(book, config.sort_order());
    Ok(AppContext { api, config })
}

fn handle_add(ctx: &mut AppContext, title: Option<String>, content: Option<String>) -> Result<()> {
    let content = match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(c) => c.to_string(),
        None => String::new(),
    };

    let result = ctx
        .api
        .create_log(title.as_deref().unwrap_or_default(), &content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    desc: bool,
    asc: bool,
    expand: bool,
) -> Result<()> {
    let wanted = if desc {
        SortOrder::Descending
    } else if asc {
        SortOrder::Ascending
    } else {
        ctx.config.sort_order()
    };
    if ctx.api.sort_order() != wanted {
        ctx.api.toggle_sort();
    }
    if let Some(term) = search {
        ctx.api.set_search(term);
    }

    let result = ctx.api.list()?;
    if let Some(view) = &result.view {
        print_view(view, ctx.api.search_term(), expand);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: u64) -> Result<()> {
    let record = ctx.api.find(id)?;
    print_full_record(record);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<u64>, yes: bool) -> Result<()> {
    let prompt = if ids.len() == 1 {
        format!("Are you sure you want to delete log #{}?", ids[0])
    } else {
        format!("Are you sure you want to delete {} logs?", ids.len())
    };
    if !yes && !confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }

    let result = ctx.api.delete_logs(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let prompt = "Are you sure you want to delete ALL logs? This action cannot be undone.";
    if !yes && !confirm(prompt)? {
        println!("Cancelled.");
        return Ok(());
    }

    let result = ctx.api.clear_all()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &AppContext, id: u64) -> Result<()> {
    let result = ctx.api.copy_log(id)?;
    let Some(text) = result.clipboard_text else {
        return Ok(());
    };

    match copy_to_clipboard(&text) {
        Ok(()) => println!("{}", format!("Log #{} copied to clipboard", id).green()),
        Err(e) => {
            eprintln!("{} {}", "Warning: Failed to copy to clipboard:".yellow(), e);
            println!("{}", text);
        }
    }
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    format: smartlog::codec::ExportFormat,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    if stdout {
        println!("{}", ctx.api.render_export(format)?);
        return Ok(());
    }
    let result = ctx.api.export_logs(format, output, &current_dir())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let result = ctx.api.import_logs(path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.backup(output, &current_dir())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let result = ctx.api.restore(path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = SmartlogConfig::load(data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in SmartlogConfig::keys() {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(data_dir)?;
            println!("{}", format!("{} = {}", key, config.get(&key)?).green());
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
