use checklist_cli::cli::{Cli, Command};
use checklist_core::config::{self, Palette};
use checklist_core::error::AppError;
use checklist_core::model::Item;
use checklist_core::reducer::{Filter, Intent};
use checklist_core::session::Session;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "done")]
    done: &'static str,
    #[tabled(rename = "text")]
    text: String,
    #[tabled(rename = "created")]
    created: String,
}

fn format_created(millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|stamp| stamp.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".to_string())
}

fn print_items_table(items: &[Item]) {
    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow {
            id: item.id.clone(),
            done: if item.completed { "x" } else { "" },
            text: item.text.clone(),
            created: format_created(item.created_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn print_items_json(items: &[Item]) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(items).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_summary(session: &Session, palette: &Palette) {
    let remaining = format!("{} left", session.remaining());
    let total = format!("({} total)", session.items().len());
    println!("{} {}", palette.accentize(&remaining), palette.mutedize(&total));
}

fn render_view(session: &Session, filter: Filter, json: bool, palette: &Palette) -> Result<(), AppError> {
    if json {
        print_items_json(&session.filtered(filter))
    } else {
        print_items_table(&session.filtered(filter));
        print_summary(session, palette);
        Ok(())
    }
}

fn resolve_palette(theme_flag: Option<&str>) -> Palette {
    let load = config::load_config_with_fallback();
    if let Some(err) = load.error {
        tracing::warn!("ignoring config: {err}");
    }
    let config = config::apply_theme_override(&load.config, theme_flag);
    config::palette_for_theme(config.theme.as_deref())
}

fn execute(
    session: &mut Session,
    command: Command,
    json: bool,
    filter: &mut Filter,
    palette: &Palette,
) -> Result<(), AppError> {
    match command {
        Command::Add { text } => {
            let before = session.items().len();
            session.dispatch(Intent::Add(text.unwrap_or_default()));
            if json {
                print_items_json(session.items())?;
            } else if session.items().len() > before {
                let added = &session.items()[0];
                println!("Added: {} ({})", added.text, added.id);
            }
        }
        Command::Toggle { id } => {
            session.dispatch(Intent::Toggle(id.clone()));
            if json {
                print_items_json(session.items())?;
            } else if let Some(item) = session.items().iter().find(|item| item.id == id) {
                let state = if item.completed { "done" } else { "open" };
                println!("Toggled: {} ({}) is now {}", item.text, item.id, state);
            }
        }
        Command::Remove { id } => {
            let before = session.items().len();
            session.dispatch(Intent::Remove(id.clone()));
            if json {
                print_items_json(session.items())?;
            } else if session.items().len() < before {
                println!("Removed: {id}");
            }
        }
        Command::Clear => {
            let before = session.items().len();
            session.dispatch(Intent::ClearCompleted);
            if json {
                print_items_json(session.items())?;
            } else {
                println!("Cleared {} completed item(s)", before - session.items().len());
            }
        }
        Command::List { filter: selected } => {
            *filter = selected.into();
            render_view(session, *filter, json, palette)?;
        }
    }

    Ok(())
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let palette = resolve_palette(cli.theme.as_deref());
    let mut session = Session::open()?;
    let mut filter = Filter::All;
    execute(&mut session, cli.command, cli.json, &mut filter, &palette)
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    AppError::invalid_input(first_line.strip_prefix("error: ").unwrap_or(first_line))
}

// Whitespace-splits a line, honoring double quotes and backslash escapes
// inside them.
fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => match chars.next() {
                Some(escaped @ ('"' | '\\')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let palette = resolve_palette(None);
    let mut session = Session::open()?;
    let mut filter = Filter::All;

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("checklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        let is_mutation = !matches!(cli.command, Command::List { .. });
        if let Err(err) = execute(&mut session, cli.command, cli.json, &mut filter, &palette) {
            eprintln!("ERROR: {}", err);
            continue;
        }

        // Mirror the mutation in the active view right away.
        if is_mutation && !cli.json {
            render_view(&session, filter, false, &palette)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
