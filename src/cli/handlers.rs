use std::path::PathBuf;

use chrono::{Local, NaiveDate, TimeZone};

use crate::cli::commands::*;
use crate::cli::output::{ListJson, format_task_line, task_to_json};
use crate::io::storage;
use crate::model::filter::{Filters, SortKey, SortOrder, StatusFilter};
use crate::model::task::{Priority, TaskPatch};
use crate::ops::store::TaskStore;
use crate::ops::view;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let path = store_path(cli.file.as_deref());
    let mut store = TaskStore::open(path);

    match cli.command {
        Commands::Add(args) => cmd_add(&mut store, args),
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Done(args) => cmd_done(&mut store, args),
        Commands::Star(args) => cmd_star(&mut store, args),
        Commands::Edit(args) => cmd_edit(&mut store, args),
        Commands::Due(args) => cmd_due(&mut store, args),
        Commands::Priority(args) => cmd_priority(&mut store, args),
        Commands::Note(args) => cmd_note(&mut store, args),
        Commands::Rm(args) => cmd_rm(&mut store, args),
        Commands::Clear => cmd_clear(&mut store),
        Commands::Stats => cmd_stats(&store, json),
    }
}

fn store_path(file: Option<&str>) -> PathBuf {
    match file {
        Some(f) => PathBuf::from(f),
        None => storage::default_store_path(),
    }
}

/// Resolve a (possibly abbreviated) task id to the full id. Prints a short
/// message and returns `None` for unknown or ambiguous prefixes — both are
/// handled as no-ops, not errors.
fn resolve_id(store: &TaskStore, prefix: &str) -> Option<String> {
    let mut matches = store.tasks().iter().filter(|t| t.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Some(task.id.clone()),
        (Some(_), Some(_)) => {
            println!("ambiguous id: {}", prefix);
            None
        }
        (None, _) => {
            println!("no such task: {}", prefix);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut TaskStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    match store.create(&args.text) {
        Some(task) => println!("{}", task.id),
        None => println!("nothing added: task text is empty"),
    }
    Ok(())
}

fn cmd_done(store: &mut TaskStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    let completed = store.get(&id).map(|t| t.completed).unwrap_or(false);
    store.update(&id, TaskPatch::new().completed(!completed));
    Ok(())
}

fn cmd_star(store: &mut TaskStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    let starred = store.get(&id).map(|t| t.starred).unwrap_or(false);
    store.update(&id, TaskPatch::new().starred(!starred));
    Ok(())
}

fn cmd_edit(store: &mut TaskStore, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    if args.text.trim().is_empty() {
        println!("not updated: task text is empty");
        return Ok(());
    }
    store.update(&id, TaskPatch::new().text(args.text));
    Ok(())
}

fn cmd_due(store: &mut TaskStore, args: DueArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    let due = match args.date.as_deref() {
        Some(s) => Some(parse_due_date(s)?),
        None => None,
    };
    store.update(&id, TaskPatch::new().due_date(due));
    Ok(())
}

fn cmd_priority(
    store: &mut TaskStore,
    args: PriorityArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    let priority = match args.level.as_deref() {
        Some(s) => Some(
            Priority::parse(s)
                .ok_or_else(|| format!("invalid priority '{}' (low, medium, high)", s))?,
        ),
        None => None,
    };
    store.update(&id, TaskPatch::new().priority(priority));
    Ok(())
}

fn cmd_note(store: &mut TaskStore, args: NoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    store.update(&id, TaskPatch::new().notes(args.text));
    Ok(())
}

fn cmd_rm(store: &mut TaskStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Some(id) = resolve_id(store, &args.id) else {
        return Ok(());
    };
    store.delete(&id);
    Ok(())
}

fn cmd_clear(store: &mut TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    let before = store.tasks().len();
    store.clear_completed();
    println!("cleared {} completed", before - store.tasks().len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &TaskStore, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filters = parse_filters(&args)?;
    let visible = view::project(store.tasks(), &filters);

    if json {
        let out = ListJson {
            tasks: visible.iter().map(|t| task_to_json(t)).collect(),
            counts: view::counts(store.tasks()),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for task in &visible {
            println!("{}", format_task_line(task));
        }
        let counts = view::counts(store.tasks());
        println!("{} of {} tasks", visible.len(), counts.total);
    }
    Ok(())
}

fn cmd_stats(store: &TaskStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let counts = view::counts(store.tasks());
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("active:    {}", counts.active);
        println!("completed: {}", counts.completed);
        println!("starred:   {}", counts.starred);
        println!("total:     {}", counts.total);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_filters(args: &ListArgs) -> Result<Filters, String> {
    let mut filters = Filters::default();
    if let Some(s) = args.status.as_deref() {
        filters.status = StatusFilter::parse(s)
            .ok_or_else(|| format!("invalid status '{}' (all, active, completed, starred)", s))?;
    }
    if let Some(s) = args.sort.as_deref() {
        filters.sort_by = SortKey::parse(s)
            .ok_or_else(|| format!("invalid sort key '{}' (created, due, priority, alpha)", s))?;
    }
    if let Some(s) = args.order.as_deref() {
        filters.sort_order =
            SortOrder::parse(s).ok_or_else(|| format!("invalid order '{}' (asc, desc)", s))?;
    }
    Ok(filters)
}

fn parse_due_date(s: &str) -> Result<chrono::DateTime<Local>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))?;
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| format!("date '{}' does not exist in the local timezone", s))
}
