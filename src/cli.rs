use std::{io, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use crate::{
    domain::{Activity, ActivityDraft, Category, calorie_amount, check_calories},
    persistence,
    storage::{self, FileStore},
    store::ActivityStore,
    summary::{CalorieSummary, category_name, format_amount},
};

#[derive(Parser, Debug)]
#[command(name = "caloria")]
#[command(about = "Calorie tracking for meals and workouts", long_about = None)]
pub enum Cli {
    #[command(about = "Log a new activity")]
    Add {
        #[arg(help = "What you ate or did")]
        name: String,

        #[arg(help = "Calories consumed or burned", value_parser = parse_calories)]
        calories: f64,

        #[arg(long, short, value_enum, default_value_t = CategoryArg::Consumed)]
        category: CategoryArg,
    },

    #[command(about = "Change a logged activity")]
    Edit {
        #[arg(help = "Activity ID or unique prefix")]
        id: String,

        #[arg(long, help = "New name")]
        name: Option<String>,

        #[arg(long, help = "New calorie value", value_parser = parse_calories)]
        calories: Option<f64>,

        #[arg(long, short, value_enum, help = "New category")]
        category: Option<CategoryArg>,
    },

    #[command(about = "Delete a logged activity")]
    Delete {
        #[arg(help = "Activity ID or unique prefix")]
        id: String,
    },

    #[command(about = "List logged activities")]
    List,

    #[command(about = "Show consumed, burned and net calories")]
    Summary,

    #[command(about = "Remove every logged activity")]
    Restart,

    #[command(about = "Export activities")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Consumed,
    Burned,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Consumed => Category::Consumed,
            CategoryArg::Burned => Category::Burned,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityExport {
    pub id: String,
    pub category_id: u8,
    pub category_name: String,
    pub name: String,
    #[serde(serialize_with = "calorie_amount::serialize")]
    pub calories: f64,
}

impl From<&Activity> for ActivityExport {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            category_id: activity.category.id(),
            category_name: category_name(activity.category.id()).to_string(),
            name: activity.name.clone(),
            calories: activity.calories,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(serialize_with = "calorie_amount::serialize")]
    pub calories_consumed: f64,
    #[serde(serialize_with = "calorie_amount::serialize")]
    pub calories_burned: f64,
    #[serde(serialize_with = "calorie_amount::serialize")]
    pub net_calories: f64,
    pub activities: Vec<ActivityExport>,
}

fn parse_calories(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    check_calories(value).map_err(|e| e.to_string())
}

fn open_store() -> ActivityStore {
    persistence::open_store(FileStore::open_default())
}

/// Resolves a full id or an unambiguous prefix of one.
pub fn resolve_id(activities: &[Activity], query: &str) -> Result<String, String> {
    if let Some(exact) = activities.iter().find(|activity| activity.id == query) {
        return Ok(exact.id.clone());
    }

    let matches = activities
        .iter()
        .filter(|activity| !query.is_empty() && activity.id.starts_with(query));

    match matches.exactly_one() {
        Ok(activity) => Ok(activity.id.clone()),
        Err(mut rest) => {
            if rest.next().is_none() {
                Err(format!("No activity matches '{}'", query))
            } else {
                Err(format!("'{}' matches more than one activity", query))
            }
        }
    }
}

pub fn add_activity(
    store: &mut ActivityStore,
    name: String,
    calories: f64,
    category: Category,
) -> Result<Activity, String> {
    let draft = ActivityDraft::new(category, name.trim(), calories);
    draft.validate().map_err(|e| e.to_string())?;

    store.save_activity(draft);
    store
        .activities()
        .last()
        .cloned()
        .ok_or_else(|| "Activity was not saved".to_string())
}

pub fn edit_activity(
    store: &mut ActivityStore,
    query: &str,
    name: Option<String>,
    calories: Option<f64>,
    category: Option<Category>,
) -> Result<Activity, String> {
    let id = resolve_id(store.activities(), query)?;

    store.handle_edit(&id);
    let Some(current) = store.active_activity() else {
        return Err(format!("No activity matches '{}'", query));
    };

    let mut draft = current.to_draft();
    if let Some(name) = name {
        draft.name = name.trim().to_string();
    }
    if let Some(calories) = calories {
        draft.calories = calories;
    }
    if let Some(category) = category {
        draft.category = category;
    }

    if let Err(e) = draft.validate() {
        store.cancel_edit();
        return Err(e.to_string());
    }

    store.save_activity(draft);
    store
        .activities()
        .iter()
        .find(|activity| activity.id == id)
        .cloned()
        .ok_or_else(|| format!("Activity '{}' disappeared while editing", id))
}

pub fn delete_activity(store: &mut ActivityStore, query: &str) -> Result<Activity, String> {
    let id = resolve_id(store.activities(), query)?;
    let removed = store
        .activities()
        .iter()
        .find(|activity| activity.id == id)
        .cloned()
        .ok_or_else(|| format!("No activity matches '{}'", query))?;

    store.handle_delete(&id);
    Ok(removed)
}

pub fn restart(store: &mut ActivityStore) -> Result<usize, String> {
    if !store.can_restart() {
        return Err("Nothing to restart, no activities logged".to_string());
    }
    let count = store.activities().len();
    store.restart_app();
    Ok(count)
}

pub fn format_activity_table(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return "No activities yet".to_string();
    }

    activities
        .iter()
        .map(|activity| {
            format!(
                "{:8}  {:10} {:24} {:>6} kcal",
                short_id(&activity.id),
                activity.category.label(),
                activity.name,
                format_amount(activity.calories)
            )
        })
        .join("\n")
}

pub fn format_summary(summary: &CalorieSummary) -> String {
    [
        format!("{:20} {:>8}", "Consumed", format_amount(summary.calories_consumed)),
        format!("{:20} {:>8}", "Burned", format_amount(summary.calories_burned)),
        "-".repeat(29),
        format!("{:20} {:>8}", "Net", format_amount(summary.net_calories())),
    ]
    .join("\n")
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn build_export(store: &ActivityStore) -> DataExport {
    let summary = store.summary();
    DataExport {
        schema_version: 1,
        exported_at: Utc::now(),
        calories_consumed: summary.calories_consumed,
        calories_burned: summary.calories_burned,
        net_calories: summary.net_calories(),
        activities: store.activities().iter().map(ActivityExport::from).collect(),
    }
}

pub fn export_csv(activities: &[ActivityExport]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for activity in activities {
        writer.serialize(activity).map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

pub fn export_data(
    store: &ActivityStore,
    format: ExportFormat,
    out_path: Option<PathBuf>,
) -> Result<(), String> {
    let export = build_export(store);

    match format {
        ExportFormat::Json => {
            if let Some(path) = out_path {
                let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
                storage::write_export_file(&path, &json).map_err(|e| e.to_string())?;
                println!("Exported to {}", path.display());
            } else {
                let json = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
                println!("{}", json);
            }
        }
        ExportFormat::Csv => {
            let csv = export_csv(&export.activities)?;
            if let Some(path) = out_path {
                storage::write_export_file(&path, &csv).map_err(|e| e.to_string())?;
                println!("Exported to {}", path.display());
            } else {
                print!("{}", csv);
            }
        }
    }

    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    };
    clap_complete::generate(shell, &mut Cli::command(), "caloria", &mut io::stdout());
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    match cli {
        Cli::Add {
            name,
            calories,
            category,
        } => {
            let mut store = open_store();
            let added = add_activity(&mut store, name, calories, category.into())?;
            info!(id = %added.id, "added activity");
            println!(
                "Added {} '{}' ({} kcal) [{}]",
                added.category.label(),
                added.name,
                format_amount(added.calories),
                short_id(&added.id)
            );
        }
        Cli::Edit {
            id,
            name,
            calories,
            category,
        } => {
            let mut store = open_store();
            let edited = edit_activity(
                &mut store,
                &id,
                name,
                calories,
                category.map(Category::from),
            )?;
            info!(id = %edited.id, "edited activity");
            println!(
                "Updated {} '{}' ({} kcal)",
                edited.category.label(),
                edited.name,
                format_amount(edited.calories)
            );
        }
        Cli::Delete { id } => {
            let mut store = open_store();
            let removed = delete_activity(&mut store, &id)?;
            info!(id = %removed.id, "deleted activity");
            println!("Deleted '{}'", removed.name);
        }
        Cli::List => {
            let store = open_store();
            println!("{}", format_activity_table(store.activities()));
        }
        Cli::Summary => {
            let store = open_store();
            println!("{}", format_summary(&store.summary()));
        }
        Cli::Restart => {
            let mut store = open_store();
            let count = restart(&mut store)?;
            println!("Cleared {} activities", count);
        }
        Cli::Export { format, out } => {
            let store = open_store();
            export_data(&store, format, out)?;
        }
        Cli::Completions { shell } => print_completions(&shell)?,
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
