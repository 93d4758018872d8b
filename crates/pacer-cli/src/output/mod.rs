use pacer_core::entities::Task;
use pacer_core::responses::{RankResponse, StatsResponse};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_key_value(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Tasks as a fixed-column table; JSON formats carry every field.
pub fn render_tasks(tasks: &[Task], format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(&tasks, format);
    }
    let table = task_table(tasks);
    if table.is_empty() {
        return Ok(String::from("(no tasks)"));
    }
    Ok(table.render(table_options()))
}

pub fn output_tasks(tasks: &[Task], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_tasks(tasks, format)?);
    Ok(())
}

pub fn output_rank(response: &RankResponse, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        println!("outcome: {}", response.outcome);
        return output_tasks(&response.tasks, format);
    }
    output(response, format)
}

pub fn output_stats(stats: &StatsResponse, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(stats, format);
    }

    let mut summary = Table::new(["metric", "value"]);
    for (metric, value) in [
        ("total", stats.total.to_string()),
        ("active", stats.active.to_string()),
        ("done", stats.done.to_string()),
        ("completion", format!("{:.0}%", stats.completion_rate * 100.0)),
        ("done today", stats.done_today.to_string()),
        ("done last 7 days", stats.done_last_7_days.to_string()),
        ("overdue", stats.overdue.to_string()),
        ("streak (days)", stats.streak_days.to_string()),
    ] {
        summary.push_row(vec![metric.to_string(), value]);
    }

    let mut categories = Table::new(["category", "active", "done"]);
    for row in &stats.by_category {
        categories.push_row(vec![
            row.category.to_string(),
            row.active.to_string(),
            row.done.to_string(),
        ]);
    }

    let options = table_options();
    println!("{}\n\n{}", summary.render(options), categories.render(options));
    Ok(())
}

fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new([
        "id", "title", "status", "priority", "energy", "category", "deadline", "reason",
    ]);
    for task in tasks {
        table.push_row(vec![
            task.id.clone(),
            task.title.clone(),
            task.status.to_string(),
            task.priority.to_string(),
            task.energy.to_string(),
            task.category.to_string(),
            task.deadline.map_or_else(|| "-".to_string(), |d| d.to_string()),
            task.priority_reason.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

fn render_key_value<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let Value::Object(map) = value else {
        return Ok(value_to_cell(&value));
    };

    let mut table = Table::new(["key", "value"]);
    for (key, value) in map {
        table.push_row(vec![key, value_to_cell(&value)]);
    }
    Ok(table.render(table_options()))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
