//! Fixed-width table output.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use cloudlaunch::rest::resources::{Application, Cloud, Deployment, Task};
use cloudlaunch::Resource;

const NOT_AVAILABLE: &str = "N/A";

/// Format a `(header, width)` table. Cells are padded and truncated to
/// their column width.
fn table(columns: &[(&str, usize)], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut out = String::new();
    let headers: Vec<&str> = columns.iter().map(|(header, _)| *header).collect();
    write_row(&mut out, columns, &headers);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(&mut out, columns, &cells);
    }
    out
}

fn write_row(out: &mut String, columns: &[(&str, usize)], cells: &[&str]) {
    let cells: Vec<String> = columns
        .iter()
        .zip(cells)
        .map(|(&(_, width), cell)| format!("{cell:width$.width$}"))
        .collect();
    let _ = writeln!(out, "{}", cells.join("  ").trim_end());
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Format a timestamp as a human-readable age (e.g., "2 hours ago").
pub fn format_age(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let added = DateTime::parse_from_rfc3339(timestamp).ok()?.with_timezone(&Utc);
    let age = now.signed_duration_since(added).to_std().unwrap_or_default();
    Some(timeago::Formatter::new().convert(age))
}

/// `ACTION:status`, where status is the instance status of a finished
/// health check.
pub fn task_status(task: &Task<'_>) -> String {
    let status = task.instance_status().or_else(|| task.status());
    format!("{}:{}", text(task.action()), text(status))
}

pub fn deployments(resources: &[Resource]) -> String {
    deployments_at(resources, Utc::now())
}

fn deployments_at(resources: &[Resource], now: DateTime<Utc>) -> String {
    if resources.is_empty() {
        return "No deployments.\n".to_string();
    }

    let rows = resources.iter().filter_map(Deployment::new).map(|deployment| {
        let resource = deployment.resource();
        vec![
            text(deployment.name()),
            resource
                .get_str("added")
                .and_then(|added| format_age(added, now))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            deployment
                .latest_task()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |task| task_status(&task)),
            text(deployment.public_ip().or(Some(NOT_AVAILABLE))),
        ]
    });
    table(
        &[("Name", 24), ("Created", 15), ("Status", 20), ("Address", 15)],
        rows,
    )
}

pub fn task(resource: &Resource) -> String {
    let id = resource.id().map(ToString::to_string).unwrap_or_default();
    match Task::new(resource) {
        Some(task) => format!("Task {id}  {}", task_status(&task)),
        None => format!("Task {id}"),
    }
}

pub fn applications(resources: &[Resource]) -> String {
    let rows = resources.iter().filter_map(Application::new).map(|app| {
        vec![text(app.slug()), text(app.name()), text(app.summary())]
    });
    table(&[("Slug", 20), ("Name", 30), ("Summary", 40)], rows)
}

pub fn clouds(resources: &[Resource]) -> String {
    let rows = resources.iter().filter_map(Cloud::new).map(|cloud| {
        vec![text(cloud.slug()), text(cloud.name()), text(cloud.cloud_type())]
    });
    table(&[("Slug", 28), ("Name", 32), ("Type", 10)], rows)
}

fn id_and_name(header: &'static str, resources: &[Resource]) -> String {
    let rows = resources.iter().map(|resource| {
        vec![
            resource.id().map(ToString::to_string).unwrap_or_default(),
            text(resource.get_str("name")),
        ]
    });
    table(&[(header, 24), ("Name", 32)], rows)
}

pub fn regions(resources: &[Resource]) -> String {
    id_and_name("Region", resources)
}

pub fn zones(resources: &[Resource]) -> String {
    id_and_name("Zone", resources)
}

pub fn vm_types(resources: &[Resource]) -> String {
    id_and_name("ID", resources)
}
