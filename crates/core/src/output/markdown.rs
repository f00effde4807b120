use crate::models::Report;
use std::path::Path;

/// Render a Report as the human-oriented markdown snapshot.
///
/// Sections appear in a fixed order and only when non-empty. Each entry
/// shows the base file name rather than the full path.
pub fn to_markdown(report: &Report) -> String {
    let mut output = String::from("# Project Snapshot\n\n");

    let core_modules: Vec<(&str, &str, &str)> = report
        .core_modules
        .iter()
        .map(|m| (m.name.as_str(), m.file.as_str(), m.description.as_str()))
        .collect();
    push_section(&mut output, "Core Modules", &core_modules);

    let sections = [
        ("UI Components", &report.components),
        ("React Hooks", &report.hooks),
        ("Utility Functions", &report.utilities),
        ("Key Types and Interfaces", &report.types),
    ];
    for (title, entries) in sections {
        let rows: Vec<(&str, &str, &str)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.file.as_str(), e.description.as_str()))
            .collect();
        push_section(&mut output, title, &rows);
    }

    output
}

fn push_section(output: &mut String, title: &str, rows: &[(&str, &str, &str)]) {
    if rows.is_empty() {
        return;
    }

    output.push_str(&format!("## {}\n\n", title));
    for (name, file, description) in rows {
        output.push_str(&format!(
            "- **{}** ({}): {}\n",
            name,
            base_name(file),
            description
        ));
    }
    output.push('\n');
}

fn base_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
