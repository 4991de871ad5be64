//! Trick list rendering.

use crate::types::{StanceColumn, TrickRecord};
use serde::Serialize;
use serde_json::Value;

/// Output format for the trick list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Tricks sharing one difficulty, with stance prefixes applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyGroup {
    pub difficulty: i64,
    pub tricks: Vec<String>,
}

/// Group a category's tricks by difficulty `1..=max_difficulty`.
///
/// Each stance column is its own entry: a trick with base difficulty 2 and
/// fakie difficulty 4 shows up as "Kickflip" under 2 and "Fakie Kickflip"
/// under 4. Within a group, tricks keep store order.
pub fn group_by_difficulty(tricks: &[TrickRecord], max_difficulty: i64) -> Vec<DifficultyGroup> {
    (1..=max_difficulty)
        .map(|difficulty| {
            let mut names = Vec::new();
            for trick in tricks {
                for column in StanceColumn::ALL {
                    if trick.get(column) == Some(difficulty) {
                        names.push(format!("{}{}", column.display_prefix(), trick.name));
                    }
                }
            }
            DifficultyGroup {
                difficulty,
                tricks: names,
            }
        })
        .collect()
}

/// Plain text listing, one header per difficulty.
pub fn format_groups_text(groups: &[DifficultyGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("----- Difficulty: {} ------\n", group.difficulty));
        for name in &group.tricks {
            out.push_str(name);
            out.push('\n');
        }
    }
    out
}

/// Markdown listing; empty difficulties are omitted.
pub fn format_groups_markdown(category: &str, groups: &[DifficultyGroup]) -> String {
    let total: usize = groups.iter().map(|g| g.tricks.len()).sum();
    let mut md = String::new();

    md.push_str(&format!("# {} ({})\n\n", category, total));

    for group in groups.iter().filter(|g| !g.tricks.is_empty()) {
        md.push_str(&format!("## Difficulty {}\n\n", group.difficulty));
        for name in &group.tricks {
            md.push_str(&format!("- {}\n", name));
        }
        md.push('\n');
    }

    md
}

/// JSON listing.
pub fn format_groups_json(category: &str, groups: &[DifficultyGroup]) -> Value {
    serde_json::json!({
        "category": category,
        "difficulties": groups,
    })
}

/// Render in the requested format.
pub fn render(category: &str, groups: &[DifficultyGroup], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_groups_text(groups),
        OutputFormat::Markdown => format_groups_markdown(category, groups),
        OutputFormat::Json => {
            let mut json = format_groups_json(category, groups).to_string();
            json.push('\n');
            json
        }
    }
}
