//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::pipeline::{ContainerSummary, WrittenGroup};
use crate::infrastructure::constants::UNGROUPED_BUCKET;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the files written by `split`
    pub fn render_groups(&self, groups: &[WrittenGroup]) -> String {
        if groups.is_empty() {
            return "No group files written".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("GROUP").set_alignment(CellAlignment::Left),
                Cell::new("FILE").set_alignment(CellAlignment::Left),
                Cell::new("ROWS").set_alignment(CellAlignment::Right),
            ]);

        for group in groups {
            let color = self.theme.get_group_color(group.key == UNGROUPED_BUCKET);
            table.add_row(vec![
                Cell::new(format!("{} {}", StatusIcon::get_group_icon(&group.key), group.key))
                    .fg(color),
                Cell::new(group.path.display()),
                Cell::new(group.rows).set_alignment(CellAlignment::Right),
            ]);
        }

        let total: usize = groups.iter().map(|g| g.rows).sum();
        let mut output = String::new();
        output.push_str(&format!(
            "Wrote {} group file(s) {}\n",
            groups.len(),
            format!("[{} images]", total).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Render the containers of a generated Deployment
    pub fn render_containers(&self, containers: &[ContainerSummary]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("CONTAINER").set_alignment(CellAlignment::Left),
                Cell::new("IMAGE").set_alignment(CellAlignment::Left),
                Cell::new("PORT").set_alignment(CellAlignment::Right),
            ]);

        for container in containers {
            let port = container
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                Cell::new(&container.name),
                Cell::new(&container.image),
                Cell::new(port)
                    .fg(self.theme.get_port_color(container.port))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_empty_groups() {
        let renderer = TableRenderer::new();
        assert!(renderer.render_groups(&[]).contains("No group files written"));
    }

    #[test]
    fn test_render_groups() {
        let renderer = TableRenderer::new();
        let groups = vec![
            WrittenGroup {
                key: "db2u".to_string(),
                path: PathBuf::from("groups/images_db2u.csv"),
                rows: 4,
            },
            WrittenGroup {
                key: "ungrouped".to_string(),
                path: PathBuf::from("groups/images_ungrouped.csv"),
                rows: 1,
            },
        ];

        let output = renderer.render_groups(&groups);
        assert!(output.contains("db2u"));
        assert!(output.contains("groups/images_ungrouped.csv"));
        assert!(output.contains("[5 images]"));
    }

    #[test]
    fn test_render_containers() {
        let renderer = TableRenderer::new();
        let output = renderer.render_containers(&[ContainerSummary {
            name: "olm-utils-v3".to_string(),
            image: "icr.io/cpopen/cpd/olm-utils-v3:latest".to_string(),
            port: None,
        }]);
        assert!(output.contains("olm-utils-v3"));
        assert!(output.contains("-"));
    }
}
