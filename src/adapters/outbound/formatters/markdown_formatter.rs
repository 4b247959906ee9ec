use crate::application::dto::{AssetView, SweepReport};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for asset listings
const TABLE_HEADER: &str = "| Asset | Class | Size |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|-------|-------|------|\n";

/// MarkdownFormatter adapter for human-readable scan reports
///
/// This adapter implements the ReportFormatter port for Markdown format,
/// rendering one section per asset category.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Formats a byte count with a binary unit suffix
    fn human_size(bytes: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} B", bytes)
        } else {
            format!("{:.1} {}", value, UNITS[unit])
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &SweepReport) {
        output.push_str("# Asset Sweep Report\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n\n",
            report.metadata.tool,
            report.metadata.tool_version,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Scan ID: `{}`\n\n", report.metadata.scan_id));
    }

    fn render_stats(&self, output: &mut String, report: &SweepReport) {
        let stats = &report.stats;
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "- Unused assets: **{}** ({})\n",
            stats.unused_assets,
            Self::human_size(stats.unused_total_size_bytes)
        ));
        output.push_str(&format!("- Root assets: {}\n", stats.root_assets));
        output.push_str(&format!("- Leaf assets: {}\n", stats.leaf_assets));
        output.push_str(&format!("- Circular assets: {}\n", stats.circular_assets));
        output.push_str(&format!("- Excluded assets: {}\n", stats.excluded_assets));
        output.push_str(&format!("- Linked assets: {}\n", stats.linked_assets));
        if stats.deleted_assets > 0 {
            output.push_str(&format!("- Deleted assets: {}\n", stats.deleted_assets));
        }
        output.push('\n');
    }

    fn render_section(
        &self,
        output: &mut String,
        title: &str,
        description: &str,
        assets: &[AssetView],
    ) {
        output.push_str(&format!("## {}\n\n", title));
        output.push_str(description);
        output.push_str("\n\n");

        if assets.is_empty() {
            output.push_str("_None._\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for asset in assets {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&asset.id),
                Self::escape_markdown_table_cell(&asset.class),
                Self::human_size(asset.size_bytes)
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &SweepReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);
        self.render_stats(&mut output, report);
        self.render_section(
            &mut output,
            "Root Assets",
            "Unused assets that nothing else in the pool depends on. Deleted first.",
            &report.roots,
        );
        self.render_section(
            &mut output,
            "Circular Assets",
            "Unused assets that only stay referenced through dependency cycles.",
            &report.circulars,
        );
        self.render_section(
            &mut output,
            "Leaf Assets",
            "Unused assets with no dependencies of their own inside the pool.",
            &report.leaves,
        );
        self.render_section(
            &mut output,
            "Excluded Assets",
            "Assets explicitly protected by the exclusion policy.",
            &report.excluded,
        );
        self.render_section(
            &mut output,
            "Linked Assets",
            "Assets protected because an excluded asset depends on them.",
            &report.linked,
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CleaningStats, ScanMetadata};

    fn view(id: &str, class: &str, size: u64, kind: &str) -> AssetView {
        AssetView {
            id: id.to_string(),
            class: class.to_string(),
            size_bytes: size,
            kind: kind.to_string(),
        }
    }

    fn sample_report() -> SweepReport {
        SweepReport {
            metadata: ScanMetadata::generate(),
            stats: CleaningStats {
                unused_assets: 3,
                unused_total_size_bytes: 1024 * 1024 + 512 * 1024,
                root_assets: 1,
                leaf_assets: 1,
                circular_assets: 1,
                excluded_assets: 1,
                linked_assets: 0,
                deleted_assets: 0,
            },
            roots: vec![view("meshes/rock.mesh", "Mesh", 1024 * 1024, "root")],
            leaves: vec![view("textures/rock.tex", "Texture", 256 * 1024, "leaf")],
            circulars: vec![view("materials/a.mat", "Material", 256 * 1024, "circular")],
            excluded: vec![view("maps/start.map", "Level", 4096, "excluded")],
            linked: vec![],
        }
    }

    #[test]
    fn test_markdown_contains_all_sections() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format(&sample_report()).unwrap();

        assert!(output.starts_with("# Asset Sweep Report"));
        assert!(output.contains("## Summary"));
        assert!(output.contains("## Root Assets"));
        assert!(output.contains("## Circular Assets"));
        assert!(output.contains("## Leaf Assets"));
        assert!(output.contains("## Excluded Assets"));
        assert!(output.contains("## Linked Assets"));
        assert!(output.contains("| meshes/rock.mesh | Mesh | 1.0 MiB |"));
    }

    #[test]
    fn test_markdown_empty_section_renders_placeholder() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format(&sample_report()).unwrap();
        assert!(output.contains("_None._"));
    }

    #[test]
    fn test_markdown_summary_values() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format(&sample_report()).unwrap();
        assert!(output.contains("Unused assets: **3** (1.5 MiB)"));
        assert!(output.contains("- Excluded assets: 1"));
        assert!(!output.contains("Deleted assets"));
    }

    #[test]
    fn test_table_cell_escaping() {
        assert_eq!(
            MarkdownFormatter::escape_markdown_table_cell("a|b\nc"),
            "a\\|b c"
        );
    }

    #[test]
    fn test_human_size() {
        assert_eq!(MarkdownFormatter::human_size(512), "512 B");
        assert_eq!(MarkdownFormatter::human_size(2048), "2.0 KiB");
        assert_eq!(MarkdownFormatter::human_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
