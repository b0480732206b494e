//! Format query results as text tables.

use crate::graph::Page;
use crate::query::{Catalog, PageConnection};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Ids are 64 hex chars; tables show a prefix.
const SHORT_ID_LEN: usize = 12;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

fn page_table<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Slug", "Title", "Parent", "Status"]);
    for page in pages {
        table.add_row(vec![
            short_id(&page.id),
            page.slug.clone(),
            page.title().unwrap_or_default().to_string(),
            page.parent_id.as_deref().map(short_id).unwrap_or_else(|| "-".to_string()),
            page.status.as_str().to_string(),
        ]);
    }
    table
}

/// Format one page of find-all results.
pub fn format_connection_text(heading: &str, connection: &PageConnection<'_>) -> String {
    let mut out = format!("{}\n\n", format_section_heading(heading));
    if connection.nodes.is_empty() {
        out.push_str(&format!("No pages matched ({} total).\n", connection.count));
        return out;
    }
    out.push_str(&format!("{}\n\n", page_table(connection.nodes.iter().copied())));
    out.push_str(&format!(
        "Showing {} of {} pages.\n",
        connection.nodes.len(),
        connection.count
    ));
    out
}

/// Format a single page with its frontmatter.
pub fn format_page_text(page: &Page) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&page.slug));
    out.push_str(&format!("  Id: {}\n", page.id));
    out.push_str(&format!(
        "  Parent: {}\n",
        page.parent_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  Created: {}\n", page.created));
    out.push_str(&format!("  Updated: {}\n", page.updated));
    out.push_str(&format!("  Status: {}\n", page.status.as_str()));
    if let Some(error) = &page.error {
        out.push_str(&format!("  Error: {}\n", error.red()));
    }
    if let Some(frontmatter) = &page.frontmatter {
        out.push('\n');
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Frontmatter", "Value"]);
        for (key, value) in frontmatter {
            table.add_row(vec![key.clone(), value.to_string()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// Format a root-to-page chain.
pub fn format_path_text(path: &[&Page]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Path"));
    if path.is_empty() {
        out.push_str("No page with that id.\n");
        return out;
    }
    for (depth, page) in path.iter().enumerate() {
        out.push_str(&format!(
            "{}{}  {}\n",
            "  ".repeat(depth),
            page.slug,
            short_id(&page.id).dimmed()
        ));
    }
    out
}

/// Format the filter/sort catalog.
pub fn format_catalog_text(catalog: &Catalog) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Fields"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Type", "Operators"]);
    for field in catalog.fields() {
        let operators: Vec<&str> = field.kind.operators().iter().map(|op| op.as_str()).collect();
        table.add_row(vec![
            field.name.clone(),
            field.kind.name().to_string(),
            operators.join(", "),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    if !catalog.nested_fields().is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Nested fields")));
        for name in catalog.nested_fields() {
            out.push_str(&format!("  {}\n", name));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Total: {} fields, {} sort keys.\n",
        catalog.fields().len(),
        catalog.sort_keys().len()
    ));
    out
}
