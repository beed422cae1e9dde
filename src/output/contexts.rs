//! Context list output formatter

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;

use super::common::{escape_csv, to_json, to_yaml};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::kubeconfig::{Context, Document, Entry};

/// Serializable context for structured output (JSON/YAML)
#[derive(Debug, Serialize)]
struct ContextRow {
    current: bool,
    name: String,
    cluster: String,
    user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl ContextRow {
    /// Fields a context doesn't have are shown empty
    fn new(ctx: &Entry<Context>, current: Option<&str>) -> Self {
        let name = ctx.name();
        Self {
            current: name.is_some() && current == name,
            name: name.unwrap_or_default().to_string(),
            cluster: ctx.cluster_ref().unwrap_or_default().to_string(),
            user: ctx.user_ref().unwrap_or_default().to_string(),
            namespace: ctx.namespace().map(str::to_string),
        }
    }
}

/// Print the contexts of `doc` in the given format
pub fn output_contexts(doc: &Document, format: OutputFormat) -> Result<()> {
    println!("{}", render_contexts(doc, format)?);
    Ok(())
}

/// Render the contexts of `doc` in the given format
pub fn render_contexts(doc: &Document, format: OutputFormat) -> Result<String> {
    let current = doc.current_context.as_deref();
    let rows: Vec<ContextRow> = doc
        .contexts
        .iter()
        .map(|ctx| ContextRow::new(ctx, current))
        .collect();

    match format {
        OutputFormat::Table => Ok(render_table(&rows)),
        OutputFormat::Csv => Ok(render_csv(&rows)),
        OutputFormat::Json => to_json(&rows),
        OutputFormat::Yaml => to_yaml(&rows),
    }
}

fn render_table(rows: &[ContextRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("CURRENT"),
            Cell::new("NAME"),
            Cell::new("CLUSTER"),
            Cell::new("USER"),
            Cell::new("NAMESPACE"),
        ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(if row.current { "*" } else { "" }),
            Cell::new(&row.name),
            Cell::new(&row.cluster),
            Cell::new(&row.user),
            Cell::new(row.namespace.as_deref().unwrap_or("")),
        ]);
    }

    table.to_string()
}

fn render_csv(rows: &[ContextRow]) -> String {
    let mut out = String::from("current,name,cluster,user,namespace");
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{}",
            row.current,
            escape_csv(&row.name),
            escape_csv(&row.cluster),
            escape_csv(&row.user),
            escape_csv(row.namespace.as_deref().unwrap_or(""))
        ));
    }
    out
}
