use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use super::generate::{load_generator_config, load_schema};
use crate::{
  generator::{config::EmissionOrder, orchestrator::Orchestrator},
  ui::{Colors, colors::IntoComfyColor, term_width},
};

/// Prints the input types in emission order with their field counts and forward references.
pub async fn list_inputs(
  input: &Path,
  config: Option<&Path>,
  emission_order: Option<EmissionOrder>,
  colors: &Colors,
) -> anyhow::Result<()> {
  let mut config = load_generator_config(config).await?;
  if let Some(order) = emission_order {
    config.emission_order = order;
  }
  let sdl = load_schema(input).await?;
  let orchestrator = Orchestrator::from_sdl(&sdl, config)?;
  if orchestrator.schema().is_empty() {
    println!("no input types found in {}", input.display());
    return Ok(());
  }
  let plan = orchestrator.plan()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["#", "INPUT TYPE", "FIELDS", "FORWARD REFS"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for (position, entry) in plan.entries().iter().enumerate() {
    let field_count = orchestrator
      .schema()
      .input_type(&entry.type_name)
      .map_or(0, |def| def.fields.len());

    let mut row = Row::new();
    row.add_cell(
      Cell::new(position + 1)
        .fg(IntoComfyColor::into(colors.timestamp()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(
      Cell::new(&entry.type_name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(field_count)
        .fg(IntoComfyColor::into(colors.primary()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(entry.forward_refs.iter().join(", ")).fg(IntoComfyColor::into(colors.accent())));
    table.add_row(row);
  }

  println!("{table}");
  println!(
    "{} input types, {} forward references",
    orchestrator.schema().len(),
    plan.forward_reference_count()
  );

  if !plan.cycles().is_empty() {
    println!();
    for cycle in plan.cycles() {
      println!("cycle: {}", cycle.join(" -> "));
    }
  }

  Ok(())
}
