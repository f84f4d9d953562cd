use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::TargetLanguage,
    config::GeneratorConfig,
    metrics::{GenerationStats, GenerationWarning},
    orchestrator::Orchestrator,
    resolver::EmissionPlan,
  },
  ui::{Colors, GenerateCommand},
  utils::{SchemaLoader, formatter},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// Reads a JSON generator config, or the defaults when no file is given.
pub(crate) async fn load_generator_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
  let Some(path) = path else {
    return Ok(GeneratorConfig::default());
  };
  let bytes = tokio::fs::read(path)
    .await
    .map_err(|e| anyhow::anyhow!("failed to read config '{}': {e}", path.display()))?;
  GeneratorConfig::from_json_slice(&bytes)
}

/// Loads and joins the schema at `input`.
pub(crate) async fn load_schema(input: &Path) -> anyhow::Result<String> {
  SchemaLoader::open(input).await?.sdl()
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub target: TargetLanguage,
  pub generator: GeneratorConfig,
  pub format: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub async fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let mut generator = load_generator_config(command.config.as_deref()).await?;
    apply_overrides(&mut generator, &command);

    let GenerateCommand {
      input,
      output,
      target,
      format,
      verbose,
      quiet,
      ..
    } = command;

    Ok(Self {
      input,
      output,
      target,
      generator,
      format,
      verbose,
      quiet,
    })
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

/// Flags given on the command line win over the config file.
fn apply_overrides(config: &mut GeneratorConfig, command: &GenerateCommand) {
  if let Some(module) = &command.enums_module {
    config.enums_module.clone_from(module);
  }
  if let Some(module) = &command.scalars_module {
    config.scalars_module_name.clone_from(module);
  }
  if let Some(order) = command.emission_order {
    config.emission_order = order;
  }
  if command.no_snake_case {
    config.convert_to_snake_case = false;
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn warn(&self, message: &str) {
    if !self.config.quiet {
      eprintln!("{} {}", "Warning:".with(self.colors.accent()), message.with(self.colors.primary()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "           {:<24} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Input types generated:", stats.input_types_generated.to_string());
    self.stat("Fields generated:", stats.fields_generated.to_string());
    self.stat("Defaults translated:", stats.defaults_translated.to_string());
    if stats.forward_references > 0 {
      self.stat("Forward references:", stats.forward_references.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());
    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "             {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.value())
        );
      }
    }
  }

  fn print_plan(&self, plan: &EmissionPlan) {
    if self.config.quiet || !self.config.verbose {
      return;
    }

    self.info(&format!("Emission order ({}):", self.config.generator.emission_order));
    for (position, entry) in plan.entries().iter().enumerate() {
      let forward = if entry.forward_refs.is_empty() {
        String::new()
      } else {
        let refs = entry.forward_refs.iter().map(String::as_str).collect::<Vec<_>>();
        format!(" (forward: {})", refs.join(", "))
      };
      println!(
        "           {:>3}. {}{}",
        position + 1,
        entry.type_name.as_str().with(self.colors.value()),
        forward.with(self.colors.accent())
      );
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      let always_shown = matches!(warning, GenerationWarning::UnboundScalar { .. });
      if !always_shown && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }
      self.warn(&warning.to_string());
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {} models", self.config.target).with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.info(&format!("Loading GraphQL schema from: {}", config.input.display()));
  let loader = SchemaLoader::open(&config.input).await?;
  if config.verbose {
    for path in loader.paths() {
      logger.stat("Schema file:", path.display().to_string());
    }
  }
  let sdl = loader.sdl()?;

  logger.info(&format!("Generating {} models...", config.target));
  let orchestrator = Orchestrator::from_sdl(&sdl, config.generator.clone())?;
  let source_path = config.input.display().to_string();
  let output = orchestrator.generate_with_header(config.target, &source_path)?;
  logger.print_plan(&output.plan);
  logger.print_statistics(&output.stats);

  let code = match config.target {
    TargetLanguage::Python if config.format => {
      logger.info("Formatting with isort and black...");
      formatter::format_python(&output.code).await?
    }
    _ => output.code,
  };

  let extension = config.target.renderer().file_extension();
  if config.output.extension().and_then(OsStr::to_str) != Some(extension) {
    logger.warn(&format!("{} does not end in .{extension}", config.output.display()));
  }
  logger.info(&format!("Writing to: {}", config.output.display()));
  config.write_output(code).await?;

  logger.log_success();
  Ok(())
}
