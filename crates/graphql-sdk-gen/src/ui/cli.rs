use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};
use crate::generator::{codegen::TargetLanguage, config::EmissionOrder};

#[derive(Parser, Debug)]
#[command(name = "graphql-sdk-gen")]
#[command(author, version, about = "GraphQL input type to data model generator")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a GraphQL schema
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate data model classes for the input types of a GraphQL schema
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateCommand {
  /// Path to a GraphQL SDL file, or a directory of .graphql/.gql files
  #[arg(short, long, value_name = "PATH")]
  pub input: PathBuf,

  /// Path where the generated module will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Language of the generated module
  #[arg(short, long, value_enum, default_value = "python")]
  pub target: TargetLanguage,

  /// JSON generator configuration; flags below override its values
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Module the schema enums are imported from
  #[arg(long, value_name = "MODULE")]
  pub enums_module: Option<String>,

  /// Module unbound custom scalars are imported from
  #[arg(long, value_name = "MODULE")]
  pub scalars_module: Option<String>,

  /// Order in which classes are emitted
  #[arg(long, value_enum, value_name = "ORDER")]
  pub emission_order: Option<EmissionOrder>,

  /// Keep schema field names instead of converting them to snake_case
  #[arg(long, default_value_t = false)]
  pub no_snake_case: bool,

  /// Run isort and black over generated Python code
  #[arg(long, default_value_t = false)]
  pub format: bool,

  /// Enable verbose output with the emission plan and cycle details
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the input types in emission order with their forward references
  Inputs {
    /// Path to a GraphQL SDL file, or a directory of .graphql/.gql files
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// JSON generator configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Order in which classes are emitted
    #[arg(long, value_enum, value_name = "ORDER")]
    emission_order: Option<EmissionOrder>,
  },
}
