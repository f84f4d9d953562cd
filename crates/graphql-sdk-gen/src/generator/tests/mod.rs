mod class_tests;

use crate::generator::{
  codegen::TargetLanguage,
  config::{EmissionOrder, GeneratorConfig},
  errors::CodegenResult,
  orchestrator::{GeneratedOutput, Orchestrator},
  resolver::{DependencyGraph, DependencyResolver, EmissionPlan},
  schema::SchemaModel,
};

pub(super) fn schema(sdl: &str) -> SchemaModel {
  SchemaModel::from_sdl(sdl).expect("schema should parse")
}

pub(super) fn plan_with(sdl: &str, order: EmissionOrder) -> EmissionPlan {
  let schema = schema(sdl);
  let graph = DependencyGraph::build(&schema).expect("graph should build");
  DependencyResolver::new(&schema, &graph, order)
    .resolve()
    .expect("plan should resolve")
}

pub(super) fn plan(sdl: &str) -> EmissionPlan {
  plan_with(sdl, EmissionOrder::ReferrerFirst)
}

pub(super) fn order(plan: &EmissionPlan) -> Vec<&str> {
  plan.entries().iter().map(|entry| entry.type_name.as_str()).collect()
}

pub(super) fn generate_with(sdl: &str, config: GeneratorConfig) -> CodegenResult<GeneratedOutput> {
  Orchestrator::new(schema(sdl), config).generate(TargetLanguage::Python)
}

pub(super) fn generate(sdl: &str) -> CodegenResult<GeneratedOutput> {
  generate_with(sdl, GeneratorConfig::default())
}
