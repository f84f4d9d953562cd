//! Orchestration of the GraphQL input type generation pipeline.
//!
//! ```text
//! SDL ─► SchemaModel ─► DependencyGraph ─► EmissionPlan
//!                                              │
//!        ModuleTree ◄─ ModuleAssembler ◄─ ClassDefBuilder (mapper + translator per field)
//!            │
//!            └─► Renderer ─► source text
//! ```
//!
//! A run is synchronous and reads nothing but the schema and config it was created with, so two
//! runs over the same inputs always produce the same output.

use crate::generator::{
  annotations::TypeAnnotationMapper,
  ast::ModuleTree,
  classes::ClassDefBuilder,
  codegen::TargetLanguage,
  config::GeneratorConfig,
  defaults::DefaultValueTranslator,
  errors::{CodegenError, CodegenResult},
  metrics::GenerationStats,
  module::ModuleAssembler,
  naming::ReservedNames,
  resolver::{DependencyGraph, DependencyResolver, EmissionPlan},
  schema::SchemaModel,
};

#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub module: ModuleTree,
  pub plan: EmissionPlan,
  pub stats: GenerationStats,
}

/// Rendered source text, prefixed with the generated-file header.
#[derive(Debug, Clone)]
pub struct RenderedOutput {
  pub code: String,
  pub plan: EmissionPlan,
  pub stats: GenerationStats,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
  schema: SchemaModel,
  config: GeneratorConfig,
}

impl Orchestrator {
  #[must_use]
  pub fn new(schema: SchemaModel, config: GeneratorConfig) -> Self {
    Self { schema, config }
  }

  pub fn from_sdl(sdl: &str, config: GeneratorConfig) -> CodegenResult<Self> {
    Ok(Self::new(SchemaModel::from_sdl(sdl)?, config))
  }

  #[must_use]
  pub fn schema(&self) -> &SchemaModel {
    &self.schema
  }

  /// Computes the order classes are emitted in, with each class's forward references.
  pub fn plan(&self) -> CodegenResult<EmissionPlan> {
    let graph = DependencyGraph::build(&self.schema)?;
    DependencyResolver::new(&self.schema, &graph, self.config.emission_order).resolve()
  }

  /// Builds the module tree for `target`. The first error aborts the run.
  pub fn generate(&self, target: TargetLanguage) -> CodegenResult<GeneratedOutput> {
    let plan = self.plan()?;
    let mapper = TypeAnnotationMapper::new(&self.config);
    let translator = DefaultValueTranslator::new(&self.schema, &self.config, mapper, &plan);
    let builder = ClassDefBuilder::new(&self.config, mapper, &translator);
    let mut reserved = ReservedNames::new(&self.schema, &self.config, target.renderer().reserved_names());

    let classes = plan
      .scopes()
      .map(|scope| {
        let def = self
          .schema
          .input_type(scope.owner())
          .ok_or_else(|| CodegenError::schema_consistency(scope.owner(), "the emission plan"))?;
        builder.build(def, &scope, &mut reserved)
      })
      .collect::<CodegenResult<Vec<_>>>()?;

    let mut stats = GenerationStats::default();
    stats.record_classes(&classes);
    stats.record_cycles(plan.cycles().to_vec());
    stats.record_unbound_scalars(&classes, &self.config);

    let module = ModuleAssembler::new(&self.config).assemble(classes);
    Ok(GeneratedOutput { module, plan, stats })
  }

  /// Generates and renders the module, prefixed with a generated-file header naming `source_path`.
  pub fn generate_with_header(
    &self,
    target: TargetLanguage,
    source_path: &str,
  ) -> anyhow::Result<RenderedOutput> {
    let GeneratedOutput { module, plan, stats } = self.generate(target)?;
    let renderer = target.renderer();
    let code = renderer.render(&module)?;
    Ok(RenderedOutput {
      code: format!("{}{code}", renderer.header(source_path)),
      plan,
      stats,
    })
  }
}
