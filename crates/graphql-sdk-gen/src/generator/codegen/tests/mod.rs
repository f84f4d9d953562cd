mod python_tests;

use crate::generator::{
  ast::ModuleTree, codegen::TargetLanguage, config::GeneratorConfig, orchestrator::Orchestrator,
};

pub(super) fn module_with(sdl: &str, config: GeneratorConfig, target: TargetLanguage) -> ModuleTree {
  Orchestrator::from_sdl(sdl, config)
    .expect("schema should parse")
    .generate(target)
    .expect("generation should succeed")
    .module
}

pub(super) fn module(sdl: &str, target: TargetLanguage) -> ModuleTree {
  module_with(sdl, GeneratorConfig::default(), target)
}

pub(super) const NESTED_DEFAULTS_SDL: &str = r"
  input BeforeInput { flag: Boolean }
  input TestInput { field: SecondInput = { nested: { val: 1.5 } } }
  input SecondInput { nested: NestedInput! = { val: 2.5 } }
  input NestedInput { val: Float! }
  input AfterInput { flag: Boolean }
";
