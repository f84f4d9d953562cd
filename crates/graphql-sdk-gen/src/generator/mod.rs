pub(crate) mod annotations;
pub(crate) mod ast;
pub(crate) mod classes;
pub(crate) mod codegen;
pub(crate) mod config;
pub(crate) mod defaults;
pub(crate) mod errors;
pub(crate) mod metrics;
pub(crate) mod module;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod resolver;
pub(crate) mod schema;

#[cfg(test)]
mod tests;
