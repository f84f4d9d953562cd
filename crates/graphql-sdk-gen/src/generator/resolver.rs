//! Emission ordering of generated classes.
//!
//! Only default literals that construct another input type reorder classes. Plain field type
//! references never move a class: when the referenced class comes later it is emitted as a
//! deferred reference instead.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::generator::{
  ast::ClassRef,
  config::EmissionOrder,
  errors::{CodegenError, CodegenResult},
  schema::{LiteralNode, SchemaModel, TypeRef},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
  /// A default literal on the field constructs the target.
  Literal,
  /// The field's type names the target.
  Structural,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
  pub target: String,
  pub field: String,
  pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
  edges: IndexMap<String, Vec<DependencyEdge>>,
}

impl DependencyGraph {
  pub fn build(schema: &SchemaModel) -> CodegenResult<Self> {
    let mut edges = IndexMap::new();
    for def in schema.input_types() {
      let mut out = vec![];
      for field in &def.fields {
        let referenced_by = format!("{}.{}", def.name, field.name);
        if let Some(target) = field.type_ref.input_name() {
          ensure_input(schema, target, &referenced_by)?;
          out.push(DependencyEdge {
            target: target.to_string(),
            field: field.name.clone(),
            kind: EdgeKind::Structural,
          });
        }
        if let Some(literal) = &field.default_value {
          let mut targets = vec![];
          collect_constructed(schema, literal, &field.type_ref, &referenced_by, &mut targets)?;
          out.extend(targets.into_iter().map(|target| DependencyEdge {
            target,
            field: field.name.clone(),
            kind: EdgeKind::Literal,
          }));
        }
      }
      edges.insert(def.name.clone(), out);
    }
    Ok(Self { edges })
  }

  #[must_use]
  pub fn edges(&self, name: &str) -> &[DependencyEdge] {
    self.edges.get(name).map_or(&[], Vec::as_slice)
  }

  /// Types constructed by `name`'s default literals, in field then literal order.
  pub fn literal_targets<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
    self
      .edges(name)
      .iter()
      .filter(|edge| edge.kind == EdgeKind::Literal)
      .map(|edge| edge.target.as_str())
  }

  /// Every input type `name` refers to, by field type or by construction.
  #[must_use]
  pub fn referenced(&self, name: &str) -> BTreeSet<&str> {
    self.edges(name).iter().map(|edge| edge.target.as_str()).collect()
  }

  /// Strongly connected components of the literal edges: groups of types whose defaults construct
  /// each other, including types whose defaults construct themselves.
  #[must_use]
  pub fn cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for name in self.edges.keys() {
      graph.add_node(name.as_str());
    }
    for name in self.edges.keys() {
      for target in self.literal_targets(name) {
        graph.add_edge(name.as_str(), target, ());
      }
    }

    let declared = |name: &str| self.edges.get_index_of(name).unwrap_or(usize::MAX);
    let mut cycles = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|mut scc| {
        scc.sort_by_key(|name| declared(name));
        scc.into_iter().map(String::from).collect::<Vec<_>>()
      })
      .collect::<Vec<_>>();
    cycles.sort_by_key(|cycle| declared(&cycle[0]));
    cycles
  }
}

fn ensure_input(schema: &SchemaModel, name: &str, referenced_by: &str) -> CodegenResult<()> {
  if schema.input_type(name).is_none() {
    return Err(CodegenError::schema_consistency(name, referenced_by));
  }
  Ok(())
}

fn collect_constructed(
  schema: &SchemaModel,
  literal: &LiteralNode,
  expected: &TypeRef,
  referenced_by: &str,
  out: &mut Vec<String>,
) -> CodegenResult<()> {
  match (literal, expected.nullable_inner()) {
    (LiteralNode::List(items), TypeRef::List(inner)) => {
      for item in items {
        collect_constructed(schema, item, inner, referenced_by, out)?;
      }
    }
    (LiteralNode::Null, _) => {}
    (_, TypeRef::List(inner)) => collect_constructed(schema, literal, inner, referenced_by, out)?,
    (LiteralNode::Object(fields), TypeRef::Input(target)) => {
      ensure_input(schema, target, referenced_by)?;
      out.push(target.clone());
      let Some(def) = schema.input_type(target) else {
        return Ok(());
      };
      for (key, value) in fields {
        if let Some(field) = def.field(key) {
          let nested_by = format!("{target}.{key}");
          collect_constructed(schema, value, &field.type_ref, &nested_by, out)?;
        }
      }
    }
    _ => {}
  }
  Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  InProgress,
  Done,
}

/// Visited marks and output of a single resolution run.
#[derive(Debug, Default)]
pub struct ResolverState {
  marks: HashMap<String, Mark>,
  order: Vec<String>,
}

impl ResolverState {
  fn mark(&self, name: &str) -> Option<Mark> {
    self.marks.get(name).copied()
  }
}

pub struct DependencyResolver<'a> {
  schema: &'a SchemaModel,
  graph: &'a DependencyGraph,
  order: EmissionOrder,
}

impl<'a> DependencyResolver<'a> {
  #[must_use]
  pub fn new(schema: &'a SchemaModel, graph: &'a DependencyGraph, order: EmissionOrder) -> Self {
    Self { schema, graph, order }
  }

  pub fn resolve(&self) -> CodegenResult<EmissionPlan> {
    let mut state = ResolverState::default();
    for def in self.schema.input_types() {
      if state.mark(&def.name).is_none() {
        self.visit(&def.name, &mut state)?;
      }
    }

    let positions = state
      .order
      .iter()
      .enumerate()
      .map(|(i, name)| (name.clone(), i))
      .collect::<HashMap<_, _>>();

    let entries = state
      .order
      .iter()
      .enumerate()
      .map(|(position, name)| {
        let forward_refs = self
          .graph
          .referenced(name)
          .into_iter()
          .filter(|target| positions.get(*target).is_none_or(|p| *p >= position))
          .map(String::from)
          .collect();
        PlanEntry {
          type_name: name.clone(),
          forward_refs,
        }
      })
      .collect();

    Ok(EmissionPlan {
      entries,
      positions,
      cycles: self.graph.cycles(),
    })
  }

  fn visit(&self, name: &str, state: &mut ResolverState) -> CodegenResult<()> {
    if self.schema.input_type(name).is_none() {
      return Err(CodegenError::schema_consistency(name, "the dependency graph"));
    }

    state.marks.insert(name.to_string(), Mark::InProgress);
    if self.order == EmissionOrder::ReferrerFirst {
      state.order.push(name.to_string());
    }

    for target in self.graph.literal_targets(name) {
      match state.mark(target) {
        None => self.visit(target, state)?,
        Some(Mark::InProgress | Mark::Done) => {}
      }
    }

    state.marks.insert(name.to_string(), Mark::Done);
    if self.order == EmissionOrder::DependencyFirst {
      state.order.push(name.to_string());
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
  pub type_name: String,
  /// Input types referenced by this type that are not emitted strictly before it.
  pub forward_refs: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionPlan {
  entries: Vec<PlanEntry>,
  positions: HashMap<String, usize>,
  cycles: Vec<Vec<String>>,
}

impl EmissionPlan {
  #[must_use]
  pub fn entries(&self) -> &[PlanEntry] {
    &self.entries
  }

  #[must_use]
  pub fn position(&self, name: &str) -> Option<usize> {
    self.positions.get(name).copied()
  }

  #[must_use]
  pub fn cycles(&self) -> &[Vec<String>] {
    &self.cycles
  }

  #[must_use]
  pub fn forward_reference_count(&self) -> usize {
    self.entries.iter().map(|entry| entry.forward_refs.len()).sum()
  }

  #[must_use]
  pub fn scope(&self, owner: &str) -> Option<EmissionScope<'_>> {
    let position = self.position(owner)?;
    Some(EmissionScope {
      plan: self,
      entry: &self.entries[position],
      position,
    })
  }

  pub fn scopes(&self) -> impl Iterator<Item = EmissionScope<'_>> {
    self.entries.iter().enumerate().map(|(position, entry)| EmissionScope {
      plan: self,
      entry,
      position,
    })
  }
}

/// The view from one class being emitted: which other classes are already declared.
#[derive(Debug, Clone, Copy)]
pub struct EmissionScope<'a> {
  plan: &'a EmissionPlan,
  entry: &'a PlanEntry,
  position: usize,
}

impl<'a> EmissionScope<'a> {
  #[must_use]
  pub fn owner(&self) -> &'a str {
    &self.entry.type_name
  }

  #[must_use]
  pub fn forward_refs(&self) -> &'a BTreeSet<String> {
    &self.entry.forward_refs
  }

  #[must_use]
  pub fn class_ref(&self, name: &str) -> ClassRef {
    if self.plan.position(name).is_some_and(|p| p < self.position) {
      ClassRef::Direct(name.to_string())
    } else {
      ClassRef::Deferred(name.to_string())
    }
  }
}
