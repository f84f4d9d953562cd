use super::{NESTED_DEFAULTS_SDL, module, module_with};
use crate::generator::{
  codegen::{Renderer, TargetLanguage, python::PythonRenderer},
  config::{GeneratorConfig, ScalarBinding},
};

fn render(sdl: &str) -> String {
  PythonRenderer.render(&module(sdl, TargetLanguage::Python)).unwrap()
}

#[test]
fn later_declared_field_type_is_quoted_and_rebuilt() {
  let code = render(
    r"
    input CustomInput { field1: CustomInput2! field2: Int! }
    input CustomInput2 { field: Int! }
    ",
  );

  assert_eq!(
    code,
    r#"from .base_model import BaseModel


class CustomInput(BaseModel):
    field1: "CustomInput2"
    field2: int


class CustomInput2(BaseModel):
    field: int


CustomInput.model_rebuild()
"#
  );
}

#[test]
fn defaults_aliases_and_docs() {
  let code = render(
    r#"
    enum Sort { ASC DESC }
    input Page { size: Int = 10 sort: Sort = ASC }
    input Search {
      page: Page = { size: 5 }
      tags: [String!] = ["a"]
      class: Int
      "Free text"
      queryText: String!
    }
    "#,
  );

  assert_eq!(
    code,
    r#"from typing import List, Optional

from pydantic import Field

from .base_model import BaseModel
from .enums import Sort


class Page(BaseModel):
    size: Optional[int] = 10
    sort: Optional[Sort] = Sort.ASC


class Search(BaseModel):
    page: Optional[Page] = Field(default_factory=lambda: Page(size=5))
    tags: Optional[List[str]] = ["a"]
    class_: Optional[int] = Field(alias="class", default=None)
    # Free text
    query_text: str = Field(alias="queryText")
"#
  );
}

#[test]
fn nested_construction_of_later_classes_uses_a_factory() {
  let code = render(NESTED_DEFAULTS_SDL);

  assert!(code.contains(
    "    field: Optional[\"SecondInput\"] = Field(default_factory=lambda: SecondInput(nested=NestedInput(val=1.5)))"
  ));
  assert!(code.contains("    nested: \"NestedInput\" = Field(default_factory=lambda: NestedInput(val=2.5))"));
  assert!(code.ends_with("TestInput.model_rebuild()\nSecondInput.model_rebuild()\n"));

  let classes = code
    .lines()
    .filter_map(|line| line.strip_prefix("class "))
    .map(|line| line.split('(').next().unwrap_or_default())
    .collect::<Vec<_>>();
  assert_eq!(classes, ["BeforeInput", "TestInput", "SecondInput", "NestedInput", "AfterInput"]);
}

#[test]
fn class_docstrings() {
  let code = render(
    r#"
    "One line"
    input Short { a: Int }
    """
    First line.

    Second paragraph.
    """
    input Long { a: Int }
    "Only docs"
    input Empty
    input Bare
    "#,
  );

  assert!(code.contains("class Short(BaseModel):\n    \"\"\"One line\"\"\"\n\n    a: Optional[int] = None\n"));
  assert!(code.contains(concat!(
    "class Long(BaseModel):\n",
    "    \"\"\"\n",
    "    First line.\n",
    "\n",
    "    Second paragraph.\n",
    "    \"\"\"\n",
    "\n",
    "    a: Optional[int] = None\n",
  )));
  assert!(code.contains("class Empty(BaseModel):\n    \"\"\"Only docs\"\"\"\n\n\n"));
  assert!(code.contains("class Bare(BaseModel):\n    pass\n"));
}

#[test]
fn scalars_are_imported_from_their_modules() {
  let mut config = GeneratorConfig::default();
  config.scalars.insert(
    "DateTime".to_string(),
    ScalarBinding {
      type_name: "datetime".to_string(),
      module: Some("datetime".to_string()),
    },
  );
  config.scalars.insert(
    "Json".to_string(),
    ScalarBinding {
      type_name: "dict".to_string(),
      module: None,
    },
  );

  let module = module_with(
    r"
    scalar DateTime
    scalar Json
    scalar Money
    input Event { at: DateTime! payload: Json price: Money file: Upload! }
    ",
    config,
    TargetLanguage::Python,
  );
  let code = PythonRenderer.render(&module).unwrap();

  assert!(code.contains("from datetime import datetime\n"));
  assert!(code.contains("from .base_model import BaseModel, Upload\nfrom .scalars import Money\n"));
  assert!(code.contains("    at: datetime\n"));
  assert!(code.contains("    payload: Optional[dict] = None\n"));
  assert!(code.contains("    price: Optional[Money] = None\n"));
  assert!(code.contains("    file: Upload\n"));
}

#[test]
fn strings_and_floats_are_python_literals() {
  let code = render(
    r#"
    input Literals {
      quote: String = "say \"hi\"\n"
      whole: Float = 3
      negative: Float = -0.5
      off: Boolean = false
      nothing: String = null
    }
    "#,
  );

  assert!(code.contains(r#"    quote: Optional[str] = "say \"hi\"\n""#));
  assert!(code.contains("    whole: Optional[float] = 3.0\n"));
  assert!(code.contains("    negative: Optional[float] = -0.5\n"));
  assert!(code.contains("    off: Optional[bool] = False\n"));
  assert!(code.contains("    nothing: Optional[str] = None\n"));
}

#[test]
fn empty_schema_renders_nothing() {
  assert_eq!(render("enum Only { A }"), "");
}

#[test]
fn header_names_the_source() {
  let renderer = TargetLanguage::Python.renderer();
  assert_eq!(renderer.file_extension(), "py");
  assert!(
    renderer
      .header("schema.graphql")
      .starts_with("# AUTO-GENERATED CODE - DO NOT EDIT!\n#\n# Source: schema.graphql\n")
  );
}
