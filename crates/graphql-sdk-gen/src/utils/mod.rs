pub mod formatter;
pub mod schema;

pub(crate) use schema::SchemaLoader;
