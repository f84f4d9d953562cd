use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

const SCHEMA_EXTENSIONS: [&str; 2] = ["graphql", "gql"];

fn is_schema_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(OsStr::to_str)
    .is_some_and(|ext| SCHEMA_EXTENSIONS.contains(&ext))
}

/// Memory-mapped GraphQL SDL sources: a single file, or every schema file of a directory.
pub struct SchemaLoader {
  files: Vec<(PathBuf, AsyncMmapFile)>,
}

impl SchemaLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let paths = if tokio::fs::metadata(path).await?.is_dir() {
      Self::schema_files_in(path).await?
    } else {
      vec![path.to_path_buf()]
    };

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
      let file = AsyncMmapFile::open(&path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open schema '{}': {e}", path.display()))?;
      files.push((path, file));
    }

    Ok(Self { files })
  }

  /// Schema files directly inside `dir`, sorted by path.
  async fn schema_files_in(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths = vec![];
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if entry.file_type().await?.is_file() && is_schema_file(&path) {
        paths.push(path);
      }
    }

    if paths.is_empty() {
      anyhow::bail!("no .graphql or .gql files found in '{}'", dir.display());
    }
    paths.sort();
    Ok(paths)
  }

  pub fn paths(&self) -> impl Iterator<Item = &Path> {
    self.files.iter().map(|(path, _)| path.as_path())
  }

  /// All sources joined into one SDL document.
  pub fn sdl(&self) -> anyhow::Result<String> {
    let mut sdl = String::new();
    for (path, file) in &self.files {
      let content = std::str::from_utf8(file.as_slice())
        .map_err(|e| anyhow::anyhow!("schema '{}' is not valid UTF-8: {e}", path.display()))?;
      if !sdl.is_empty() && !sdl.ends_with('\n') {
        sdl.push('\n');
      }
      sdl.push_str(content);
    }
    Ok(sdl)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn loads_a_single_schema_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.graphql");
    tokio::fs::write(&path, "input A { x: Int }").await.unwrap();

    let loader = SchemaLoader::open(&path).await.unwrap();
    assert_eq!(loader.sdl().unwrap(), "input A { x: Int }");
    assert_eq!(loader.paths().collect::<Vec<_>>(), [path.as_path()]);
  }

  #[tokio::test]
  async fn directory_sources_are_joined_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("b.gql"), "input B { x: Int }").await.unwrap();
    tokio::fs::write(dir.path().join("a.graphql"), "input A { x: Int }").await.unwrap();
    tokio::fs::write(dir.path().join("notes.txt"), "not a schema").await.unwrap();

    let loader = SchemaLoader::open(dir.path()).await.unwrap();
    assert_eq!(loader.sdl().unwrap(), "input A { x: Int }\ninput B { x: Int }");
    assert_eq!(loader.paths().count(), 2, "non-schema files are skipped");
  }

  #[tokio::test]
  async fn directory_without_schema_files_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("readme.md"), "# nothing").await.unwrap();

    let err = SchemaLoader::open(dir.path()).await.err().unwrap();
    assert!(err.to_string().contains("no .graphql or .gql files"), "unexpected error: {err}");
  }

  #[tokio::test]
  async fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SchemaLoader::open(&dir.path().join("missing.graphql")).await.is_err());
  }
}
