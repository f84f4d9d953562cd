use std::process::Stdio;

use tokio::{io::AsyncWriteExt, process::Command};

/// Sorts imports with `isort` and then formats with `black`, both reading from stdin.
pub async fn format_python(code: &str) -> anyhow::Result<String> {
  let sorted = run_formatter("isort", &["--profile", "black", "-"], code).await?;
  run_formatter("black", &["--quiet", "-"], &sorted).await
}

async fn run_formatter(program: &str, args: &[&str], input: &str) -> anyhow::Result<String> {
  let mut child = Command::new(program)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .map_err(|e| anyhow::anyhow!("failed to run {program}: {e}"))?;

  {
    let mut stdin = child
      .stdin
      .take()
      .ok_or_else(|| anyhow::anyhow!("{program} stdin is not available"))?;
    stdin.write_all(input.as_bytes()).await?;
  }

  let output = child.wait_with_output().await?;
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("{program} failed: {stderr}");
  }

  Ok(String::from_utf8(output.stdout)?)
}
