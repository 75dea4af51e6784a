// file: src/pipeline/stage.rs
// description: external stage execution with concurrent stdout/stderr capture
// reference: https://docs.rs/tokio/latest/tokio/process

use crate::error::{PipelineError, Result};
use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

/// One external process run: `<program> <script> <args...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInvocation {
    pub program: String,
    pub script: PathBuf,
    pub args: Vec<OsString>,
}

impl StageInvocation {
    pub fn new(program: impl Into<String>, script: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            args,
        }
    }

    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone(), self.script.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Seam between the orchestrator and process execution.
///
/// Resolves with the stage's trimmed stdout, or fails with
/// [`PipelineError::StageFailed`] / [`PipelineError::Spawn`].
pub trait StageExecutor {
    fn execute(&self, invocation: &StageInvocation)
    -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct StageRunner;

impl StageRunner {
    pub fn new() -> Self {
        Self
    }

    /// Waits for the process with no timeout; a hung stage blocks the caller.
    pub async fn run(&self, invocation: &StageInvocation) -> Result<String> {
        debug!("Spawning: {}", invocation.command_line());

        let mut child = Command::new(&invocation.program)
            .arg(&invocation.script)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PipelineError::Spawn {
                program: invocation.program.clone(),
                script: invocation.script.clone(),
                source,
            })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("stdout not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("stderr not captured"))?;

        let mut out = Vec::new();
        let mut err = Vec::new();
        let (out_read, err_read) =
            tokio::join!(stdout.read_to_end(&mut out), stderr.read_to_end(&mut err));
        out_read?;
        err_read?;

        let status = child.wait().await?;
        let code = exit_code_from_status(status);
        debug!(
            "Script {} finished with code {}",
            invocation.script.display(),
            code
        );

        if code != 0 {
            return Err(PipelineError::StageFailed {
                script: invocation.script.clone(),
                code,
                stderr: String::from_utf8_lossy(&err).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&out).trim().to_string())
    }
}

impl StageExecutor for StageRunner {
    fn execute(
        &self,
        invocation: &StageInvocation,
    ) -> impl Future<Output = Result<String>> + Send {
        self.run(invocation)
    }
}

/// Signals map to 128+N on Unix, matching shell conventions.
fn exit_code_from_status(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .unwrap_or_else(|| status.signal().map_or(1, |s| 128 + s))
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_success_output_is_trimmed() {
        let temp = TempDir::new().unwrap();
        let script = write_script(&temp, "map.sh", "printf '  {\"id\":\"customer_id\"}\\n\\n'\n");

        let output = StageRunner::new()
            .run(&StageInvocation::new("sh", script, vec![]))
            .await
            .unwrap();
        assert_eq!(output, "{\"id\":\"customer_id\"}");
    }

    #[tokio::test]
    async fn test_arguments_are_passed_in_order() {
        let temp = TempDir::new().unwrap();
        let script = write_script(&temp, "echo.sh", "echo \"$@\"\n");

        let args = vec![
            OsString::from("b.csv"),
            OsString::from("a.csv"),
            OsString::from("{\"k\": 1}"),
        ];
        let output = StageRunner::new()
            .run(&StageInvocation::new("sh", script, args))
            .await
            .unwrap();
        assert_eq!(output, "b.csv a.csv {\"k\": 1}");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_code_and_stderr() {
        let temp = TempDir::new().unwrap();
        let script = write_script(&temp, "fail.sh", "echo partial\necho boom >&2\nexit 3\n");

        let err = StageRunner::new()
            .run(&StageInvocation::new("sh", script.clone(), vec![]))
            .await
            .unwrap_err();
        match err {
            PipelineError::StageFailed {
                script: failed,
                code,
                stderr,
            } => {
                assert_eq!(failed, script);
                assert_eq!(code, 3);
                assert_eq!(stderr, "boom\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_with_empty_stderr() {
        let temp = TempDir::new().unwrap();
        for code in [1, 2, 127] {
            let script = write_script(&temp, "quiet.sh", &format!("exit {code}\n"));
            let err = StageRunner::new()
                .run(&StageInvocation::new("sh", script, vec![]))
                .await
                .unwrap_err();
            match err {
                PipelineError::StageFailed {
                    code: actual,
                    stderr,
                    ..
                } => {
                    assert_eq!(actual, code);
                    assert_eq!(stderr, "");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_stderr_noise_does_not_fail_successful_stage() {
        let temp = TempDir::new().unwrap();
        let script = write_script(&temp, "warn.sh", "echo 'Warning: odd row' >&2\necho ok\n");

        let output = StageRunner::new()
            .run(&StageInvocation::new("sh", script, vec![]))
            .await
            .unwrap();
        assert_eq!(output, "ok");
    }

    #[tokio::test]
    async fn test_large_output_on_both_streams() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            &temp,
            "noisy.sh",
            "i=0\nwhile [ $i -lt 4000 ]; do\n  echo \"stdout line $i with padding padding padding\"\n  echo \"stderr line $i with padding padding padding\" >&2\n  i=$((i+1))\ndone\n",
        );

        let output = StageRunner::new()
            .run(&StageInvocation::new("sh", script, vec![]))
            .await
            .unwrap();
        assert_eq!(output.lines().count(), 4000);
        assert!(output.ends_with("stdout line 3999 with padding padding padding"));
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_error() {
        let err = StageRunner::new()
            .run(&StageInvocation::new(
                "churn-cli-no-such-interpreter",
                "mapper.py",
                vec![],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Spawn { .. }));
        assert!(err.to_string().contains("churn-cli-no-such-interpreter"));
    }

    #[tokio::test]
    async fn test_non_utf8_file_name_reaches_stage_intact() {
        use crate::models::CollectedFileSet;
        use crate::utils::Validator;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let data = temp
            .path()
            .join(std::ffi::OsStr::from_bytes(b"caf\xe9.csv"));
        fs::write(&data, "customer_id\n1\n").unwrap();
        Validator::validate_input_file(&data, "csv").unwrap();

        let script = write_script(
            &temp,
            "exists.sh",
            "if [ -f \"$1\" ]; then echo found; else echo missing >&2; exit 4; fi\n",
        );
        let files = CollectedFileSet::new(vec![data]).unwrap();

        let output = StageRunner::new()
            .run(&StageInvocation::new("sh", script, files.to_args()))
            .await
            .unwrap();
        assert_eq!(output, "found");
    }

    #[test]
    fn test_command_line_rendering() {
        let invocation = StageInvocation::new(
            "python3",
            "mapper.py",
            vec![OsString::from("a.csv"), OsString::from("b.csv")],
        );
        assert_eq!(invocation.command_line(), "python3 mapper.py a.csv b.csv");
    }
}
