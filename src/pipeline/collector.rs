// file: src/pipeline/collector.rs
// description: interactive prompt loop that gathers validated input files
// reference: line-oriented prompt handling over tokio async io

use crate::error::{PipelineError, Result};
use crate::models::CollectedFileSet;
use crate::utils::Validator;
use crate::utils::logging::{format_error, format_success, format_warning};
use colored::Colorize;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Prompts for one path at a time until the user submits an empty line.
///
/// A rejected path is reported and re-prompted under the same number; an
/// empty line only finishes once at least one file has been accepted.
pub struct InteractiveCollector<R, W> {
    reader: R,
    writer: W,
    extension: String,
}

impl<R, W> InteractiveCollector<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, extension: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            extension: extension.into(),
        }
    }

    /// Consumes the collector; the input stream is dropped once collection ends.
    pub async fn collect(self) -> Result<CollectedFileSet> {
        let Self {
            mut reader,
            mut writer,
            extension,
        } = self;
        let kind = extension.to_uppercase();
        let mut accepted: Vec<PathBuf> = Vec::new();
        let mut slot = 1usize;

        loop {
            let prompt = prompt_text(slot, &kind);
            writer.write_all(prompt.as_bytes()).await?;
            writer.flush().await?;

            let mut line = String::new();
            let read = reader.read_line(&mut line).await?;

            if read == 0 {
                writer.write_all(b"\n").await?;
                if accepted.is_empty() {
                    return Err(PipelineError::InputClosed);
                }
                debug!("Input closed after {} file(s)", accepted.len());
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                if accepted.is_empty() {
                    let warning = format!(
                        "No files provided. Please provide at least one {} file.",
                        kind
                    );
                    write_line(&mut writer, &format_error(&warning)).await?;
                    continue;
                }
                break;
            }

            let path = PathBuf::from(input);
            match Validator::validate_input_file(&path, &extension) {
                Ok(()) => {
                    let message = format!("Added: {}", path.display());
                    write_line(&mut writer, &format_success(&message)).await?;
                    accepted.push(path);
                    slot += 1;
                }
                Err(e) if e.is_input() => {
                    debug!("Rejected {}: {}", path.display(), e);
                    write_line(&mut writer, &format_error(&e.to_string())).await?;
                    write_line(&mut writer, &format_warning("Please try again.")).await?;
                }
                Err(e) => return Err(e),
            }
        }

        drop(reader);

        let summary = format!("Collected {} file(s)", accepted.len());
        write_line(&mut writer, &format_success(&summary)).await?;

        CollectedFileSet::new(accepted).ok_or(PipelineError::InputClosed)
    }
}

fn prompt_text(slot: usize, kind: &str) -> String {
    let text = if slot == 1 {
        format!("Enter the path to the first {} file:", kind)
    } else {
        format!(
            "Enter the path to {} file #{} (or press Enter to finish):",
            kind, slot
        )
    };
    format!("{} ", text.cyan())
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
