// file: src/utils/validation.rs
// description: input file validation ahead of the external stages
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Checks existence, then extension, then size. The order fixes which
    /// error a path with several problems reports.
    pub fn validate_input_file(path: &Path, extension: &str) -> Result<()> {
        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(PipelineError::FileNotFound(path.to_path_buf())),
            Err(source) => {
                return Err(PipelineError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        Self::validate_extension(path, extension)?;

        let metadata = fs::metadata(path).map_err(|source| PipelineError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(PipelineError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::other("not a regular file"),
            });
        }

        if metadata.len() == 0 {
            return Err(PipelineError::EmptyFile(path.to_path_buf()));
        }

        Ok(())
    }

    pub fn validate_extension(path: &Path, extension: &str) -> Result<()> {
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));

        if matches {
            Ok(())
        } else {
            Err(PipelineError::WrongExtension {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    }

    /// Fail-fast over a whole list: the first invalid path aborts.
    pub fn validate_all<'a>(
        paths: impl IntoIterator<Item = &'a Path>,
        extension: &str,
    ) -> Result<()> {
        for path in paths {
            Self::validate_input_file(path, extension)?;
        }
        Ok(())
    }
}
