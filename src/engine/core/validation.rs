use super::types::{Job, Preset, SizeCap};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a job cannot be built from the shell's inputs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select a folder with videos first")]
    NoFolder,

    #[error("Folder {0} does not exist or is not a directory")]
    FolderMissing(PathBuf),

    #[error("Size limit must be a whole number of megabytes (0 = unlimited), got '{0}'")]
    InvalidSizeCap(String),
}

/// Parse the size field. Surrounding whitespace is ignored and an empty field
/// means unlimited; anything that is not a non-negative integer is rejected.
pub fn parse_size_cap(input: &str) -> Result<SizeCap, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(SizeCap::UNLIMITED);
    }

    trimmed
        .parse::<u64>()
        .map(SizeCap::from_megabytes)
        .map_err(|_| ValidationError::InvalidSizeCap(trimmed.to_string()))
}

/// Validate the raw inputs and build an immutable job
pub fn build_job(
    folder: Option<&PathBuf>,
    preset: Preset,
    size_input: &str,
) -> Result<Job, ValidationError> {
    let folder = folder.ok_or(ValidationError::NoFolder)?;
    let size_cap = parse_size_cap(size_input)?;

    if !folder.is_dir() {
        return Err(ValidationError::FolderMissing(folder.clone()));
    }

    Ok(Job::new(folder.clone(), preset, size_cap))
}
