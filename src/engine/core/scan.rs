use super::types::{FileTask, Preset};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffixes of the files picked up from the source folder
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi", ".mov", ".flv"];

/// Check if a file name ends in one of the recognized video suffixes.
/// The match is case-sensitive: `CLIP.MP4` is not picked up.
pub fn is_video_file(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext)),
        None => false,
    }
}

/// List the video files directly inside `folder`, in directory-listing order.
/// Subfolders are not descended into.
pub fn list_sources(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        anyhow::bail!("{} is not a directory", folder.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", folder.display()))?;
        let path = entry.path();
        if path.is_file() && is_video_file(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Build one task per source file
pub fn build_tasks(files: Vec<PathBuf>, preset: Preset) -> Vec<FileTask> {
    files
        .into_iter()
        .map(|input_path| FileTask::new(input_path, preset))
        .collect()
}

/// List the folder and derive the output for each match
pub fn scan_folder(folder: &Path, preset: Preset) -> Result<Vec<FileTask>> {
    Ok(build_tasks(list_sources(folder)?, preset))
}
