use super::ffmpeg_cmd::EncoderCommand;
use anyhow::{Context, Result};
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where a bundled encoder lives relative to the installed executable
pub fn bundled_encoder_path(exe_dir: &Path) -> PathBuf {
    exe_dir.join("bin").join(format!("ffmpeg{}", EXE_SUFFIX))
}

/// Pick the encoder binary.
///
/// Priority: explicit path (CLI flag or config) > binary bundled next to the
/// running executable > `ffmpeg` on PATH.
pub fn resolve_encoder(explicit: Option<&Path>) -> EncoderCommand {
    if let Some(path) = explicit {
        return EncoderCommand::new(path);
    }

    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(bundled_encoder_path))
        .filter(|path| path.is_file());

    match bundled {
        Some(path) => EncoderCommand::new(path),
        None => EncoderCommand::default(),
    }
}

/// Check that the encoder runs and return the first line of its version banner
pub fn encoder_version(encoder: &EncoderCommand) -> Result<String> {
    let output = Command::new(&encoder.program)
        .args(&encoder.leading_args)
        .arg("-version")
        .output()
        .with_context(|| {
            format!(
                "Failed to execute {}. Is ffmpeg installed and in PATH?",
                encoder.program.display()
            )
        })?;

    if !output.status.success() {
        anyhow::bail!("encoder version check failed with status: {}", output.status);
    }

    let version_output = String::from_utf8_lossy(&output.stdout);
    let first_line = version_output.lines().next().unwrap_or("Unknown version");

    Ok(first_line.to_string())
}
