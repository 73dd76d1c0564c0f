use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix prepended to every output file name
pub const OUTPUT_PREFIX: &str = "converted_";

/// Output preset. Only two are supported; there is no codec negotiation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Preset {
    /// H.264 video + AAC audio in an MP4 container
    #[default]
    #[serde(rename = "mp4")]
    #[value(name = "mp4")]
    VideoH264Aac,

    /// Audio track only, encoded as MP3
    #[serde(rename = "mp3")]
    #[value(name = "mp3")]
    AudioMp3,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::VideoH264Aac, Preset::AudioMp3];

    /// Extension of the files this preset produces
    pub fn extension(self) -> &'static str {
        match self {
            Self::VideoH264Aac => "mp4",
            Self::AudioMp3 => "mp3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VideoH264Aac => "MP4 (H.264 + AAC)",
            Self::AudioMp3 => "MP3 (audio only)",
        }
    }

    /// Stream selection and codec arguments for the encoder
    pub fn codec_args(self) -> &'static [&'static str] {
        match self {
            Self::VideoH264Aac => &["-c:v", "libx264", "-c:a", "aac"],
            Self::AudioMp3 => &["-vn", "-c:a", "mp3"],
        }
    }

    /// The other preset (selector cycling)
    pub fn toggled(self) -> Self {
        match self {
            Self::VideoH264Aac => Self::AudioMp3,
            Self::AudioMp3 => Self::VideoH264Aac,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Output size limit in megabytes. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeCap(u64);

impl SizeCap {
    pub const UNLIMITED: SizeCap = SizeCap(0);

    pub fn from_megabytes(mb: u64) -> Self {
        Self(mb)
    }

    pub fn megabytes(self) -> u64 {
        self.0
    }

    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }

    /// Value for ffmpeg's `-fs` flag, or None when unlimited
    pub fn ffmpeg_limit(self) -> Option<String> {
        if self.is_unlimited() {
            None
        } else {
            Some(format!("{}M", self.0))
        }
    }
}

impl fmt::Display for SizeCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            f.write_str("unlimited")
        } else {
            write!(f, "{} MB", self.0)
        }
    }
}

/// One batch run. Built from the shell's inputs and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub folder: PathBuf,
    pub preset: Preset,
    pub size_cap: SizeCap,
    /// Pass `-y` instead of `-n` to the encoder
    pub overwrite: bool,
}

impl Job {
    pub fn new(folder: PathBuf, preset: Preset, size_cap: SizeCap) -> Self {
        Self {
            id: Uuid::new_v4(),
            folder,
            preset,
            size_cap,
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A single input file and the output it converts into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Where the encoder writes; renamed onto `output_path` only on success
    pub partial_path: PathBuf,
}

impl FileTask {
    pub fn new(input_path: PathBuf, preset: Preset) -> Self {
        let output_path = derive_output_path(&input_path, preset);
        let partial_path = derive_partial_path(&output_path, preset);
        Self {
            input_path,
            output_path,
            partial_path,
        }
    }

    /// File name of the input for log lines
    pub fn display_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }
}

/// `dir/clip.mov` -> `dir/converted_clip.<preset ext>`
pub fn derive_output_path(input: &Path, preset: Preset) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();

    let mut name = OsString::from(OUTPUT_PREFIX);
    name.push(stem);
    name.push(".");
    name.push(preset.extension());

    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Suffix inserted before the extension of an output still being written
pub const PARTIAL_SUFFIX: &str = ".partial";

/// `dir/converted_clip.mp4` -> `dir/converted_clip.partial.mp4`.
/// The extension is kept so the encoder still picks the right muxer.
pub fn derive_partial_path(output: &Path, preset: Preset) -> PathBuf {
    let mut name = output.file_stem().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    name.push(".");
    name.push(preset.extension());
    output.with_file_name(name)
}

/// Overall completion, truncated to a whole percent
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let processed = processed.min(total);
    (processed * 100 / total) as u8
}

/// Outcome counters for a finished (or stopped) batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.converted + self.failed + self.skipped
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} converted, {} failed, {} skipped",
            self.converted, self.total, self.failed, self.skipped
        )?;
        if self.cancelled {
            f.write_str(" (stopped)")?;
        }
        Ok(())
    }
}
