mod cancel;
mod ffmpeg_cmd;
mod ffmpeg_info;
mod scan;
mod types;
mod validation;

pub use cancel::CancelToken;
pub use ffmpeg_cmd::{EncodeOutcome, EncoderCommand, build_encoder_cmd, format_cmd, run_encoder};
pub use ffmpeg_info::{bundled_encoder_path, encoder_version, resolve_encoder};
pub use scan::{VIDEO_EXTENSIONS, build_tasks, is_video_file, list_sources, scan_folder};
pub use types::{
    BatchSummary, FileTask, Job, OUTPUT_PREFIX, PARTIAL_SUFFIX, Preset, SizeCap,
    derive_output_path, derive_partial_path, progress_percent,
};
pub use validation::{ValidationError, build_job, parse_size_cap};
