use ffbatch::engine::EncoderCommand;
use ffbatch::engine::worker::WorkerMessage;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Stand-in for ffmpeg. Records every invocation and reacts to the input name:
/// `*fail*` exits 1 with a message on stderr, `*slow*` truncates the output
/// and sleeps, anything else writes the output file and exits 0.
const FAKE_ENCODER: &str = r#"#!/bin/sh
calls='@CALLS@'
for a in "$@"; do printf '%s\t' "$a"; done >> "$calls"
printf '\n' >> "$calls"
in=""
prev=""
out=""
for a in "$@"; do
  if [ "$prev" = "-i" ]; then in="$a"; fi
  prev="$a"
  out="$a"
done
case "$in" in
  *fail*) echo "Invalid data found when processing input: $in" >&2; exit 1 ;;
  *slow*) : > "$out"; exec sleep @SLOW_SECS@ ;;
esac
printf 'converted' > "$out"
"#;

pub struct FakeEncoder {
    dir: TempDir,
    script: PathBuf,
    calls: PathBuf,
}

impl FakeEncoder {
    pub fn new() -> Self {
        Self::with_slow_secs(3)
    }

    pub fn with_slow_secs(secs: u32) -> Self {
        let dir = TempDir::new().expect("temp dir for fake encoder");
        let script = dir.path().join("fake-ffmpeg.sh");
        let calls = dir.path().join("calls.log");

        let body = FAKE_ENCODER
            .replace("@CALLS@", &calls.to_string_lossy())
            .replace("@SLOW_SECS@", &secs.to_string());
        fs::write(&script, body).expect("write fake encoder");

        Self { dir, script, calls }
    }

    /// Run through `/bin/sh` so the script never needs the exec bit
    pub fn command(&self) -> EncoderCommand {
        EncoderCommand::new("/bin/sh").with_leading_args([self.script.as_os_str()])
    }

    /// Arguments of every invocation so far, script path excluded
    pub fn invocations(&self) -> Vec<Vec<String>> {
        let Ok(contents) = fs::read_to_string(&self.calls) else {
            return Vec::new();
        };
        contents
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.trim_end_matches('\t')
                    .split('\t')
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Input path of an invocation (the argument after `-i`)
pub fn input_of(args: &[String]) -> Option<&str> {
    args.windows(2)
        .find(|w| w[0] == "-i")
        .map(|w| w[1].as_str())
}

/// Create a source folder with the given (empty) files
pub fn source_folder(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp source folder");
    for name in names {
        fs::write(dir.path().join(name), b"fake video").expect("write source file");
    }
    dir
}

/// Collect messages until `Finished` arrives or the timeout expires
pub fn collect_until_finished(rx: &Receiver<WorkerMessage>, timeout: Duration) -> Vec<WorkerMessage> {
    let deadline = Instant::now() + timeout;
    let mut messages = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(msg) => {
                let done = matches!(msg, WorkerMessage::Finished { .. });
                messages.push(msg);
                if done {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    messages
}

/// Wait for a log line containing `needle`, returning everything received
pub fn wait_for_log(
    rx: &Receiver<WorkerMessage>,
    needle: &str,
    timeout: Duration,
) -> Vec<WorkerMessage> {
    let deadline = Instant::now() + timeout;
    let mut messages = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(msg) => {
                let hit = matches!(&msg, WorkerMessage::Log { line, .. } if line.contains(needle));
                messages.push(msg);
                if hit {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    messages
}
