// Batch worker: one background thread per job, talking to the shell over a channel

use std::fs;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    BatchSummary, CancelToken, EncodeOutcome, EncoderCommand, Job, build_encoder_cmd, format_cmd,
    progress_percent, run_encoder, scan_folder,
};

/// Message from the worker thread to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// A line for the log view
    Log { job_id: Uuid, line: String },

    /// Overall completion in percent, never decreasing within a job
    Progress { job_id: Uuid, percent: u8 },

    /// Last message of every job, whether it ran out of files or was stopped
    Finished { job_id: Uuid, summary: BatchSummary },
}

impl WorkerMessage {
    pub fn job_id(&self) -> Uuid {
        match self {
            Self::Log { job_id, .. }
            | Self::Progress { job_id, .. }
            | Self::Finished { job_id, .. } => *job_id,
        }
    }
}

/// Run a whole batch on the current thread.
///
/// Every per-file problem is reported through `emit` and the loop moves on;
/// the batch itself cannot fail. The cancellation token is checked before each
/// file. When `interrupt_on_stop` is set (or the token is killed), an encode in
/// flight is also terminated. The encoder writes to a partial file that only
/// replaces the real output on success, so an interrupted or failed encode
/// never leaves a truncated output behind.
pub fn run_batch<F>(
    job: &Job,
    encoder: &EncoderCommand,
    cancel: &CancelToken,
    interrupt_on_stop: bool,
    mut emit: F,
) -> BatchSummary
where
    F: FnMut(WorkerMessage),
{
    let job_id = job.id;
    let mut summary = BatchSummary::default();

    let tasks = match scan_folder(&job.folder, job.preset) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(job = %job_id, "scan failed: {:#}", e);
            emit(WorkerMessage::Log {
                job_id,
                line: format!("Failed to read folder {}: {:#}", job.folder.display(), e),
            });
            emit(WorkerMessage::Progress {
                job_id,
                percent: 0,
            });
            emit(WorkerMessage::Finished {
                job_id,
                summary: summary.clone(),
            });
            return summary;
        }
    };

    summary.total = tasks.len();
    info!(
        job = %job_id,
        folder = %job.folder.display(),
        preset = %job.preset,
        size_cap = %job.size_cap,
        files = summary.total,
        "batch started"
    );
    emit(WorkerMessage::Progress {
        job_id,
        percent: 0,
    });

    if tasks.is_empty() {
        emit(WorkerMessage::Log {
            job_id,
            line: format!("No video files found in {}", job.folder.display()),
        });
        emit(WorkerMessage::Progress {
            job_id,
            percent: 100,
        });
        emit(WorkerMessage::Finished {
            job_id,
            summary: summary.clone(),
        });
        return summary;
    }

    for task in &tasks {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        let name = task.display_name();

        if !task.input_path.exists() {
            summary.skipped += 1;
            emit(WorkerMessage::Log {
                job_id,
                line: format!("File not found: {}. Skipping...", name),
            });
        } else if !job.overwrite && task.output_path.exists() {
            summary.failed += 1;
            emit(WorkerMessage::Log {
                job_id,
                line: format!(
                    "Error converting {}: {} already exists",
                    name,
                    task.output_path.display()
                ),
            });
        } else {
            // Leftover from an earlier crash; the encoder must start clean
            remove_partial(&task.partial_path);

            let cmd = build_encoder_cmd(encoder, job, task);
            let cmd_string = format_cmd(&cmd);
            debug!(job = %job_id, command = %cmd_string, "running encoder");
            emit(WorkerMessage::Log {
                job_id,
                line: format!("Running: {}", cmd_string),
            });

            match run_encoder(cmd, cancel, interrupt_on_stop) {
                Ok(EncodeOutcome::Success) => {
                    match fs::rename(&task.partial_path, &task.output_path) {
                        Ok(()) => {
                            summary.converted += 1;
                            emit(WorkerMessage::Log {
                                job_id,
                                line: format!(
                                    "Converted {} -> {}",
                                    name,
                                    task.output_path.display()
                                ),
                            });
                        }
                        Err(e) => {
                            summary.failed += 1;
                            remove_partial(&task.partial_path);
                            warn!(job = %job_id, file = %name, "failed to move output: {}", e);
                            emit(WorkerMessage::Log {
                                job_id,
                                line: format!(
                                    "Error converting {}: could not write {}: {}",
                                    name,
                                    task.output_path.display(),
                                    e
                                ),
                            });
                        }
                    }
                }
                Ok(EncodeOutcome::Failed { status, stderr }) => {
                    summary.failed += 1;
                    remove_partial(&task.partial_path);
                    warn!(job = %job_id, file = %name, %status, "encoder failed");
                    emit(WorkerMessage::Log {
                        job_id,
                        line: format!(
                            "Error converting {} ({}): {}",
                            name,
                            status,
                            stderr.trim_end()
                        ),
                    });
                }
                Ok(EncodeOutcome::Cancelled) => {
                    summary.cancelled = true;
                    let removed = remove_partial(&task.partial_path);
                    info!(job = %job_id, file = %name, removed, "encode interrupted");
                    emit(WorkerMessage::Log {
                        job_id,
                        line: if removed {
                            format!("Interrupted {}; removed partial output", name)
                        } else {
                            format!("Interrupted {}", name)
                        },
                    });
                    break;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(job = %job_id, file = %name, "encoder did not start: {:#}", e);
                    emit(WorkerMessage::Log {
                        job_id,
                        line: format!("Error converting {}: {:#}", name, e),
                    });
                }
            }
        }

        emit(WorkerMessage::Progress {
            job_id,
            percent: progress_percent(summary.processed(), summary.total),
        });
    }

    info!(job = %job_id, %summary, "batch finished");
    emit(WorkerMessage::Finished {
        job_id,
        summary: summary.clone(),
    });
    summary
}

fn remove_partial(path: &std::path::Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), "failed to remove partial output: {}", e);
            false
        }
    }
}

/// Why a new job was not started
#[derive(Debug, Error)]
pub enum StartError {
    #[error("A conversion is already running")]
    AlreadyRunning,

    #[error("The previous conversion is still shutting down, try again in a moment")]
    StillStopping,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

struct RunningJob {
    id: Uuid,
    cancel: CancelToken,
    handle: JoinHandle<BatchSummary>,
}

/// Owner of the worker channel and of the thread running the current job.
///
/// At most one job runs at a time. A stopped job keeps its thread until the
/// encoder it is waiting on exits; no new job starts before that.
pub struct BatchWorker {
    encoder: EncoderCommand,
    interrupt_on_stop: bool,
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    current: Option<RunningJob>,
    stopping: Vec<RunningJob>,
}

impl BatchWorker {
    pub fn new(encoder: EncoderCommand, interrupt_on_stop: bool) -> Self {
        let (tx, rx) = mpsc::channel();

        Self {
            encoder,
            interrupt_on_stop,
            tx,
            rx,
            current: None,
            stopping: Vec::new(),
        }
    }

    /// Get the receiver for worker messages
    pub fn receiver(&self) -> &Receiver<WorkerMessage> {
        &self.rx
    }

    pub fn encoder(&self) -> &EncoderCommand {
        &self.encoder
    }

    /// Id of the running (not stopped) job, if any
    pub fn active_job(&self) -> Option<Uuid> {
        self.current.as_ref().map(|running| running.id)
    }

    /// True while any worker thread, running or stopping, is still alive
    pub fn is_busy(&mut self) -> bool {
        self.reap();
        self.current.is_some() || !self.stopping.is_empty()
    }

    /// Start a job on a fresh thread with a fresh cancellation token
    pub fn start(&mut self, job: Job) -> Result<Uuid, StartError> {
        self.reap();
        if self.current.is_some() {
            return Err(StartError::AlreadyRunning);
        }
        if !self.stopping.is_empty() {
            return Err(StartError::StillStopping);
        }

        let id = job.id;
        let cancel = CancelToken::new();
        let tx = self.tx.clone();
        let encoder = self.encoder.clone();
        let interrupt_on_stop = self.interrupt_on_stop;
        let thread_cancel = cancel.clone();

        let handle = thread::Builder::new()
            .name(format!("batch-{}", &id.simple().to_string()[..8]))
            .spawn(move || {
                run_batch(&job, &encoder, &thread_cancel, interrupt_on_stop, |msg| {
                    // Receiver gone means the shell is shutting down
                    let _ = tx.send(msg);
                })
            })?;

        self.current = Some(RunningJob { id, cancel, handle });
        Ok(id)
    }

    /// Request cancellation of the running job and return at once
    pub fn stop(&mut self) -> Option<Uuid> {
        let running = self.current.take()?;
        running.cancel.cancel();
        let id = running.id;
        info!(job = %id, "stop requested");
        self.stopping.push(running);
        Some(id)
    }

    /// Called once the `Finished` message for `job_id` has been received
    pub fn complete(&mut self, job_id: Uuid) -> Option<BatchSummary> {
        if self.current.as_ref().is_some_and(|r| r.id == job_id) {
            let running = self.current.take()?;
            return running.handle.join().ok();
        }
        if let Some(idx) = self.stopping.iter().position(|r| r.id == job_id) {
            let running = self.stopping.swap_remove(idx);
            return running.handle.join().ok();
        }
        None
    }

    /// Kill every encoder still running and wait for the worker threads,
    /// whatever `interrupt_on_stop` says.
    pub fn shutdown(&mut self) {
        self.stop();
        for running in self.stopping.drain(..) {
            running.cancel.kill();
            let _ = running.handle.join();
        }
    }

    fn reap(&mut self) {
        let mut idx = 0;
        while idx < self.stopping.len() {
            if self.stopping[idx].handle.is_finished() {
                let running = self.stopping.swap_remove(idx);
                let _ = running.handle.join();
            } else {
                idx += 1;
            }
        }
    }
}
