// Shell actions: start/stop the worker and fold its messages into the UI state

use crate::engine::build_job;
use crate::engine::worker::WorkerMessage;
use crate::ui::state::{AppState, Modal, RunState};
use std::path::PathBuf;
use tracing::{info, warn};

/// Messages applied per frame so a chatty worker cannot starve input handling
const MAX_MESSAGES_PER_FRAME: usize = 32;

impl AppState {
    pub fn select_folder(&mut self, folder: PathBuf) {
        if !self.controls_enabled() {
            return;
        }
        info!(folder = %folder.display(), "folder selected");
        self.form.folder = Some(folder);
    }

    /// Validate the form and hand a new job to the worker.
    /// Problems are surfaced as a warning modal and nothing starts.
    pub fn start_conversion(&mut self) {
        if !self.controls_enabled() {
            return;
        }

        let job = match build_job(
            self.form.folder.as_ref(),
            self.form.preset,
            &self.form.size_input,
        ) {
            Ok(job) => job.with_overwrite(self.form.overwrite),
            Err(e) => {
                self.warn("Error", e.to_string());
                return;
            }
        };

        match self.worker.start(job) {
            Ok(job_id) => {
                self.progress = 0;
                self.run_state = RunState::Running { job_id };
            }
            Err(e) => {
                warn!("start refused: {}", e);
                self.warn("Error", e.to_string());
            }
        }
    }

    /// Cancel the running job and give the controls back right away.
    /// The worker finishes or kills its current file in the background.
    pub fn stop_conversion(&mut self) {
        if !self.is_running() {
            return;
        }
        self.worker.stop();
        self.run_state = RunState::Idle;
        self.log.push("Conversion stopped!");
    }

    pub fn apply_worker_message(&mut self, msg: WorkerMessage) {
        let is_active = self.active_job() == Some(msg.job_id());

        match msg {
            WorkerMessage::Log { line, .. } => {
                self.log.push(&line);
            }
            WorkerMessage::Progress { percent, .. } => {
                if is_active {
                    self.progress = percent.min(100);
                }
            }
            WorkerMessage::Finished { job_id, summary } => {
                self.worker.complete(job_id);
                if is_active {
                    self.run_state = RunState::Idle;
                    self.log.push(&format!("Conversion finished: {}", summary));
                    // Only the running job stood between the user and quitting
                    if self.modal == Some(Modal::QuitConfirm) {
                        self.confirm_quit();
                    } else {
                        self.modal = Some(Modal::Done { summary });
                    }
                }
            }
        }
    }

    /// Drain pending worker messages (bounded per call)
    pub fn pump_worker(&mut self) -> usize {
        let mut applied = 0;
        while applied < MAX_MESSAGES_PER_FRAME {
            match self.worker.receiver().try_recv() {
                Ok(msg) => {
                    self.apply_worker_message(msg);
                    applied += 1;
                }
                Err(_) => break,
            }
        }
        applied
    }

    /// Quit immediately when idle, otherwise ask first
    pub fn request_quit(&mut self) {
        if self.is_running() {
            self.modal = Some(Modal::QuitConfirm);
        } else {
            self.confirm_quit();
        }
    }

    pub fn confirm_quit(&mut self) {
        self.modal = None;
        self.worker.shutdown();
        self.run_state = RunState::Idle;
        self.should_quit = true;
    }
}
