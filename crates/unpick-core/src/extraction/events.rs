//! Running a process on a worker thread and receiving its events.

use std::io;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

use crate::ExtractionError;
use crate::ProcessObserver;
use crate::ProcessReport;
use crate::Result;
use crate::SelectableFile;
use crate::SelectionModel;
use crate::StagingReport;
use crate::report::EntryFailure;

use super::session::ExtractionSession;

/// Event emitted by a process run.
#[derive(Debug)]
pub enum ProcessEvent {
    /// The whole archive was staged.
    Staged(StagingReport),

    /// A selected entry was copied.
    EntryCopied {
        /// Index of the entry in the selection.
        index: usize,
        /// Internal archive path of the entry.
        internal_path: String,
        /// Name the entry was written under.
        output_name: String,
        /// Bytes written.
        bytes: u64,
    },

    /// A selected entry could not be copied.
    EntryFailed(EntryFailure),

    /// The staging directory could not be removed.
    CleanupFailed(String),

    /// Terminal: the run completed, possibly with entry failures.
    Finished {
        /// The selection with updated `is_processed` flags.
        selection: SelectionModel,
        /// Run statistics.
        report: ProcessReport,
    },

    /// Terminal: the run aborted before any copy.
    Aborted {
        /// The selection, unchanged.
        selection: SelectionModel,
        /// Why the run aborted.
        error: ExtractionError,
    },
}

impl ProcessEvent {
    /// Returns `true` for `Finished` and `Aborted`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::Aborted { .. })
    }
}

/// Observer that forwards every callback as a [`ProcessEvent`] on a channel.
///
/// Send failures (receiver dropped) are ignored; the run carries on.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<ProcessEvent>,
}

impl ChannelObserver {
    /// Creates an observer sending on `sender`.
    #[must_use]
    pub const fn new(sender: Sender<ProcessEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: ProcessEvent) {
        let _ = self.sender.send(event);
    }
}

impl ProcessObserver for ChannelObserver {
    fn on_staged(&mut self, report: &StagingReport) {
        self.send(ProcessEvent::Staged(report.clone()));
    }

    fn on_entry_copied(&mut self, index: usize, file: &SelectableFile, bytes: u64) {
        self.send(ProcessEvent::EntryCopied {
            index,
            internal_path: file.internal_path().to_string(),
            output_name: file.output_name().to_string(),
            bytes,
        });
    }

    fn on_entry_failed(&mut self, index: usize, file: &SelectableFile, error: &ExtractionError) {
        self.send(ProcessEvent::EntryFailed(EntryFailure::new(index, file, error)));
    }

    fn on_cleanup_failed(&mut self, error: &ExtractionError) {
        self.send(ProcessEvent::CleanupFailed(error.to_string()));
    }

    fn on_finished(&mut self, selection: &SelectionModel, report: &ProcessReport) {
        self.send(ProcessEvent::Finished {
            selection: selection.clone(),
            report: report.clone(),
        });
    }
}

/// Handle to a process running on a worker thread.
///
/// Events arrive in order; the last one is always terminal unless the worker
/// panicked.
#[derive(Debug)]
pub struct ProcessHandle {
    receiver: Receiver<ProcessEvent>,
    worker: JoinHandle<()>,
}

impl ProcessHandle {
    /// Blocks until the next event, or returns `None` once the worker is done
    /// and every event was received.
    #[must_use]
    pub fn recv(&self) -> Option<ProcessEvent> {
        self.receiver.recv().ok()
    }

    /// Returns the next event if one is ready.
    #[must_use]
    pub fn try_recv(&self) -> Option<ProcessEvent> {
        self.receiver.try_recv().ok()
    }

    /// Drains all events and returns the terminal one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the worker ended without a terminal event,
    /// which only happens if it panicked.
    pub fn wait(self) -> Result<ProcessEvent> {
        let terminal = self.receiver.iter().find(ProcessEvent::is_terminal);
        if self.worker.join().is_err() {
            return Err(ExtractionError::Io(io::Error::other("process worker panicked")));
        }
        terminal.ok_or_else(|| {
            ExtractionError::Io(io::Error::other("process worker ended without a result"))
        })
    }
}

/// Runs `session.process(selection)` on a new worker thread.
///
/// The selection moves into the worker and comes back inside the terminal
/// event, so it cannot be edited while the run is in flight.
///
/// # Errors
///
/// Returns an I/O error if the thread cannot be spawned.
///
/// # Examples
///
/// ```no_run
/// use unpick_core::{ProcessEvent, SessionBuilder, list_files, open_archive, spawn_process};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut selection = list_files(&open_archive("bundle.zip")?);
/// selection.select_all(true);
/// let session = SessionBuilder::new()
///     .archive("bundle.zip")
///     .destination("/tmp/output")
///     .build()?;
///
/// let handle = spawn_process(selection, session)?;
/// while let Some(event) = handle.recv() {
///     if let ProcessEvent::EntryCopied { internal_path, .. } = &event {
///         println!("copied {internal_path}");
///     }
///     if event.is_terminal() {
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn spawn_process(
    mut selection: SelectionModel,
    session: ExtractionSession,
) -> Result<ProcessHandle> {
    let (sender, receiver) = mpsc::channel();

    let worker = thread::Builder::new()
        .name("unpick-process".to_string())
        .spawn(move || {
            let mut observer = ChannelObserver::new(sender.clone());
            if let Err(error) = session.process(&mut selection, &mut observer) {
                let _ = sender.send(ProcessEvent::Aborted { selection, error });
            }
        })?;

    Ok(ProcessHandle { receiver, worker })
}
