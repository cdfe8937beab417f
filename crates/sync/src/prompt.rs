use kbsync_core::SyncError;

/// Line-oriented operator input.
pub trait Prompter {
    /// Show `message` and read one line. `None` means input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, SyncError>;
}
