//! Defines structures and types for progress reporting during batch scraping.

/// Represents a snapshot of the progress during a batch run.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// A description of the current stage (e.g., "Scraping Spanish").
    pub stage_description: String,
    /// Number of lookup keys processed so far.
    pub current_item: u64,
    /// Total number of keys in the batch (if known).
    pub total_items: Option<u64>,
    /// An optional message providing more context (e.g., the key just processed).
    pub message: Option<String>,
}

/// Type alias for the progress callback function.
///
/// The callback receives a `ProgressUpdate` and returns `true` to continue the
/// batch, or `false` to stop after the current key.
///
/// The callback must be `Send` so the batch can run on a runtime worker, and
/// `FnMut` allows it to update its captured state (e.g., a progress bar).
pub type ProgressCallback = Box<dyn FnMut(ProgressUpdate) -> bool + Send>;

impl ProgressUpdate {
    /// Creates a new progress update for the start of a stage.
    pub fn new_stage(description: String, total_items: Option<u64>) -> Self {
        ProgressUpdate {
            stage_description: description,
            current_item: 0,
            total_items,
            message: None,
        }
    }

    /// An update for `current_item` keys done, with `message` as context.
    pub fn advance(&self, current_item: u64, message: impl Into<String>) -> Self {
        ProgressUpdate {
            stage_description: self.stage_description.clone(),
            current_item,
            total_items: self.total_items,
            message: Some(message.into()),
        }
    }
}
