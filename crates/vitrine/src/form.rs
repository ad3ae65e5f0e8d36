//! Debounced validation for a cell-range text input
//!
//! A [`RangeField`] mirrors the "range" box of an import form: each
//! keystroke calls [`RangeField::set_input`], and the text is only parsed
//! once the user has stopped typing for the debounce interval.
//!
//! # Example
//!
//! ```rust
//! use vitrine::form::{FieldStatus, RangeField};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let mut field = RangeField::new();
//! field.set_input("B2:");
//! field.set_input("B2:D9");
//! assert_eq!(field.status(), FieldStatus::Pending);
//!
//! match field.settled().await {
//!     FieldStatus::Valid(bounds, row) => {
//!         assert_eq!((bounds.left_bound_index, bounds.right_bound_index, row), (1, 3, 2));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use vitrine_core::{
    get_column_index_bound, get_starting_cell_row_number, validate_cell_range, CellRangeOption,
    ColumnIndexBound, Error,
};

/// Options for a [`RangeField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFieldConfig {
    /// Quiet period after the last input before it is validated (default: 500ms)
    pub debounce: Duration,
}

impl Default for RangeFieldConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

/// Validation state of the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// No text
    Empty,
    /// Input changed and the debounce timer is running
    Pending,
    /// Column interval and starting row of a valid range
    Valid(ColumnIndexBound, u32),
    /// Message to show next to the input
    Invalid(String),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid(..))
    }
}

/// Parse and validate range text immediately. Blank text is
/// [`FieldStatus::Empty`].
pub fn validate_range_input(text: &str) -> FieldStatus {
    if text.trim().is_empty() {
        return FieldStatus::Empty;
    }
    let range = match CellRangeOption::parse(text) {
        Ok(range) => range,
        Err(e) => return FieldStatus::Invalid(e.to_string()),
    };
    if !validate_cell_range(&range) {
        return FieldStatus::Invalid(Error::InvalidRange.to_string());
    }

    match (
        get_column_index_bound(&range),
        get_starting_cell_row_number(&range),
    ) {
        (Ok(bounds), Ok(row)) => FieldStatus::Valid(bounds, row),
        (Err(e), _) | (_, Err(e)) => FieldStatus::Invalid(e.to_string()),
    }
}

/// A range input with debounced validation.
///
/// `set_input` must be called from inside a tokio runtime; the timer runs
/// as a spawned task and is aborted when the field is dropped.
#[derive(Debug)]
pub struct RangeField {
    config: RangeFieldConfig,
    input: String,
    status: Arc<watch::Sender<FieldStatus>>,
    generation: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
}

impl RangeField {
    pub fn new() -> Self {
        Self::with_config(RangeFieldConfig::default())
    }

    pub fn with_config(config: RangeFieldConfig) -> Self {
        let (status, _) = watch::channel(FieldStatus::Empty);
        Self {
            config,
            input: String::new(),
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
            timer: None,
        }
    }

    pub fn config(&self) -> &RangeFieldConfig {
        &self.config
    }

    /// Current text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current validation state
    pub fn status(&self) -> FieldStatus {
        self.status.borrow().clone()
    }

    /// Watch the validation state
    pub fn subscribe(&self) -> watch::Receiver<FieldStatus> {
        self.status.subscribe()
    }

    /// Replace the text and restart the debounce timer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        let generation = self.bump();
        self.status.send_replace(FieldStatus::Pending);

        let status = Arc::clone(&self.status);
        let current = Arc::clone(&self.generation);
        let text = self.input.clone();
        let deadline = tokio::time::Instant::now() + self.config.debounce;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let result = validate_range_input(&text);
            tracing::debug!(input = %text, status = ?result, "range input validated");
            // A newer input may have arrived while this one was validating
            status.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = result;
                true
            });
        }));
    }

    /// Validate the current text now, skipping any running timer
    /// (for blur or submit).
    pub fn validate_now(&mut self) -> FieldStatus {
        self.bump();
        let result = validate_range_input(&self.input);
        self.status.send_replace(result.clone());
        result
    }

    /// Wait until the field is no longer [`FieldStatus::Pending`].
    pub async fn settled(&self) -> FieldStatus {
        let mut rx = self.status.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here
        let status = match rx
            .wait_for(|status| !matches!(status, FieldStatus::Pending))
            .await
        {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        };
        status
    }

    fn bump(&mut self) -> u64 {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for RangeField {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RangeField {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bound(left: u32, right: u32) -> ColumnIndexBound {
        ColumnIndexBound {
            left_bound_index: left,
            right_bound_index: right,
        }
    }

    #[test]
    fn test_validate_range_input() {
        assert_eq!(
            validate_range_input("A1:C3"),
            FieldStatus::Valid(bound(0, 2), 1)
        );
        assert_eq!(
            validate_range_input(" Z4 : AA9 "),
            FieldStatus::Valid(bound(25, 26), 4)
        );
        assert_eq!(
            validate_range_input("B2:A1"),
            FieldStatus::Invalid("Invalid cell range".to_string())
        );
        assert_eq!(
            validate_range_input("A1"),
            FieldStatus::Invalid("Invalid cell range".to_string())
        );
        assert!(!validate_range_input("a1:c3").is_valid());
        assert_eq!(validate_range_input("  "), FieldStatus::Empty);
    }

    #[test]
    fn test_default_debounce() {
        assert_eq!(
            RangeFieldConfig::default().debounce,
            Duration::from_millis(500)
        );
        assert_eq!(RangeField::new().status(), FieldStatus::Empty);
    }
}
