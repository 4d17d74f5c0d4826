//! Progress bar adapter using indicatif.

use std::sync::{Mutex, PoisonError};

use gaze_direction_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
///
/// The bar counts input files, advancing when a new source first shows up
/// in either a started or a skipped event. Without a bar, unknown outcomes
/// are reported one per line on stderr.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
    current_source: Mutex<Option<String>>,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of input files, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-item status
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
                current_source: Mutex::new(None),
            };
        }

        let bar = if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);

            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self {
            bar,
            quiet,
            current_source: Mutex::new(None),
        }
    }

    /// Moves the bar to `source`, counting it if it was not the last one seen.
    fn enter_source(&self, bar: &IndicatifBar, source: &str) {
        let mut current = self
            .current_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if current.as_deref() != Some(source) {
            bar.inc(1);
            *current = Some(source.to_string());
        }
    }

    /// Files counted so far.
    #[cfg(test)]
    fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(IndicatifBar::position)
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { source, .. } => {
                if let Some(bar) = &self.bar {
                    self.enter_source(bar, &source);
                    bar.set_message(source);
                }
            }
            ProgressEvent::Completed { record } => {
                if self.bar.is_none() && record.result.action.is_unknown() {
                    eprintln!(
                        "{}[{}]: {}",
                        record.source, record.index, record.result.action
                    );
                }
            }
            ProgressEvent::Skipped { source, reason, .. } => {
                if let Some(bar) = &self.bar {
                    self.enter_source(bar, &source);
                    bar.suspend(|| eprintln!("WARN: Skipping {source}: {reason}"));
                } else {
                    eprintln!("WARN: Skipping {source}: {reason}");
                }
            }
            ProgressEvent::Finished { processed, skipped } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "Done: {processed} processed, {skipped} skipped"
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(source: &str, index: usize) -> ProgressEvent {
        ProgressEvent::Started {
            source: source.to_string(),
            index,
            total: Some(4),
        }
    }

    fn skipped(source: &str, index: Option<usize>) -> ProgressEvent {
        ProgressEvent::Skipped {
            source: source.to_string(),
            index,
            reason: "bad input".to_string(),
        }
    }

    #[test]
    fn test_bar_counts_each_file_once() {
        let bar = ProgressBar::new(Some(4), false, true);
        bar.on_event(started("a.jsonl", 0));
        bar.on_event(started("a.jsonl", 1));
        // Unreadable file.
        bar.on_event(skipped("gone.json", None));
        // First request of a file fails to decode.
        bar.on_event(skipped("b.jsonl", Some(0)));
        bar.on_event(started("b.jsonl", 1));
        bar.on_event(skipped("c.json", Some(0)));
        bar.on_event(ProgressEvent::Finished {
            processed: 3,
            skipped: 3,
        });
        assert_eq!(bar.position(), Some(4));
    }

    #[test]
    fn test_quiet_has_no_bar() {
        let bar = ProgressBar::new(Some(1), true, true);
        bar.on_event(started("a.json", 0));
        assert_eq!(bar.position(), None);
    }
}
