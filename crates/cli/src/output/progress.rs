//! Progress bar utilities for transfer operations
//!
//! Provides consistent progress indication for uploads and downloads, and a
//! spinner for operations without a byte count.

use std::time::Duration;

use s3cli_core::TransferProgress;

use super::OutputConfig;

const BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Progress bar wrapper
///
/// Handles progress display based on output configuration.
/// In quiet or JSON mode, progress is suppressed.
#[derive(Debug)]
pub struct ProgressBar {
    bar: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar with the given total size
    ///
    /// The total may be corrected later through [`TransferProgress`].
    pub fn new(config: &OutputConfig, total: u64) -> Self {
        let bar = Self::visible(config).then(|| {
            let bar = indicatif::ProgressBar::new(total);
            if let Ok(style) = indicatif::ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self { bar }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(config: &OutputConfig, message: &str) -> Self {
        let bar = Self::visible(config).then(|| {
            let bar = indicatif::ProgressBar::new_spinner();
            let style = indicatif::ProgressStyle::default_spinner().template(SPINNER_TEMPLATE);
            if let Ok(style) = style {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        Self { bar }
    }

    fn visible(config: &OutputConfig) -> bool {
        !(config.quiet || config.json || config.no_progress)
    }

    /// Update progress
    pub fn set_position(&self, pos: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(pos);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if progress bar is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl TransferProgress for ProgressBar {
    fn on_progress(&self, transferred: u64, total: Option<u64>) {
        if let (Some(bar), Some(total)) = (&self.bar, total) {
            bar.set_length(total);
        }
        self.set_position(transferred);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_quiet_mode() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let bar = ProgressBar::new(&config, 100);
        assert!(!bar.is_visible());
    }

    #[test]
    fn test_progress_bar_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let bar = ProgressBar::new(&config, 100);
        assert!(!bar.is_visible());
    }

    #[test]
    fn test_progress_bar_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        assert!(!ProgressBar::new(&config, 100).is_visible());
        assert!(!ProgressBar::spinner(&config, "Deleting").is_visible());
    }

    #[test]
    fn test_progress_bar_normal() {
        let bar = ProgressBar::new(&OutputConfig::default(), 0);
        assert!(bar.is_visible());

        bar.on_progress(512, Some(1024));
        let inner = bar.bar.as_ref().unwrap();
        assert_eq!(inner.length(), Some(1024));
        assert_eq!(inner.position(), 512);
        bar.finish_and_clear();
    }

    #[test]
    fn test_hidden_bar_ignores_progress() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let bar = ProgressBar::new(&config, 0);
        bar.on_progress(10, Some(20));
        assert!(!bar.is_visible());
    }
}
