//! Presentation-level configuration
//!
//! Output settings after merging the config file with command-line flags.

use council_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply command-line overrides; flags win over file values.
    pub fn with_overrides(
        mut self,
        format: Option<OutputFormat>,
        no_color: bool,
        quiet: bool,
    ) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self.color &= !no_color;
        self.show_progress &= !quiet;
        // Progress bars would interleave with machine-readable output.
        if self.format == OutputFormat::Json {
            self.show_progress = false;
        }
        self
    }
}
