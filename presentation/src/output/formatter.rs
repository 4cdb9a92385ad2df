//! Output formatter trait

use arena_application::PipelineOutput;
use arena_domain::OutputFormat;

/// Trait for formatting pipeline results
pub trait OutputFormatter {
    /// Compact single-line JSON of the result payload
    fn format_json(&self, output: &PipelineOutput) -> String;

    /// Indented JSON of the result payload
    fn format_pretty(&self, output: &PipelineOutput) -> String;

    /// Human-readable summary
    fn format_text(&self, output: &PipelineOutput) -> String;

    /// Dispatch on `format`
    fn render(&self, output: &PipelineOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(output),
            OutputFormat::Pretty => self.format_pretty(output),
            OutputFormat::Text => self.format_text(output),
        }
    }
}
