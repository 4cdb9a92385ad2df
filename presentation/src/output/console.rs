//! Console output formatter for pipeline results

use crate::output::formatter::OutputFormatter;
use arena_application::{PipelineOutput, ResultSource};
use arena_domain::{PhilosopherStance, PipelineResult, Side};
use colored::Colorize;

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format as compact JSON. Non-ASCII text is written as-is.
    pub fn format_json(result: &PipelineResult) -> String {
        serde_json::to_string(result)
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format as indented JSON
    pub fn format_pretty(result: &PipelineResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the human-readable summary
    pub fn format_text(output: &PipelineOutput) -> String {
        let result = &output.result;
        let mut text = String::new();

        text.push_str(&Self::header("Debate Arena"));
        text.push('\n');

        text.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), result.topic()));
        if let Some(original) = result.original_topic() {
            text.push_str(&format!("{} {}\n", "Original:".dimmed(), original));
        }
        text.push('\n');

        text.push_str(&format!(
            "{} {}\n",
            "Pro:".green().bold(),
            result.pro_stance()
        ));
        text.push_str(&format!("{} {}\n", "Con:".red().bold(), result.con_stance()));

        for side in [Side::Pro, Side::Con] {
            let members: Vec<&PhilosopherStance> = result
                .philosophers()
                .iter()
                .filter(|p| p.stance == side)
                .collect();

            text.push_str(&Self::section_header(&format!(
                "{} ({})",
                Self::side_label(side),
                members.len()
            )));
            for member in members {
                text.push_str(&format!("  * {}: {}\n", member.name.bold(), member.reason));
            }
        }

        if output.source == ResultSource::Fallback {
            text.push_str(&format!(
                "\n{}\n",
                format!(
                    "Backend unavailable after {} attempt(s); showing the fallback result",
                    output.attempts
                )
                .yellow()
            ));
        }

        text.push_str(&Self::footer());
        text
    }

    fn side_label(side: Side) -> String {
        match side {
            Side::Pro => "Pro camp".green().bold().to_string(),
            Side::Con => "Con camp".red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title, "-".repeat(32))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(48).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_json(&self, output: &PipelineOutput) -> String {
        Self::format_json(&output.result)
    }

    fn format_pretty(&self, output: &PipelineOutput) -> String {
        Self::format_pretty(&output.result)
    }

    fn format_text(&self, output: &PipelineOutput) -> String {
        Self::format_text(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{OutputFormat, PersonaCatalog, Topic, fallback_result};

    fn output(source: ResultSource) -> PipelineOutput {
        let topic = Topic::new("我们应该限制人工智能的发展吗，还是放任它自由成长");
        PipelineOutput {
            result: fallback_result(&topic, &PersonaCatalog::philosophers()),
            source,
            attempts: 2,
        }
    }

    #[test]
    fn test_json_is_single_line_and_keeps_non_ascii() {
        let json = ConsoleFormatter.render(&output(ResultSource::Generated), OutputFormat::Json);
        assert!(!json.contains('\n'));
        assert!(json.contains("苏格拉底"));
        assert!(!json.contains("\\u"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["topic"], "我们应该限制人工智能的发展吗，");
        assert_eq!(value["philosophers"].as_array().unwrap().len(), 5);
        assert_eq!(value["philosophers"][0]["stance"], "pro");
        // Diagnostics stay out of the payload
        assert!(value.get("source").is_none());
        assert!(value.get("attempts").is_none());
    }

    #[test]
    fn test_pretty_matches_json_payload() {
        let output = output(ResultSource::Generated);
        let pretty = ConsoleFormatter.render(&output, OutputFormat::Pretty);
        assert!(pretty.contains('\n'));

        let compact: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter.render(&output, OutputFormat::Json))
                .unwrap();
        let indented: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(compact, indented);
    }

    #[test]
    fn test_text_lists_every_philosopher() {
        let text = ConsoleFormatter.render(&output(ResultSource::Generated), OutputFormat::Text);
        for name in ["苏格拉底", "尼采", "维特根斯坦", "康德", "弗洛伊德"] {
            assert!(text.contains(name), "missing {}", name);
        }
        assert!(text.contains("支持："));
        assert!(text.contains("反对："));
        assert!(!text.contains("fallback result"));
    }

    #[test]
    fn test_text_marks_fallback() {
        let text = ConsoleFormatter.render(&output(ResultSource::Fallback), OutputFormat::Text);
        assert!(text.contains("fallback result"));
    }
}
