//! Markdown export of analysis records
//!
//! Renders one record as a standalone Markdown artifact: the original
//! concern, the severity overview, the expanded explanations, the CBT
//! breakdown, rebuttals when present, and a footer with tags and
//! timestamps. Empty sections are omitted rather than rendered as bare
//! headers.

use crate::record::{AnalysisRecord, CopingStrategy, Rebuttal, Section, ThoughtPattern};

/// Render a record as a Markdown document
pub fn render_markdown(record: &AnalysisRecord) -> String {
    let mut output = String::new();
    let response = &record.response;

    output.push_str(&format!(
        "# Analysis from {}\n\n",
        record.created_at.format("%Y-%m-%d")
    ));

    output.push_str("## Original Concern\n\n");
    output.push_str(&record.content);
    output.push_str("\n\n");

    output.push_str("## Overview\n\n");
    output.push_str(&format!("Severity Level: {}/5\n\n", response.severity));
    output.push_str(&response.explanation);
    output.push_str("\n\n");

    add_key_points(&mut output, &response.explanations);
    add_thought_patterns(&mut output, &response.cbt_analysis.thought_patterns);
    add_coping_strategies(&mut output, &response.cbt_analysis.coping_strategies);
    add_rebuttals(&mut output, response.rebuttals.as_deref().unwrap_or_default());
    add_footer(&mut output, record);

    output
}

/// Default artifact filename: `<id>-<summary-slug>.md`
pub fn artifact_filename(record: &AnalysisRecord) -> String {
    format!("{}-{}.md", record.id, slug::slugify(&record.summary))
}

fn add_key_points(output: &mut String, sections: &[Section]) {
    if sections.is_empty() {
        return;
    }
    output.push_str("## Key Points\n\n");
    for (i, section) in sections.iter().enumerate() {
        output.push_str(&format!(
            "{}. **{}**\n   {}\n\n",
            i + 1,
            section.title,
            section.content
        ));
    }
}

fn add_thought_patterns(output: &mut String, patterns: &[ThoughtPattern]) {
    if patterns.is_empty() {
        return;
    }
    output.push_str("## Thought Patterns\n\n");
    for pattern in patterns {
        output.push_str(&format!("### {}\n\n", pattern.pattern));
        output.push_str(&format!("- **Impact:** {}\n", pattern.impact));
        output.push_str(&format!("- **Solution:** {}\n\n", pattern.solution));
    }
}

fn add_coping_strategies(output: &mut String, strategies: &[CopingStrategy]) {
    if strategies.is_empty() {
        return;
    }
    output.push_str("## Coping Strategies\n\n");
    for strategy in strategies {
        output.push_str(&format!("### {}\n\n", strategy.strategy));
        output.push_str(&strategy.explanation);
        output.push_str("\n\n**How to:**\n\n");
        for step in strategy.how_to.lines() {
            output.push_str(&format!("- {}\n", step));
        }
        output.push('\n');
    }
}

fn add_rebuttals(output: &mut String, rebuttals: &[Rebuttal]) {
    if rebuttals.is_empty() {
        return;
    }
    output.push_str("## What If Scenarios\n\n");
    for rebuttal in rebuttals {
        output.push_str(&format!("### {}\n\n", rebuttal.concern));
        output.push_str(&rebuttal.response);
        output.push_str("\n\n");
    }
}

fn add_footer(output: &mut String, record: &AnalysisRecord) {
    output.push_str("---\n\n");
    if !record.tags.is_empty() {
        output.push_str(&format!("**Tags:** {}\n\n", record.tags.join(", ")));
    }
    output.push_str(&format!(
        "**Created:** {}\n\n",
        record.created_at.to_rfc3339()
    ));
    output.push_str(&format!("**Updated:** {}\n", record.updated_at.to_rfc3339()));
}
