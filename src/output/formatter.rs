//! Console, JSON and Markdown presentation of profiles, rankings and match breakdowns

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::processing::profile::ExtractedProfile;
use crate::processing::ranker::{CriterionMatch, MatchResult, RankedCandidate};
use crate::storage::ProfileRecord;
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_profile(&self, profile: &ExtractedProfile) -> Result<String>;

    fn format_ranking(&self, job: &ProfileRecord, ranked: &[RankedCandidate]) -> Result<String>;

    fn format_match(&self, result: &MatchResult) -> Result<String>;

    fn supports_format(&self) -> OutputFormat;
}

pub fn formatter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(config.color_output, config.detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

fn job_title(job: &ProfileRecord) -> String {
    let title = job.label.clone().unwrap_or_else(|| job.id.clone());
    match &job.company {
        Some(company) => format!("{} at {}", title, company),
        None => title,
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_similarity_badge(&self, similarity: f32) -> String {
        let (badge, color) = match similarity {
            s if s >= 0.75 => ("STRONG", Color::Green),
            s if s >= 0.5 => ("GOOD", Color::Yellow),
            s if s >= 0.25 => ("WEAK", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_criterion(&self, name: &str, criterion: &CriterionMatch) -> String {
        let mark = if criterion.matched {
            self.colorize("✓", Color::Green)
        } else {
            self.colorize("✗", Color::Red)
        };
        format!(
            "  {} {:<11} {:.2}  {}\n",
            mark, name, criterion.score, criterion.details
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_profile(&self, profile: &ExtractedProfile) -> Result<String> {
        let mut output = self.format_header("EXTRACTED PROFILE", 1);
        output.push_str(&format!(
            "Email: {}\nPhone: {}\n",
            profile.email.as_deref().unwrap_or("-"),
            profile.phone.as_deref().unwrap_or("-")
        ));

        output.push_str(&self.format_header(&format!("Skills ({})", profile.skills.len()), 2));
        output.push_str(&format!("{}\n", join_or_none(profile.skills.as_slice())));

        output.push_str(&self.format_header("Education", 2));
        for entry in &profile.education {
            output.push_str(&format!("• {}\n", entry.text));
            if self.detailed {
                output.push_str(&self.colorize(
                    &format!(
                        "    institutions: {} | years: {:?}\n",
                        join_or_none(&entry.institutions),
                        entry.years
                    ),
                    Color::BrightBlack,
                ));
            }
        }

        output.push_str(&self.format_header("Experience", 2));
        for entry in &profile.experience {
            output.push_str(&format!("• {}\n", entry.text));
            if self.detailed {
                output.push_str(&self.colorize(
                    &format!(
                        "    organizations: {} | titles: {} | years: {:?}\n",
                        join_or_none(&entry.organizations),
                        join_or_none(&entry.job_titles),
                        entry.years
                    ),
                    Color::BrightBlack,
                ));
            }
        }

        Ok(output)
    }

    fn format_ranking(&self, job: &ProfileRecord, ranked: &[RankedCandidate]) -> Result<String> {
        let mut output = self.format_header(&format!("CANDIDATES FOR {}", job_title(job)), 1);
        if ranked.is_empty() {
            output.push_str(&self.colorize("No vectorized candidates to rank.\n", Color::Yellow));
            return Ok(output);
        }

        for (position, candidate) in ranked.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} {} {:.3} | skills {:.1}%\n",
                position + 1,
                self.colorize(&candidate.candidate_name, Color::Cyan),
                self.format_similarity_badge(candidate.similarity_score),
                candidate.similarity_score,
                candidate.skills_match_percentage
            ));
            if self.detailed {
                output.push_str(&format!("     id: {}\n", candidate.candidate_id));
                output.push_str(&format!(
                    "     matching: {}\n",
                    self.colorize(&join_or_none(&candidate.matching_skills), Color::Green)
                ));
                output.push_str(&format!(
                    "     missing:  {}\n",
                    self.colorize(&join_or_none(&candidate.missing_skills), Color::Red)
                ));
            }
        }

        Ok(output)
    }

    fn format_match(&self, result: &MatchResult) -> Result<String> {
        let mut output = self.format_header("MATCH BREAKDOWN", 1);
        output.push_str(&format!(
            "Similarity: {:.3} {}\nSkills match: {:.1}%\n",
            result.similarity_score,
            self.format_similarity_badge(result.similarity_score),
            result.skills_match_percentage
        ));

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "  matching: {}\n  missing:  {}\n",
            self.colorize(&join_or_none(&result.matching_skills), Color::Green),
            self.colorize(&join_or_none(&result.missing_skills), Color::Red)
        ));

        output.push_str(&self.format_header("Criteria", 2));
        output.push_str(&self.format_criterion("education", &result.education_match));
        output.push_str(&self.format_criterion("experience", &result.experience_match));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_profile(&self, profile: &ExtractedProfile) -> Result<String> {
        self.render(profile)
    }

    fn format_ranking(&self, _job: &ProfileRecord, ranked: &[RankedCandidate]) -> Result<String> {
        self.render(ranked)
    }

    fn format_match(&self, result: &MatchResult) -> Result<String> {
        self.render(result)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

pub struct MarkdownFormatter;

impl MarkdownFormatter {
    fn criterion_icon(criterion: &CriterionMatch) -> &'static str {
        if criterion.matched {
            "✅"
        } else {
            "❌"
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_profile(&self, profile: &ExtractedProfile) -> Result<String> {
        let mut md = String::from("# Extracted Profile\n\n");
        md.push_str(&format!(
            "- **Email:** {}\n- **Phone:** {}\n\n",
            profile.email.as_deref().unwrap_or("-"),
            profile.phone.as_deref().unwrap_or("-")
        ));

        md.push_str("## Skills\n\n");
        md.push_str(&format!("{}\n\n", join_or_none(profile.skills.as_slice())));

        md.push_str("## Education\n\n");
        for entry in &profile.education {
            md.push_str(&format!("- {}\n", entry.text));
        }
        md.push_str("\n## Experience\n\n");
        for entry in &profile.experience {
            md.push_str(&format!("- {}\n", entry.text));
        }
        Ok(md)
    }

    fn format_ranking(&self, job: &ProfileRecord, ranked: &[RankedCandidate]) -> Result<String> {
        let mut md = format!("# Candidates for {}\n\n", job_title(job));
        if ranked.is_empty() {
            md.push_str("_No vectorized candidates to rank._\n");
            return Ok(md);
        }

        md.push_str("| # | Candidate | Similarity | Skills match | Missing skills |\n");
        md.push_str("|---|-----------|------------|--------------|----------------|\n");
        for (position, candidate) in ranked.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {:.3} | {:.1}% | {} |\n",
                position + 1,
                candidate.candidate_name,
                candidate.similarity_score,
                candidate.skills_match_percentage,
                join_or_none(&candidate.missing_skills)
            ));
        }
        Ok(md)
    }

    fn format_match(&self, result: &MatchResult) -> Result<String> {
        let mut md = String::from("# Match Breakdown\n\n");
        md.push_str(&format!(
            "- **Similarity:** {:.3}\n- **Skills match:** {:.1}%\n- **Matching skills:** {}\n- **Missing skills:** {}\n\n",
            result.similarity_score,
            result.skills_match_percentage,
            join_or_none(&result.matching_skills),
            join_or_none(&result.missing_skills)
        ));

        md.push_str("| Criterion | Match | Score | Details |\n|---|---|---|---|\n");
        for (name, criterion) in [
            ("Education", &result.education_match),
            ("Experience", &result.experience_match),
        ] {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {} |\n",
                name,
                Self::criterion_icon(criterion),
                criterion.score,
                criterion.details
            ));
        }
        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordKind;

    fn sample_match() -> MatchResult {
        MatchResult {
            similarity_score: 0.82,
            matching_skills: vec!["Python".to_string()],
            missing_skills: vec!["SQL".to_string()],
            skills_match_percentage: 50.0,
            education_match: CriterionMatch {
                matched: true,
                score: 1.0,
                details: "No specific education requirements".to_string(),
            },
            experience_match: CriterionMatch {
                matched: false,
                score: 0.6,
                details: "3 experience entries counted, needs 5 years".to_string(),
            },
        }
    }

    fn sample_ranking() -> Vec<RankedCandidate> {
        vec![RankedCandidate {
            candidate_id: "c1".to_string(),
            owner_id: "u1".to_string(),
            candidate_name: "Ada".to_string(),
            similarity_score: 0.9,
            matching_skills: vec!["Rust".to_string()],
            missing_skills: Vec::new(),
            skills_match_percentage: 100.0,
        }]
    }

    fn job() -> ProfileRecord {
        ProfileRecord::new(RecordKind::JobDescription, "hr", ExtractedProfile::default())
            .with_label(Some("Backend Engineer".to_string()))
            .with_company(Some("Acme".to_string()))
    }

    #[test]
    fn test_console_without_colors() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_ranking(&job(), &sample_ranking()).unwrap();

        assert!(output.contains("CANDIDATES FOR Backend Engineer at Acme"));
        assert!(output.contains("Ada [STRONG] 0.900"));
        assert!(output.contains("matching: Rust"));
    }

    #[test]
    fn test_json_uses_match_key() {
        let output = JsonFormatter::new(false).format_match(&sample_match()).unwrap();
        assert!(output.contains("\"match\":true"));
        assert!(!output.contains("matched"));
    }

    #[test]
    fn test_markdown_tables() {
        let formatter = MarkdownFormatter;
        let ranking = formatter.format_ranking(&job(), &sample_ranking()).unwrap();
        assert!(ranking.contains("| 1 | Ada | 0.900 | 100.0% | none |"));

        let breakdown = formatter.format_match(&sample_match()).unwrap();
        assert!(breakdown.contains("| Experience | ❌ | 0.60 |"));
    }

    #[test]
    fn test_empty_ranking_message() {
        let output = ConsoleFormatter::new(false, false)
            .format_ranking(&job(), &[])
            .unwrap();
        assert!(output.contains("No vectorized candidates"));
    }

    #[test]
    fn test_formatter_for_selects_format() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            detailed: false,
            color_output: false,
        };
        assert_eq!(
            formatter_for(OutputFormat::Markdown, &config).supports_format(),
            OutputFormat::Markdown
        );
    }
}
