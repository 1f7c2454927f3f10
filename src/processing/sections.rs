//! Education and experience mention extraction, one entry per qualifying sentence

use crate::nlp::{AnalyzedText, EntityLabel, Sentence};
use crate::processing::profile::{EducationEntry, ExperienceEntry};
use regex::Regex;

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "bsc", "msc", "ba", "ma", "degree",
    "university", "college", "school", "institute",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "work", "experience", "job", "position", "role", "employment", "worked", "employed",
    "hired", "manager", "director", "engineer", "developer", "analyst", "consultant", "intern",
];

pub trait EntryExtractor {
    type Entry;

    fn extract(&self, analyzed: &AnalyzedText) -> Vec<Self::Entry>;
}

/// Case-insensitive substring test, so "BA" also fires inside "based"
fn mentions_any(sentence: &str, keywords: &[&str]) -> bool {
    let lowered = sentence.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

pub struct YearMatcher {
    year_regex: Regex,
}

impl Default for YearMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl YearMatcher {
    pub fn new() -> Self {
        Self {
            year_regex: Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex"),
        }
    }

    pub fn years(&self, text: &str) -> Vec<u16> {
        self.year_regex
            .find_iter(text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect()
    }
}

#[derive(Default)]
pub struct EducationExtractor {
    years: YearMatcher,
}

impl EducationExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, sentence: &Sentence) -> Option<EducationEntry> {
        if !mentions_any(&sentence.text, EDUCATION_KEYWORDS) {
            return None;
        }

        let institutions = sentence.entity_texts(&[EntityLabel::Org, EntityLabel::Gpe]);
        let years = self.years.years(&sentence.text);
        if institutions.is_empty() && years.is_empty() {
            return None;
        }

        Some(EducationEntry {
            text: sentence.text.trim().to_string(),
            institutions,
            years,
        })
    }
}

impl EntryExtractor for EducationExtractor {
    type Entry = EducationEntry;

    fn extract(&self, analyzed: &AnalyzedText) -> Vec<EducationEntry> {
        analyzed
            .sentences
            .iter()
            .filter_map(|sentence| self.entry(sentence))
            .collect()
    }
}

pub struct ExperienceExtractor {
    years: YearMatcher,
    title_regex: Regex,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        Self {
            years: YearMatcher::new(),
            title_regex: Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("Invalid title regex"),
        }
    }

    fn entry(&self, sentence: &Sentence) -> Option<ExperienceEntry> {
        if !mentions_any(&sentence.text, EXPERIENCE_KEYWORDS) {
            return None;
        }

        let organizations = sentence.entity_texts(&[EntityLabel::Org]);
        let years = self.years.years(&sentence.text);
        let job_titles: Vec<String> = self
            .title_regex
            .find_iter(&sentence.text)
            .map(|m| m.as_str().to_string())
            .collect();

        if organizations.is_empty() && years.is_empty() && job_titles.is_empty() {
            return None;
        }

        Some(ExperienceEntry {
            text: sentence.text.trim().to_string(),
            organizations,
            years,
            job_titles,
        })
    }
}

impl EntryExtractor for ExperienceExtractor {
    type Entry = ExperienceEntry;

    fn extract(&self, analyzed: &AnalyzedText) -> Vec<ExperienceEntry> {
        analyzed
            .sentences
            .iter()
            .filter_map(|sentence| self.entry(sentence))
            .collect()
    }
}
