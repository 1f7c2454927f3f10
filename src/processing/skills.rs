//! Skill extraction strategies

use crate::nlp::analyzer::on_word_boundary;
use crate::nlp::{AnalyzedText, PartOfSpeech};
use crate::processing::profile::SkillSet;
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use regex::Regex;

const TRIGGER_PHRASES: &[&str] = &[
    "experience with",
    "familiar with",
    "knowledge of",
    "skilled in",
    "proficient in",
    "expertise in",
    "competent in",
    "trained in",
];

const TECH_MODIFIERS: &[&str] = &[
    "technical",
    "programming",
    "software",
    "hardware",
    "database",
    "web",
    "mobile",
];

const SKILL_VOCABULARY: &[&str] = &[
    "Python", "Java", "JavaScript", "C++", "C#", "Ruby", "PHP", "Swift", "React", "Angular",
    "Vue", "Django", "Flask", "Spring", "Node.js", "SQL", "MongoDB", "PostgreSQL", "MySQL",
    "Oracle", "AWS", "Azure", "Docker", "Kubernetes", "Git", "TensorFlow", "PyTorch",
    "scikit-learn",
];

/// One heuristic contributing skills to a profile
pub trait SkillStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, analyzed: &AnalyzedText, skills: &mut SkillSet);
}

/// Lists following lead-in phrases such as "proficient in"
pub struct PhraseTriggerStrategy {
    triggers: Vec<Regex>,
    separator: Regex,
}

impl Default for PhraseTriggerStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseTriggerStrategy {
    pub fn new() -> Self {
        let triggers = TRIGGER_PHRASES
            .iter()
            .map(|phrase| {
                Regex::new(&format!(r"(?i){}\s([\w\s,]+)", regex::escape(phrase)))
                    .expect("Invalid trigger phrase regex")
            })
            .collect();
        let separator = Regex::new(r",|\sand\s").expect("Invalid separator regex");

        Self {
            triggers,
            separator,
        }
    }
}

impl SkillStrategy for PhraseTriggerStrategy {
    fn name(&self) -> &str {
        "phrase-trigger"
    }

    fn extract(&self, analyzed: &AnalyzedText, skills: &mut SkillSet) {
        for trigger in &self.triggers {
            for caps in trigger.captures_iter(&analyzed.text) {
                let Some(list) = caps.get(1) else { continue };
                for piece in self.separator.split(list.as_str()) {
                    let piece = piece.trim();
                    if !piece.is_empty() {
                        skills.insert(piece);
                    }
                }
            }
        }
    }
}

/// Nouns modified by a technology word, e.g. "web development"
#[derive(Default)]
pub struct SyntacticStrategy;

impl SkillStrategy for SyntacticStrategy {
    fn name(&self) -> &str {
        "syntactic"
    }

    fn extract(&self, analyzed: &AnalyzedText, skills: &mut SkillSet) {
        for (sentence, token) in analyzed.tokens() {
            if !TECH_MODIFIERS.contains(&token.text.to_lowercase().as_str()) {
                continue;
            }
            if let Some(head) = sentence.head_of(token) {
                if head.pos == PartOfSpeech::Noun {
                    skills.insert(head.text.clone());
                }
            }
        }
    }
}

/// Whole-word matches against a curated technology vocabulary
pub struct DictionaryStrategy {
    vocabulary: Vec<String>,
    matcher: AhoCorasick,
}

impl DictionaryStrategy {
    pub fn new() -> Self {
        Self::with_vocabulary(SKILL_VOCABULARY.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_vocabulary(vocabulary: Vec<String>) -> Self {
        // Overlapping search so "Java" cannot hide "JavaScript"
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&vocabulary)
            .expect("Invalid skill vocabulary");

        Self {
            vocabulary,
            matcher,
        }
    }
}

impl Default for DictionaryStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillStrategy for DictionaryStrategy {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn extract(&self, analyzed: &AnalyzedText, skills: &mut SkillSet) {
        let text = &analyzed.text;
        let mut found = vec![false; self.vocabulary.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            if on_word_boundary(text, m.start(), m.end()) {
                found[m.pattern().as_usize()] = true;
            }
        }

        // Vocabulary order keeps the result independent of where terms appear
        for (skill, _) in self.vocabulary.iter().zip(found).filter(|(_, hit)| *hit) {
            skills.insert(skill.clone());
        }
    }
}

/// The three heuristics in their fixed application order
pub fn default_strategies() -> Vec<Box<dyn SkillStrategy>> {
    vec![
        Box::new(PhraseTriggerStrategy::new()),
        Box::new(SyntacticStrategy),
        Box::new(DictionaryStrategy::new()),
    ]
}

pub fn extract_skills(strategies: &[Box<dyn SkillStrategy>], analyzed: &AnalyzedText) -> SkillSet {
    let mut skills = SkillSet::new();
    for strategy in strategies {
        let before = skills.len();
        strategy.extract(analyzed, &mut skills);
        debug!("Skill strategy {} added {} skills", strategy.name(), skills.len() - before);
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguageAnalyzer, LexiconModel, RuleBasedAnalyzer};

    fn analyze(text: &str) -> AnalyzedText {
        RuleBasedAnalyzer::new(LexiconModel::default())
            .unwrap()
            .analyze(text)
    }

    fn run(strategy: &dyn SkillStrategy, text: &str) -> Vec<String> {
        let mut skills = SkillSet::new();
        strategy.extract(&analyze(text), &mut skills);
        skills.as_slice().to_vec()
    }

    #[test]
    fn test_phrase_trigger_splits_list() {
        let skills = run(
            &PhraseTriggerStrategy::new(),
            "Proficient in Rust, Go and Python",
        );
        assert_eq!(skills, vec!["Rust", "Go", "Python"]);
    }

    #[test]
    fn test_phrase_trigger_stops_at_punctuation() {
        let skills = run(
            &PhraseTriggerStrategy::new(),
            "I have knowledge of networking. Also other things.",
        );
        assert_eq!(skills, vec!["networking"]);
    }

    #[test]
    fn test_syntactic_adds_modified_noun() {
        let skills = run(&SyntacticStrategy, "Built web development for clients.");
        assert!(skills.contains(&"development".to_string()));
    }

    #[test]
    fn test_dictionary_respects_word_boundaries() {
        let skills = run(
            &DictionaryStrategy::new(),
            "Wrote javascript and c++ services; deployed with docker. Gitlab is not git.",
        );
        assert_eq!(skills, vec!["JavaScript", "C++", "Docker", "Git"]);
    }

    #[test]
    fn test_dictionary_matches_symbols() {
        let skills = run(&DictionaryStrategy::new(), "C# and Node.js backends");
        assert_eq!(skills, vec!["C#", "Node.js"]);
    }

    #[test]
    fn test_union_dedups_across_strategies() {
        let analyzed = analyze("Experience with python and SQL");
        let skills = extract_skills(&default_strategies(), &analyzed);

        assert_eq!(skills.as_slice(), &["python".to_string(), "SQL".to_string()]);
    }
}
