//! Language analysis backend
//! Sentence segmentation, part-of-speech tagging with syntactic heads, and named entities

pub mod analyzer;
pub mod lexicon;

pub use analyzer::RuleBasedAnalyzer;
pub use lexicon::LexiconModel;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    Number,
    Punctuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// Companies, universities, agencies
    Org,
    /// Countries, states, cities
    Gpe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    /// Index of the syntactic head within the owning sentence; roots point at themselves
    pub head: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Sentence {
    pub fn head_of(&self, token: &Token) -> Option<&Token> {
        self.tokens.get(token.head)
    }

    /// Entity texts carrying any of the given labels, in sentence order
    pub fn entity_texts(&self, labels: &[EntityLabel]) -> Vec<String> {
        self.entities
            .iter()
            .filter(|entity| labels.contains(&entity.label))
            .map(|entity| entity.text.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedText {
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl AnalyzedText {
    pub fn tokens(&self) -> impl Iterator<Item = (&Sentence, &Token)> {
        self.sentences
            .iter()
            .flat_map(|sentence| sentence.tokens.iter().map(move |token| (sentence, token)))
    }
}

/// A language analysis backend, constructed once at startup and shared
pub trait LanguageAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> AnalyzedText;

    /// Name and version of the loaded model assets
    fn model_name(&self) -> &str;
}
