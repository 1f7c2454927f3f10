//! Rule-based language analyzer driven by a [`LexiconModel`]

use crate::error::{Result, RankerError};
use crate::nlp::lexicon::LexiconModel;
use crate::nlp::{AnalyzedText, Entity, EntityLabel, LanguageAnalyzer, PartOfSpeech, Sentence, Token};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

pub struct RuleBasedAnalyzer {
    identifier: String,
    determiners: HashSet<String>,
    prepositions: HashSet<String>,
    conjunctions: HashSet<String>,
    pronouns: HashSet<String>,
    verbs: HashSet<String>,
    adjectives: HashSet<String>,
    connectors: HashSet<String>,
    organization_suffixes: HashSet<String>,
    gazetteer: AhoCorasick,
    gazetteer_labels: Vec<EntityLabel>,
}

fn lowercase_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|word| word.to_lowercase()).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `text[start..end]` is not glued to neighbouring word characters
pub(crate) fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before && after
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_uppercase())
}

impl RuleBasedAnalyzer {
    pub fn new(lexicon: LexiconModel) -> Result<Self> {
        lexicon.validate()?;

        let mut patterns = Vec::new();
        let mut gazetteer_labels = Vec::new();
        for name in &lexicon.organizations {
            patterns.push(name.clone());
            gazetteer_labels.push(EntityLabel::Org);
        }
        for name in &lexicon.places {
            patterns.push(name.clone());
            gazetteer_labels.push(EntityLabel::Gpe);
        }

        let gazetteer = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| RankerError::BackendUnavailable(format!("Failed to build gazetteer: {}", e)))?;

        Ok(Self {
            identifier: lexicon.identifier(),
            determiners: lowercase_set(&lexicon.determiners),
            prepositions: lowercase_set(&lexicon.prepositions),
            conjunctions: lowercase_set(&lexicon.conjunctions),
            pronouns: lowercase_set(&lexicon.pronouns),
            verbs: lowercase_set(&lexicon.verbs),
            adjectives: lowercase_set(&lexicon.adjectives),
            connectors: lowercase_set(&lexicon.title_connectors),
            organization_suffixes: lowercase_set(&lexicon.organization_suffixes),
            gazetteer,
            gazetteer_labels,
        })
    }

    /// Load the lexicon at `path` and build an analyzer from it
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(LexiconModel::load(path)?)
    }

    /// Resumes are line oriented, so every line break ends a sentence
    fn split_sentences(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .flat_map(|line| {
                line.unicode_sentences()
                    .map(str::trim)
                    .filter(|sentence| !sentence.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn analyze_sentence(&self, text: String) -> Sentence {
        let words: Vec<(usize, &str)> = text
            .split_word_bound_indices()
            .filter(|(_, word)| !word.trim().is_empty())
            .collect();

        let mut tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(index, &(start, word))| Token {
                text: word.to_string(),
                pos: self.tag(index, &words),
                head: index,
                start,
                end: start + word.len(),
            })
            .collect();

        Self::assign_heads(&mut tokens);
        let entities = self.recognize_entities(&text, &tokens);

        Sentence {
            text,
            tokens,
            entities,
        }
    }

    fn tag(&self, index: usize, words: &[(usize, &str)]) -> PartOfSpeech {
        let word = words[index].1;
        let lower = word.to_lowercase();

        if word.chars().all(|c| !c.is_alphanumeric()) {
            return PartOfSpeech::Punctuation;
        }
        if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return PartOfSpeech::Number;
        }
        if self.determiners.contains(&lower) {
            return PartOfSpeech::Determiner;
        }
        if self.prepositions.contains(&lower) {
            return PartOfSpeech::Preposition;
        }
        if self.conjunctions.contains(&lower) {
            return PartOfSpeech::Conjunction;
        }
        if self.pronouns.contains(&lower) {
            return PartOfSpeech::Pronoun;
        }

        let acronym = word.chars().count() > 1 && word.chars().all(|c| !c.is_lowercase());
        if is_capitalized(word) {
            let next_capitalized = words
                .get(index + 1)
                .map_or(false, |(_, next)| is_capitalized(next));
            let sentence_initial = index == 0;
            if acronym || !sentence_initial || (next_capitalized && !self.verbs.contains(&lower)) {
                return PartOfSpeech::ProperNoun;
            }
        }

        if self.verbs.contains(&lower) {
            return PartOfSpeech::Verb;
        }
        if self.adjectives.contains(&lower) {
            return PartOfSpeech::Adjective;
        }
        if lower.len() > 4 && lower.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if lower.len() > 4 && lower.ends_with("ed") {
            return PartOfSpeech::Verb;
        }
        PartOfSpeech::Noun
    }

    /// Nominal runs (adjectives, nouns, numbers) attach to their rightmost noun;
    /// run heads attach to the closest verb on their left, else the first verb;
    /// function words attach to the next run head.
    fn assign_heads(tokens: &mut [Token]) {
        let n = tokens.len();
        let in_run = |pos: PartOfSpeech| {
            matches!(
                pos,
                PartOfSpeech::Adjective | PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Number
            )
        };
        let is_noun = |pos: PartOfSpeech| matches!(pos, PartOfSpeech::Noun | PartOfSpeech::ProperNoun);

        let mut run_heads: Vec<Option<usize>> = vec![None; n];
        let mut i = 0;
        while i < n {
            if !in_run(tokens[i].pos) {
                i += 1;
                continue;
            }
            let start = i;
            while i < n && in_run(tokens[i].pos) {
                i += 1;
            }
            let head = (start..i).rev().find(|&j| is_noun(tokens[j].pos)).unwrap_or(i - 1);
            for slot in run_heads.iter_mut().take(i).skip(start) {
                *slot = Some(head);
            }
        }

        let root_verb = tokens.iter().position(|token| token.pos == PartOfSpeech::Verb);
        let heads: Vec<usize> = (0..n)
            .map(|j| match run_heads[j] {
                Some(head) if head != j => head,
                Some(_) => (0..j)
                    .rev()
                    .find(|&k| tokens[k].pos == PartOfSpeech::Verb)
                    .or(root_verb)
                    .unwrap_or(j),
                None if tokens[j].pos == PartOfSpeech::Verb => root_verb.unwrap_or(j),
                None => (j + 1..n)
                    .find_map(|k| run_heads[k])
                    .or(root_verb)
                    .unwrap_or(j),
            })
            .collect();

        for (token, head) in tokens.iter_mut().zip(heads) {
            token.head = head;
        }
    }

    fn recognize_entities(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = self.organization_names(text, tokens);

        for mat in self.gazetteer.find_iter(text) {
            let (start, end) = (mat.start(), mat.end());
            if !on_word_boundary(text, start, end) {
                continue;
            }
            let overlaps = entities.iter().any(|e| start < e.end && e.start < end);
            if overlaps {
                continue;
            }
            entities.push(Entity {
                text: text[start..end].to_string(),
                label: self.gazetteer_labels[mat.pattern().as_usize()],
                start,
                end,
            });
        }

        entities.sort_by_key(|entity| entity.start);
        entities
    }

    /// Capitalized word sequences that contain an organization suffix,
    /// e.g. "Stanford University", "University of Texas", "Acme Corp"
    fn organization_names(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let n = tokens.len();
        let mut i = 0;

        while i < n {
            if !is_capitalized(&tokens[i].text) {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i + 1;
            let mut j = i + 1;
            while j < n {
                if is_capitalized(&tokens[j].text) {
                    j += 1;
                    end = j;
                } else if self.connectors.contains(&tokens[j].text.to_lowercase())
                    && tokens.get(j + 1).map_or(false, |next| is_capitalized(&next.text))
                {
                    j += 1;
                } else {
                    break;
                }
            }

            let has_suffix = tokens[start..end]
                .iter()
                .any(|token| self.organization_suffixes.contains(&token.text.to_lowercase()));
            if has_suffix {
                let (span_start, span_end) = (tokens[start].start, tokens[end - 1].end);
                entities.push(Entity {
                    text: text[span_start..span_end].to_string(),
                    label: EntityLabel::Org,
                    start: span_start,
                    end: span_end,
                });
            }

            i = end;
        }

        entities
    }
}

impl LanguageAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> AnalyzedText {
        let sentences = Self::split_sentences(text)
            .into_iter()
            .map(|sentence| self.analyze_sentence(sentence))
            .collect();

        AnalyzedText {
            text: text.to_string(),
            sentences,
        }
    }

    fn model_name(&self) -> &str {
        &self.identifier
    }
}
