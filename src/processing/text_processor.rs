//! Text normalization and term analysis

use regex::Regex;
use std::collections::HashSet;

/// English stop words removed before term weighting
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "done", "down",
    "due", "during", "each", "eg", "either", "else", "elsewhere", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last",
    "latter", "least", "less", "many", "may", "me", "meanwhile", "might", "more", "moreover",
    "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "nor", "not", "nothing", "now", "nowhere",
    "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please",
    "rather", "same", "seem", "seemed", "seeming", "seems", "several", "she", "should", "since",
    "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "than", "that", "the", "their", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
    "this", "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too",
    "toward", "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while",
    "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
    term_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");

        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            whitespace_regex,
            term_regex,
        }
    }

    /// Collapse runs of whitespace into single spaces and trim the ends
    pub fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text, " ").trim().to_string()
    }

    /// Lower-case and whitespace-normalize text ahead of vectorization
    pub fn preprocess(&self, text: &str) -> String {
        self.normalize_whitespace(&text.to_lowercase())
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lower-cased word runs of two or more characters with stop words removed
    pub fn content_words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.term_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| !self.is_stop_word(word))
            .map(str::to_string)
            .collect()
    }

    /// Unigrams followed by bigrams of the content words
    pub fn tokenize_terms(&self, text: &str) -> Vec<String> {
        let words = self.content_words(text);
        let mut terms = words.clone();
        terms.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_lowercases_and_collapses() {
        let processor = TextProcessor::new();
        assert_eq!(
            processor.preprocess("  Senior\tRust\n\nEngineer  "),
            "senior rust engineer"
        );
    }

    #[test]
    fn test_content_words_drop_stop_words_and_single_chars() {
        let processor = TextProcessor::new();
        let words = processor.content_words("I am a Rust developer with 5 years of experience");

        assert_eq!(words, vec!["rust", "developer", "years", "experience"]);
    }

    #[test]
    fn test_tokenize_terms_adds_bigrams() {
        let processor = TextProcessor::new();
        let terms = processor.tokenize_terms("Machine learning and data pipelines");

        assert_eq!(
            terms,
            vec![
                "machine",
                "learning",
                "data",
                "pipelines",
                "machine learning",
                "learning data",
                "data pipelines",
            ]
        );
    }

    #[test]
    fn test_empty_text_has_no_terms() {
        let processor = TextProcessor::new();
        assert!(processor.tokenize_terms("the of and").is_empty());
        assert!(processor.tokenize_terms("").is_empty());
    }
}
