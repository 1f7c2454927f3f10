//! Lexicon model assets for the rule-based analyzer

use crate::error::{Result, RankerError};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some", "all",
    "no", "another", "both", "either", "neither",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "from", "with", "within", "without", "of", "to", "into",
    "onto", "over", "under", "about", "across", "after", "before", "between", "during",
    "through", "throughout", "toward", "towards", "via", "per", "among", "since", "until",
    "upon", "as", "like",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "while", "whereas", "because", "if"];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who", "whom",
    "whose", "which", "what",
];

const VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "led",
    "lead", "leads", "built", "build", "builds", "wrote", "write", "writes", "ran", "run",
    "runs", "made", "make", "makes", "drove", "drive", "drives", "grew", "grow", "taught",
    "teach", "won", "win", "work", "works", "manage", "manages", "develop", "develops",
    "design", "designs", "implement", "implements", "maintain", "maintains", "create",
    "creates", "deliver", "delivers", "own", "owns", "join", "joined", "require", "requires",
    "seek", "seeking", "looking", "developing", "building", "leading", "managing", "working",
    "designing", "implementing", "maintaining", "creating", "delivering", "collaborate",
    "collaborating", "mentor", "mentoring", "graduated", "studied", "earned", "received",
];

const ADJECTIVES: &[&str] = &[
    "technical", "senior", "junior", "lead", "principal", "strong", "excellent", "good",
    "great", "solid", "deep", "broad", "proficient", "familiar", "skilled", "experienced",
    "relevant", "related", "equivalent", "preferred", "required", "new", "large", "small",
    "scalable", "reliable", "distributed", "agile", "remote", "full", "part", "current",
    "previous", "responsible", "effective", "efficient", "advanced", "basic", "modern",
    "professional", "academic", "annual", "successful", "various", "multiple", "several",
    "high", "low", "key", "main", "cross-functional",
];

const TITLE_CONNECTORS: &[&str] = &["of", "for", "the", "&", "de"];

const ORGANIZATION_SUFFIXES: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic", "inc", "corp",
    "corporation", "llc", "ltd", "gmbh", "plc", "company", "technologies", "labs",
    "laboratories", "group", "bank", "foundation", "hospital", "agency", "ministry",
    "partners", "holdings", "association", "society",
];

const ORGANIZATIONS: &[&str] = &[
    "Google", "Microsoft", "Amazon", "Apple", "Meta", "Facebook", "Netflix", "IBM", "Oracle",
    "Intel", "Nvidia", "NVIDIA", "Salesforce", "Adobe", "Twitter", "LinkedIn", "Uber",
    "Airbnb", "Spotify", "Stripe", "Shopify", "Accenture", "Deloitte", "McKinsey",
    "Goldman Sachs", "JPMorgan", "Morgan Stanley", "Tesla", "SpaceX", "Samsung", "Siemens",
    "SAP", "Cisco", "Dell", "Infosys", "Wipro", "MIT", "Harvard", "Stanford", "NASA",
];

const PLACES: &[&str] = &[
    "United States", "USA", "Canada", "Mexico", "Brazil", "Argentina", "United Kingdom", "UK",
    "England", "Scotland", "Ireland", "France", "Germany", "Spain", "Portugal", "Italy",
    "Netherlands", "Belgium", "Sweden", "Norway", "Denmark", "Finland", "Poland",
    "Switzerland", "Austria", "India", "China", "Japan", "Korea", "Singapore", "Australia",
    "New Zealand", "Israel", "Nigeria", "Kenya", "South Africa", "Egypt", "California",
    "New York", "Texas", "Washington", "Massachusetts", "Illinois", "Florida", "Georgia",
    "Colorado", "Oregon", "Virginia", "Pennsylvania", "Michigan", "Ohio", "North Carolina",
    "New Jersey", "Arizona", "Minnesota", "Utah", "San Francisco", "Seattle", "Boston",
    "Chicago", "Austin", "Los Angeles", "San Diego", "San Jose", "Palo Alto", "Mountain View",
    "Berkeley", "Cambridge", "Oxford", "London", "Manchester", "Paris", "Berlin", "Munich",
    "Amsterdam", "Dublin", "Madrid", "Barcelona", "Stockholm", "Zurich", "Toronto",
    "Vancouver", "Montreal", "Bangalore", "Bengaluru", "Mumbai", "Delhi", "Hyderabad",
    "Pune", "Chennai", "Tokyo", "Beijing", "Shanghai", "Sydney", "Melbourne", "Lagos",
    "Nairobi", "Tel Aviv",
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

/// Word lists and gazetteers consumed by [`super::RuleBasedAnalyzer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconModel {
    pub name: String,
    pub version: String,
    pub determiners: Vec<String>,
    pub prepositions: Vec<String>,
    pub conjunctions: Vec<String>,
    pub pronouns: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
    /// Lowercase words allowed inside a capitalized name, e.g. "University of Texas"
    pub title_connectors: Vec<String>,
    pub organization_suffixes: Vec<String>,
    pub organizations: Vec<String>,
    pub places: Vec<String>,
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self {
            name: "lexicon-en".to_string(),
            version: "1.0.0".to_string(),
            determiners: owned(DETERMINERS),
            prepositions: owned(PREPOSITIONS),
            conjunctions: owned(CONJUNCTIONS),
            pronouns: owned(PRONOUNS),
            verbs: owned(VERBS),
            adjectives: owned(ADJECTIVES),
            title_connectors: owned(TITLE_CONNECTORS),
            organization_suffixes: owned(ORGANIZATION_SUFFIXES),
            organizations: owned(ORGANIZATIONS),
            places: owned(PLACES),
        }
    }
}

impl LexiconModel {
    /// Load model assets from disk. Missing or malformed assets are fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RankerError::BackendUnavailable(format!(
                "lexicon model not found at {} (run `resume-ranker lexicon install`)",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let model: LexiconModel = serde_json::from_str(&content).map_err(|e| {
            RankerError::BackendUnavailable(format!(
                "lexicon model at {} is malformed: {}",
                path.display(),
                e
            ))
        })?;
        model.validate()?;

        info!("Loaded lexicon model {} from {}", model.identifier(), path.display());
        Ok(model)
    }

    /// Write these assets to `path`, creating parent directories
    pub fn install(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.version.trim().is_empty() {
            return Err(RankerError::BackendUnavailable(
                "lexicon model is missing a name or version".to_string(),
            ));
        }
        if self.organization_suffixes.is_empty() || self.verbs.is_empty() {
            return Err(RankerError::BackendUnavailable(format!(
                "lexicon model {} has no organization suffixes or verbs",
                self.identifier()
            )));
        }
        Ok(())
    }

    pub fn identifier(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_backend_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = LexiconModel::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(RankerError::BackendUnavailable(_))));
    }

    #[test]
    fn test_install_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("lexicon.json");

        LexiconModel::default().install(&path).unwrap();
        let loaded = LexiconModel::load(&path).unwrap();

        assert_eq!(loaded, LexiconModel::default());
        assert_eq!(loaded.identifier(), "lexicon-en@1.0.0");
    }

    #[test]
    fn test_malformed_model_is_backend_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, "{\"name\": \"broken\"}").unwrap();

        let result = LexiconModel::load(&path);
        assert!(matches!(result, Err(RankerError::BackendUnavailable(_))));
    }

    #[test]
    fn test_empty_suffixes_rejected() {
        let model = LexiconModel {
            organization_suffixes: Vec::new(),
            ..LexiconModel::default()
        };
        assert!(model.validate().is_err());
    }
}
