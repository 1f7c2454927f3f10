//! Turns raw resume or job text into an [`ExtractedProfile`]

use crate::nlp::LanguageAnalyzer;
use crate::processing::contact::ContactExtractor;
use crate::processing::profile::ExtractedProfile;
use crate::processing::sections::{EducationExtractor, EntryExtractor, ExperienceExtractor};
use crate::processing::skills::{default_strategies, extract_skills, SkillStrategy};
use log::debug;
use std::sync::Arc;

pub struct ProfileExtractor {
    analyzer: Arc<dyn LanguageAnalyzer>,
    contact: ContactExtractor,
    skill_strategies: Vec<Box<dyn SkillStrategy>>,
    education: EducationExtractor,
    experience: ExperienceExtractor,
}

impl ProfileExtractor {
    pub fn new(analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        debug!("Profile extractor using analyzer {}", analyzer.model_name());
        Self {
            analyzer,
            contact: ContactExtractor::new(),
            skill_strategies: default_strategies(),
            education: EducationExtractor::new(),
            experience: ExperienceExtractor::new(),
        }
    }

    pub fn with_skill_strategies(mut self, strategies: Vec<Box<dyn SkillStrategy>>) -> Self {
        self.skill_strategies = strategies;
        self
    }

    /// Extract contact details, skills, education and experience from resume text
    pub fn extract_profile(&self, text: &str) -> ExtractedProfile {
        let mut profile = self.extract_common(text);
        profile.email = self.contact.extract_email(text);
        profile.phone = self.contact.extract_phone(text);
        profile
    }

    /// Same as [`Self::extract_profile`] but contact fields stay empty
    pub fn extract_job_profile(&self, text: &str) -> ExtractedProfile {
        self.extract_common(text)
    }

    fn extract_common(&self, text: &str) -> ExtractedProfile {
        let analyzed = self.analyzer.analyze(text);
        let profile = ExtractedProfile {
            full_text: text.to_string(),
            email: None,
            phone: None,
            skills: extract_skills(&self.skill_strategies, &analyzed),
            education: self.education.extract(&analyzed),
            experience: self.experience.extract(&analyzed),
        };

        debug!(
            "Extracted {} skills, {} education and {} experience entries from {} sentences",
            profile.skills.len(),
            profile.education.len(),
            profile.experience.len(),
            analyzed.sentences.len()
        );
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LexiconModel, RuleBasedAnalyzer};
    use crate::processing::skills::DictionaryStrategy;

    fn extractor() -> ProfileExtractor {
        let analyzer = RuleBasedAnalyzer::new(LexiconModel::default()).unwrap();
        ProfileExtractor::new(Arc::new(analyzer))
    }

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | (555) 123-4567\n\
        Skilled in Rust, Python and Docker.\n\
        Bachelor of Science, University of Texas, 2014.\n\
        Worked as Senior Engineer at Stripe from 2016 to 2020.";

    #[test]
    fn test_extract_profile_fields() {
        let profile = extractor().extract_profile(RESUME);

        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("(555) 123-4567"));
        assert!(profile.skills.contains_ignore_case("rust"));
        assert!(profile.skills.contains_ignore_case("Python"));
        assert!(profile.skills.contains_ignore_case("docker"));
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].years, vec![2014]);
        assert_eq!(profile.experience.len(), 1);
        assert!(profile.experience[0].organizations.contains(&"Stripe".to_string()));
        assert_eq!(profile.full_text, RESUME);
    }

    #[test]
    fn test_job_profile_has_no_contact_fields() {
        let profile = extractor().extract_job_profile(RESUME);
        assert!(profile.email.is_none());
        assert!(profile.phone.is_none());
        assert!(!profile.skills.is_empty());
    }

    #[test]
    fn test_empty_text_yields_empty_profile() {
        let profile = extractor().extract_profile("");
        assert!(profile.email.is_none());
        assert!(profile.skills.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_custom_strategies_replace_defaults() {
        let extractor = extractor().with_skill_strategies(vec![Box::new(DictionaryStrategy::new())]);
        let profile = extractor.extract_job_profile("Skilled in juggling and Kubernetes");

        assert_eq!(profile.skills.as_slice(), &["Kubernetes".to_string()]);
    }
}
