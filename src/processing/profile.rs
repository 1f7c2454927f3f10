//! Structured profile data extracted from resumes and job descriptions

use serde::{Deserialize, Serialize};

/// Skills deduplicated case-insensitively, keeping first-seen casing and order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a skill unless an equal one (ignoring case) is already present.
    /// Returns whether the skill was added.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        let trimmed = skill.trim();
        if trimmed.is_empty() || self.contains_ignore_case(trimmed) {
            return false;
        }
        self.0.push(trimmed.to_string());
        true
    }

    pub fn contains_ignore_case(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.0.iter().any(|existing| existing.to_lowercase() == needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        let mut set = SkillSet::new();
        for skill in skills {
            set.insert(skill);
        }
        set
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub text: String,
    pub institutions: Vec<String>,
    pub years: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub text: String,
    pub organizations: Vec<String>,
    pub years: Vec<u16>,
    pub job_titles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub full_text: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: SkillSet,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
}

impl ExtractedProfile {
    /// Education sentences joined by a space
    pub fn education_text(&self) -> String {
        self.education
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Experience sentences joined by a space
    pub fn experience_text(&self) -> String {
        self.experience
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_set_dedups_ignoring_case() {
        let mut skills = SkillSet::new();
        assert!(skills.insert("Python"));
        assert!(!skills.insert("python"));
        assert!(!skills.insert("  PYTHON "));
        assert!(skills.insert("SQL"));
        assert!(!skills.insert(""));

        assert_eq!(skills.as_slice(), &["Python".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_skill_set_dedups_on_deserialize() {
        let skills: SkillSet = serde_json::from_str(r#"["Docker", "docker", "Git"]"#).unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(serde_json::to_string(&skills).unwrap(), r#"["Docker","Git"]"#);
    }

    #[test]
    fn test_section_text_joins_entries() {
        let profile = ExtractedProfile {
            education: vec![
                EducationEntry {
                    text: "BSc at MIT.".to_string(),
                    institutions: vec!["MIT".to_string()],
                    years: vec![2015],
                },
                EducationEntry {
                    text: "MSc in 2018.".to_string(),
                    institutions: Vec::new(),
                    years: vec![2018],
                },
            ],
            ..Default::default()
        };

        assert_eq!(profile.education_text(), "BSc at MIT. MSc in 2018.");
        assert_eq!(profile.experience_text(), "");
    }
}
