//! Email and phone number extraction

use regex::Regex;

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("Invalid email regex");
        let phone_regex =
            Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\(?\d{3}\)?[-.\s]?)?(\d{3}[-.\s]?\d{4})")
                .expect("Invalid phone regex");

        Self {
            email_regex,
            phone_regex,
        }
    }

    /// First email address in the text
    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// First phone number in the text, digits and separators kept verbatim
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        let caps = self.phone_regex.captures(text)?;
        let phone: String = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .collect();
        Some(phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email() {
        let extractor = ContactExtractor::new();
        assert_eq!(
            extractor.extract_email("Reach me: jane.doe+jobs@mail.example.org today"),
            Some("jane.doe+jobs@mail.example.org".to_string())
        );
        assert_eq!(extractor.extract_email("no address here"), None);
    }

    #[test]
    fn test_first_email_wins() {
        let extractor = ContactExtractor::new();
        assert_eq!(
            extractor.extract_email("a@b.io and c@d.io"),
            Some("a@b.io".to_string())
        );
    }

    #[test]
    fn test_extract_phone_keeps_separators() {
        let extractor = ContactExtractor::new();
        assert_eq!(
            extractor.extract_phone("Phone: +1 (555) 123-4567"),
            Some("+1 (555) 123-4567".to_string())
        );
        assert_eq!(
            extractor.extract_phone("call 555.123.4567"),
            Some("555.123.4567".to_string())
        );
    }

    #[test]
    fn test_seven_digit_core_only() {
        let extractor = ContactExtractor::new();
        assert_eq!(extractor.extract_phone("ext 123-4567"), Some("123-4567".to_string()));
        assert_eq!(extractor.extract_phone("no digits"), None);
    }
}
