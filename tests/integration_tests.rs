//! Integration tests for the resume ranker

use resume_ranker::error::RankerError;
use resume_ranker::input::manager::InputManager;
use resume_ranker::nlp::{LexiconModel, RuleBasedAnalyzer};
use resume_ranker::processing::tfidf::TfidfVectorizer;
use resume_ranker::processing::{MatchingEngine, ProfileExtractor};
use resume_ranker::storage::{InMemoryStore, JsonFileStore, RecordKind, RecordStore};
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();
    std::fs::write(path, bytes).unwrap();
}

fn extractor() -> ProfileExtractor {
    let analyzer = RuleBasedAnalyzer::new(LexiconModel::default()).unwrap();
    ProfileExtractor::new(Arc::new(analyzer))
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.DOCX");
    write_docx(&path, &["John Doe", "Software Engineer skilled in React and Node.js"]);

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert_eq!(text, "John Doe\nSoftware Engineer skilled in React and Node.js");
}

#[tokio::test]
async fn test_caching_functionality() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    write_docx(&path, &["Jane Roe"]);

    let mut manager = InputManager::new();
    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "plain text resume").unwrap();

    let mut manager = InputManager::new();
    match manager.extract_text(&path).await {
        Err(RankerError::UnsupportedFormat(message)) => assert!(message.contains(".txt")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("does/not/exist.pdf")).await;
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_missing_lexicon_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = RuleBasedAnalyzer::from_path(&dir.path().join("lexicon.json"));
    assert!(matches!(result, Err(RankerError::BackendUnavailable(_))));
}

#[tokio::test]
async fn test_rank_and_explain_end_to_end() {
    let vectorizer = Arc::new(TfidfVectorizer::in_memory(5000));
    let store = Arc::new(InMemoryStore::new());
    let engine = MatchingEngine::new(extractor(), vectorizer.clone(), store.clone());

    let backend = engine
        .ingest_resume(
            "u1",
            Some("ada.docx".to_string()),
            Some("Ada".to_string()),
            "Backend engineer. Experience with Python, SQL and Docker.\n\
             Worked as Senior Engineer at Stripe from 2016 to 2021.\n\
             Bachelor of Science, University of Texas, 2015.",
        )
        .unwrap();
    let designer = engine
        .ingest_resume(
            "u2",
            Some("bo.docx".to_string()),
            None,
            "Graphic designer focused on branding and illustration.",
        )
        .unwrap();
    let job = engine
        .ingest_job(
            "hr",
            "Backend Engineer",
            Some("Acme".to_string()),
            "We need a backend engineer with Python, SQL and Docker.\n\
             Requires 5+ years of experience as a Software Engineer.\n\
             Bachelor degree in computer science.",
        )
        .unwrap();

    // Nothing is vectorized until the model is fitted
    assert!(engine.rank_candidates_for_job(&job.id).unwrap().is_empty());

    let corpus: Vec<String> = engine
        .corpus()
        .unwrap()
        .iter()
        .map(|record| vectorizer.document_text(&record.profile))
        .collect();
    vectorizer.refit(&corpus).unwrap();
    engine.revectorize_all(|_| {}).unwrap();

    // A resume added without a vector stays out of the ranking
    let mut unvectorized = store.get(RecordKind::Resume, &designer.id).unwrap().unwrap();
    unvectorized.id = "no-vector".to_string();
    unvectorized.vector = None;
    store.put(unvectorized).unwrap();

    let ranked = engine.rank_candidates_for_job(&job.id).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].candidate_id, backend.id);
    assert_eq!(ranked[0].candidate_name, "Ada");
    assert_eq!(ranked[1].candidate_name, "Unknown");
    assert!(ranked[0].similarity_score > ranked[1].similarity_score);
    assert!(ranked.iter().all(|r| r.candidate_id != "no-vector"));
    assert_eq!(ranked[0].missing_skills, Vec::<String>::new());
    assert!((ranked[0].skills_match_percentage - 100.0).abs() < 1e-4);

    let explained = engine.explain_match(&backend.id, &job.id).unwrap();
    assert!((explained.similarity_score - ranked[0].similarity_score).abs() < 1e-6);
    assert!(explained.education_match.matched);
    assert!(!explained.experience_match.matched);
    assert!((explained.experience_match.score - 0.2).abs() < 1e-6);
}

#[tokio::test]
async fn test_vectors_from_old_generation_are_rejected() {
    let vectorizer = Arc::new(TfidfVectorizer::in_memory(5000));
    let engine = MatchingEngine::new(extractor(), vectorizer.clone(), Arc::new(InMemoryStore::new()));

    vectorizer.refit(&["python developer".to_string()]).unwrap();
    let candidate = engine.ingest_resume("u1", None, None, "Python developer").unwrap();
    vectorizer.refit(&["python developer".to_string()]).unwrap();
    let job = engine.ingest_job("hr", "Developer", None, "Python developer").unwrap();

    assert!(matches!(
        engine.explain_match(&candidate.id, &job.id),
        Err(RankerError::IncompatibleVectors(_))
    ));
    assert!(engine.rank_candidates_for_job(&job.id).unwrap().is_empty());
}

#[tokio::test]
async fn test_json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("models").join("tfidf.json");
    let vectorizer = Arc::new(TfidfVectorizer::open(&model_path, 5000, true).unwrap());
    let store = Arc::new(JsonFileStore::open(&dir.path().join("data")).unwrap());
    let engine = MatchingEngine::new(extractor(), vectorizer, store);

    let record = engine
        .ingest_resume("u1", None, None, "Rust developer with Kubernetes")
        .unwrap();
    assert!(record.vector.is_some());
    assert!(model_path.exists());

    let reopened = JsonFileStore::open(&dir.path().join("data")).unwrap();
    let loaded = reopened.get(RecordKind::Resume, &record.id).unwrap().unwrap();
    assert!(loaded.profile.skills.contains_ignore_case("kubernetes"));
    let (loaded_vector, stored_vector) = (loaded.vector.unwrap(), record.vector.unwrap());
    assert!(loaded_vector.is_compatible_with(&stored_vector));
    for (a, b) in loaded_vector.values.iter().zip(&stored_vector.values) {
        assert!((a - b).abs() < 1e-6);
    }
}
