//! Resume ranker: structured resume extraction and candidate ranking

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{Cli, Commands, ConfigAction, LexiconAction, ModelAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::error::{RankerError, Result};
use resume_ranker::input::manager::InputManager;
use resume_ranker::nlp::{LanguageAnalyzer, LexiconModel, RuleBasedAnalyzer};
use resume_ranker::output::formatter::formatter_for;
use resume_ranker::processing::embeddings::DenseVectorizer;
use resume_ranker::processing::tfidf::TfidfVectorizer;
use resume_ranker::processing::{MatchingEngine, ProfileExtractor, VectorMethod, Vectorizer};
use resume_ranker::storage::{JsonFileStore, RecordKind, RecordStore};
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let format = cli.output.unwrap_or(config.output.format);
    if let Err(e) = run_command(cli.command, config, format, cli.config.as_deref()).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

enum SelectedVectorizer {
    Tfidf(Arc<TfidfVectorizer>),
    Dense(Arc<DenseVectorizer>),
}

impl SelectedVectorizer {
    fn from_config(config: &Config) -> Result<Self> {
        match config.vectorizer.method {
            VectorMethod::SparseTfidf => Ok(Self::Tfidf(Arc::new(TfidfVectorizer::open(
                &config.vectorizer.tfidf_model_path,
                config.vectorizer.max_features,
                config.vectorizer.bootstrap_on_first_use,
            )?))),
            VectorMethod::DenseEmbedding => Ok(Self::Dense(Arc::new(DenseVectorizer::from_path(
                &config.models.embedding_model_path,
                config.models.dense_dimensions,
            )?))),
        }
    }

    fn as_dyn(&self) -> Arc<dyn Vectorizer> {
        match self {
            Self::Tfidf(v) => Arc::clone(v) as Arc<dyn Vectorizer>,
            Self::Dense(v) => Arc::clone(v) as Arc<dyn Vectorizer>,
        }
    }
}

/// The analyzer is loaded once; missing lexicon assets stop the process here
fn build_extractor(config: &Config) -> Result<ProfileExtractor> {
    let analyzer: Arc<dyn LanguageAnalyzer> =
        Arc::new(RuleBasedAnalyzer::from_path(&config.models.lexicon_path)?);
    Ok(ProfileExtractor::new(analyzer))
}

fn build_engine(config: &Config, vectorizer: &SelectedVectorizer) -> Result<MatchingEngine> {
    config.ensure_dirs()?;
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::open(&config.storage.data_dir)?);
    Ok(MatchingEngine::new(build_extractor(config)?, vectorizer.as_dyn(), store))
}

fn file_label(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().to_string())
}

async fn run_command(
    command: Commands,
    config: Config,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let formatter = formatter_for(format, &config.output);
    let mut input = InputManager::new();

    match command {
        Commands::Extract { file } => {
            let text = input.extract_text(&file).await?;
            println!("{}", text);
        }

        Commands::Parse { file, job } => {
            let text = input.extract_text(&file).await?;
            let extractor = build_extractor(&config)?;
            let profile = if job {
                extractor.extract_job_profile(&text)
            } else {
                extractor.extract_profile(&text)
            };
            println!("{}", formatter.format_profile(&profile)?);
        }

        Commands::AddResume { file, owner, name } => {
            let text = input.extract_text(&file).await?;
            let vectorizer = SelectedVectorizer::from_config(&config)?;
            let engine = build_engine(&config, &vectorizer)?;

            let record = engine.ingest_resume(&owner, file_label(&file), name, &text)?;
            if record.vector.is_none() {
                warn!("Resume stored without a vector; run `resume-ranker model fit` before ranking");
            }
            println!("{} {}", "Stored resume".green().bold(), record.id);
        }

        Commands::AddJob {
            file,
            text,
            owner,
            title,
            company,
        } => {
            let text = match (file, text) {
                (Some(file), _) => input.extract_text(&file).await?,
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(RankerError::InvalidInput(
                        "either --file or --text is required".to_string(),
                    ))
                }
            };
            let vectorizer = SelectedVectorizer::from_config(&config)?;
            let engine = build_engine(&config, &vectorizer)?;

            let record = engine.ingest_job(&owner, &title, company, &text)?;
            println!("{} {}", "Stored job".green().bold(), record.id);
        }

        Commands::Rank { job_id, limit } => {
            let vectorizer = SelectedVectorizer::from_config(&config)?;
            let engine = build_engine(&config, &vectorizer)?;

            let job = engine
                .store()
                .get(RecordKind::JobDescription, &job_id)?
                .ok_or_else(|| RankerError::NotFound(format!("job description {}", job_id)))?;
            let mut ranked = engine.rank_candidates_for_job(&job_id)?;
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }
            println!("{}", formatter.format_ranking(&job, &ranked)?);
        }

        Commands::Explain {
            candidate_id,
            job_id,
        } => {
            let vectorizer = SelectedVectorizer::from_config(&config)?;
            let engine = build_engine(&config, &vectorizer)?;
            let result = engine.explain_match(&candidate_id, &job_id)?;
            println!("{}", formatter.format_match(&result)?);
        }

        Commands::Model { action } => match action {
            ModelAction::Fit { corpus } => {
                let vectorizer = SelectedVectorizer::from_config(&config)?;
                let SelectedVectorizer::Tfidf(tfidf) = &vectorizer else {
                    return Err(RankerError::InvalidInput(
                        "the dense embedding model is pretrained; only sparse-tfidf can be fitted"
                            .to_string(),
                    ));
                };
                let engine = build_engine(&config, &vectorizer)?;

                let mut documents: Vec<String> = engine
                    .corpus()?
                    .iter()
                    .map(|record| tfidf.document_text(&record.profile))
                    .collect();
                for path in &corpus {
                    let text = input.extract_text(path).await?;
                    let profile = engine.extractor().extract_profile(&text);
                    documents.push(tfidf.document_text(&profile));
                }
                info!("Fitting TF-IDF on {} documents", documents.len());

                let model = tfidf.refit(&documents)?;
                println!(
                    "{} generation {} ({} features, {} documents)",
                    "Fitted TF-IDF".green().bold(),
                    model.generation(),
                    model.dimensions(),
                    model.document_count()
                );

                let total = engine.corpus()?.len() as u64;
                let progress = ProgressBar::new(total);
                progress.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")
                        .map_err(|e| RankerError::OutputFormatting(e.to_string()))?
                        .progress_chars("#>-"),
                );
                let count = engine.revectorize_all(|_| progress.inc(1))?;
                progress.finish_and_clear();
                println!("Re-vectorized {} stored records", count);
            }

            ModelAction::Info => {
                println!("Vectorizer: {}", config.vectorizer.method);
                match SelectedVectorizer::from_config(&config)? {
                    SelectedVectorizer::Tfidf(tfidf) => match tfidf.snapshot() {
                        Some(model) => {
                            println!("Model version: {}", model.version());
                            println!("Generation: {}", model.generation());
                            println!("Fitted at: {}", model.fitted_at().format("%Y-%m-%d %H:%M:%S UTC"));
                            println!("Features: {}", model.dimensions());
                            println!("Documents: {}", model.document_count());
                        }
                        None => println!("{}", "No TF-IDF model fitted yet".yellow()),
                    },
                    SelectedVectorizer::Dense(_) => {
                        println!("Embedding model: {}", config.models.embedding_model_path.display());
                        println!("Default dimensions: {}", config.models.dense_dimensions);
                    }
                }
                println!("Model path: {}", config.vectorizer.tfidf_model_path.display());
            }
        },

        Commands::Lexicon { action } => match action {
            LexiconAction::Install { force } => {
                let path = &config.models.lexicon_path;
                if path.exists() && !force {
                    return Err(RankerError::InvalidInput(format!(
                        "lexicon already installed at {} (use --force to overwrite)",
                        path.display()
                    )));
                }
                let lexicon = LexiconModel::default();
                lexicon.install(path)?;
                println!(
                    "{} {} at {}",
                    "Installed lexicon".green().bold(),
                    lexicon.identifier(),
                    path.display()
                );
            }

            LexiconAction::Info => {
                let lexicon = LexiconModel::load(&config.models.lexicon_path)?;
                println!("Lexicon: {}", lexicon.identifier());
                println!("Path: {}", config.models.lexicon_path.display());
                println!("Organizations: {}", lexicon.organizations.len());
                println!("Places: {}", lexicon.places.len());
                println!("Organization suffixes: {}", lexicon.organization_suffixes.len());
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| RankerError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                let defaults = Config::default();
                match config_path {
                    Some(path) => defaults.save_to(path)?,
                    None => defaults.save()?,
                }
                println!("{}", "Configuration reset to defaults".green());
            }
        },
    }

    Ok(())
}
