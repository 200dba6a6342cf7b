use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use resumeboost::ats::analyzer::Analyzer;
use resumeboost::ats::wordlists::WordLists;
use resumeboost::config::Config;
use resumeboost::ingest::resume_text_from_upload;
use resumeboost::llm_client::{GeminiClient, TextProvider};
use resumeboost::pipeline::analyze_and_generate;

#[derive(Parser, Debug)]
#[command(
    name = "resumeboost-cli",
    version,
    about = "Score a resume against a job description and tailor it"
)]
struct Cli {
    #[arg(long, help = "Path to job description text file")]
    jd: PathBuf,
    #[arg(long, help = "Path to resume file (.pdf or UTF-8 text)")]
    resume: PathBuf,
    #[arg(long, num_args = 0.., help = "Resume bullets to rewrite, one argument each")]
    bullets: Vec<String>,
    #[arg(long, help = "Write JSON here instead of stdout")]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Deterministic scoring only, no provider calls")]
    offline: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let wordlists = Arc::new(WordLists::load(config.wordlists_path.as_deref())?);

    let jd_text = fs::read_to_string(&cli.jd)
        .with_context(|| format!("failed to read job description {}", cli.jd.display()))?;
    let resume_text = load_resume(&cli.resume)?;
    let bullets: Vec<String> = cli.bullets.iter().map(|b| b.trim().to_string()).collect();

    let json = if cli.offline {
        let result = Analyzer::deterministic(wordlists)
            .analyze(&resume_text, &jd_text)
            .await;
        serde_json::to_string_pretty(&result)?
    } else {
        let api_key = config
            .gemini_api_key
            .clone()
            .context("GEMINI_API_KEY is not set (use --offline for deterministic scoring)")?;
        let provider: Arc<dyn TextProvider> = Arc::new(GeminiClient::new(
            api_key,
            config.gemini_model.clone(),
            Duration::from_secs(config.provider_timeout_secs),
        )?);
        let analyzer = Analyzer::new(wordlists, Some(provider.clone()));
        let response =
            analyze_and_generate(&analyzer, provider.as_ref(), &resume_text, &jd_text, &bullets)
                .await?;
        serde_json::to_string_pretty(&response)?
    };

    match &cli.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn load_resume(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read resume {}", path.display()))?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    Ok(resume_text_from_upload(filename, &bytes, usize::MAX)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bullets_and_flags() {
        let cli = Cli::try_parse_from([
            "resumeboost-cli",
            "--jd",
            "jd.txt",
            "--resume",
            "resume.pdf",
            "--bullets",
            "Built APIs",
            "Led migrations",
            "--offline",
        ])
        .unwrap();
        assert_eq!(cli.bullets, vec!["Built APIs", "Led migrations"]);
        assert!(cli.offline);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_jd_and_resume_are_required() {
        assert!(Cli::try_parse_from(["resumeboost-cli", "--jd", "jd.txt"]).is_err());
    }

    #[tokio::test]
    async fn test_offline_run_writes_analysis_json() {
        let dir = tempfile::tempdir().unwrap();
        let jd = dir.path().join("jd.txt");
        let resume = dir.path().join("resume.txt");
        let output = dir.path().join("out.json");
        fs::write(&jd, "Rust, Kafka and Terraform").unwrap();
        fs::write(&resume, "Rust and Kafka engineer").unwrap();

        let cli = Cli {
            jd,
            resume,
            bullets: vec![],
            output: Some(output.clone()),
            offline: true,
        };
        run(cli).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["missing_skills"], serde_json::json!(["terraform"]));
        assert!(json.get("cover_letter").is_none());
    }

    #[test]
    fn test_missing_resume_file_is_an_error() {
        let err = load_resume(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read resume"));
    }
}
