//! Demo runner for the analysis engine: reads a JD text file and a CMS
//! content JSON file, runs the keyword pipeline, and prints the results as
//! JSON. With a resume JSON and rendered HTML file it also runs the check
//! battery.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use engine::config::Config;
use engine::models::cms::CmsDataForAnalysis;
use engine::models::resume::ResumeData;
use engine::{
    build_corpus, extract_keywords, generate_suggestions, run_checks, score_coverage,
};

#[derive(Parser, Debug)]
#[command(name = "engine", about = "Resume analysis engine runner")]
struct Args {
    /// Path to a job description text file
    #[arg(long)]
    jd: std::path::PathBuf,

    /// Path to CMS content JSON (experiences, projects, skill groups)
    #[arg(long)]
    cms: std::path::PathBuf,

    /// Optional path to an assembled resume JSON; enables the check battery
    #[arg(long)]
    resume: Option<std::path::PathBuf>,

    /// Optional path to the rendered resume HTML (used with --resume)
    #[arg(long)]
    html: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let jd_text = std::fs::read_to_string(&args.jd)
        .with_context(|| format!("reading JD from {}", args.jd.display()))?;
    let cms_json = std::fs::read_to_string(&args.cms)
        .with_context(|| format!("reading CMS content from {}", args.cms.display()))?;
    let cms: CmsDataForAnalysis =
        serde_json::from_str(&cms_json).context("parsing CMS content JSON")?;

    let extracted = extract_keywords(&jd_text, &config.anthropic_api_key).await?;
    info!("extracted {} keywords", extracted.keywords.len());

    let corpus = build_corpus(&cms);
    let coverage = score_coverage(&extracted.keywords, &corpus);
    let suggestions = generate_suggestions(&coverage, &cms);

    let mut output = serde_json::json!({
        "keywords": extracted,
        "coverage": coverage,
        "suggestions": suggestions,
    });

    if let Some(resume_path) = &args.resume {
        let resume_json = std::fs::read_to_string(resume_path)
            .with_context(|| format!("reading resume from {}", resume_path.display()))?;
        let resume: ResumeData =
            serde_json::from_str(&resume_json).context("parsing resume JSON")?;
        let html = match &args.html {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading HTML from {}", path.display()))?,
            None => String::new(),
        };
        let checks = run_checks(&resume, &html, Some(&coverage));
        info!("check score: {}", checks.score);
        output["checks"] = serde_json::to_value(&checks)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
