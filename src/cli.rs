// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::ClientConfig;
use crate::core::{AnalyzerBackend, ServiceClient};
use crate::presentation::{render_history, render_session};
use crate::session::AnalyzerSession;
use crate::upload::ResumeFile;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Match a resume against a job description using the analysis service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: AnalyzerCommand,

    /// Backend origin, e.g. http://localhost:8000
    #[arg(long, env = "API_BASE_URL", global = true)]
    pub api_base: Option<String>,

    /// YAML file with `local` / `production` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print raw JSON instead of the formatted view
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AnalyzerCommand {
    /// Generate a job description from a job title
    Generate {
        #[arg(long)]
        job_title: String,
    },
    /// Analyze a PDF resume against a job description
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, conflicts_with = "job_description_file")]
        job_description: Option<String>,
        #[arg(long)]
        job_description_file: Option<PathBuf>,
        /// Generate the description from this title when none is given
        #[arg(long)]
        job_title: Option<String>,
    },
    /// List the job role templates known to the generator
    Roles,
    /// Show recent analyses
    History {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Delete a stored analysis
    Delete { analysis_id: String },
    /// Check that the backend is up
    Health,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.api_base.as_deref(), cli.config.as_deref())?;
    info!("Using analysis service at {}", config.api_base_url);

    let client = ServiceClient::new(&config).context("Failed to create HTTP client")?;
    let json = cli.json;

    match cli.command {
        AnalyzerCommand::Generate { job_title } => {
            let mut session = AnalyzerSession::new(client);
            session.set_job_title(job_title);
            session.generate_job_description().await;
            ensure_no_error(&session)?;

            let description = &session.form().job_description;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "job_title": session.form().job_title,
                        "job_description": description,
                    }))?
                );
            } else {
                println!("{}", description.trim());
            }
        }

        AnalyzerCommand::Analyze {
            resume,
            job_description,
            job_description_file,
            job_title,
        } => {
            let mut session = AnalyzerSession::new(client);

            if let Some(text) = job_description {
                session.set_job_description(text);
            } else if let Some(path) = job_description_file {
                let text = tokio::fs::read_to_string(&path).await.with_context(|| {
                    format!("Failed to read job description: {}", path.display())
                })?;
                session.set_job_description(text);
            } else if let Some(title) = job_title {
                session.set_job_title(title);
                session.generate_job_description().await;
                ensure_no_error(&session)?;
                if !json {
                    println!("📝 Generated job description for {}", session.form().job_title);
                }
            }

            let file = ResumeFile::from_path(&resume)
                .await
                .with_context(|| format!("Failed to load resume: {}", resume.display()))?;
            session.select_file(Some(file));
            ensure_no_error(&session)?;

            session.analyze().await;
            ensure_no_error(&session)?;

            match (json, session.result()) {
                (true, Some(result)) => println!("{}", serde_json::to_string_pretty(result)?),
                _ => print!("{}", render_session(&session)),
            }
        }

        AnalyzerCommand::Roles => {
            let roles = client.job_roles().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roles)?);
            } else if roles.is_empty() {
                println!("No job role templates available.");
            } else {
                println!("Available job roles ({}):", roles.len());
                for role in roles {
                    println!("  • {}", role);
                }
            }
        }

        AnalyzerCommand::History { limit } => {
            let entries = client.history(limit).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render_history(&entries));
            }
        }

        AnalyzerCommand::Delete { analysis_id } => {
            let response = client.delete_analysis(&analysis_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!(
                    "✅ {}",
                    response
                        .message
                        .unwrap_or_else(|| format!("Deleted analysis {}", analysis_id))
                );
            }
        }

        AnalyzerCommand::Health => {
            let health = client.health().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("Status: {}", health.status);
                if let Some(version) = &health.version {
                    println!("Version: {}", version);
                }
                if let Some(database) = &health.database {
                    println!("Database: {}", database);
                }
            }
        }
    }

    Ok(())
}

fn ensure_no_error<B: AnalyzerBackend>(session: &AnalyzerSession<B>) -> Result<()> {
    match session.error() {
        Some(message) => anyhow::bail!("{}", message),
        None => Ok(()),
    }
}
