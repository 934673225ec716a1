//! CLI administration tool for talent-registry.
//!
//! Maintains the skill catalogue and inspects candidates without going
//! through the HTTP API. Commands run through the same services as the
//! server, so the same validation and uniqueness rules apply.
//!
//! # Usage
//!
//! ```bash
//! # Add a skill (prompts for the name if omitted)
//! cargo run --bin admin -- skill add Rust
//!
//! # List skills
//! cargo run --bin admin -- skill list
//!
//! # Remove a skill by name or id
//! cargo run --bin admin -- skill remove Rust
//!
//! # List candidates, optionally filtered
//! cargo run --bin admin -- candidate list --skills Go,Rust
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `STORAGE`.

use talent_registry::application::dto::{CandidateSearchRequest, CreateSkillRequest};
use talent_registry::application::services::{CandidateService, SkillService};
use talent_registry::config::{Config, StorageBackend};
use talent_registry::domain::repositories::Persistence;
use talent_registry::infrastructure::persistence::{PgPersistence, connect_pool};
use talent_registry::server::open_persistence;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing talent-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the skill catalogue
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Inspect candidates
    Candidate {
        #[command(subcommand)]
        action: CandidateAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SkillAction {
    /// Add a skill
    Add {
        /// Skill name (prompted if omitted)
        name: Option<String>,
    },

    /// List all skills
    List,

    /// Remove a skill and unassign it from all candidates
    Remove {
        /// Skill name or numeric id
        name_or_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CandidateAction {
    /// List candidates
    List {
        /// Only candidates whose name contains this text
        #[arg(long)]
        name: Option<String>,

        /// Only candidates with any of these skills (comma-separated)
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Skill { action } => {
            let persistence = open_persistence(&config).await?;
            handle_skill_action(action, SkillService::new(persistence)).await?
        }
        Commands::Candidate { action } => {
            let persistence = open_persistence(&config).await?;
            handle_candidate_action(action, CandidateService::new(persistence)).await?
        }
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn handle_skill_action(action: SkillAction, service: SkillService) -> Result<()> {
    match action {
        SkillAction::Add { name } => add_skill(&service, name).await,
        SkillAction::List => list_skills(&service).await,
        SkillAction::Remove { name_or_id, yes } => remove_skill(&service, name_or_id, yes).await,
    }
}

async fn add_skill(service: &SkillService, name: Option<String>) -> Result<()> {
    println!("{}", "Add skill".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Skill name").interact_text()?,
    };

    let skill = service
        .create_skill(CreateSkillRequest { name })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add skill: {}", e))?;

    println!(
        "{} {} (id {})",
        "Created".green().bold(),
        skill.name.cyan(),
        skill.id.to_string().bright_black()
    );

    Ok(())
}

/// Lists the catalogue.
///
/// ```text
///   ID    Name                           Created
///   ──────────────────────────────────────────────────────
///   2     Go                             2024-01-15 10:30
///   1     Rust                           2024-01-15 10:29
/// ```
async fn list_skills(service: &SkillService) -> Result<()> {
    println!("{}", "Skills".bright_blue().bold());
    println!();

    let skills = service
        .list_skills()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list skills: {}", e))?;

    if skills.is_empty() {
        println!("{}", "  No skills found".yellow());
        println!();
        println!(
            "  Add one with: {} admin skill add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(56).bright_black());

    for skill in &skills {
        println!(
            "  {:<5} {:<30} {}",
            skill.id.to_string().bright_black(),
            skill.name.cyan(),
            skill
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        skills.len().to_string().bright_white().bold()
    );

    Ok(())
}

/// Removes a skill by id (numeric input) or exact name.
async fn remove_skill(service: &SkillService, name_or_id: String, skip_confirm: bool) -> Result<()> {
    let skill = match name_or_id.parse::<i64>() {
        Ok(id) => service.get_skill(id).await,
        Err(_) => service.get_skill_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Skill: {}", skill.name.cyan());
    println!("  ID:    {}", skill.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove this skill from the catalogue and all candidates?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_skill(skill.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove skill: {}", e))?;

    println!("{}", "Skill removed".green().bold());
    Ok(())
}

async fn handle_candidate_action(action: CandidateAction, service: CandidateService) -> Result<()> {
    match action {
        CandidateAction::List { name, skills } => {
            let candidates = if name.is_none() && skills.is_empty() {
                service.list_candidates().await
            } else {
                service
                    .search_candidates(CandidateSearchRequest { name, skills })
                    .await
            }
            .map_err(|e| anyhow::anyhow!("Failed to list candidates: {}", e))?;

            println!("{}", "Candidates".bright_blue().bold());
            println!();

            if candidates.is_empty() {
                println!("{}", "  No candidates found".yellow());
                return Ok(());
            }

            for candidate in &candidates {
                let skills: Vec<&str> = candidate.skills.iter().map(|s| s.name.as_str()).collect();
                println!(
                    "  {:<5} {:<30} {:<32} {}",
                    candidate.id.to_string().bright_black(),
                    candidate.full_name.cyan(),
                    candidate.email,
                    skills.join(", ").bright_white()
                );
            }

            println!();
            println!(
                "  Total: {}",
                candidates.len().to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Handles database diagnostic commands. Does not run migrations.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            if config.storage == StorageBackend::Memory {
                println!("{}", "In-memory storage, nothing to check".yellow());
                return Ok(());
            }

            println!("{}", "Checking database connection...".bright_blue());

            let url = config.require_database_url()?;
            let pool = connect_pool(config, url)
                .await
                .context("Failed to connect to database")?;

            PgPersistence::new(Arc::new(pool))
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}
