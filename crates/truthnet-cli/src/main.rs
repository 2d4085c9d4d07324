//! truthnet: claim verification from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use truthnet_ai::{CentroidResolver, LabelSet};
use truthnet_core::{Claim, EvidenceKind, RecentActivity, ReputationTier, Score, Side, WorkflowConfig};
use truthnet_identity::{Credentials, HostedAuthClient, IdentityProvider};
use truthnet_workflow::{Services, Workflow};

mod display;

#[derive(Parser, Debug)]
#[command(name = "truthnet")]
#[command(version, about = "Verify claims, weigh evidence, and debate them", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Print results as JSON instead of cards
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Settings {
    /// JSON workflow configuration file
    #[arg(long, global = true, env = "TRUTHNET_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the simulated services
    #[arg(long, global = true, env = "TRUTHNET_SEED")]
    seed: Option<u64>,

    /// Skip all simulated latencies
    #[arg(long, global = true, env = "TRUTHNET_IMMEDIATE")]
    immediate: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a claim and wait for its verdict
    Verify {
        /// Claim text
        claim: String,

        /// Labelled reference claims (JSON array); resolves with the centroid classifier
        #[arg(long, env = "TRUTHNET_LABELS")]
        labels: Option<PathBuf>,
    },

    /// Submit evidence for a claim and wait for each item to be rated
    Evidence {
        /// Claim text
        claim: String,

        /// Link to a source (repeatable)
        #[arg(long = "link")]
        links: Vec<String>,

        /// Free-text evidence (repeatable)
        #[arg(long = "text")]
        texts: Vec<String>,
    },

    /// Run a debate on a claim
    Debate {
        /// Claim text
        claim: String,

        /// Argument supporting the claim (repeatable)
        #[arg(long = "side-a")]
        side_a: Vec<String>,

        /// Argument opposing the claim (repeatable)
        #[arg(long = "side-b")]
        side_b: Vec<String>,

        /// Author name for submitted arguments
        #[arg(long, default_value = "Anonymous")]
        author: String,
    },

    /// Quick fact check of an article, with optional reader feedback
    FactCheck(FactCheckArgs),

    /// Analyze a post draft for clarity, bias, and emotional tone
    AnalyzePost {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// Topic category, e.g. politics or technology
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the reputation tier for a validation score
    Reputation {
        /// Validation score (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,

        #[arg(long, default_value_t = 0)]
        correct: u32,

        #[arg(long, default_value_t = 0)]
        incorrect: u32,

        #[arg(long, default_value_t = 0)]
        debates_won: u32,
    },

    /// Identity provider session management
    #[command(subcommand)]
    Auth(AuthCommands),
}

#[derive(Args, Debug)]
struct FactCheckArgs {
    #[arg(long)]
    title: String,

    #[arg(long, default_value = "")]
    summary: String,

    /// Trust vote: +1 or -1
    #[arg(long, allow_hyphen_values = true)]
    trust: Option<i8>,

    /// Perceived neutrality (0-100)
    #[arg(long)]
    neutrality: Option<u8>,

    /// Clarity rating (1-5)
    #[arg(long)]
    clarity: Option<u8>,

    /// Counterpoint to record after the analysis
    #[arg(long)]
    counterpoint: Option<String>,

    #[arg(long, default_value = "Anonymous")]
    author: String,
}

#[derive(Subcommand, Debug)]
enum AuthCommands {
    /// Sign in with email and password
    SignIn {
        #[arg(long, env = "TRUTHNET_EMAIL")]
        email: String,
        #[arg(long, env = "TRUTHNET_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    SignUp {
        #[arg(long, env = "TRUTHNET_EMAIL")]
        email: String,
        #[arg(long, env = "TRUTHNET_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Revoke a session
    SignOut {
        #[arg(long, env = "TRUTHNET_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },

    /// Show the user owning an access token
    Whoami {
        #[arg(long, env = "TRUTHNET_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },
}

impl Settings {
    fn workflow_config(&self) -> Result<WorkflowConfig> {
        let mut config = match &self.config {
            Some(path) => WorkflowConfig::from_json_file(path)?,
            None => WorkflowConfig::default(),
        };
        if self.immediate {
            let seed = config.seed;
            config = WorkflowConfig::immediate();
            config.seed = seed;
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    tracing::debug!("truthnet v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Verify { claim, labels } => {
            let config = cli.settings.workflow_config()?;
            let mut services = Services::simulated(config.seed);
            if let Some(path) = labels {
                let labels = LabelSet::from_path(&path)?;
                let summary = labels.summary();
                tracing::info!(
                    claims = summary.total_claims,
                    trainable = summary.trainable_claims,
                    verdicts = summary.distinct_verdicts,
                    "loaded reference claims"
                );
                services = services.with_resolver(Arc::new(CentroidResolver::new(labels)));
            }
            let workflow = Workflow::new(config, services);
            let result = workflow.claim_desk().verify(&claim).await?;
            if cli.json {
                display::print_json(&result)?;
            } else {
                display::print_verification(&claim, &result);
                display::print_events(&workflow.events().drain());
            }
        }

        Commands::Evidence { claim, links, texts } => {
            if links.is_empty() && texts.is_empty() {
                bail!("provide at least one --link or --text");
            }
            let workflow = Workflow::simulated(cli.settings.workflow_config()?);
            let claim = Claim::parse(&claim)?;
            let board = workflow.evidence_board(&claim);
            for link in &links {
                board.submit(EvidenceKind::Link, link)?;
            }
            for text in &texts {
                board.submit(EvidenceKind::Text, text)?;
            }
            board.settle().await?;
            let items = board.items();
            if cli.json {
                display::print_json(&items)?;
            } else {
                display::print_evidence(&claim, &items);
                display::print_events(&workflow.events().drain());
            }
        }

        Commands::Debate {
            claim,
            side_a,
            side_b,
            author,
        } => {
            if side_a.is_empty() && side_b.is_empty() {
                bail!("provide at least one --side-a or --side-b argument");
            }
            let workflow = Workflow::simulated(cli.settings.workflow_config()?);
            let claim = Claim::parse(&claim)?;
            let room = workflow.debate_room(&claim);
            for content in &side_a {
                room.submit(&author, Side::A, content)?;
            }
            for content in &side_b {
                room.submit(&author, Side::B, content)?;
            }
            room.settle().await?;
            let arguments = room.arguments();
            if cli.json {
                display::print_json(&arguments)?;
            } else {
                display::print_debate(&claim, room.phase(), &arguments);
                display::print_events(&workflow.events().drain());
            }
        }

        Commands::FactCheck(args) => {
            let workflow = Workflow::simulated(cli.settings.workflow_config()?);
            let discussion = workflow.discussion();
            let analysis = discussion.fact_check(&args.title, &args.summary).await?;
            if let Some(delta) = args.trust {
                discussion.vote_trust(delta)?;
            }
            if let Some(value) = args.neutrality {
                discussion.set_neutrality(value)?;
            }
            if let Some(rating) = args.clarity {
                discussion.rate_clarity(rating)?;
            }
            if let Some(text) = &args.counterpoint {
                discussion.submit_counterpoint(&args.author, text)?;
            }
            let ballot = discussion.ballot();
            if cli.json {
                display::print_json(&serde_json::json!({
                    "title": args.title,
                    "analysis": analysis,
                    "ballot": ballot,
                    "comments": discussion.comments(),
                }))?;
            } else {
                display::print_fact_check(&args.title, &analysis, &ballot, &discussion.comments());
                display::print_events(&workflow.events().drain());
            }
        }

        Commands::AnalyzePost {
            title,
            content,
            category,
        } => {
            let workflow = Workflow::simulated(cli.settings.workflow_config()?);
            let analysis = workflow
                .post_editor()
                .analyze(&title, &content, category.as_deref())
                .await?;
            if cli.json {
                display::print_json(&analysis)?;
            } else {
                display::print_post_analysis(title.trim(), &analysis);
                display::print_events(&workflow.events().drain());
            }
        }

        Commands::Reputation {
            score,
            correct,
            incorrect,
            debates_won,
        } => {
            let score = Score::new(score);
            let activity = RecentActivity {
                correct_claims: correct,
                incorrect_claims: incorrect,
                debates_won,
            };
            display::print_reputation(score, ReputationTier::from_score(score), &activity);
        }

        Commands::Auth(command) => run_auth(command, cli.json).await?,
    }

    Ok(())
}

async fn run_auth(command: AuthCommands, json: bool) -> Result<()> {
    let client = HostedAuthClient::from_env().context("configuring identity provider")?;

    match command {
        AuthCommands::SignIn { email, password } => {
            let session = client
                .sign_in(&Credentials::new(email, password))
                .await
                .context("sign-in failed")?;
            if json {
                display::print_json(&session)?;
            } else {
                display::print_session(&session);
            }
        }
        AuthCommands::SignUp { email, password } => {
            let outcome = client
                .sign_up(&Credentials::new(email, password))
                .await
                .context("sign-up failed")?;
            if json {
                return display::print_json(&outcome);
            }
            if outcome.needs_confirmation() {
                println!("Check your email to confirm your account ({}).", outcome.user.id);
            }
            if let Some(session) = &outcome.session {
                display::print_session(session);
            }
        }
        AuthCommands::SignOut { access_token } => {
            client
                .sign_out(&access_token)
                .await
                .context("sign-out failed")?;
            if json {
                display::print_json(&serde_json::json!({ "signed_out": true }))?;
            } else {
                println!("Signed out.");
            }
        }
        AuthCommands::Whoami { access_token } => {
            let user = client
                .current_user(&access_token)
                .await
                .context("session lookup failed")?;
            match (user, json) {
                (Some(user), true) => display::print_json(&user)?,
                (Some(user), false) => display::print_user(&user),
                (None, _) => bail!("not signed in: access token is invalid or expired"),
            }
        }
    }

    Ok(())
}
