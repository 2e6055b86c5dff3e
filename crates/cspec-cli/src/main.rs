mod assets;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    specs::SpecsSubcommand, templates::TemplatesSubcommand, work::WorkSubcommand, CheckFailed,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cspec",
    about = "Spec-driven development for the age of coding agents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from cspec/ or .git/)
    #[arg(long, global = true, env = "CSPEC_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize spec-driven development in the current project
    Init {
        /// Overwrite existing files
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Refresh slash commands and AGENTS.md, keeping PROJECT CONTEXT
    Update {
        /// Overwrite AGENTS.md and commands instead of merging
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Check project health (exit 1 when something is missing)
    Status,

    /// Print the onboarding prompt for an agent
    Onboard {
        /// Print the prompt even if AGENTS.md is already filled in
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Query issue templates
    Templates {
        #[command(subcommand)]
        subcommand: TemplatesSubcommand,
    },

    /// Query permanent feature specs
    Specs {
        #[command(subcommand)]
        subcommand: SpecsSubcommand,
    },

    /// Query work in progress
    Work {
        #[command(subcommand)]
        subcommand: WorkSubcommand,
    },

    /// Validate an issue document's frontmatter and body
    Validate {
        /// Path to the issue document
        #[arg(conflicts_with = "work")]
        path: Option<PathBuf>,
        /// Validate the issue of a work item instead of a path
        #[arg(long, value_name = "SLUG")]
        work: Option<String>,
        /// Treat context warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { force } => cmd::init::run(&root, force),
        Commands::Update { force } => cmd::update::run(&root, force),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Onboard { force } => cmd::onboard::run(&root, force),
        Commands::Templates { subcommand } => cmd::templates::run(&root, subcommand, cli.json),
        Commands::Specs { subcommand } => cmd::specs::run(&root, subcommand, cli.json),
        Commands::Work { subcommand } => cmd::work::run(&root, subcommand, cli.json),
        Commands::Validate { path, work, strict } => cmd::validate::run(
            &root,
            path.as_deref(),
            work.as_deref(),
            strict,
            cli.json,
        ),
    };

    if let Err(e) = result {
        if let Some(failed) = e.downcast_ref::<CheckFailed>() {
            eprintln!("{failed}");
            std::process::exit(failed.exit_code());
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
