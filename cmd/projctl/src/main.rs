use clap::{Parser, Subcommand};
use pkg_constants::paths::{CATALOG_CONFIG_ENV, DEFAULT_CATALOG_CONFIG};
use pkg_project::catalog::StaticCatalog;
use pkg_project::defaults::{EntryDefaults, cluster_options, repository_options};
use pkg_project::{EditSession, PolicyEdit, PolicyList, SubmitOutcome, SubmitSink, normalize};
use pkg_types::config::{CatalogConfigFile, load_config_file};
use pkg_types::project::ProjectAccessPolicy;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod entry;
mod sink;

use sink::{FileSink, StdoutSink};

#[derive(Parser)]
#[command(name = "projctl", about = "Edit a project's access-control policy")]
struct Cli {
    /// Project file (YAML). A missing file starts a new project.
    #[arg(long, short = 'f')]
    project: String,

    /// Catalog file listing repositories, clusters and signature keys
    #[arg(long)]
    catalog: Option<String>,

    /// Print the submitted project instead of writing the project file
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the project
    Show,
    /// Report validation errors
    Validate,
    /// Print the project as it would be submitted
    Normalize,
    /// Show the repository and cluster choices from the catalog
    Options,
    /// Set the project name (new projects only)
    Rename { name: String },
    /// Set the project description
    Describe { description: String },
    /// Append a row to a list, using the list's default when no value is given
    Add {
        /// List name, e.g. sourceRepos or cluster-resource-allowlist
        list: PolicyList,
        /// Row value; multi-field rows are comma-separated
        value: Option<String>,
    },
    /// Remove the row at INDEX from a list
    Remove { list: PolicyList, index: usize },
    /// Replace the row at INDEX in a list
    Set {
        list: PolicyList,
        index: usize,
        value: String,
    },
    /// Configure orphaned resource monitoring
    Orphaned {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        warn: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Merge: CLI arg > environment > default
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| std::env::var(CATALOG_CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CATALOG_CONFIG.to_string());
    let catalog_cfg: CatalogConfigFile = load_config_file(&catalog_path)?;
    info!("Catalog file: {}", catalog_path);

    let existing = Path::new(&cli.project).exists();
    let policy: ProjectAccessPolicy = load_config_file(&cli.project)?;
    info!(
        "Project file: {} ({})",
        cli.project,
        if existing { "existing" } else { "new" }
    );

    let catalog = StaticCatalog::from(catalog_cfg.clone());
    let defaults = EntryDefaults::load(&catalog, &catalog, &catalog).await?;

    let edits = match cli.command {
        Commands::Show => {
            print!("{}", serde_yaml::to_string(&policy)?);
            return Ok(());
        }
        Commands::Validate => {
            let errors = pkg_project::validate(&policy);
            if errors.is_empty() {
                println!("ok");
                return Ok(());
            }
            for (field, message) in &errors {
                eprintln!("{}: {}", field, message);
            }
            std::process::exit(1);
        }
        Commands::Normalize => {
            print!("{}", serde_yaml::to_string(&normalize(policy))?);
            return Ok(());
        }
        Commands::Options => {
            println!("REPOSITORIES");
            for repo in repository_options(&catalog_cfg.repositories) {
                println!("  {}", repo);
            }
            println!("CLUSTERS");
            for option in cluster_options(&catalog_cfg.clusters) {
                println!("  {:<40} {}", option.value, option.title);
            }
            println!("SIGNATURE KEYS");
            for key in &catalog_cfg.signature_keys {
                println!("  {}", key);
            }
            return Ok(());
        }
        Commands::Rename { name } => vec![PolicyEdit::SetName(name)],
        Commands::Describe { description } => vec![PolicyEdit::SetDescription(description)],
        Commands::Add { list, value: None } => vec![PolicyEdit::Append(list)],
        Commands::Add {
            list,
            value: Some(value),
        } => vec![PolicyEdit::AppendEntry(list, entry::parse_entry(list, &value)?)],
        Commands::Remove { list, index } => vec![PolicyEdit::Remove(list, index)],
        Commands::Set { list, index, value } => {
            vec![PolicyEdit::Update(list, index, entry::parse_entry(list, &value)?)]
        }
        Commands::Orphaned { enabled, warn } => {
            let mut edits = Vec::new();
            if let Some(enabled) = enabled {
                edits.push(PolicyEdit::SetOrphanedResourcesEnabled(enabled));
            }
            if let Some(warn) = warn {
                edits.push(PolicyEdit::SetOrphanedResourcesWarn(warn));
            }
            edits
        }
    };

    // A saved project keeps its name.
    let mut session = if existing && !policy.name.is_empty() {
        EditSession::for_existing(policy, defaults)
    } else {
        EditSession::new(policy, defaults)
    };
    for edit in edits {
        session.apply(edit)?;
    }

    let file_sink = FileSink::new(&cli.project);
    let sink: &dyn SubmitSink = if cli.dry_run { &StdoutSink } else { &file_sink };
    match session.submit(sink).await? {
        SubmitOutcome::Submitted(policy) => {
            info!("Project '{}' saved", policy.name);
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in &errors {
                eprintln!("{}: {}", field, message);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
