mod adapters;
mod application;
mod cleaning;
mod cli;
mod config;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{
    FileSystemDeleter, FileSystemWriter, ManifestCatalog, StdoutPresenter,
};
use application::CleanerSession;
use cleaning::domain::{AssetClass, AssetId, ExclusionPolicy};
use cleaning::services::RoundProgress;
use cli::{Args, OutputFormat};
use config::ConfigFile;
use owo_colors::OwoColorize;
use ports::outbound::{OutputPresenter, ProgressReporter};
use shared::error::{CleanerError, ExitCode};
use shared::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate content root directory
    let content_dir = args.path.as_deref().unwrap_or(".");
    let content_path = PathBuf::from(content_dir);

    validate_content_path(&content_path)?;

    // Load configuration (explicit path wins over auto-discovery)
    let file_config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => {
            let discovered = config::discover_config(&content_path)?;
            if discovered.is_some() {
                eprintln!(
                    "📋 Auto-discovered config file: {}",
                    content_path.join("asset-sweep.config.yml").display()
                );
            }
            discovered
        }
    };
    let file_config = file_config.unwrap_or_default();

    let format = resolve_format(&args, &file_config)?;
    let policy = build_exclusion_policy(&args, &file_config)?;
    let chunk_limit = args.chunk_limit.or(file_config.chunk_limit);

    // Create adapters (Dependency Injection)
    let catalog = ManifestCatalog::new(content_path.clone());
    let progress_reporter = StderrProgressReporter::new();

    progress_reporter.report("🔍 Scanning asset manifest...");
    let mut session = CleanerSession::scan(&catalog, policy)?;
    if let Some(limit) = chunk_limit {
        session = session.with_chunk_limit(limit);
    }

    let stats = session.stats();
    progress_reporter.report(&format!(
        "📦 {} unused asset(s) found ({} protected by exclusions)",
        stats.unused_assets,
        stats.excluded_assets + stats.linked_assets
    ));

    if args.delete {
        delete_unused_assets(&mut session, &content_path, &progress_reporter, &args)?;
    }

    // Format and present the report
    progress_reporter.report(format.progress_message());
    let formatter = format.create_formatter();
    let formatted_output = formatter.format(&session.report())?;

    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = args.output {
        Box::new(FileSystemWriter::new(PathBuf::from(output_path)))
    } else {
        Box::new(StdoutPresenter::new())
    };

    presenter.present(&formatted_output)?;

    Ok(())
}

/// Runs the deletion loop and prints the post-delete summary
fn delete_unused_assets(
    session: &mut CleanerSession,
    content_path: &Path,
    progress_reporter: &StderrProgressReporter,
    args: &Args,
) -> Result<()> {
    let pool_size = session.pool().len();
    if pool_size == 0 {
        progress_reporter.report("✨ Nothing to delete");
        return Ok(());
    }

    progress_reporter.report(&format!("🗑️  Deleting {} unused asset(s)...", pool_size));

    let deleter = FileSystemDeleter::new(content_path.to_path_buf());
    let outcome = session.run_deletion_loop(&deleter, None, |progress: &RoundProgress| {
        progress_reporter.report_progress(
            progress.deleted_total,
            pool_size,
            Some(&format!("round {}", progress.round)),
        );
    })?;

    if !args.keep_empty_dirs {
        let pruned = deleter.prune_empty_dirs()?;
        if pruned > 0 {
            progress_reporter.report(&format!("🧹 Pruned {} empty director(ies)", pruned));
        }
    }

    progress_reporter.report_completion(&format!(
        "{} {} asset(s) deleted in {} round(s)",
        "✅".green(),
        outcome.deleted.to_string().green().bold(),
        outcome.rounds
    ));

    Ok(())
}

/// Resolves the output format: CLI flag, then config file, then JSON
fn resolve_format(args: &Args, config: &ConfigFile) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match &config.format {
        Some(value) => OutputFormat::from_str(value).map_err(|message| {
            anyhow::Error::from(CleanerError::Validation { message })
        }),
        None => Ok(OutputFormat::Json),
    }
}

/// Merges CLI and config exclusion rules into one policy.
///
/// CLI and config lists are unioned; an asset is protected if either
/// source names it.
fn build_exclusion_policy(args: &Args, config: &ConfigFile) -> Result<ExclusionPolicy> {
    let mut assets: BTreeSet<AssetId> = BTreeSet::new();
    let mut classes: BTreeSet<AssetClass> = BTreeSet::new();
    let mut paths: Vec<String> = Vec::new();

    let config_assets = config.exclude_assets.as_deref().unwrap_or_default();
    for raw in args.exclude_asset.iter().chain(config_assets) {
        assets.insert(AssetId::new(raw.clone())?);
    }

    let config_classes = config.exclude_classes.as_deref().unwrap_or_default();
    for raw in args.exclude_class.iter().chain(config_classes) {
        classes.insert(AssetClass::new(raw.clone())?);
    }

    paths.extend(args.exclude_path.iter().cloned());
    if let Some(config_paths) = &config.exclude_paths {
        paths.extend(config_paths.iter().cloned());
    }

    Ok(ExclusionPolicy::new(assets, paths, classes))
}

fn validate_content_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CleanerError::InvalidContentPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for content paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| CleanerError::InvalidContentPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(CleanerError::InvalidContentPath {
            path: path.to_path_buf(),
            reason: "Security: Content path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(CleanerError::InvalidContentPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    // Security check: Canonicalize path to prevent path traversal
    let canonical_path = path
        .canonicalize()
        .map_err(|e| CleanerError::InvalidContentPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    if !canonical_path.is_dir() {
        return Err(CleanerError::InvalidContentPath {
            path: path.to_path_buf(),
            reason: "Resolved path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
