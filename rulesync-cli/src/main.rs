use anyhow::Result;
use clap::Parser;
use std::path::Path;

// Import from rulesync-core
use rulesync_core::{
    DestinationReport, DryRunWriter, ResolvedDestination, ResolvedPaths, SyncConfig,
    SyncProcessor, SyncReport, SyncStatus,
};

// Import CLI utilities
use rulesync::paths;

#[derive(Parser)]
#[command(name = "rulesync")]
#[command(about = "Sync a YAML rules section into Markdown config files")]
struct Args {
    /// Path to the source YAML document (overrides the config's source)
    #[arg(short, long)]
    input: Option<String>,

    /// Path to a custom sync config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Base directory that relative source/header/output paths resolve against
    #[arg(short, long, default_value = ".")]
    base_dir: String,

    /// Top-level key to extract (overrides the config's section_key)
    #[arg(long)]
    section_key: Option<String>,

    /// Report what would change without writing any destination
    #[arg(long)]
    check: bool,

    /// Rewrite destinations even when their content already matches
    #[arg(long)]
    force: bool,

    /// Save a JSON sync report to this path
    #[arg(long)]
    report: Option<String>,

    /// Show the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🔄 Rulesync Config Rules Sync");

    // Load config using the functional fallback pattern
    let mut config = SyncConfig::load_with_fallback(args.config.as_deref());

    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    // Apply CLI overrides to config
    if let Some(input) = &args.input {
        config.source = input.clone();
    }
    if let Some(key) = &args.section_key {
        config.section_key = key.clone();
    }
    if args.force {
        config.skip_unchanged = false;
    }

    if args.show_config {
        show_config(&config)?;
        return Ok(());
    }

    let base_dir = paths::expand_tilde(&args.base_dir);
    let resolved = resolve_paths(&config, &base_dir);

    println!("📁 Base directory: {}", base_dir.display());
    println!("📄 Source: {}", resolved.source.display());
    for dest in &resolved.destinations {
        println!(
            "   {} → {} (header: {})",
            dest.name,
            dest.output.display(),
            dest.header.display()
        );
    }
    println!();

    // Check the source exists before running the pipeline
    if !resolved.source.exists() {
        eprintln!(
            "❌ Source document not found at: {}",
            resolved.source.display()
        );
        eprintln!("   Please check the file path.");
        std::process::exit(1);
    }

    let processor = if args.check {
        println!("🔍 Check mode: no files will be written");
        SyncProcessor::new_with_writer(config, Box::new(DryRunWriter::new()))
    } else {
        SyncProcessor::new(config)
    };

    match processor.sync(&resolved) {
        Ok(report) => {
            print_summary(&report, args.check);

            if let Some(report_path) = &args.report {
                report.save(Path::new(report_path))?;
                println!("💾 Sync report saved to: {}", report_path);
            }

            let clean = if args.check {
                report.is_clean()
            } else {
                report.succeeded()
            };
            if !clean {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("❌ Sync failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Resolve the config's relative paths against the base directory.
fn resolve_paths(config: &SyncConfig, base_dir: &Path) -> ResolvedPaths {
    ResolvedPaths {
        source: paths::resolve(base_dir, &config.source),
        destinations: config
            .destinations
            .iter()
            .map(|dest| ResolvedDestination {
                name: dest.name.clone(),
                header: paths::resolve(base_dir, &dest.header),
                output: paths::resolve(base_dir, &dest.output),
            })
            .collect(),
    }
}

fn print_summary(report: &SyncReport, check: bool) {
    let written = report.count(SyncStatus::Written);
    let up_to_date = report.count(SyncStatus::UpToDate);
    let would_update = report.count(SyncStatus::WouldUpdate);
    let failed = report.count(SyncStatus::Failed);

    println!();
    if check {
        if failed > 0 {
            println!("❌ Check failed: {failed} destination(s) could not be rendered");
        } else if would_update > 0 {
            println!(
                "🔸 {would_update} destination(s) out of date, {up_to_date} up to date"
            );
        } else {
            println!("✅ All destinations up to date");
        }
        return;
    }

    if failed == 0 {
        println!("✅ Sync completed successfully: {written} written, {up_to_date} up to date");
    } else if written + up_to_date > 0 {
        println!(
            "⚠️  Sync finished with failures: {failed} of {} destinations failed",
            report.destinations.len()
        );
    } else {
        println!("❌ Sync failed");
    }

    let updated: Vec<&DestinationReport> = report
        .destinations
        .iter()
        .filter(|d| d.status == SyncStatus::Written)
        .collect();
    if !updated.is_empty() {
        println!();
        println!("Updated files:");
        for dest in updated {
            println!("  {}", dest.path);
        }
    }
}

fn show_config(config: &SyncConfig) -> Result<()> {
    println!("\n📋 Effective configuration:");
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
