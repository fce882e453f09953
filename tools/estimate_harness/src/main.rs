use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use core_estimate::{load_catalog, load_catalog_from_env, InvoiceSummary, MissionSession};
use estimate_runtime::{Estimate, MissionManifest};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Survey mission cost estimate harness", long_about = None)]
struct Args {
    /// Path to mission manifest JSON file
    #[arg(long)]
    manifest: PathBuf,

    /// Extra boundary document (KML or bare vertex list); may be repeated
    #[arg(long = "boundary")]
    boundaries: Vec<PathBuf>,

    /// Catalog JSON override (defaults to ESTIMATE_CATALOG_PATH, then the builtin)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    estimate: &'a Estimate,
    invoice: &'a InvoiceSummary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let manifest_path = args
        .manifest
        .canonicalize()
        .with_context(|| "Unable to canonicalize manifest path")?;
    let manifest_json = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest at {}", manifest_path.display()))?;
    let manifest = MissionManifest::parse_str(&manifest_json).with_context(|| {
        format!(
            "Failed to parse manifest JSON at {}",
            manifest_path.display()
        )
    })?;

    let (catalog, metadata) = match &args.catalog {
        Some(path) => load_catalog(Some(path.as_path())),
        None => load_catalog_from_env(),
    };
    if let (Some(requested), true) = (&args.catalog, metadata.is_builtin()) {
        return Err(anyhow::anyhow!(
            "Catalog override {} could not be loaded",
            requested.display()
        ));
    }

    let documents = read_boundaries(&manifest_path, &manifest.boundaries, &args.boundaries)?;
    let session = MissionSession::from_manifest(catalog, &manifest, &documents)
        .with_context(|| "Failed to build mission from manifest")?;

    let estimate = session.estimate();
    info!(
        target: "survey_estimate::harness",
        sites = session.sites().len(),
        personnel = session.personnel().len(),
        total_km = estimate.metrics.total_distance_km,
        grand_total = estimate.totals.grand_total,
        "estimate.ready"
    );

    let invoice = InvoiceSummary::build(
        estimate,
        session.inputs(),
        session.catalog(),
        &manifest.document,
    );

    match args.format {
        OutputFormat::Text => println!("{}", invoice.render_text()),
        OutputFormat::Json => {
            let report = Report {
                estimate,
                invoice: &invoice,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Read every boundary document, manifest entries first, as `(file name, text)`.
fn read_boundaries(
    manifest_path: &Path,
    from_manifest: &[String],
    from_args: &[PathBuf],
) -> Result<Vec<(String, String)>> {
    let mut paths = Vec::with_capacity(from_manifest.len() + from_args.len());
    for entry in from_manifest {
        paths.push(canonicalize_relative(manifest_path.parent(), entry)?);
    }
    for path in from_args {
        paths.push(
            path.canonicalize()
                .with_context(|| format!("Unable to canonicalize {}", path.display()))?,
        );
    }

    paths
        .into_iter()
        .map(|path| {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read boundary file {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((name, contents))
        })
        .collect()
}

fn canonicalize_relative(base: Option<&Path>, value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    let resolved = if path.is_absolute() {
        path
    } else {
        base.unwrap_or(Path::new(".")).join(value)
    };
    resolved
        .canonicalize()
        .with_context(|| format!("Unable to resolve boundary path '{}'", value))
}
