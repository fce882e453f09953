use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use estimate_runtime::manifest_schema;
use jsonschema::JSONSchema;

const SCHEMA_PATH: &str = "schemas/mission_manifest.schema.json";
const DEFAULT_MANIFEST_GLOB: &str = "missions/**/*.json";

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("export-schema") => export_schema(args.next().as_deref().unwrap_or(SCHEMA_PATH)),
        Some("validate-manifests") => {
            validate_manifests(args.next().as_deref().unwrap_or(DEFAULT_MANIFEST_GLOB))
        }
        Some("help") | None => {
            print_usage();
            Ok(())
        }
        Some(cmd) => {
            eprintln!("Unknown xtask '{cmd}'.");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cargo xtask export-schema [output.json]");
    eprintln!("       cargo xtask validate-manifests [glob]");
    eprintln!("       cargo xtask help");
}

fn schema_json() -> Result<serde_json::Value, Box<dyn Error>> {
    Ok(serde_json::to_value(manifest_schema())?)
}

fn export_schema(output: &str) -> Result<(), Box<dyn Error>> {
    let schema = schema_json()?;
    let path = Path::new(output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(&schema)? + "\n")?;
    println!("Wrote mission manifest schema to {}", path.display());
    Ok(())
}

fn validate_manifests(pattern: &str) -> Result<(), Box<dyn Error>> {
    let schema = schema_json()?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| format!("manifest schema is invalid: {err}"))?;

    let mut checked = 0usize;
    let mut failures = 0usize;
    for entry in glob::glob(pattern)? {
        let path = entry?;
        checked += 1;
        let contents = fs::read_to_string(&path)?;
        let instance: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                failures += 1;
                eprintln!("{}: not valid JSON: {err}", path.display());
                continue;
            }
        };
        if let Err(errors) = compiled.validate(&instance) {
            failures += 1;
            for error in errors {
                eprintln!("{}: {error}", path.display());
            }
        };
    }

    println!("Checked {checked} manifest(s), {failures} failed");
    if failures > 0 {
        return Err(format!("{failures} manifest(s) failed validation").into());
    }
    Ok(())
}
