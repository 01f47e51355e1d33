//! Binary to generate/update .expected.cs files next to the fixture documents
//!
//! Usage:
//!   cargo run --bin accept_expected            # Update all
//!   cargo run --bin accept_expected -- basic   # Update only fixtures matching "basic"

use nvim_bindgen::{MetadataFile, MetadataSource, Pipeline};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|s| s == "json").unwrap_or(false))
    {
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if let Some(ref f) = filter {
            if !path_str.contains(f) {
                skipped += 1;
                continue;
            }
        }

        process_file(path);
        updated += 1;
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn process_file(path: &Path) {
    let doc = match MetadataFile::new(path).fetch() {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return;
        }
    };

    let pipeline = Pipeline::standard();
    let expected_cs = path.with_extension("expected.cs");
    let expected_err = path.with_extension("expected.err");

    match pipeline.compile(&doc) {
        Ok(output) => {
            if let Err(e) = fs::write(&expected_cs, &output.code) {
                eprintln!("Failed to write {:?}: {}", expected_cs, e);
            } else {
                println!("  wrote {}", expected_cs.display());
            }
            // Remove any stale .expected.err if this now generates
            if expected_err.exists() {
                let _ = fs::remove_file(&expected_err);
            }
        }
        Err(e) => {
            if let Err(err) = fs::write(&expected_err, e.render()) {
                eprintln!("Failed to write {:?}: {}", expected_err, err);
            } else {
                println!("  wrote {}", expected_err.display());
            }
        }
    }
}
