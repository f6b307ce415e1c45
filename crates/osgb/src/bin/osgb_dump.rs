//! Dump one scene file, or test-decode every scene file under a directory.
//!
//! Run: `cargo run --bin osgb-dump -- <file|dir> [--json] [--ext <ext>] [--verbose]`
//!
//! Logging goes to stderr; dumps and per-file results go to stdout.

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use osgb::{SceneFile, batch, dump, summary};
use tracing::Level;

const USAGE: &str = "\
  Usage:
    Dump OSGB file :  osgb-dump <file> [--json]
    Test OSGB files:  osgb-dump <dir> [--ext <ext>]

  Options:
    --json       Print a JSON summary instead of the object dump
    --ext <ext>  File extension to test in directory mode (default: osgb)
    --verbose    Log decoder progress to stderr
";

struct Args {
    path: String,
    json: bool,
    extension: String,
    verbose: bool,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut path = None;
    let mut json = false;
    let mut extension = "osgb".to_owned();
    let mut verbose = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--verbose" => verbose = true,
            "--ext" => {
                extension = args
                    .next()
                    .ok_or_else(|| "--ext needs a value".to_owned())?
                    .trim_start_matches('.')
                    .to_owned();
            }
            other if other.starts_with("--") => return Err(format!("unknown option {other}")),
            other => path = Some(other.to_owned()),
        }
    }

    Ok(path.map(|path| Args {
        path,
        json,
        extension,
        verbose,
    }))
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let path = Path::new(&args.path);
    let result = if path.is_dir() {
        test_dir(path, &args.extension)
    } else if path.is_file() {
        dump_file(path, args.json)
    } else {
        println!("FAILED: path not valid");
        return ExitCode::FAILURE;
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("write failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the file decoded.
fn dump_file(path: &Path, json: bool) -> io::Result<bool> {
    let mut out = BufWriter::new(io::stdout().lock());
    write!(out, "read {} ", path.display())?;

    let file = match SceneFile::open(path) {
        Ok(file) => file,
        Err(err) => {
            writeln!(out, "FAILED: {err}")?;
            return Ok(false);
        }
    };
    let scene = match file.decode() {
        Ok(scene) => scene,
        Err(err) => {
            writeln!(out, "FAILED: {err}")?;
            return Ok(false);
        }
    };

    writeln!(out, "OK")?;
    if json {
        let text = serde_json::to_string_pretty(&summary::summarize(&scene))
            .map_err(io::Error::other)?;
        writeln!(out, "{text}")?;
    } else {
        dump::write_scene(&scene, &mut out)?;
    }
    out.flush()?;
    Ok(true)
}

/// Returns whether every file decoded.
fn test_dir(dir: &Path, extension: &str) -> io::Result<bool> {
    let outcomes = batch::run(dir, extension);
    let mut out = io::stdout().lock();

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(_) => writeln!(out, "read {} OK", outcome.path.display())?,
            Err(err) => {
                failed += 1;
                writeln!(out, "read {} FAILED: {err}", outcome.path.display())?;
            }
        }
    }
    writeln!(out, "\n{} files, {failed} failed", outcomes.len())?;
    Ok(failed == 0)
}
