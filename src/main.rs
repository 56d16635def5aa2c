use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use jsonc_norm::config::Configuration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonc-norm")]
#[command(about = "Normalize JSON with comments and trailing commas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip comments and trailing commas, writing strict JSON
    Normalize {
        /// JSON file with comments
        file: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a server configuration file and print what it enables
    Check {
        /// Configuration file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Normalize { file, output } => normalize(&file, output.as_deref()),
        Commands::Check { file } => check(&file),
    }
}

fn normalize(file: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let input = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(out);
            jsonc_norm::normalize_writer(&mut w, &input)?;
            w.flush()?;
        }
        None => {
            let mut w = io::stdout().lock();
            jsonc_norm::normalize_writer(&mut w, &input)?;
            w.flush()?;
        }
    }
    Ok(())
}

fn check(file: &Path) -> anyhow::Result<()> {
    let config = Configuration::load(file)
        .with_context(|| format!("loading configuration from {}", file.display()))?;

    println!("database: {}", config.database.kind);
    let listeners = config.server.listeners();
    if listeners.is_empty() {
        println!("listeners: none enabled");
    }
    for listener in listeners {
        println!("listener: {listener}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn normalize_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(dir.path(), "in.jsonc", "{\"a\": [1,], // one\n}");
        let output = dir.path().join("out.json");

        normalize(&input, Some(output.as_path())).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "{\"a\": [1] \n}");
    }

    #[test]
    fn check_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(
            dir.path(),
            "config.json",
            "{\"Database\": {\"Type\": \"postgres\"}, // db\n\"Server\": {\"UseHTTP\": true,},}",
        );
        check(&file).unwrap();
    }

    #[test]
    fn check_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "config.json", "{\"Server\": {\"UseHTTP\": yes}}");
        let err = check(&file).unwrap_err();
        assert!(
            err.to_string().starts_with("loading configuration from"),
            "{err:#}"
        );
        assert!(matches!(
            err.downcast_ref::<jsonc_norm::Error>(),
            Some(jsonc_norm::Error::Decode(_))
        ));

        let missing = dir.path().join("missing.json");
        let err = check(&missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<jsonc_norm::Error>(),
            Some(jsonc_norm::Error::Read { .. })
        ));
    }
}
