use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use deviser_schema::config::ParserConfig;
use deviser_schema::error::{ReturnCode, UsageError};
use deviser_schema::model::{Package, PackageDoc};
use deviser_schema::parser::{FsSource, PackageParser};
use deviser_schema::validate::{self, Severity};
use log::{LevelFilter, error, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse Deviser package descriptions to JSON", long_about = None)]
struct Cli {
    /// Package description XML file, or a directory of them
    #[arg(value_name = "XML_FILE")]
    xml_file: String,

    /// TOML file with parser configuration
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Fail on plugin references that match no element
    #[arg(long)]
    strict: bool,

    /// Run consistency checks on the parsed package
    #[arg(long)]
    validate: bool,

    /// Also write a binary snapshot of the parsed package (single file only)
    #[arg(long, value_name = "OUT")]
    binary: Option<Utf8PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(ReturnCode::MissingFunctionArgument.code());
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            std::process::exit(ReturnCode::Success.code());
        }
    };

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let code = match run(&cli) {
        Ok(()) => ReturnCode::Success,
        Err(err) => {
            error!("{:#}", err);
            ReturnCode::for_error(&err)
        }
    };
    info!("{}", code);
    std::process::exit(code.code());
}

fn run(cli: &Cli) -> Result<()> {
    let path = Utf8PathBuf::from(&cli.xml_file);
    let is_dir = path.is_dir();
    check_args(cli, is_dir)?;

    let config = match &cli.config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };
    let strict = cli.strict || config.strict_references;
    let config = config.strict(strict);

    let json = if is_dir {
        let packages = parse_dir(&path, &config)?;
        for package in &packages {
            report(package, cli.validate)?;
        }
        serde_json::to_string_pretty(&packages)?
    } else {
        let mut parser = PackageParser::new(config, FsSource);
        let package = parser
            .parse_package_file(&path)
            .with_context(|| format!("Failed to parse {}", path))?;
        report(&package, cli.validate)?;
        let json = serde_json::to_string_pretty(&package)?;
        if let Some(out) = &cli.binary {
            PackageDoc { package }
                .save_to_binary(out)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        json
    };
    println!("{}", json);
    Ok(())
}

/// Parse every `*.xml` file below `dir`, in path order.
fn parse_dir(dir: &Utf8Path, config: &ParserConfig) -> Result<Vec<Package>> {
    let mut paths: Vec<Utf8PathBuf> = Vec::new();
    for entry in WalkDir::new(dir.as_std_path()).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Read dir {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let p = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
        if p.extension() == Some("xml") {
            paths.push(p);
        }
    }
    info!("parsing {} descriptions under {}", paths.len(), dir);
    paths
        .par_iter()
        .map(|p| {
            let mut parser = PackageParser::new(config.clone(), FsSource);
            parser
                .parse_package_file(p)
                .with_context(|| format!("Failed to parse {}", p))
        })
        .collect()
}

/// Flags that only make sense for a single description file.
fn check_args(cli: &Cli, is_dir: bool) -> Result<(), UsageError> {
    if is_dir && cli.binary.is_some() {
        return Err(UsageError(format!(
            "--binary needs a single XML file, but {} is a directory",
            cli.xml_file
        )));
    }
    Ok(())
}

fn report(package: &Package, run_checks: bool) -> Result<()> {
    if !run_checks {
        return Ok(());
    }
    let diagnostics = validate::validate(package);
    for d in &diagnostics {
        match d.severity {
            Severity::Error => error!("{}: {}", package.name, d),
            Severity::Warning => warn!("{}: {}", package.name, d),
        }
    }
    validate::ensure_valid(package, &diagnostics)?;
    Ok(())
}
