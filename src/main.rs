use almanac::config::{Config, Error as ConfigError};
use almanac::generate;
use almanac::item::parse_corpus;
use anyhow::{Context, Result};
use clap::{App, Arg};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = App::new("almanac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Derives archive, category, and index listing pages from a corpus")
        .arg(
            Arg::with_name("corpus")
                .required(true)
                .help("YAML file listing the content items"),
        )
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .takes_value(true)
                .default_value(".")
                .help("Directory in which to start searching for almanac.yaml"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Write page descriptors here instead of stdout"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log at info level"),
        )
        .get_matches();

    let filter = match matches.is_present("verbose") {
        true => EnvFilter::new("info"),
        false => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(
        Path::new(matches.value_of("corpus").unwrap_or_default()),
        Path::new(matches.value_of("project").unwrap_or(".")),
        matches.value_of("output").map(Path::new),
    ) {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run(corpus_path: &Path, project: &Path, output: Option<&Path>) -> Result<()> {
    let project = project
        .canonicalize()
        .with_context(|| format!("Resolving project directory `{}`", project.display()))?;
    let config = match Config::from_directory(&project) {
        Ok(config) => config,
        Err(ConfigError::ProjectFileNotFound) => {
            tracing::info!(project = %project.display(), "No project file found; using defaults");
            Config::default()
        }
        Err(err) => return Err(err.into()),
    };

    let corpus_file = File::open(corpus_path)
        .with_context(|| format!("Opening corpus file `{}`", corpus_path.display()))?;
    let corpus = parse_corpus(corpus_file)?;
    let generated = generate(&corpus, &config)?;

    let yaml = serde_yaml::to_string(&generated.pages)?;
    match output {
        Some(path) => File::create(path)
            .with_context(|| format!("Creating output file `{}`", path.display()))?
            .write_all(yaml.as_bytes())?,
        None => std::io::stdout().write_all(yaml.as_bytes())?,
    }
    Ok(())
}
