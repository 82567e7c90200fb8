//! # polyglot CLI
//!
//! Lemmatizes JSON-lines messages, choosing a lemmatizer per message
//! language.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polyglot_core::{
    DictionaryLemmatizer, DictionaryLemmatizerFactory, Message, Resolver, ResolverConfig,
    StrategyRegistry,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(about = "Multi-language lemmatization with per-language fallback")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lemmatize JSON-lines messages from a file or stdin
    Lemmatize {
        #[command(flatten)]
        setup: Setup,

        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Show which strategy each language resolves to
    Resolve {
        #[command(flatten)]
        setup: Setup,

        /// Language codes to resolve
        #[arg(required = true)]
        languages: Vec<String>,
    },

    /// List registered strategies
    Strategies {
        #[command(flatten)]
        setup: Setup,
    },
}

#[derive(Args, Debug)]
struct Setup {
    /// Resolver config file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dictionary lemmatizer for a language, as LANG=FILE (repeatable)
    #[arg(short, long = "dictionary", value_parser = parse_dictionary_arg)]
    dictionaries: Vec<(String, PathBuf)>,
}

fn parse_dictionary_arg(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((language, path)) if !language.is_empty() && !path.is_empty() => {
            Ok((language.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected LANG=FILE, got '{}'", value)),
    }
}

impl Setup {
    fn load_config(&self) -> Result<ResolverConfig> {
        match &self.config {
            Some(path) => ResolverConfig::from_yaml_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(ResolverConfig::default()),
        }
    }

    /// Built-in strategies plus one dictionary lemmatizer per `--dictionary`.
    fn build_registry(&self, config: &ResolverConfig) -> Result<StrategyRegistry> {
        let mut registry = StrategyRegistry::with_defaults();
        for (language, path) in &self.dictionaries {
            let identifier = config.candidate_identifier(language);
            let lemmatizer = DictionaryLemmatizer::from_yaml_file(identifier.clone(), path)
                .with_context(|| format!("loading dictionary {}", path.display()))?;
            info!(language = %language, identifier = %identifier, entries = lemmatizer.len(), "Dictionary loaded");
            registry.register(Arc::new(DictionaryLemmatizerFactory::new(identifier, lemmatizer)));
        }
        Ok(registry)
    }

    fn build_resolver(&self) -> Result<Resolver> {
        let config = self.load_config()?;
        let registry = self.build_registry(&config)?;
        Ok(Resolver::try_new(config, Arc::new(registry))?)
    }
}

/// Lemmatize every non-empty line of `input`, writing one JSON message per line.
///
/// Lines that are not valid messages are logged and skipped.
fn lemmatize(resolver: &Resolver, input: impl BufRead, mut output: impl Write) -> Result<usize> {
    let mut count = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let message: Message = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping invalid message");
                continue;
            }
        };

        let message = resolver.process(message.tokenized());
        serde_json::to_writer(&mut output, &message)?;
        writeln!(output)?;
        count += 1;
    }
    output.flush()?;
    Ok(count)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Lemmatize { setup, input } => {
            let resolver = setup.build_resolver()?;
            let stdout = io::stdout();
            let output = BufWriter::new(stdout.lock());

            let count = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    lemmatize(&resolver, BufReader::new(file), output)?
                }
                None => lemmatize(&resolver, io::stdin().lock(), output)?,
            };
            info!(messages = count, languages = resolver.cache().len(), "Lemmatization finished");
        }
        Commands::Resolve { setup, languages } => {
            let resolver = setup.build_resolver()?;
            for language in &languages {
                let name = resolver
                    .resolve(language)
                    .map(|s| s.name().to_string())
                    .unwrap_or_else(|| "<none>".to_string());
                println!("{}\t{}", language, name);
            }
        }
        Commands::Strategies { setup } => {
            let config = setup.load_config()?;
            let registry = setup.build_registry(&config)?;
            for identifier in registry.available_identifiers() {
                let marker = if identifier == config.default_identifier() { " (default)" } else { "" };
                println!(
                    "{}\t{}{}",
                    identifier,
                    registry.description(identifier).unwrap_or_default(),
                    marker
                );
            }
        }
    }

    Ok(())
}
