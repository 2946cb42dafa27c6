use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use codenav::config::Config;
use codenav::{Catalog, Hierarchy, loader, report};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "codenav.toml";

/// Code navigator page generator
#[derive(Parser, Debug)]
#[command(name = "codenav")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the tables, render the page and write it out
    Build {
        #[command(flatten)]
        inputs: Inputs,

        /// Reference HTML template
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the tables and print index and relationship diagnostics
    Inspect {
        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Configuration file (default: ./codenav.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the schema, template and table dumps
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Schema manifest
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Fail on duplicate primary keys instead of keeping the last row
    #[arg(long)]
    strict_keys: bool,
}

impl Inputs {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG))?,
            None => Config::default(),
        };
        if let Some(dir) = &self.base_dir {
            config.base_dir = dir.clone();
        }
        if let Some(schema) = &self.schema {
            config.schema = schema.clone();
        }
        if self.strict_keys {
            config.strict_keys = true;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_hierarchy(config: &Config) -> anyhow::Result<Hierarchy> {
    let schema = loader::load_schema(&config.schema_path())?;
    let data = loader::load_dataset(&config.base_dir, &config.tables)?;
    Hierarchy::with_options(schema, data, config.duplicate_keys())
        .context("Failed to build data hierarchy")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Build {
            inputs,
            template,
            output,
        } => {
            let mut config = inputs.config()?;
            if let Some(template) = template {
                config.template = template;
            }
            if let Some(output) = output {
                config.output = output;
            }

            let hierarchy = load_hierarchy(&config)?;
            let template = loader::load_template(&config.template_path())?;
            let html = codenav::generate(&hierarchy, &template, &config.selectors)
                .context("Failed to generate page")?;

            let output = config.output_path();
            loader::write_output(&output, &html)?;
            tracing::info!("HTML file generated: {}", output.display());
        }
        Command::Inspect { inputs } => {
            let config = inputs.config()?;
            let hierarchy = load_hierarchy(&config)?;
            let catalog = Catalog::build(&hierarchy).context("Failed to build library catalog")?;
            print!("{}", report::render(&hierarchy, &catalog));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
