use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use mdforge::generate::{changelog_json, parse_entries, render_changelog, write_rule_files};
use mdforge::{Config, Result, validate, wrap_markdown, write_markdown, write_text};

#[derive(Parser)]
#[command(name = "mdforge")]
#[command(about = "Generate and check project markdown documents")]
struct Cli {
    /// Config file (defaults to mdforge.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a changelog from a JSON array of entries
    Changelog {
        /// Input JSON file
        entries: PathBuf,

        /// Output file (defaults to CHANGELOG.md or CHANGELOG.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Only include the newest N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the agent rule files into a project
    Rules {
        /// Project root
        #[arg(default_value = ".")]
        project: PathBuf,
    },
    /// Re-wrap long prose lines in a markdown file
    Wrap {
        input: PathBuf,

        /// Column width (defaults to the configured width)
        #[arg(short, long)]
        width: Option<usize>,

        /// Rewrite the file instead of printing to stdout
        #[arg(short, long)]
        in_place: bool,
    },
    /// Check that a markdown file parses cleanly
    Check { input: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("mdforge.toml"));
    let config = Config::load(&config_path);

    if let Err(e) = run(cli.command, &config) {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Changelog {
            entries,
            output,
            format,
            limit,
        } => {
            let entries = parse_entries(&fs::read_to_string(&entries)?)?;
            let limit = limit.or(config.changelog.limit);

            let (content, default_name) = match format {
                Format::Markdown => {
                    let mut changelog = config.changelog.clone();
                    changelog.limit = limit;
                    (render_changelog(&entries, &changelog)?, "CHANGELOG.md")
                }
                Format::Json => (changelog_json(&entries, limit)?, "CHANGELOG.json"),
            };

            let output = output.unwrap_or_else(|| PathBuf::from(default_name));
            match format {
                Format::Markdown => write_markdown(&output, &content)?,
                Format::Json => write_text(&output, &content)?,
            }
            println!("Created {}", output.display());
        }
        Command::Rules { project } => {
            let today = chrono::Local::now().date_naive();
            for path in write_rule_files(&project, &config.rules, today)? {
                println!("Created {}", path.display());
            }
        }
        Command::Wrap {
            input,
            width,
            in_place,
        } => {
            let content = fs::read_to_string(&input)?;
            let wrapped = wrap_markdown(&content, width.unwrap_or(config.wrap.width));
            if in_place {
                write_markdown(&input, &wrapped)?;
            } else {
                print!("{}", wrapped);
            }
        }
        Command::Check { input } => {
            check(&input)?;
            println!("{}: ok", input.display());
        }
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    validate(&content)?;
    Ok(())
}
