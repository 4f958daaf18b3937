use anyhow::{Context, Result};
use clap::Parser;
use pagewright::build::build_site;
use pagewright::config::{Config, PROJECT_FILE};
use pagewright::source::ManifestSource;
use pagewright::write::{write_descriptors, write_to_path};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Derives the page set of a blog and prints it as JSON.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// The project directory; `pagewright.yaml` is searched for here and in
    /// its parents.
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// The content manifest, overriding the project file's `content`. With
    /// this flag the project file is optional.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Where to write the page descriptors. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Posts per archive page, overriding the project file's `page_size`.
    #[arg(long)]
    page_size: Option<NonZeroUsize>,

    /// Log each emitted page.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match cli.verbose {
            true => "debug",
            false => "info",
        },
    ))
    .init();

    let mut config = match (Config::find_project_file(&cli.project), cli.content) {
        (Some(path), content) => {
            let mut config = Config::from_project_file(&path)
                .with_context(|| format!("Loading configuration `{}`", path.display()))?;
            if let Some(content) = content {
                config.content = content;
            }
            config
        }
        (None, Some(content)) => {
            log::info!("no `{}` found, using defaults", PROJECT_FILE);
            Config {
                content,
                ..Config::default()
            }
        }
        (None, None) => Config::from_directory(&cli.project)?,
    };
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    let source = ManifestSource::new(&config.content);
    let pages = build_site(&config, &source).context("Building site")?;

    match &cli.output {
        Some(path) => write_to_path(path, &pages)
            .with_context(|| format!("Writing `{}`", path.display()))?,
        None => write_descriptors(std::io::stdout().lock(), &pages)?,
    }
    Ok(())
}
