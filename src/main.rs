use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use console::style;
use sitetheme::{assets, config, date, logging, parser, render::Renderer, ThemeConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_CONFIG: &str = "theme.toml";

#[derive(ClapParser)]
#[command(author, version, about = "sitetheme - theme configuration for a static blog.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Theme configuration file. Defaults are used when `theme.toml` is absent.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Write the default theme.toml.
    Init,
    /// Validate the configuration file.
    Check,
    /// Print the effective configuration.
    Show {
        #[arg(short, long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Print a date using the configured date settings.
    Date { date: String },
    /// Render one Markdown post to HTML.
    Post {
        file: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render the post list for a directory of Markdown posts.
    Index {
        dir: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    match cli.command {
        Commands::Init => {
            init_project(&path)?;
            eprintln!("{} Done in {:.2}s.", style("success").cyan(), start.elapsed().as_secs_f32());
        }
        Commands::Check => check(&path)?,
        Commands::Show { format } => {
            let theme = load(&path, cli.config.is_some())?;
            let text = match format {
                Format::Toml => theme.to_toml()?,
                Format::Json => serde_json::to_string_pretty(theme)?,
            };
            println!("{}", text.trim_end());
        }
        Commands::Date { date: value } => {
            let theme = load(&path, cli.config.is_some())?;
            let parsed = date::parse_date(&value).with_context(|| format!("unrecognized date `{}`", value))?;
            println!("{}", date::format_date(parsed, &theme.date));
        }
        Commands::Post { file, out } => {
            let theme = load(&path, cli.config.is_some())?;
            let raw = fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let slug = file.file_stem().and_then(|s| s.to_str()).unwrap_or("post");
            let post = parser::parse_frontmatter(&raw, slug);
            let html = Renderer::new()?.render_post(theme, &post)?;
            emit(html, out.as_deref(), start)?;
        }
        Commands::Index { dir, out } => {
            let theme = load(&path, cli.config.is_some())?;
            let posts = parser::load_posts(&dir)?;
            let html = Renderer::new()?.render_index(theme, &posts)?;
            emit(html, out.as_deref(), start)?;
        }
    }
    Ok(())
}

/// Loads and installs the process-wide configuration.
///
/// An explicitly passed file must exist; the implicit `theme.toml` may not.
fn load(path: &Path, explicit: bool) -> anyhow::Result<&'static ThemeConfig> {
    let theme = if explicit {
        ThemeConfig::load(path)?
    } else {
        ThemeConfig::load_or_default(path)?
    };
    Ok(config::install(theme)?)
}

fn check(path: &Path) -> anyhow::Result<()> {
    let src = fs::read_to_string(path).with_context(|| {
        format!("{} not found. Run 'sitetheme init' to begin.", path.display())
    })?;
    let theme = ThemeConfig::load(path)?;

    for note in config::lint(&src, &theme) {
        eprintln!("{} {}", style("note").yellow(), note);
    }
    eprintln!(
        "{} {} is valid (date format {})",
        style("success").cyan(),
        path.display(),
        style(theme.date.date_format).dim()
    );
    Ok(())
}

fn init_project(path: &Path) -> anyhow::Result<()> {
    eprintln!("{} Writing default theme config...", style("[1/1]").dim());
    if path.exists() {
        eprintln!("{} {} already exists, leaving it alone.", style("skip").yellow(), path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, assets::default_config()?)?;
    Ok(())
}

fn emit(html: String, out: Option<&Path>, start: Instant) -> anyhow::Result<()> {
    match out {
        Some(dest) => {
            fs::write(dest, html).with_context(|| format!("failed to write {}", dest.display()))?;
            eprintln!(
                "{} wrote {} in {:.2}s.",
                style("success").cyan(),
                dest.display(),
                start.elapsed().as_secs_f32()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}
