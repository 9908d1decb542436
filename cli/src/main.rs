//! paratag CLI - render tagged PDF regions as nested HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paratag::render::{entity, escape};
use paratag::{
    HeadingClassifier, JsonFormat, MarkupOptions, MemoryProvider, NestingOrder, PageSelection,
    Paratag, RegionDocument, Session, TextProvider,
};

#[derive(Parser)]
#[command(name = "paratag")]
#[command(version)]
#[command(about = "Render tagged PDF regions as nested, entity-safe HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a region export as HTML
    Html {
        /// Region export (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render a single page (1-indexed) as a fragment
        #[arg(long)]
        page: Option<usize>,

        /// Page range for the whole document (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Page text dump used for pages without regions
        #[arg(long, value_name = "FILE")]
        text: Option<PathBuf>,

        /// Do not wrap the output in an HTML document
        #[arg(long)]
        fragment: bool,

        /// Keep non-ASCII characters instead of converting them to entities
        #[arg(long)]
        no_entities: bool,

        /// Normalize text to NFC before conversion
        #[arg(long)]
        nfc: bool,
    },

    /// Convert non-ASCII characters of a file to HTML entities
    Entities {
        /// Input text or HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Decode entities back to characters instead
        #[arg(long)]
        decode: bool,

        /// Also escape the result, keeping only <b>/<i> pairs and entities
        #[arg(long, conflicts_with = "decode")]
        escape: bool,
    },

    /// Detect regions from a page text dump
    Detect {
        /// Page text dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output region export (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Source PDF name recorded in the export
        #[arg(long)]
        file: Option<String>,

        /// Infer heading tags from font size
        #[arg(long)]
        headings: bool,

        /// Nesting order for bold italic spans
        #[arg(long, value_enum, default_value = "bold-outside")]
        nesting: Nesting,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show region statistics of an export
    Info {
        /// Region export (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Nesting {
    /// <b><i>text</i></b>
    BoldOutside,
    /// <i><b>text</b></i>
    ItalicOutside,
}

impl From<Nesting> for NestingOrder {
    fn from(nesting: Nesting) -> Self {
        match nesting {
            Nesting::BoldOutside => NestingOrder::BoldOutsideItalic,
            Nesting::ItalicOutside => NestingOrder::ItalicOutsideBold,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            page,
            pages,
            text,
            fragment,
            no_entities,
            nfc,
        }) => cmd_html(
            &input,
            output.as_deref(),
            page,
            pages.as_deref(),
            text.as_deref(),
            fragment,
            !no_entities,
            nfc,
        ),
        Some(Commands::Entities {
            input,
            output,
            decode,
            escape,
        }) => cmd_entities(&input, output.as_deref(), decode, escape),
        Some(Commands::Detect {
            input,
            output,
            file,
            headings,
            nesting,
            compact,
        }) => cmd_detect(
            &input,
            output.as_deref(),
            file,
            headings,
            nesting,
            compact,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: paratag <COMMAND> <FILE>".yellow());
            println!("       paratag --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    page: Option<usize>,
    pages: Option<&str>,
    text: Option<&Path>,
    fragment: bool,
    auto_entities: bool,
    nfc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let loaded = Paratag::new()
        .with_auto_entities(auto_entities)
        .with_unicode_normalization(nfc)
        .with_pages(page_selection)
        .with_shell(!fragment)
        .load_file(input)?;

    let html = match page {
        Some(0) => return Err("Pages are numbered from 1".into()),
        Some(n) => {
            let body = loaded.to_html_page(n - 1)?;
            if fragment {
                body
            } else {
                paratag::render::wrap_document(&body)
            }
        }
        None => match text {
            Some(dump) => loaded.to_html_document_with(&MemoryProvider::from_file(dump)?)?,
            None => loaded.to_html_document()?,
        },
    };

    write_output(output, &html)
}

fn cmd_entities(
    input: &Path,
    output: Option<&Path>,
    decode: bool,
    escape_markup: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;

    let converted = if decode {
        entity::decode(&content)
    } else if escape_markup {
        escape::escape(&entity::transcode(&content))
    } else {
        entity::transcode(&content)
    };

    write_output(output, &converted)
}

fn cmd_detect(
    input: &Path,
    output: Option<&Path>,
    file: Option<String>,
    headings: bool,
    nesting: Nesting,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = MemoryProvider::from_file(input)?;
    let page_count = provider.page_count();
    let file = file.unwrap_or_else(|| input.display().to_string());

    let options = MarkupOptions::new().with_nesting(nesting.into());
    let mut session = Session::new(provider, file)
        .with_options(options)
        .with_classifier(HeadingClassifier::new());

    let pb = ProgressBar::new(page_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut detected = 0;
    for page_index in 0..page_count {
        pb.set_message(format!("page {}", page_index + 1));
        let added = session.auto_detect(page_index)?;
        detected += added;

        if headings && added > 0 {
            if let Err(e) = session.infer_headings(page_index) {
                if !e.is_no_data() {
                    return Err(e.into());
                }
                log::warn!("page {}: {}", page_index + 1, e);
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{} regions", detected));

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = paratag::render::to_json(session.document(), format)?;
    write_output(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let doc: RegionDocument = serde_json::from_str(&data)?;

    println!("{}", "Region Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if !doc.file.is_empty() {
        println!("{}: {}", "Source".bold(), doc.file);
    }
    println!("{}: {}", "Pages".bold(), doc.pages.len());
    println!("{}: {}", "Regions".bold(), doc.region_count());

    println!();
    println!("{}", "Per Page".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for &page_index in doc.pages.keys() {
        let counts = doc
            .tag_counts(page_index)
            .iter()
            .map(|(tag, n)| format!("{}={}", tag, n))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{} {}: {}", "Page".bold(), page_index + 1, counts);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paratag".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Tagged PDF region to HTML tool");
    println!();
    println!("License: MIT");
}
