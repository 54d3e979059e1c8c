use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;
use log::{info, warn};
use serde::Serialize;

use wad_core::config::{self, CONFIG_FILE_NAME, DocumentFormat, WadConfig};
use wad_core::model::Definition;
use wad_core::swagger::{self, ApiDeclaration, ResourceListing};
use wad_core::translate::{self, export_all_with_options};

#[derive(Parser)]
#[command(
    name = "wad",
    about = "Translate Web API Definitions to and from Swagger 1.2",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a definition as a Swagger 1.2 resource listing and API declarations
    Export {
        /// Path to the definition file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving the Swagger documents
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Serialization format of the written documents
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Import Swagger 1.2 documents into a definition
    Import {
        /// Path to the resource listing
        #[arg(short, long)]
        listing: PathBuf,

        /// Directory holding the API declarations (defaults to the listing's directory)
        #[arg(short, long)]
        declarations: Option<PathBuf>,

        /// Definition file to write; printed as JSON when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate Swagger 1.2 documents
    Validate {
        /// Path to the resource listing
        #[arg(short, long)]
        listing: PathBuf,

        /// Directory holding the API declarations (defaults to the listing's directory)
        #[arg(short, long)]
        declarations: Option<PathBuf>,
    },

    /// Initialize a new wad configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for DocumentFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => DocumentFormat::Json,
            OutputFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// A serialized document ready to be written.
#[derive(Debug)]
struct DocumentFile {
    path: PathBuf,
    content: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            format,
        } => cmd_export(input, output, format),

        Commands::Import {
            listing,
            declarations,
            output,
        } => cmd_import(listing, declarations, output),

        Commands::Validate {
            listing,
            declarations,
        } => cmd_validate(listing, declarations),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "wad", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<WadConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn format_of(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => DocumentFormat::Json,
        _ => DocumentFormat::Yaml,
    }
}

fn load_definition(path: &Path) -> Result<Definition> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let definition = match format_of(path) {
        DocumentFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        DocumentFormat::Yaml => serde_yaml_ng::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
    };
    Ok(definition)
}

fn render<T: Serialize>(value: &T, format: DocumentFormat) -> Result<String> {
    let content = match format {
        DocumentFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
        DocumentFormat::Yaml => serde_yaml_ng::to_string(value)?,
    };
    Ok(content)
}

/// Lay out the listing and its declarations as files named after the
/// listing stem and the section names.
fn document_files(
    listing: &ResourceListing,
    declarations: &IndexMap<String, ApiDeclaration>,
    listing_file: &str,
    format: DocumentFormat,
) -> Result<Vec<DocumentFile>> {
    let ext = format.extension();
    let mut files = vec![DocumentFile {
        path: PathBuf::from(format!("{listing_file}.{ext}")),
        content: render(listing, format)?,
    }];

    for (section, declaration) in declarations {
        if section == listing_file {
            anyhow::bail!(
                "Section {section} collides with the resource listing file {listing_file}.{ext}, \
                 choose another listing file name"
            );
        }
        files.push(DocumentFile {
            path: PathBuf::from(format!("{section}.{ext}")),
            content: render(declaration, format)?,
        });
    }
    Ok(files)
}

/// Write documents to disk under the given base directory.
fn write_files(base: &Path, files: &[DocumentFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// The directory holding the declarations: the given one, else the listing's.
fn declarations_dir(listing: &Path, declarations: Option<PathBuf>) -> PathBuf {
    declarations.unwrap_or_else(|| {
        listing
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

fn cmd_export(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.definition));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let format = format.map(DocumentFormat::from).unwrap_or(cfg.format);

    let definition = load_definition(&input)?;
    eprintln!("Exporting {} → {}", input.display(), output_dir.display());

    let (listing, declarations) = export_all_with_options(&definition, &cfg.export.to_options());
    if declarations.is_empty() {
        warn!("Definition has no resources, only the resource listing is written");
    }

    let files = document_files(&listing, &declarations, &cfg.listing_file, format)?;
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)?;

    eprintln!(
        "Exported {} API declarations in {}",
        files.len() - 1,
        output_dir.display()
    );
    Ok(())
}

fn cmd_import(
    listing_path: PathBuf,
    declarations: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let dir = declarations_dir(&listing_path, declarations);
    let (listing, declarations) = swagger::load_documents(&listing_path, &dir)?;
    info!(
        "Loaded {} API declarations from {}",
        declarations.len(),
        dir.display()
    );

    let definition = translate::import(&listing, &declarations)?;

    match output {
        Some(path) => {
            let content = render(&definition, format_of(&path))?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
            fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Imported {} → {}", listing_path.display(), path.display());
        }
        None => print!("{}", render(&definition, DocumentFormat::Json)?),
    }
    Ok(())
}

fn cmd_validate(listing_path: PathBuf, declarations: Option<PathBuf>) -> Result<()> {
    let dir = declarations_dir(&listing_path, declarations);
    let (listing, declarations) = swagger::load_documents(&listing_path, &dir)?;

    translate::validate(&listing, &declarations)?;
    let title = listing
        .info
        .as_ref()
        .and_then(|i| i.title.as_deref())
        .unwrap_or("(untitled)");
    eprintln!("Valid Swagger {} documents: {}", listing.swagger_version, title);
    eprintln!("  API declarations: {}", declarations.len());

    // Also validate that the documents import successfully
    let definition = translate::import(&listing, &declarations)?;
    let contract = &definition.contract;
    eprintln!("  Resources: {}", contract.resources.len());
    eprintln!(
        "  Operations: {}",
        contract
            .resources
            .iter()
            .map(|r| r.operations.len())
            .sum::<usize>()
    );
    eprintln!("  Representations: {}", contract.representations.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
