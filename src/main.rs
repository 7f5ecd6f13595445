//! Metaforge CLI - inspect game `.meta` files and generate new objects from templates.

mod edits;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;
use tracing_subscriber::EnvFilter;

use metaforge::objects::batch::{self, BatchStats};
use metaforge::objects::WeaponSlot;
use metaforge::prelude::*;

use crate::edits::Edits;

/// Metaforge - game .meta object mapper and generator
#[derive(Parser)]
#[command(name = "metaforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the objects of a document
    Inspect {
        /// Input .meta file
        #[arg(short, long, env = "METAFORGE_INPUT")]
        input: PathBuf,

        /// Dump the loaded document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the values observed per attribute
    Catalog {
        /// Input .meta file
        #[arg(short, long, env = "METAFORGE_INPUT")]
        input: PathBuf,

        /// Only show this attribute
        #[arg(short, long)]
        attribute: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the weapon slot ordering of a weapons document
    Slots {
        /// Input weapons .meta file
        #[arg(short, long, env = "METAFORGE_INPUT")]
        input: PathBuf,
    },

    /// Generate a new object from a template and append it to the output document
    Generate {
        /// Input .meta file holding the template
        #[arg(short, long, env = "METAFORGE_INPUT")]
        input: PathBuf,

        /// Name of the template object
        #[arg(short, long)]
        template: String,

        /// Output directory
        #[arg(short, long, env = "METAFORGE_OUTPUT")]
        output: PathBuf,

        /// Attribute edit, NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_parser = parse_edit)]
        set: Vec<(String, String)>,

        /// JSON object file of attribute edits; arrays hold rows of structured attributes
        #[arg(short, long)]
        edits: Option<PathBuf>,

        /// Output object type key (ped, weap, ...); defaults to the input's type
        #[arg(long)]
        object_type: Option<String>,

        /// Indentation width of the written document
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// Load every .meta/.xml document below a directory
    Batch {
        /// Input directory
        #[arg(short, long, env = "METAFORGE_INPUT")]
        input: PathBuf,

        /// Print the merged catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        report(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input, json } => cmd_inspect(&input, json)?,
        Commands::Catalog { input, attribute, json } => {
            cmd_catalog(&input, attribute.as_deref(), json)?;
        }
        Commands::Slots { input } => cmd_slots(&input)?,
        Commands::Generate {
            input,
            template,
            output,
            set,
            edits,
            object_type,
            indent,
        } => {
            let edits = Edits::collect(edits.as_deref(), set)?;
            cmd_generate(&input, &template, &output, edits, object_type.as_deref(), indent)?;
        }
        Commands::Batch { input, json } => cmd_batch(&input, json)?,
    }

    Ok(())
}

/// Print an error with its category message when it comes from the object mapper.
fn report(err: &anyhow::Error) {
    match err.chain().find_map(|e| e.downcast_ref::<metaforge::Error>()) {
        Some(mapper) => error!("{} ({:#})", mapper.kind().message(), err),
        None => error!("{:#}", err),
    }
}

fn cmd_inspect(input: &Path, json: bool) -> Result<()> {
    let start = Instant::now();
    let document = load_document(input).context("Failed to load document")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!(
        "Loaded {} {} in {:?}",
        document.objects().len(),
        document.object_type().plural(),
        start.elapsed()
    );
    for object in document.objects() {
        println!("{:<40} {:>3} attributes", object.name(), object.len());
    }

    Ok(())
}

fn cmd_catalog(input: &Path, attribute: Option<&str>, json: bool) -> Result<()> {
    let document = load_document(input).context("Failed to load document")?;
    let catalog = document.catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    match attribute {
        Some(name) => {
            let entry = catalog
                .get(name)
                .with_context(|| format!("No values recorded for attribute {}", name))?;
            print_entry(name, entry);
        }
        None => {
            for (name, entry) in catalog.iter() {
                print_entry(name, entry);
            }
            println!("\nTotal: {} attributes", catalog.len());
        }
    }

    Ok(())
}

fn print_entry(name: &str, entry: &CatalogEntry) {
    match entry {
        CatalogEntry::Values(values) => {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            println!("{}: {}", name, values.join(", "));
        }
        CatalogEntry::Bag(bag) => {
            let pairs: Vec<String> = bag.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            println!("{}: {{{}}}", name, pairs.join(" "));
        }
    }
}

fn cmd_slots(input: &Path) -> Result<()> {
    let document = load_document(input).context("Failed to load document")?;
    let slots = document
        .slots()
        .context("Slot ordering is only available for weapons documents")?;

    println!("SlotNavigateOrder:");
    print_slots(&slots.navigate);
    println!("SlotBestOrder:");
    print_slots(&slots.best);

    Ok(())
}

fn print_slots(slots: &[WeaponSlot]) {
    for slot in slots {
        let order = slot.order_number.get("value").map(String::as_str).unwrap_or("-");
        println!("  {:>6}  {}", order, slot.entry);
    }
}

fn cmd_generate(
    input: &Path,
    template: &str,
    output: &Path,
    edits: Edits,
    object_type: Option<&str>,
    indent: usize,
) -> Result<()> {
    let document = load_document(input).context("Failed to load document")?;
    let object_type = match object_type {
        Some(key) => key.parse::<ObjectType>()?,
        None => document.object_type(),
    };

    let template = document.template(template)?;
    let object = edits.apply(template)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let writer = DocumentWriter::new(XmlStyle {
        indent_char: b' ',
        indent_size: indent,
    });
    let path = writer
        .write(&object, output, object_type)
        .context("Failed to write object")?;

    println!("Wrote {} to {}", object.name(), path.display());

    Ok(())
}

fn cmd_batch(input: &Path, json: bool) -> Result<()> {
    let paths: Vec<PathBuf> = walkdir::WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("meta") || e.eq_ignore_ascii_case("xml"))
        })
        .collect();

    println!("Loading {} documents from {}...", paths.len(), input.display());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let entries = batch::load_documents_with_progress(&paths, |_, _| pb.inc(1));
    pb.finish_with_message("Done");

    for entry in &entries {
        if let Err(e) = &entry.result {
            eprintln!("{}: {}", entry.path.display(), e.kind().message());
        }
    }

    let catalog = batch::merged_catalog(entries.iter().filter_map(|e| e.result.as_ref().ok()));
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    }

    let stats = BatchStats::from_entries(&entries);
    println!(
        "Loaded {} documents ({} objects, {} attributes) in {:?} ({} errors)",
        stats.loaded,
        stats.objects,
        catalog.len(),
        start.elapsed(),
        stats.failed
    );

    Ok(())
}

fn parse_edit(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", s))?;
    if name.is_empty() {
        return Err(format!("missing attribute name in {:?}", s));
    }
    Ok((name.to_string(), value.to_string()))
}
