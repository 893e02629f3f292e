use std::fmt::Display;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use er_core::Category;
use er_core::core_api::{
    Catalog, CatalogCache, CoreError, CoreErrorCode, Engine, FilterCriteria, OwnershipFilter,
    Session, apply, cross_reference, unmatched,
};
use er_core::layout::SLOT_COUNT;
use er_render::{
    JsonStyle, TextRenderOptions, render_checklist_json, render_checklist_text,
    render_decode_json, render_ids_text, render_slot_list, render_slots_json,
    render_unmatched_json, render_unmatched_text,
};
use serde_json::Value as JsonValue;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    /// Character slot to read; defaults to the first named slot.
    #[arg(long, value_parser = parse_slot)]
    slot: Option<usize>,
    #[arg(long = "list-slots")]
    list_slots: bool,
    /// Catalog JSON file; repeat to layer expansion data over the base game.
    #[arg(long = "catalog", value_name = "FILE", env = "ER_SE_CATALOG")]
    catalogs: Vec<PathBuf>,
    #[arg(
        long,
        value_name = "all|owned|missing",
        value_parser = parse_status,
        default_value = "all"
    )]
    status: OwnershipFilter,
    #[arg(long)]
    region: Option<String>,
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    #[arg(long)]
    search: Option<String>,
    /// Print the decoded item identifiers and skip the catalog.
    #[arg(long, conflicts_with_all = ["list_slots", "unmatched"])]
    ids: bool,
    /// Print decoded identifiers that no catalog entry mentions.
    #[arg(long, conflicts_with = "list_slots")]
    unmatched: bool,
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            status: self.status,
            region: self.region.clone(),
            category: self.category,
            search: self.search.clone(),
        }
    }

    fn needs_catalog(&self) -> bool {
        !self.list_slots && !self.ids
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.needs_catalog() && cli.catalogs.is_empty() {
        eprintln!("a catalog is required: pass --catalog <FILE> or set ER_SE_CATALOG");
        process::exit(2);
    }

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });

    let engine = Engine::new();
    let session = engine.open_bytes(&bytes).unwrap_or_else(|e| {
        eprintln!("Error parsing save file: {}", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    if cli.list_slots {
        let slots = session
            .slot_names()
            .unwrap_or_else(|e| exit_with("Error reading slot names", e));
        if cli.json {
            print_json(&render_slots_json(&slots, JsonStyle::CanonicalV1));
        } else {
            print!("{}", render_slot_list(&slots));
        }
        return;
    }

    let slot = resolve_slot(&cli, &session);
    let outcome = session
        .decode_slot(slot)
        .unwrap_or_else(|e| exit_with("Error decoding slot", e));

    if cli.ids {
        if cli.json {
            print_json(&render_decode_json(&outcome, JsonStyle::CanonicalV1));
        } else {
            print!("{}", render_ids_text(&outcome));
        }
        return;
    }

    let catalog =
        load_catalogs(&cli.catalogs).unwrap_or_else(|e| exit_with("Error loading catalog", e));
    info!(entries = catalog.len(), "catalog loaded");

    if cli.unmatched {
        let missing = unmatched(outcome.ids(), &catalog);
        if cli.json {
            print_json(&render_unmatched_json(&missing, JsonStyle::CanonicalV1));
        } else {
            print!("{}", render_unmatched_text(&missing));
        }
        return;
    }

    let result = cross_reference(outcome.ids(), &catalog);
    let criteria = cli.criteria();
    let view = apply(&result.items, &criteria);
    debug!(shown = view.items.len(), total = result.items.len(), "filter applied");

    if cli.json {
        print_json(&render_checklist_json(
            &outcome,
            &result,
            &criteria,
            &view,
            JsonStyle::CanonicalV1,
        ));
    } else {
        let options = TextRenderOptions {
            verbose: cli.verbose,
        };
        print!("{}", render_checklist_text(&outcome, &result, &view, options));
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "er_core=debug,er_se=debug"
    } else {
        "er_core=warn,er_se=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_slot(cli: &Cli, session: &Session<'_>) -> usize {
    if let Some(slot) = cli.slot {
        return slot;
    }
    let first = session
        .first_occupied_slot()
        .unwrap_or_else(|e| exit_with("Error reading slot names", e));
    match first {
        Some(slot) => {
            debug!(slot, "no --slot given, using first named slot");
            slot
        }
        None => {
            eprintln!("No character slots in use; pass --slot to read one anyway");
            process::exit(1);
        }
    }
}

/// Loads and layers catalogs in argument order. Repeated paths are read once.
fn load_catalogs(paths: &[PathBuf]) -> Result<Catalog, CoreError> {
    let mut cache = CatalogCache::new();
    let mut merged = Catalog::new();
    for path in paths {
        let key = path.to_string_lossy();
        let catalog = cache.get_or_load(&key, || load_catalog(path))?;
        merged.extend(catalog.clone());
    }
    Ok(merged)
}

fn load_catalog(path: &Path) -> Result<Catalog, CoreError> {
    let file = File::open(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to open {}: {e}", path.display()),
        )
    })?;
    Catalog::from_reader(BufReader::new(file)).map_err(|e| e.in_file(path))
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with("Error rendering JSON output", e));
    println!("{rendered}");
}

fn exit_with(context: &str, err: impl Display) -> ! {
    eprintln!("{context}: {err}");
    process::exit(1);
}

fn parse_slot(value: &str) -> Result<usize, String> {
    let slot: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid slot '{value}', expected a number"))?;
    if slot >= SLOT_COUNT {
        return Err(format!(
            "slot {slot} out of range, expected 0-{}",
            SLOT_COUNT - 1
        ));
    }
    Ok(slot)
}

fn parse_status(value: &str) -> Result<OwnershipFilter, String> {
    value.parse()
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse()
}
