use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use attrpick_engine::{CandidateResolver, PickerController, PickerRuntime, PresentationAdapter};
use attrpick_registry::{AttributeCatalog, BuiltinCatalog, LayeredCatalog};
use attrpick_types::{EntityStore, MemoryStore, PickerEvent, PickerInput, PickerView};
use attrpick_util::{PickerConfig, format_attribute_name};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

#[derive(Debug, Parser)]
#[command(name = "attrpick", version, about = "Pick entity attributes from the command line")]
struct Cli {
    /// Configuration file; defaults to $ATTRPICK_CONFIG_PATH or the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List selectable attributes, for every domain or just one.
    Catalog { domain: Option<String> },
    /// Print the attributes offered for an entity.
    Resolve {
        entity_id: String,
        /// JSON store fixture with `states` and optional `translations`.
        #[arg(long)]
        states: PathBuf,
    },
    /// Replay a JSON array of picker signals and print views and events as JSON lines.
    Replay {
        #[arg(long)]
        states: PathBuf,
        #[arg(long)]
        script: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PickerConfig::load_from(path),
        None => PickerConfig::load(),
    }
    .context("failed to load picker config")?;
    init_tracing(config.log_filter.as_deref());

    let catalog = LayeredCatalog::new(config.extra_domains.clone());
    match cli.command {
        Command::Catalog { domain } => print_catalog(&catalog, domain.as_deref()),
        Command::Resolve { entity_id, states } => resolve_entity(catalog, &entity_id, &states),
        Command::Replay { states, script } => replay(catalog, &config, &states, &script).await,
    }
}

fn init_tracing(configured: Option<&str>) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_catalog(catalog: &LayeredCatalog, domain: Option<&str>) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if let Some(domain) = domain {
        for key in catalog.candidate_keys(domain) {
            writeln!(stdout, "{key}\t{}", format_attribute_name(key))?;
        }
        return Ok(());
    }

    let mut domains: Vec<&str> = BuiltinCatalog.entries().iter().map(|entry| entry.domain).collect();
    domains.extend(
        catalog
            .extended_domains()
            .filter(|domain| BuiltinCatalog.entry(domain).is_none()),
    );
    for domain in domains {
        let line = serde_json::json!({
            "domain": domain,
            "keys": catalog.candidate_keys(domain),
        });
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    let store = MemoryStore::from_path(path).with_context(|| format!("failed to load states from {}", path.display()))?;
    debug!(entities = store.entity_ids().count(), path = %path.display(), "loaded entity store");
    Ok(store)
}

fn resolve_entity(catalog: LayeredCatalog, entity_id: &str, states: &Path) -> Result<()> {
    let store = load_store(states)?;
    let candidates = CandidateResolver::new(catalog).resolve(entity_id, store.snapshot(entity_id));
    let mut stdout = std::io::stdout().lock();
    for key in &candidates {
        writeln!(stdout, "{key}\t{}", format_attribute_name(key))?;
    }
    Ok(())
}

/// Writes each rendered view to stdout as one JSON line.
struct JsonLinesAdapter;

impl PresentationAdapter for JsonLinesAdapter {
    fn render(&mut self, view: Option<&PickerView>) {
        match serde_json::to_string(&serde_json::json!({ "view": view })) {
            Ok(line) => println!("{line}"),
            Err(error) => warn!(%error, "failed to serialize picker view"),
        }
    }
}

/// Build a runtime and apply the store and config defaults as host assignments.
async fn start_runtime<A: PresentationAdapter>(
    catalog: LayeredCatalog,
    config: &PickerConfig,
    store: Arc<dyn EntityStore>,
    adapter: A,
    events: UnboundedSender<PickerEvent>,
) -> PickerRuntime<LayeredCatalog, A> {
    let mut runtime = PickerRuntime::new(PickerController::new(catalog), adapter, events);
    runtime.set_store(Some(store)).await;
    runtime
        .handle(PickerInput::SetAllowCustomValue {
            allow_custom_value: config.allow_custom_value,
        })
        .await;
    runtime
        .handle(PickerInput::SetLabel {
            label: config.label.clone(),
        })
        .await;
    runtime
}

async fn replay(catalog: LayeredCatalog, config: &PickerConfig, states: &Path, script: &Path) -> Result<()> {
    let store: Arc<dyn EntityStore> = Arc::new(load_store(states)?);
    let script_text = fs::read_to_string(script).with_context(|| format!("failed to read script {}", script.display()))?;
    let inputs: Vec<PickerInput> =
        serde_json::from_str(&script_text).with_context(|| format!("failed to parse script {}", script.display()))?;

    let (event_tx, mut event_rx) = unbounded_channel();
    let mut runtime = start_runtime(catalog, config, store, JsonLinesAdapter, event_tx).await;

    for input in inputs {
        runtime.handle(input).await;
        while let Ok(event) = event_rx.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    let stats = runtime.controller().cache_stats();
    debug!(hits = stats.hits, misses = stats.misses, "replay finished");
    runtime.dispose();
    Ok(())
}
