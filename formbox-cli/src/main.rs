//! Formbox CLI
//!
//! Resolves a form definition and prints the layout directives a renderer
//! would apply.
//!
//! Output modes:
//! - default: resolved directive maps as JSON, keyed by node
//! - `--tree`: the sizing tree with declared units per axis
//! - `--measure`: bounds written by intrinsic sizing on a headless surface

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use formbox_common::warning::clear_warnings;
use formbox_layout::intrinsic::{MeasurableSurface, MemorySurface, attach_tree};
use formbox_layout::{RenderMode, Sizing, Viewport, project, resolve, resolve_tree};
use formbox_tree::{FormTree, NodeId};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Inspect the layout of a formbox form definition
#[derive(Parser, Debug)]
#[command(name = "formbox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print resolved directives for every node
    formbox form.json

    # Mobile viewport, as seen in the form editor
    formbox --viewport mobile --authoring form.json

    # Only one node
    formbox --node submit form.json

    # Sizing tree overview
    formbox --tree form.json

    # Run intrinsic sizing and print the corrected bounds
    formbox --measure form.json

    # Parse an inline definition
    formbox --json '{"key": "root", "children": []}'

    # Show sizer activity
    RUST_LOG=formbox_layout=debug formbox --measure form.json
"#)]
struct Cli {
    /// Path to a JSON form definition
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a JSON definition string directly instead of a file
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Which style field set is active (desktop or mobile)
    #[arg(long, default_value = "desktop")]
    viewport: Viewport,

    /// Resolve for the form editor instead of the published form
    #[arg(long)]
    authoring: bool,

    /// Print only the node with this key
    #[arg(long, value_name = "KEY")]
    node: Option<String>,

    /// Print the sizing tree instead of directives
    #[arg(long)]
    tree: bool,

    /// Run intrinsic sizing on a headless surface and print fit box bounds
    #[arg(long)]
    measure: bool,
}

impl Cli {
    const fn mode(&self) -> RenderMode {
        if self.authoring {
            RenderMode::Authoring
        } else {
            RenderMode::Published
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tree = load_tree(&cli)?;
    clear_warnings();
    tracing::debug!(
        nodes = tree.len(),
        viewport = %cli.viewport,
        mode = %cli.mode(),
        "loaded form definition"
    );

    if cli.tree {
        print_sizing_tree(&tree, tree.root(), 0, &cli);
        return Ok(());
    }

    if cli.measure {
        print_measurements(&tree, &cli);
        return Ok(());
    }

    let json = if let Some(ref key) = cli.node {
        let id = tree
            .find(key)
            .with_context(|| format!("no node with key '{key}'"))?;
        serde_json::to_string_pretty(&resolve(&tree, id, cli.viewport, cli.mode()))?
    } else {
        serde_json::to_string_pretty(&resolve_tree(&tree, cli.viewport, cli.mode()))?
    };
    println!("{json}");
    Ok(())
}

/// Load the form tree from CLI arguments
fn load_tree(cli: &Cli) -> Result<FormTree> {
    let source = if let Some(ref json) = cli.json {
        json.clone()
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        anyhow::bail!("a definition file or --json is required")
    };
    FormTree::from_json(&source).context("invalid form definition")
}

fn describe(sizing: Option<Sizing>) -> String {
    match sizing {
        Some(Sizing::Pixel(v)) => format!("{v}px"),
        Some(Sizing::Percent(v)) => format!("{v}%"),
        Some(Sizing::Fit) => "fit".to_string(),
        Some(Sizing::Fill) => "fill".to_string(),
        None => "-".to_string(),
    }
}

/// Recursively print a node with its declared sizing
fn print_sizing_tree(tree: &FormTree, id: NodeId, depth: usize, cli: &Cli) {
    let indent = "  ".repeat(depth);
    let (Some(node), Some(ctx)) = (tree.get(id), project(tree, id, cli.viewport, cli.mode()))
    else {
        return;
    };

    let kind = if node.is_element() { "element" } else { "container" };
    let width = describe(ctx.style.width);
    let height = describe(ctx.style.height);
    print!(
        "{indent}{} {} w={} h={}",
        node.key.bold(),
        kind.dimmed(),
        width.cyan(),
        height.cyan()
    );
    if !node.is_element() {
        print!(" {}", ctx.style.flow_axis().yellow());
    }
    if let Some(total) = ctx.children_width {
        print!(" children={}", format!("{total}px").green());
    }
    println!();

    for &child in tree.children(id) {
        print_sizing_tree(tree, child, depth + 1, cli);
    }
}

/// Attach sizers to every fit box and print the bounds they settle on
fn print_measurements(tree: &FormTree, cli: &Cli) {
    let mut surface = MemorySurface::from_tree(tree, cli.viewport, cli.mode());
    let sizers = attach_tree(tree, &mut surface, cli.viewport, cli.mode());

    println!("=== Intrinsic Sizing ({} sizers) ===\n", sizers.len());
    for id in tree.descendants(tree.root()) {
        let Some(node) = tree.get(id) else {
            continue;
        };
        if cli.node.as_ref().is_some_and(|key| *key != node.key) {
            continue;
        }
        let bounds = surface.bounds(id);
        let width = bounds
            .width
            .map_or_else(|| "auto".to_string(), |v| v.to_string());
        let max_width = bounds
            .max_width
            .map_or_else(|| "none".to_string(), |v| v.to_string());
        println!(
            "{:<24} rendered={:<10} width={:<28} max-width={}",
            node.key.bold(),
            format!("{:.1}", surface.rendered_width(id)),
            width.cyan(),
            max_width.green()
        );
    }

    for sizer in sizers {
        sizer.detach(&mut surface);
    }
}
