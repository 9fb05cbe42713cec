use std::io::Read;
use std::ops::ControlFlow;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value as Json;
use tangle_merge::{MergeOptions, Merger};
use tangle_types::{Heap, Value};
use tangle_walk::{WalkOptions, Walker};
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &config),
        Command::Walk(args) => cmd_walk(args, &config),
    }
}

fn cmd_merge(args: MergeArgs, config: &CliConfig) -> anyhow::Result<()> {
    let options = config.merge_options(&args);
    let documents = args
        .files
        .iter()
        .map(|file| read_document(file))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let merged = merge_documents(&documents, options)?;
    let rendered = if args.compact {
        serde_json::to_string(&merged)?
    } else {
        serde_json::to_string_pretty(&merged)?
    };
    println!("{rendered}");
    eprintln!("{} Merged {} documents", "✓".green().bold(), documents.len().to_string().bold());
    Ok(())
}

fn cmd_walk(args: WalkArgs, config: &CliConfig) -> anyhow::Result<()> {
    let options = config.walk_options(&args);
    let document = read_document(&args.file)?;
    let lines = walk_document(&document, options, args.limit)?;
    for line in &lines {
        println!("{line}");
    }
    eprintln!("{} Visited {} nodes", "✓".green().bold(), lines.len().to_string().bold());
    Ok(())
}

/// Merge `documents` left to right, the first being the target.
pub fn merge_documents(documents: &[Json], options: MergeOptions) -> anyhow::Result<Json> {
    let mut heap = Heap::new();
    let values: Vec<Value> = documents.iter().map(|doc| heap.import_json(doc)).collect();

    let result = Merger::new()
        .with_options(options)
        .merge_all(&mut heap, &values)?;
    debug!(containers = heap.len(), "merge complete");

    if result.is_undefined() {
        return Ok(Json::Null);
    }
    Ok(heap.export_json(&result)?)
}

/// One line per visited node: `path: kind` for containers and
/// `path = json` for primitives. Stops after `limit` nodes.
pub fn walk_document(
    document: &Json,
    options: WalkOptions,
    limit: Option<usize>,
) -> anyhow::Result<Vec<String>> {
    let mut heap = Heap::new();
    let root = heap.import_json(document);
    let walker = Walker::with_options(&heap, options);

    let mut lines = Vec::new();
    let mut failure = None;
    walker.walk_with_path(&root, |path, value| {
        if limit.is_some_and(|max| lines.len() >= max) {
            return ControlFlow::Break(());
        }
        let location = render_path(path);
        match heap.kind_of(value) {
            Some(kind) => lines.push(format!("{location}: {kind}")),
            None => match heap.export_json(value) {
                Ok(json) => lines.push(format!("{location} = {json}")),
                Err(err) => {
                    failure = Some(err);
                    return ControlFlow::Break(());
                }
            },
        }
        ControlFlow::Continue(())
    });

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(lines),
    }
}

fn render_path(path: &[String]) -> String {
    let mut rendered = String::from("$");
    for segment in path {
        if segment.parse::<usize>().is_ok() {
            rendered.push_str(&format!("[{segment}]"));
        } else {
            rendered.push('.');
            rendered.push_str(segment);
        }
    }
    rendered
}

fn read_document(file: &str) -> anyhow::Result<Json> {
    let text = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading standard input")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {file} as JSON"))
}
