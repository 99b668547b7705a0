//! CLI command implementations.

use std::path::{Path, PathBuf};

use crate::command::RangeStore;
use crate::config::{BuildConfig, IndexDocumentConfig};
use crate::engine::{build_index, collect_indexes, IndexEngine};
use crate::format::{DocumentReader, DocumentWriter};
use crate::types::{now_rfc3339, IndexResult, IndexSet, IndexWarning};

/// Index documents selected by `only`, or every configured one.
fn selected_documents<'a>(
    config: &'a BuildConfig,
    only: Option<&Path>,
) -> IndexResult<Vec<&'a IndexDocumentConfig>> {
    match only {
        Some(path) => Ok(vec![config.index_document(path)?]),
        None => Ok(config.indexes.iter().collect()),
    }
}

fn warning_strings(warnings: &[IndexWarning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

fn count_entries(indexes: &IndexSet) -> (usize, usize, usize) {
    let groups = indexes.iter().map(|index| index.groups.len()).sum();
    let mains = indexes
        .iter()
        .flat_map(|index| &index.groups)
        .map(|group| group.entries.len())
        .sum();
    let subs = indexes
        .iter()
        .flat_map(|index| &index.groups)
        .flat_map(|group| &group.entries)
        .map(|main_entry| main_entry.subentries.len())
        .sum();
    (groups, mains, subs)
}

/// Build every configured index document (or just `only`) and write the
/// expanded documents.
pub fn cmd_build(config_path: &Path, only: Option<&Path>, json: bool) -> IndexResult<()> {
    let config = BuildConfig::load_from_file(config_path)?;
    let writer = DocumentWriter::new();
    let mut summaries = Vec::new();

    for index in selected_documents(&config, only)? {
        let output = build_index(&config, index)?;
        let destination = config.output_path(index);
        match &destination {
            Some(out) => writer.write_to_file(&output.document, out)?,
            None => writer.write_to(&output.document, &mut std::io::stdout().lock())?,
        }

        let mut entries_written = 0;
        for (entry, tree) in &output.entries {
            if let Some(out) = config.entry_output_path(index, entry) {
                log::debug!("writing annotated {} -> {}", entry.display(), out.display());
                writer.write_to_file(tree, &out)?;
                entries_written += 1;
            }
        }

        let (groups, mains, subs) = count_entries(&output.indexes);
        if json {
            summaries.push(serde_json::json!({
                "document": index.path.display().to_string(),
                "output": destination.as_ref().map(|p| p.display().to_string()),
                "commands": output.report.commands(),
                "expanded": output.expanded,
                "entries_written": entries_written,
                "indexes": output.indexes.len(),
                "groups": groups,
                "main_entries": mains,
                "subentries": subs,
                "warnings": warning_strings(&output.warnings),
            }));
        } else if let Some(out) = &destination {
            println!(
                "Built {} -> {} ({} commands, {} expand sites, {} warnings)",
                index.path.display(),
                out.display(),
                output.report.commands(),
                output.expanded,
                output.warnings.len()
            );
        }
    }

    // Expanded documents on stdout would interleave with the summary.
    let all_to_files = selected_documents(&config, only)?
        .iter()
        .all(|index| index.output.is_some());
    if json && all_to_files {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "built": summaries }))
                .unwrap_or_default()
        );
    }
    Ok(())
}

/// Print the resolved and sorted indexes of every configured document.
pub fn cmd_dump(config_path: &Path, only: Option<&Path>, pretty: bool) -> IndexResult<()> {
    let config = BuildConfig::load_from_file(config_path)?;
    let mut documents = Vec::new();

    for index in selected_documents(&config, only)? {
        let (indexes, warnings) = collect_indexes(&config, index)?;
        documents.push(serde_json::json!({
            "document": index.path.display().to_string(),
            "indexes": indexes,
            "warnings": warning_strings(&warnings),
        }));
    }

    let output = serde_json::json!({
        "generated_at": now_rfc3339(),
        "documents": documents,
    });
    if pretty {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("{}", serde_json::to_string(&output).unwrap_or_default());
    }
    Ok(())
}

/// Scan each document on its own and report what it contains.
pub fn cmd_check(files: &[PathBuf], json: bool) -> IndexResult<()> {
    let mut results = Vec::new();

    for file in files {
        let mut tree = DocumentReader::read_from_file(file)?;
        let mut engine = IndexEngine::new();
        let mut indexes = IndexSet::new();
        let mut ranges = RangeStore::new();
        let report = engine.process_document(&mut tree, &mut indexes, &mut ranges, None)?;
        engine.flush_range_store(ranges);
        let warnings = engine.take_warnings();

        if json {
            results.push(serde_json::json!({
                "file": file.display().to_string(),
                "pages": report.pages,
                "range_starts": report.range_starts,
                "range_ends": report.range_ends,
                "references": report.references,
                "unrecognized": report.unrecognized,
                "parse_errors": report.parse_errors,
                "indexes": indexes.iter().map(|index| index.id.clone()).collect::<Vec<_>>(),
                "warnings": warning_strings(&warnings),
            }));
        } else {
            println!("File: {}", file.display());
            println!("  Pages: {}", report.pages);
            println!("  Range starts: {}", report.range_starts);
            println!("  Range ends: {}", report.range_ends);
            println!("  References: {}", report.references);
            println!("  Unrecognized: {}", report.unrecognized);
            println!("  Parse errors: {}", report.parse_errors);
            let ids: Vec<&str> = indexes.iter().map(|index| index.id.as_str()).collect();
            println!("  Indexes: {}", ids.join(", "));
            for warning in &warnings {
                println!("  warning: {}", warning);
            }
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "files": results }))
                .unwrap_or_default()
        );
    }
    Ok(())
}
