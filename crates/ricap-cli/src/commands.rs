use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{CellAlignment, Table};
use tracing::info;

use ricap_cli::config::{ResolvedConfig, env_keywords_dir, load_config_file};
use ricap_cli::pipeline::{classify_notes, load_keyword_tables, write_outputs};
use ricap_cli::summary::{align_column, apply_table_style, domain_cell, header_cell};
use ricap_cli::types::ClassifyReport;
use ricap_classify::KeywordTables;
use ricap_model::ClassificationDomain;

use crate::cli::{ClassifyArgs, KeywordArgs};

fn resolve_config(keywords: &KeywordArgs, args: Option<&ClassifyArgs>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("read working directory")?;
    let file = load_config_file(keywords.config.as_deref(), &cwd).context("load config")?;
    let overrides = match args {
        Some(args) => args.overrides(),
        None => keywords.overrides(),
    };
    Ok(ResolvedConfig::resolve(
        &overrides,
        file.as_ref(),
        env_keywords_dir(),
    ))
}

pub fn run_categories(args: &KeywordArgs) -> Result<()> {
    let config = resolve_config(args, None)?;
    let tables = load_keyword_tables(&config)?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Category"),
        header_cell("Keywords"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for domain in ClassificationDomain::ALL {
        for category in tables.get(domain).categories() {
            table.add_row(vec![
                domain_cell(domain),
                category.name.clone().into(),
                category.keywords.len().into(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_classify(args: &ClassifyArgs) -> Result<(ClassifyReport, KeywordTables)> {
    let config = resolve_config(&args.keywords, Some(args))?;
    let options = config.classify_options();
    let tables = load_keyword_tables(&config)?;
    let run = classify_notes(&args.notes, &tables, &options)?;

    let outputs = if args.dry_run {
        info!("dry run, no files written");
        Vec::new()
    } else {
        let output_dir = output_dir(args.output_dir.as_deref());
        write_outputs(
            &run,
            &tables,
            &options,
            &output_dir,
            args.format.into(),
            &Local::now(),
        )?
    };

    let report = ClassifyReport {
        notes_path: args.notes.clone(),
        rows: run.results.len(),
        referral_fallback: options.referral_fallback.clone(),
        stats: run.stats,
        outputs,
        dry_run: args.dry_run,
    };
    Ok((report, tables))
}

fn output_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
