use anyhow::{Context, Result};
use bitext_clean::{
    DedupPolicy, NonsenseThresholds, PipelineConfig, RowFilterPipeline, ScriptColumn,
};
use bitext_core::Config;
use bitext_tabular::{
    export_chunks, read_table, split_parquet, write_table, ChunkOptions, ParquetCompression,
    ReadOptions, SheetSelector, SplitOptions, WriteOptions,
};
use tracing::info;

use crate::cli::{CleanArgs, ExportArgs, ScriptColumnArg, SplitArgs};

pub fn clean(args: CleanArgs, config: &Config) -> Result<()> {
    let table = read_table(
        &args.infile,
        &ReadOptions {
            sheet: args.sheet.clone(),
            columns: None,
        },
    )
    .with_context(|| format!("failed to read {}", args.infile.display()))?;

    let pipeline_config = pipeline_config(&args, config);
    let (cleaned, report) = RowFilterPipeline::new(pipeline_config)
        .run(table)
        .context("cleaning failed")?;

    let write_opts = WriteOptions {
        sheet_name: config.export.sheet_name.clone(),
        ..Default::default()
    };
    write_table(&cleaned, &args.outfile, &write_opts)
        .with_context(|| format!("failed to write {}", args.outfile.display()))?;

    println!(
        "Saved {} of {} rows to {} ({} dropped)",
        report.output_rows,
        report.input_rows,
        args.outfile.display(),
        report.total_dropped()
    );
    Ok(())
}

fn pipeline_config(args: &CleanArgs, config: &Config) -> PipelineConfig {
    let nepali = args
        .nepali_col
        .clone()
        .unwrap_or_else(|| config.clean.nepali_column.clone());
    let english = args
        .english_col
        .clone()
        .unwrap_or_else(|| config.clean.english_column.clone());
    let script_column = match args.script_col {
        ScriptColumnArg::Nepali => ScriptColumn::Source,
        ScriptColumnArg::English => ScriptColumn::Target,
    };

    let mut cfg = PipelineConfig::new(nepali, english)
        .with_script_column(script_column)
        .with_thresholds(NonsenseThresholds {
            min_alpha_ratio: args.min_alpha_ratio.unwrap_or(config.clean.min_alpha_ratio),
            max_symbol_ratio: args.max_symbol_ratio.unwrap_or(config.clean.max_symbol_ratio),
        })
        .with_dedup(DedupPolicy {
            case_insensitive: args.case_insensitive_dupes,
            keep_first: args.keep_order,
        });
    cfg.strip_bullets = !args.no_bullets;
    cfg.convert_digits = !args.no_digits;
    cfg
}

pub fn export(args: ExportArgs, config: &Config) -> Result<()> {
    let table = read_table(
        &args.in_path,
        &ReadOptions {
            sheet: SheetSelector::default(),
            columns: args.columns.clone(),
        },
    )
    .with_context(|| format!("failed to read {}", args.in_path.display()))?;

    let write = WriteOptions {
        sheet_name: args.sheet.clone().unwrap_or_else(|| config.export.sheet_name.clone()),
        ..Default::default()
    };

    write_table(&table, &args.out_file, &write)
        .with_context(|| format!("failed to write {}", args.out_file.display()))?;
    println!("Wrote full table: {}", args.out_file.display());

    let opts = ChunkOptions {
        chunk_size: args.chunk_size.unwrap_or(config.export.chunk_size),
        base_name: args.base_name,
        format: args.split_format,
        write,
    };
    let parts = export_chunks(&table, &args.split_dir, &opts)
        .with_context(|| format!("failed to export chunks to {}", args.split_dir.display()))?;

    println!("Wrote {} split files:", parts.len());
    for part in &parts {
        println!("{}", part.path.display());
    }
    Ok(())
}

pub fn split(args: SplitArgs, config: &Config) -> Result<()> {
    let compression = match args.compression {
        Some(c) => c,
        None => config
            .split
            .compression
            .parse::<ParquetCompression>()
            .map_err(anyhow::Error::msg)
            .context("invalid SPLIT_COMPRESSION")?,
    };

    let opts = SplitOptions {
        base_name: args.base_name,
        rows_per_file: args.rows_per_file.unwrap_or(config.split.rows_per_file),
        read_batch_rows: args.read_batch_rows.unwrap_or(config.split.read_batch_rows),
        write_row_group_rows: args
            .write_row_group_rows
            .unwrap_or(config.split.write_row_group_rows),
        compression,
    };

    let parts = split_parquet(&args.in_path, &args.out_dir, &opts)
        .with_context(|| format!("failed to split {}", args.in_path.display()))?;

    let rows: usize = parts.iter().map(|p| p.rows).sum();
    info!(parts = parts.len(), rows, "Split complete");
    for part in &parts {
        println!("{}\t{}", part.path.display(), part.rows);
    }
    Ok(())
}
