use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::commands::inventory;
use crate::model::{
    DocumentReportEntry, ExtractCounts, ExtractPaths, ExtractRunManifest, PdfInventoryManifest,
    PointNameReport, SheetBucket, SheetKind,
};
use crate::parse::PointNameParser;
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

use super::acquire::{acquire_document_text, collect_tool_versions};

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_dir = args.output_dir.join("manifests");
    ensure_directory(&manifest_dir)?;

    let inventory_manifest_path = args
        .inventory_manifest_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join("pdf_inventory.json"));
    let run_manifest_path = args.run_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "extract_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });
    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| args.output_dir.join("point_names.json"));

    info!(input_dir = %args.input_dir.display(), run_id = %run_id, "starting extract");

    let inventory = load_or_refresh_inventory(
        &args.input_dir,
        &inventory_manifest_path,
        args.refresh_inventory,
    )?;
    let tool_versions = collect_tool_versions()?;
    let parser = PointNameParser::new()?;

    let mut counts = ExtractCounts {
        pdf_count: inventory.pdf_count,
        ..ExtractCounts::default()
    };
    let mut warnings = Vec::new();
    let mut documents = Vec::new();
    let mut status_names = Vec::new();
    let mut analog_names = Vec::new();

    for pdf in &inventory.pdfs {
        let pdf_path = args.input_dir.join(&pdf.filename);
        info!(file = %pdf.filename, sheet = pdf.sheet.as_str(), "processing document");

        let acquired = match acquire_document_text(
            &pdf_path,
            args.max_pages_per_doc,
            args.ocr_mode,
            &args.ocr_lang,
            args.ocr_min_text_chars,
        ) {
            Ok(acquired) => acquired,
            Err(error) => {
                warn!(file = %pdf.filename, error = %error, "text acquisition failed");
                warnings.push(format!(
                    "text acquisition failed for {}: {}",
                    pdf.filename, error
                ));
                continue;
            }
        };
        warnings.extend(acquired.warnings.iter().cloned());
        counts.text_layer_page_count += acquired.text_layer_page_count;
        counts.ocr_page_count += acquired.ocr_page_count;
        counts.ocr_fallback_page_count += acquired.ocr_fallback_page_count;

        let text = acquired.text();
        if text.trim().is_empty() {
            warn!(file = %pdf.filename, "no text extracted from document");
            warnings.push(format!("no text extracted from {}", pdf.filename));
            counts.empty_text_pdf_count += 1;
            continue;
        }

        let scan = parser.scan(&text);
        counts.processed_pdf_count += 1;
        counts.lines_seen_count += scan.lines_seen;
        counts.rows_matched_count += scan.rows_matched;
        counts.candidates_rejected_count += scan.candidates_rejected;
        counts.point_names_extracted += scan.point_names.len();

        if scan.point_names.is_empty() {
            warn!(file = %pdf.filename, "document yielded zero point names");
            warnings.push(format!("document yielded zero point names: {}", pdf.filename));
        }

        info!(
            file = %pdf.filename,
            backend = acquired.backend(),
            point_names = scan.point_names.len(),
            "document processed"
        );

        documents.push(DocumentReportEntry {
            filename: pdf.filename.clone(),
            sheet: pdf.sheet,
            backend: acquired.backend().to_string(),
            point_count: scan.point_names.len(),
            header_seen: scan.header_seen,
        });

        match pdf.sheet {
            SheetKind::Status => status_names.extend(scan.point_names),
            SheetKind::Analog => analog_names.extend(scan.point_names),
        }
    }

    counts.status_point_count = status_names.len();
    counts.analog_point_count = analog_names.len();

    let report = PointNameReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: args.input_dir.display().to_string(),
        document_count: documents.len(),
        documents,
        buckets: vec![
            SheetBucket {
                sheet: SheetKind::Status,
                point_count: status_names.len(),
                point_names: status_names,
            },
            SheetBucket {
                sheet: SheetKind::Analog,
                point_count: analog_names.len(),
                point_names: analog_names,
            },
        ],
    };
    write_json_pretty(&report_path, &report)?;
    info!(path = %report_path.display(), "wrote point-name report");

    let run_manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        tool_versions,
        paths: ExtractPaths {
            input_dir: args.input_dir.display().to_string(),
            output_dir: args.output_dir.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            inventory_manifest_path: inventory_manifest_path.display().to_string(),
            report_path: report_path.display().to_string(),
        },
        counts,
        source_hashes: inventory.pdfs.clone(),
        warnings,
    };
    write_json_pretty(&run_manifest_path, &run_manifest)?;
    info!(path = %run_manifest_path.display(), "wrote extract run manifest");

    Ok(())
}

fn load_or_refresh_inventory(
    input_dir: &Path,
    manifest_path: &Path,
    refresh: bool,
) -> Result<PdfInventoryManifest> {
    if !refresh && manifest_path.exists() {
        let raw = fs::read(manifest_path)
            .with_context(|| format!("failed to read {}", manifest_path.display()))?;
        let manifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;
        return Ok(manifest);
    }

    let manifest = inventory::build_manifest(input_dir)?;
    write_json_pretty(manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    Ok(manifest)
}

pub(crate) fn render_extract_command(args: &ExtractArgs) -> String {
    let mut command = vec![
        "pointlist".to_string(),
        "extract".to_string(),
        "--input-dir".to_string(),
        args.input_dir.display().to_string(),
        "--output-dir".to_string(),
        args.output_dir.display().to_string(),
    ];

    if let Some(path) = &args.inventory_manifest_path {
        command.push("--inventory-manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.run_manifest_path {
        command.push("--run-manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.report_path {
        command.push("--report-path".to_string());
        command.push(path.display().to_string());
    }
    if args.refresh_inventory {
        command.push("--refresh-inventory".to_string());
    }
    if let Some(max_pages) = args.max_pages_per_doc {
        command.push("--max-pages-per-doc".to_string());
        command.push(max_pages.to_string());
    }
    // The default mode is auto, so off must be rendered explicitly for the
    // command to reproduce the run.
    command.push("--ocr-mode".to_string());
    command.push(args.ocr_mode.as_str().to_string());
    if args.ocr_mode != crate::cli::OcrMode::Off {
        command.push("--ocr-lang".to_string());
        command.push(args.ocr_lang.clone());
        command.push("--ocr-min-text-chars".to_string());
        command.push(args.ocr_min_text_chars.to_string());
    }

    command.join(" ")
}
