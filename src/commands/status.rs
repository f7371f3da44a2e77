use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{PdfInventoryManifest, PointNameReport};

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.output_dir.join("manifests");
    let inventory_path = manifest_dir.join("pdf_inventory.json");
    let report_path = args.output_dir.join("point_names.json");

    info!(output_dir = %args.output_dir.display(), "status requested");

    if inventory_path.exists() {
        let raw = fs::read(&inventory_path)
            .with_context(|| format!("failed to read {}", inventory_path.display()))?;
        let inventory: PdfInventoryManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", inventory_path.display()))?;

        info!(
            generated_at = %inventory.generated_at,
            source = %inventory.source_directory,
            pdf_count = inventory.pdf_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    if report_path.exists() {
        let raw = fs::read(&report_path)
            .with_context(|| format!("failed to read {}", report_path.display()))?;
        let report: PointNameReport = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", report_path.display()))?;

        info!(
            generated_at = %report.generated_at,
            document_count = report.document_count,
            "loaded point-name report"
        );
        for bucket in &report.buckets {
            info!(
                sheet = bucket.sheet.as_str(),
                point_count = bucket.point_count,
                "report bucket"
            );
        }
    } else {
        warn!(path = %report_path.display(), "point-name report missing");
    }

    Ok(())
}
