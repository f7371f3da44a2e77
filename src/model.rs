use serde::{Deserialize, Serialize};

/// Which output bucket a document's point names belong to, derived from
/// filename indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetKind {
    Status,
    Analog,
}

impl SheetKind {
    const STATUS_INDICATORS: [&'static str; 2] = ["sh1", "status"];
    const ANALOG_INDICATORS: [&'static str; 2] = ["sh2", "analog"];

    /// Classifies a PDF by filename substring. Unrecognized filenames
    /// default to Status.
    pub fn from_filename(filename: &str) -> Self {
        let lowered = filename.to_lowercase();

        if Self::STATUS_INDICATORS
            .iter()
            .any(|indicator| lowered.contains(indicator))
        {
            Self::Status
        } else if Self::ANALOG_INDICATORS
            .iter()
            .any(|indicator| lowered.contains(indicator))
        {
            Self::Analog
        } else {
            Self::Status
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Analog => "Analog",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub filename: String,
    pub sheet: SheetKind,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pdfs: Vec<PdfEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolVersions {
    pub rustc: String,
    pub cargo: String,
    pub pdftotext: String,
    pub pdftoppm: Option<String>,
    pub tesseract: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractPaths {
    pub input_dir: String,
    pub output_dir: String,
    pub manifest_dir: String,
    pub inventory_manifest_path: String,
    pub report_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractCounts {
    pub pdf_count: usize,
    pub processed_pdf_count: usize,
    pub empty_text_pdf_count: usize,
    pub text_layer_page_count: usize,
    pub ocr_page_count: usize,
    pub ocr_fallback_page_count: usize,
    pub lines_seen_count: usize,
    pub rows_matched_count: usize,
    pub candidates_rejected_count: usize,
    pub point_names_extracted: usize,
    pub status_point_count: usize,
    pub analog_point_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReportEntry {
    pub filename: String,
    pub sheet: SheetKind,
    pub backend: String,
    pub point_count: usize,
    pub header_seen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetBucket {
    pub sheet: SheetKind,
    pub point_count: usize,
    pub point_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointNameReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<DocumentReportEntry>,
    pub buckets: Vec<SheetBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub source_hashes: Vec<PdfEntry>,
    pub warnings: Vec<String>,
}
