use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::cli::OcrMode;
use crate::model::ToolVersions;

/// Extracted text for one document plus how each page was obtained.
/// Strategies run in order: the pdftotext text layer first, then OCR for
/// candidate pages selected by the OCR mode.
#[derive(Debug, Clone, Default)]
pub(crate) struct AcquiredText {
    pub pages: Vec<String>,
    pub text_layer_page_count: usize,
    pub ocr_page_count: usize,
    pub ocr_fallback_page_count: usize,
    pub warnings: Vec<String>,
}

impl AcquiredText {
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    pub fn backend(&self) -> &'static str {
        if self.ocr_page_count == 0 {
            "text_layer"
        } else if self.text_layer_page_count == 0 {
            "ocr"
        } else {
            "mixed"
        }
    }
}

pub(crate) fn acquire_document_text(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
    ocr_mode: OcrMode,
    ocr_lang: &str,
    ocr_min_text_chars: usize,
) -> Result<AcquiredText> {
    let pages = extract_pages_with_pdftotext(pdf_path, max_pages_per_doc)?;
    let mut acquired = AcquiredText {
        text_layer_page_count: pages.len(),
        pages,
        ..AcquiredText::default()
    };

    let candidate_pages = collect_ocr_candidates(&acquired.pages, ocr_mode, ocr_min_text_chars);
    if candidate_pages.is_empty() {
        return Ok(acquired);
    }

    if !command_available("pdftoppm") || !command_available("tesseract") {
        let message = format!(
            "OCR mode '{}' requested for {} pages but pdftoppm/tesseract are unavailable",
            ocr_mode.as_str(),
            candidate_pages.len()
        );
        if matches!(ocr_mode, OcrMode::Force) {
            bail!(message);
        }
        acquired.warnings.push(message);
        return Ok(acquired);
    }

    for page_number in candidate_pages {
        match extract_page_with_ocr(pdf_path, page_number, ocr_lang) {
            Ok(ocr_text) => {
                apply_ocr_text(&mut acquired, pdf_path, page_number, ocr_text, ocr_mode)?;
            }
            Err(error) => {
                if matches!(ocr_mode, OcrMode::Force) {
                    return Err(error).with_context(|| {
                        format!(
                            "failed OCR extraction for {} page {}",
                            pdf_path.display(),
                            page_number
                        )
                    });
                }

                acquired.warnings.push(format!(
                    "OCR fallback failed for {} page {}: {}",
                    pdf_path.display(),
                    page_number,
                    error
                ));
            }
        }
    }

    Ok(acquired)
}

pub(crate) fn apply_ocr_text(
    acquired: &mut AcquiredText,
    pdf_path: &Path,
    page_number: usize,
    ocr_text: String,
    ocr_mode: OcrMode,
) -> Result<()> {
    let page_index = page_number.saturating_sub(1);

    if non_whitespace_char_count(&ocr_text) == 0 {
        if matches!(ocr_mode, OcrMode::Force) {
            bail!(
                "OCR produced no text for {} page {}",
                pdf_path.display(),
                page_number
            );
        }

        // Auto keeps the (possibly sparse) text layer over empty OCR.
        acquired.warnings.push(format!(
            "OCR text was empty for {} page {} in auto mode",
            pdf_path.display(),
            page_number
        ));
        return Ok(());
    }

    if let Some(page) = acquired.pages.get_mut(page_index) {
        *page = ocr_text;
    }
    acquired.ocr_page_count += 1;
    acquired.text_layer_page_count = acquired.text_layer_page_count.saturating_sub(1);
    if matches!(ocr_mode, OcrMode::Auto) {
        acquired.ocr_fallback_page_count += 1;
    }

    Ok(())
}

pub(crate) fn collect_ocr_candidates(
    pages: &[String],
    ocr_mode: OcrMode,
    min_text_chars: usize,
) -> Vec<usize> {
    match ocr_mode {
        OcrMode::Off => Vec::new(),
        OcrMode::Force => (1..=pages.len()).collect(),
        OcrMode::Auto => pages
            .iter()
            .enumerate()
            .filter_map(|(index, page)| {
                if non_whitespace_char_count(page) < min_text_chars {
                    Some(index + 1)
                } else {
                    None
                }
            })
            .collect(),
    }
}

pub(crate) fn non_whitespace_char_count(text: &str) -> usize {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .count()
}

fn extract_pages_with_pdftotext(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages_per_doc {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pdftotext_pages(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

pub(crate) fn split_pdftotext_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    // pdftotext ends every page with a form feed, so the final chunk is an
    // artifact of the split, not a page. Earlier blank chunks are real
    // pages with no text layer (scanned images) and must stay in the list
    // so they remain OCR candidates.
    if pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }

    pages
}

fn extract_page_with_ocr(pdf_path: &Path, page_number: usize, ocr_lang: &str) -> Result<String> {
    let pdf_stem = pdf_path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("pdf");
    let safe_stem = pdf_stem
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();

    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let output_root = std::env::temp_dir().join(format!(
        "pointlist_ocr_{}_{}_{}_{}",
        safe_stem,
        std::process::id(),
        page_number,
        stamp
    ));
    let png_path = PathBuf::from(format!("{}.png", output_root.display()));

    let pdftoppm_output = Command::new("pdftoppm")
        .arg("-f")
        .arg(page_number.to_string())
        .arg("-l")
        .arg(page_number.to_string())
        .arg("-singlefile")
        .arg("-png")
        .arg(pdf_path)
        .arg(&output_root)
        .output()
        .with_context(|| format!("failed to execute pdftoppm for {}", pdf_path.display()))?;

    if !pdftoppm_output.status.success() {
        let stderr = String::from_utf8_lossy(&pdftoppm_output.stderr);
        bail!(
            "pdftoppm returned non-zero exit status for {} page {}: {}",
            pdf_path.display(),
            page_number,
            stderr.trim()
        );
    }

    if !png_path.exists() {
        bail!(
            "pdftoppm did not produce expected image for {} page {}",
            pdf_path.display(),
            page_number
        );
    }

    let tesseract_output = Command::new("tesseract")
        .arg(&png_path)
        .arg("stdout")
        .arg("-l")
        .arg(ocr_lang)
        .output()
        .with_context(|| format!("failed to execute tesseract for {}", png_path.display()));

    let _ = fs::remove_file(&png_path);
    let tesseract_output = tesseract_output?;

    if !tesseract_output.status.success() {
        let stderr = String::from_utf8_lossy(&tesseract_output.stderr);
        bail!(
            "tesseract returned non-zero exit status for {} page {}: {}",
            pdf_path.display(),
            page_number,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&tesseract_output.stdout)
        .replace('\u{0000}', "")
        .trim()
        .to_string())
}

fn command_available(program: &str) -> bool {
    Command::new(program).arg("--version").output().is_ok()
}

pub(crate) fn collect_tool_versions() -> Result<ToolVersions> {
    Ok(ToolVersions {
        rustc: command_version("rustc", &["--version"])?,
        cargo: command_version("cargo", &["--version"])?,
        pdftotext: command_version("pdftotext", &["-v"])?,
        pdftoppm: command_version_optional("pdftoppm", &["-v"]),
        tesseract: command_version_optional("tesseract", &["--version"]),
    })
}

fn first_version_line(output: &Output) -> Option<String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        stdout.trim().to_string()
    };

    source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
}

fn command_version(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to run {} {}", program, args.join(" ")))?;

    Ok(first_version_line(&output).unwrap_or_else(|| "unknown".to_string()))
}

fn command_version_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    first_version_line(&output)
}
