//! Extracción de texto plano a partir de los bytes subidos (PDF, DOCX o TXT).
//!
//! Es un adaptador de despacho por formato: el trabajo real lo hacen
//! `pdf-extract` y `docx-rs`.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::{error::AnalysisError, models::SourceFormat};

/// Devuelve el contenido textual del documento según su formato declarado.
pub fn extract(bytes: &[u8], format: SourceFormat) -> Result<String, AnalysisError> {
    match format {
        SourceFormat::Pdf => extract_pdf(bytes),
        SourceFormat::Docx => extract_docx(bytes),
        // Un .txt inválido como UTF-8 es un error visible, no un truncado.
        SourceFormat::Txt => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

/// El texto de las páginas se concatena en orden de página, sin más
/// separador que el que aporte la propia librería.
fn extract_pdf(bytes: &[u8]) -> Result<String, AnalysisError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AnalysisError::Extraction(e.to_string()))
}

/// Recorre Paragraph → Run → Text y une los párrafos con saltos de línea,
/// en el orden del documento.
fn extract_docx(bytes: &[u8]) -> Result<String, AnalysisError> {
    let docx = read_docx(bytes).map_err(|e| AnalysisError::Extraction(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                RunChild::Text(t) => Some(t.text.clone()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n"))
}
