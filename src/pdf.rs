//! Exportación de la narrativa a un PDF paginado con `lopdf`.
//!
//! El PDF lleva únicamente la narrativa cruda, sin banda de riesgo ni tabla
//! de metadatos (mismo contenido que siempre ha llevado esta exportación).
//! La fuente Type1 sólo cubre Latin-1, así que los caracteres fuera de ese
//! rango se sustituyen por '?'.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::AnalysisError;

const PAGE_WIDTH: i64 = 595; // A4 en puntos
const PAGE_HEIGHT: i64 = 842;
const LEFT_MARGIN: i64 = 40;
const TOP_START: i64 = 800;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 14;
const WRAP_COLUMNS: usize = 90;
const LINES_PER_PAGE: usize = 54;

/// Genera los bytes de `contract_analysis.pdf` a partir de la narrativa.
pub fn narrative_pdf(narrative: &str) -> Result<Vec<u8>, AnalysisError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let lines = wrap_lines(narrative);
    let empty_page: &[String] = &[];
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![empty_page]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut page_ids: Vec<Object> = Vec::new();
    for page_lines in pages {
        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new("Td", vec![LEFT_MARGIN.into(), TOP_START.into()]),
        ];
        for line in page_lines {
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(latin1_bytes(line))],
            ));
            ops.push(Operation::new("T*", vec![]));
        }
        ops.push(Operation::new("ET", vec![]));

        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| AnalysisError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AnalysisError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// Corte de línea simple por palabras a un ancho fijo de columnas.
fn wrap_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.chars().count() <= WRAP_COLUMNS {
            lines.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
            if !current.is_empty() && current.chars().count() + needed > WRAP_COLUMNS {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn latin1_bytes(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_pdf() {
        let bytes = narrative_pdf("A short analysis.\nSecond line.").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn empty_narrative_still_produces_one_page() {
        let bytes = narrative_pdf("").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn long_text_spans_multiple_pages() {
        let narrative = "clause line\n".repeat(LINES_PER_PAGE * 3);
        let bytes = narrative_pdf(&narrative).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }

    #[test]
    fn non_latin1_text_is_substituted_not_fatal() {
        let bytes = narrative_pdf("สัญญาเช่า — ข้อ 1").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn wrap_respects_the_column_limit() {
        let long = "word ".repeat(60);
        for line in wrap_lines(&long) {
            assert!(line.chars().count() <= WRAP_COLUMNS);
        }
    }
}
