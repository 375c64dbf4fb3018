//! Plantillas de instrucciones (system prompts) por idioma de salida.
//!
//! La línea final `RiskScore: <n>` es el único contrato mecánico con el
//! modelo: el parser la busca tal cual, en su forma ASCII exacta, en los
//! tres idiomas. El modelo no está obligado a obedecer, así que el parser
//! debe seguir siendo defensivo.

use crate::models::Language;

const SYSTEM_PROMPT_EN: &str = "You are a legal assistant. First, extract key contract metadata such as term, price, and location, \
each on its own line (for example 'Term: 12 months'). \
Then analyze the contract and provide feedback on risks, missing clauses, and ambiguities. \
Respond in English. \
Finish your reply with one final line of exactly this form: RiskScore: <number from 1 to 10>.";

const SYSTEM_PROMPT_IT: &str = "Sei un assistente legale. Analizza questo contratto iniziando con l'estrazione dei dati principali \
come durata, prezzo e località, ciascuno su una propria riga (per esempio 'Durata: 12 mesi'). \
Poi fornisci un'analisi sui rischi, clausole mancanti e ambiguità. Scrivi tutto in italiano. \
Concludi la risposta con un'unica riga finale esattamente in questa forma: RiskScore: <numero da 1 a 10>.";

const SYSTEM_PROMPT_TH: &str = "คุณเป็นผู้ช่วยด้านกฎหมาย วิเคราะห์เอกสารสัญญาฉบับนี้ \
โดยเริ่มจากการระบุข้อมูลสำคัญ เช่น ระยะเวลาสัญญา จำนวนเงิน และสถานที่ โดยแต่ละรายการอยู่ในบรรทัดของตัวเอง (เช่น 'Term: 12 months') \
จากนั้นให้ข้อเสนอแนะเกี่ยวกับความเสี่ยง ข้อที่ขาดหายไป และความคลุมเครือ ทั้งหมดให้แสดงผลเป็นภาษาไทย \
จบคำตอบด้วยบรรทัดสุดท้ายเพียงบรรทัดเดียวในรูปแบบนี้เป๊ะ ๆ: RiskScore: <ตัวเลข 1 ถึง 10>";

/// Plantilla de análisis según el idioma de salida elegido.
pub fn build_system_prompt(output_language: Language) -> &'static str {
    match output_language {
        Language::Thai => SYSTEM_PROMPT_TH,
        Language::Italian => SYSTEM_PROMPT_IT,
        Language::English => SYSTEM_PROMPT_EN,
    }
}

/// Plantilla de la llamada de traducción, independiente de la de análisis:
/// traducción literal y completa, sin comentarios.
pub fn build_translation_prompt(source: Language, target: Language) -> String {
    format!(
        "You are a professional legal translator. Translate the following contract literally and \
completely from {} to {}. Preserve the structure and ordering of the document. Do not add \
commentary, analysis or notes; output only the translated text.",
        source.label(),
        target.label()
    )
}
