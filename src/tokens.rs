//! Recuento aproximado de tokens y guardia de presupuesto previa al envío.

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::error::AnalysisError;

// Codificador BPE de la familia gpt-3.5/gpt-4. Los datos van embebidos en el
// binario, así que la construcción sólo puede fallar por un bug de la librería.
static BPE: Lazy<CoreBPE> = Lazy::new(|| {
    cl100k_base().expect("codificador cl100k_base embebido")
});

/// Número aproximado de tokens que ocuparía `text` en una petición.
pub fn count_tokens(text: &str) -> usize {
    BPE.encode_with_special_tokens(text).len()
}

/// Comprueba el presupuesto antes de hacer ninguna llamada de red.
/// Si se supera el techo, la acción se rechaza con el recuento medido.
pub fn check_budget(text: &str, ceiling: usize) -> Result<usize, AnalysisError> {
    let count = count_tokens(text);
    if count > ceiling {
        return Err(AnalysisError::TokenBudgetExceeded { count, ceiling });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_positive_for_real_text() {
        let n = count_tokens("This lease agreement is made between the landlord and the tenant.");
        assert!(n > 5);
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn budget_guard_passes_under_the_ceiling() {
        let n = check_budget("short contract", 1_000).unwrap();
        assert!(n > 0);
    }

    #[test]
    fn budget_guard_refuses_over_the_ceiling() {
        let long_text = "clause ".repeat(500);
        let err = check_budget(&long_text, 10).unwrap_err();
        match err {
            AnalysisError::TokenBudgetExceeded { count, ceiling } => {
                assert!(count > 10);
                assert_eq!(ceiling, 10);
            }
            other => panic!("error inesperado: {other:?}"),
        }
    }
}
