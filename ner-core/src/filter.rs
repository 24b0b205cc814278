//! # Filtro de Confiança e Teto de Contagem
//!
//! Último estágio do pipeline: descarta spans abaixo da confiança mínima e
//! limita o total retornado.
//!
//! O corte do teto é **top-k pela ordem total de prioridade**, não um prefixo
//! posicional: truncar a lista ordenada por posição descartaria
//! arbitrariamente entidades de alta confiança no fim do documento. Depois do
//! corte, os sobreviventes voltam à ordem de leitura, que é o que os
//! consumidores esperam.

use crate::entity::{cmp_position, cmp_priority, EntitySpan};

/// Aplica o piso de confiança e o teto de contagem.
pub fn filter_spans(
    mut spans: Vec<EntitySpan>,
    min_confidence: f64,
    max_count: usize,
) -> Vec<EntitySpan> {
    spans.retain(|s| s.confidence >= min_confidence);

    if spans.len() > max_count {
        spans.sort_by(cmp_priority);
        spans.truncate(max_count);
    }

    spans.sort_by(cmp_position);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityLabel, SourceMethod};

    fn span(start: usize, confidence: f64) -> EntitySpan {
        EntitySpan {
            text: "abc".to_string(),
            start,
            end: start + 3,
            label: EntityLabel::Person,
            confidence,
            source: SourceMethod::Model,
        }
    }

    #[test]
    fn test_confidence_floor() {
        let result = filter_spans(vec![span(0, 0.4), span(10, 0.5), span(20, 0.9)], 0.5, 100);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.confidence >= 0.5));
    }

    #[test]
    fn test_floor_is_inclusive() {
        let result = filter_spans(vec![span(0, 0.5)], 0.5, 100);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_cap_keeps_top_k_by_confidence_not_position() {
        // A entidade mais confiante está no fim do documento; um corte
        // posicional a perderia
        let result = filter_spans(
            vec![span(0, 0.6), span(10, 0.7), span(20, 0.8), span(30, 0.99)],
            0.0,
            2,
        );
        assert_eq!(result.len(), 2);
        let confidences: Vec<f64> = result.iter().map(|s| s.confidence).collect();
        assert!(confidences.contains(&0.99));
        assert!(confidences.contains(&0.8));
    }

    #[test]
    fn test_result_back_in_reading_order() {
        let result = filter_spans(
            vec![span(30, 0.99), span(0, 0.6), span(20, 0.8), span(10, 0.95)],
            0.0,
            3,
        );
        let starts: Vec<usize> = result.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![10, 20, 30]);
    }

    #[test]
    fn test_cap_tie_break_uses_total_order() {
        // Empate de confiança: o span mais longo entra
        let long = EntitySpan {
            text: "abcdef".to_string(),
            start: 50,
            end: 56,
            label: EntityLabel::Date,
            confidence: 0.8,
            source: SourceMethod::Model,
        };
        let result = filter_spans(vec![span(0, 0.8), long.clone()], 0.0, 1);
        assert_eq!(result, vec![long]);
    }

    #[test]
    fn test_under_cap_untouched() {
        let result = filter_spans(vec![span(0, 0.9), span(10, 0.9)], 0.5, 100);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_spans(vec![], 0.5, 10).is_empty());
    }
}
