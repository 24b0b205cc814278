//! # Fusão e Deduplicação de Spans
//!
//! Combina os candidatos de todos os extratores em uma lista única sem
//! sobreposições. Função pura e determinística: o resultado depende só do
//! conjunto de spans de entrada, nunca da ordem em que foram gerados.
//!
//! ## Algoritmo
//!
//! 1. **Duplicatas exatas** — spans com a mesma chave `(start, end, label)`
//!    são a mesma entidade reportada mais de uma vez; colapsam para a cópia
//!    de maior prioridade antes de qualquer resolução de conflito (diferenças
//!    de confiança por ruído de ponto flutuante não viram "competição").
//! 2. **Varredura por prioridade** — os candidatos restantes são ordenados
//!    pela ordem total de [`cmp_priority`] e aceitos um a um; um candidato
//!    entra se não sobrepõe nenhum span já aceito. Como a ordem é total, o
//!    melhor de cada grupo de sobreposições mútuas vence sempre.
//! 3. **Reordenação** — a saída volta para a ordem de leitura
//!    ([`cmp_position`]).
//!
//! O teste de sobreposição usa um `BTreeMap` de intervalos disjuntos
//! (início → fim): custo O(log n) por candidato, O(n log n) total — escala
//! para documentos com centenas de candidatos sem comparação aos pares.

use std::collections::{BTreeMap, HashMap};

use crate::entity::{cmp_position, cmp_priority, EntityLabel, EntitySpan};

/// Funde os spans de entrada em uma lista ordenada e livre de sobreposições.
pub fn merge_spans(spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    if spans.len() <= 1 {
        return spans;
    }

    // Passo 1: colapsa duplicatas exatas, ficando com a de maior prioridade
    let mut by_key: HashMap<(usize, usize, EntityLabel), EntitySpan> =
        HashMap::with_capacity(spans.len());
    for span in spans {
        match by_key.entry(span.dedup_key()) {
            std::collections::hash_map::Entry::Occupied(mut kept) => {
                if cmp_priority(&span, kept.get()).is_lt() {
                    kept.insert(span);
                }
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(span);
            }
        }
    }

    // Passo 2: varredura em ordem de prioridade sobre intervalos disjuntos
    let mut candidates: Vec<EntitySpan> = by_key.into_values().collect();
    candidates.sort_by(cmp_priority);

    let mut intervals: BTreeMap<usize, usize> = BTreeMap::new(); // início → fim
    let mut kept: Vec<EntitySpan> = Vec::with_capacity(candidates.len());
    for span in candidates {
        if !overlaps_kept(&intervals, &span) {
            intervals.insert(span.start, span.end);
            kept.push(span);
        }
    }

    // Passo 3: de volta à ordem de leitura
    kept.sort_by(cmp_position);
    kept
}

/// O candidato sobrepõe algum intervalo já aceito?
///
/// Os intervalos aceitos são disjuntos, então basta olhar o vizinho de maior
/// início menor que `span.end`: se nem ele alcança `span.start`, nenhum outro
/// alcança.
fn overlaps_kept(intervals: &BTreeMap<usize, usize>, span: &EntitySpan) -> bool {
    match intervals.range(..span.end).next_back() {
        Some((_, &kept_end)) => kept_end > span.start,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SourceMethod;

    fn span(
        start: usize,
        end: usize,
        label: EntityLabel,
        confidence: f64,
        source: SourceMethod,
    ) -> EntitySpan {
        EntitySpan {
            text: "x".repeat(end - start),
            start,
            end,
            label,
            confidence,
            source,
        }
    }

    fn assert_no_overlaps(spans: &[EntitySpan]) {
        for (i, a) in spans.iter().enumerate() {
            for b in spans.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "spans sobrepostos no resultado: {a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn test_higher_confidence_wins_overlap() {
        // O span menor mas mais confiante vence o maior
        let merged = merge_spans(vec![
            span(0, 10, EntityLabel::Date, 0.9, SourceMethod::Model),
            span(2, 8, EntityLabel::Date, 0.95, SourceMethod::Pattern),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 2);
        assert_eq!(merged[0].end, 8);
        assert_eq!(merged[0].confidence, 0.95);
    }

    #[test]
    fn test_equal_confidence_longer_wins() {
        let merged = merge_spans(vec![
            span(0, 15, EntityLabel::Date, 1.0, SourceMethod::Pattern),
            span(2, 15, EntityLabel::Date, 1.0, SourceMethod::Pattern),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 15);
    }

    #[test]
    fn test_exact_duplicates_collapse_to_one() {
        // Mesma entidade vinda dos dois métodos, mesma confiança
        let merged = merge_spans(vec![
            span(4, 9, EntityLabel::Person, 0.8, SourceMethod::Model),
            span(4, 9, EntityLabel::Person, 0.8, SourceMethod::Pattern),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, SourceMethod::Model);
    }

    #[test]
    fn test_exact_duplicates_keep_higher_confidence() {
        let merged = merge_spans(vec![
            span(4, 9, EntityLabel::Person, 0.71, SourceMethod::Pattern),
            span(4, 9, EntityLabel::Person, 0.93, SourceMethod::Model),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, 0.93);
    }

    #[test]
    fn test_overlap_is_label_blind() {
        // DATE e CARDINAL sobrepostos ainda disputam a mesma região
        let merged = merge_spans(vec![
            span(0, 16, EntityLabel::Date, 1.0, SourceMethod::Pattern),
            span(12, 16, EntityLabel::Cardinal, 0.6, SourceMethod::Model),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].label, EntityLabel::Date);
    }

    #[test]
    fn test_adjacent_spans_both_survive() {
        // [0,5) e [5,9) não se sobrepõem (intervalos meio-abertos)
        let merged = merge_spans(vec![
            span(5, 9, EntityLabel::Org, 0.9, SourceMethod::Model),
            span(0, 5, EntityLabel::Person, 0.8, SourceMethod::Model),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start, 0); // ordem de leitura
        assert_eq!(merged[1].start, 5);
    }

    #[test]
    fn test_chain_of_overlaps_resolved_by_priority() {
        // O span do meio tem a maior confiança e toca os dois vizinhos:
        // ele fica, os dois caem.
        let merged = merge_spans(vec![
            span(0, 4, EntityLabel::Org, 0.7, SourceMethod::Model),
            span(3, 8, EntityLabel::Org, 0.99, SourceMethod::Model),
            span(7, 12, EntityLabel::Org, 0.7, SourceMethod::Model),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 3);
        assert_no_overlaps(&merged);
    }

    #[test]
    fn test_deterministic_under_reshuffle() {
        let base = vec![
            span(0, 10, EntityLabel::Date, 0.9, SourceMethod::Model),
            span(2, 8, EntityLabel::Date, 0.95, SourceMethod::Pattern),
            span(20, 30, EntityLabel::Person, 0.8, SourceMethod::Model),
            span(25, 35, EntityLabel::Person, 0.8, SourceMethod::Pattern),
            span(40, 44, EntityLabel::Cardinal, 0.6, SourceMethod::Model),
            span(40, 44, EntityLabel::Cardinal, 0.6, SourceMethod::Pattern),
        ];

        let reference = merge_spans(base.clone());
        assert_no_overlaps(&reference);

        // Qualquer permutação da entrada produz saída idêntica
        let mut rotated = base.clone();
        for _ in 0..base.len() {
            rotated.rotate_left(1);
            assert_eq!(merge_spans(rotated.clone()), reference);
        }
        let mut reversed = base;
        reversed.reverse();
        assert_eq!(merge_spans(reversed), reference);
    }

    #[test]
    fn test_output_in_reading_order() {
        let merged = merge_spans(vec![
            span(50, 60, EntityLabel::Date, 1.0, SourceMethod::Pattern),
            span(0, 10, EntityLabel::Date, 0.7, SourceMethod::Model),
            span(20, 30, EntityLabel::Org, 0.9, SourceMethod::Model),
        ]);
        let starts: Vec<usize> = merged.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 20, 50]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(merge_spans(vec![]).is_empty());
        let one = vec![span(0, 3, EntityLabel::Gpe, 0.9, SourceMethod::Model)];
        assert_eq!(merge_spans(one.clone()), one);
    }

    #[test]
    fn test_many_candidates_no_overlap_invariant() {
        // Centenas de candidatos artificiais densamente sobrepostos
        let mut spans = Vec::new();
        for i in 0..300 {
            let start = (i * 3) % 200;
            spans.push(span(
                start,
                start + 5 + (i % 7),
                if i % 2 == 0 { EntityLabel::Date } else { EntityLabel::Org },
                0.5 + (i % 10) as f64 / 20.0,
                if i % 3 == 0 { SourceMethod::Pattern } else { SourceMethod::Model },
            ));
        }
        let merged = merge_spans(spans);
        assert!(!merged.is_empty());
        assert_no_overlaps(&merged);
        // ordenado por início
        assert!(merged.windows(2).all(|w| w[0].start <= w[1].start));
    }
}
