//! # Casador de Padrões — Regex por Língua
//!
//! O caminho determinístico da extração: cada língua tem uma lista ordenada
//! de expressões regulares, cada uma etiquetada com um rótulo de entidade.
//! Hoje todos os padrões registrados são de **datas** (o formato varia por
//! língua), mas a estrutura aceita qualquer combinação de padrões e rótulos
//! por língua.
//!
//! Casamentos de padrão são tratados como certeza: confiança sempre `1.0`.
//! Texto sem nenhum casamento é um resultado normal e bem-sucedido; o que é
//! erro é pedir uma língua sem lista registrada — isso indica um bug de
//! implantação e vira [`ExtractError::Configuration`].

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::entity::{EntityLabel, EntitySpan, SourceMethod};
use crate::error::ExtractError;
use crate::language::Language;

/// Padrões de data em holandês: "02.04.2025", "02-04-2025",
/// "3 februari 2025" (dia + mês por extenso) e "december 2017" (mês + ano).
const DUTCH_DATE_PATTERNS: &[&str] = &[
    r"\b([0-3]?\d)\.([01]?\d)\.(\d{4})\b",
    r"\b([0-3]?\d)-([01]?\d)-(\d{4})\b",
    r"\b([0-3]?\d)\.?\s*(januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december)\s+(\d{4})\b",
    r"\b(januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december)\s+(\d{4})\b",
];

/// Padrões de data em alemão. A forma com mês por extenso usa ponto após o
/// dia ("2. April 2025"), como é a convenção alemã.
const GERMAN_DATE_PATTERNS: &[&str] = &[
    r"\b([0-3]?\d)\.([01]?\d)\.(\d{4})\b",
    r"\b([0-3]?\d)-([01]?\d)-(\d{4})\b",
    r"\b([0-3]?\d)\.\s*(januar|februar|märz|maerz|april|mai|juni|juli|august|september|oktober|november|dezember)\s+(\d{4})\b",
    r"\b(januar|februar|märz|maerz|april|mai|juni|juli|august|september|oktober|november|dezember)\s+(\d{4})\b",
];

/// Padrões de data em inglês: "March 15, 2024", "15 March 2024",
/// "March 2024" e o numérico "03/15/2024".
const ENGLISH_DATE_PATTERNS: &[&str] = &[
    r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+([0-3]?\d)(st|nd|rd|th)?,?\s+(\d{4})\b",
    r"\b([0-3]?\d)\s+(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{4})\b",
    r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{4})\b",
    r"\b([01]?\d)/([0-3]?\d)/(\d{4})\b",
];

/// Um padrão compilado junto com o rótulo que ele emite.
struct LabeledPattern {
    regex: Regex,
    label: EntityLabel,
}

/// Registro imutável de padrões por língua.
///
/// Construído uma única vez na inicialização do processo; nenhuma estrutura
/// global mutável é remodelada em tempo de execução.
pub struct PatternLibrary {
    patterns: HashMap<Language, Vec<LabeledPattern>>,
}

impl PatternLibrary {
    /// Constrói o registro padrão do serviço: datas para as três línguas.
    pub fn standard() -> Result<Self, ExtractError> {
        Self::from_entries(&[
            (Language::Dutch, EntityLabel::Date, DUTCH_DATE_PATTERNS),
            (Language::German, EntityLabel::Date, GERMAN_DATE_PATTERNS),
            (Language::English, EntityLabel::Date, ENGLISH_DATE_PATTERNS),
        ])
    }

    /// Constrói um registro a partir de listas cruas de padrões.
    ///
    /// Cada entrada registra um grupo de padrões com um mesmo rótulo para uma
    /// língua; a mesma língua pode aparecer várias vezes com rótulos
    /// diferentes. Os padrões são compilados sem distinção de maiúsculas
    /// ("December" e "december" casam igualmente).
    pub fn from_entries(
        entries: &[(Language, EntityLabel, &[&str])],
    ) -> Result<Self, ExtractError> {
        let mut patterns: HashMap<Language, Vec<LabeledPattern>> = HashMap::new();
        for (language, label, raw_patterns) in entries {
            let slot = patterns.entry(*language).or_default();
            for raw in *raw_patterns {
                let regex = RegexBuilder::new(raw)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        ExtractError::Configuration(format!(
                            "padrão regex inválido para {language}: {e}"
                        ))
                    })?;
                slot.push(LabeledPattern { regex, label: *label });
            }
        }
        Ok(Self { patterns })
    }

    /// Línguas com ao menos um padrão registrado.
    pub fn languages(&self) -> Vec<Language> {
        let mut langs: Vec<Language> = self.patterns.keys().copied().collect();
        langs.sort_by_key(|l| l.index());
        langs
    }

    /// Aplica todos os padrões da língua ao texto.
    ///
    /// Para cada padrão, emite todos os casamentos não-sobrepostos (a
    /// varredura sequencial do regex garante isso dentro de um mesmo padrão;
    /// sobreposições **entre** padrões são resolvidas depois pela fusão).
    /// Nunca falha por causa do conteúdo do texto: um conjunto vazio de
    /// casamentos é um resultado normal.
    pub fn find_matches(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<EntitySpan>, ExtractError> {
        let patterns = self.patterns.get(&language).ok_or_else(|| {
            ExtractError::Configuration(format!(
                "nenhum padrão registrado para a língua '{language}'"
            ))
        })?;

        let mut spans = Vec::new();
        for pattern in patterns {
            for m in pattern.regex.find_iter(text) {
                spans.push(EntitySpan {
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    label: pattern.label,
                    confidence: 1.0,
                    source: SourceMethod::Pattern,
                });
            }
        }
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dutch_numeric_dates() {
        let lib = PatternLibrary::standard().unwrap();
        let spans = lib
            .find_matches("Besluit van 02.04.2025, herzien op 15-10-2023.", Language::Dutch)
            .unwrap();
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"02.04.2025"));
        assert!(texts.contains(&"15-10-2023"));
        assert!(spans.iter().all(|s| s.label == EntityLabel::Date));
        assert!(spans.iter().all(|s| s.confidence == 1.0));
    }

    #[test]
    fn test_dutch_month_names_case_insensitive() {
        let lib = PatternLibrary::standard().unwrap();
        let spans = lib
            .find_matches("Gelet op het decreet van 22 December 2017;", Language::Dutch)
            .unwrap();
        assert!(spans.iter().any(|s| s.text == "22 December 2017"));
    }

    #[test]
    fn test_german_written_date_requires_dot() {
        let lib = PatternLibrary::standard().unwrap();
        let spans = lib
            .find_matches("Beschlossen am 2. April 2025 in Berlin.", Language::German)
            .unwrap();
        assert!(spans.iter().any(|s| s.text == "2. April 2025"));
    }

    #[test]
    fn test_english_dates() {
        let lib = PatternLibrary::standard().unwrap();
        let spans = lib
            .find_matches("The deadline is March 15, 2024.", Language::English)
            .unwrap();
        assert!(spans.iter().any(|s| s.text == "March 15, 2024"));
    }

    #[test]
    fn test_no_matches_is_success() {
        let lib = PatternLibrary::standard().unwrap();
        let spans = lib.find_matches("Geen datums hier.", Language::Dutch).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_missing_language_is_configuration_error() {
        // Registro propositalmente incompleto: só alemão
        let lib =
            PatternLibrary::from_entries(&[(Language::German, EntityLabel::Date, GERMAN_DATE_PATTERNS)])
                .unwrap();
        let err = lib.find_matches("wat dan ook", Language::Dutch).unwrap_err();
        assert!(matches!(err, ExtractError::Configuration(_)));
    }

    #[test]
    fn test_spans_carry_byte_offsets() {
        let lib = PatternLibrary::standard().unwrap();
        let text = "Op 3 februari 2025 besloten.";
        let spans = lib.find_matches(text, Language::Dutch).unwrap();
        let full = spans.iter().find(|s| s.text == "3 februari 2025").unwrap();
        assert_eq!(&text[full.start..full.end], "3 februari 2025");
    }
}
