//! # Tagger Lexical Embutido
//!
//! Implementação padrão da trait [`SequenceTagger`]: um tagger heurístico por
//! língua, baseado em listas de pistas lexicais (títulos que precedem nomes de
//! pessoa, palavras que iniciam organizações, topônimos conhecidos).
//!
//! Ele ocupa o lugar que um modelo estatístico de verdade ocuparia em
//! produção — mesma interface, mesmas pontuações de confiança heurísticas —
//! de modo que trocar por um modelo real não toca o orquestrador nem o
//! registro de modelos.
//!
//! ## Regras aplicadas (em ordem)
//!
//! 1. **Organização**: palavra-chave institucional capitalizada ("Gemeente",
//!    "Ministerium", "University") seguida de tokens capitalizados → ORG.
//! 2. **Pessoa**: título ("burgemeester", "dr", "president") seguido de
//!    tokens capitalizados → PERSON (o título fica fora do span).
//! 3. **Topônimo**: token presente no gazetteer geográfico da língua → GPE.
//! 4. **Cardinal**: token composto só de dígitos → CARDINAL.

use std::sync::Arc;

use crate::entity::{EntityLabel, EntitySpan, SourceMethod};
use crate::error::ExtractError;
use crate::language::Language;
use crate::tagger::{SequenceTagger, TaggerLoader};

/// Limite de tokens por span (evita engolir frases inteiras capitalizadas).
const MAX_SPAN_TOKENS: usize = 6;

/// Partículas aceitas no meio de um nome de pessoa ("Anne van der Berg").
const PERSON_PARTICLES: &[&str] = &["van", "de", "der", "den", "von", "zu", "ter", "te"];

/// Conectores aceitos no meio de um nome de organização
/// ("College van Burgemeester en Schepenen").
const ORG_CONNECTORS: &[&str] = &[
    "van", "de", "der", "den", "von", "zu", "ter", "te", "en", "und", "and", "of", "voor", "für",
];

/// Um token com seus offsets de byte no texto original.
struct Word {
    lower: String,
    start: usize,
    end: usize,
    capitalized: bool,
    numeric: bool,
}

/// Divide o texto em palavras (sequências alfanuméricas), preservando offsets.
///
/// Versão mínima do tokenizador: pontuação e espaços apenas separam; nenhuma
/// normalização além de lowercase para as comparações de gazetteer.
fn split_words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            let end = i + ch.len_utf8();
            current = match current {
                Some((start, _)) => Some((start, end)),
                None => Some((i, end)),
            };
        } else if let Some((start, end)) = current.take() {
            words.push(make_word(text, start, end));
        }
    }
    if let Some((start, end)) = current {
        words.push(make_word(text, start, end));
    }
    words
}

fn make_word(text: &str, start: usize, end: usize) -> Word {
    let slice = &text[start..end];
    Word {
        lower: slice.to_lowercase(),
        start,
        end,
        capitalized: slice.chars().next().map(|c| c.is_uppercase()).unwrap_or(false),
        numeric: slice.chars().all(|c| c.is_ascii_digit()),
    }
}

/// Tagger heurístico de uma língua específica.
pub struct LexiconTagger {
    name: String,
    /// Títulos que precedem nomes de pessoa (lowercase).
    person_titles: &'static [&'static str],
    /// Palavras que iniciam nomes de organização (lowercase).
    org_keywords: &'static [&'static str],
    /// Topônimos conhecidos (lowercase).
    gpe_names: &'static [&'static str],
}

impl LexiconTagger {
    pub fn new(language: Language) -> Self {
        let (person_titles, org_keywords, gpe_names): (
            &'static [&'static str],
            &'static [&'static str],
            &'static [&'static str],
        ) = match language {
            Language::Dutch => (
                &[
                    "burgemeester", "schepen", "secretaris", "minister", "wethouder",
                    "gouverneur", "voorzitter", "directeur", "rechter", "professor",
                    "dr", "prof", "dhr", "mevr", "mevrouw", "meneer",
                ],
                &[
                    "gemeente", "stad", "provincie", "ministerie", "universiteit",
                    "college", "raad", "agentschap", "rechtbank", "dienst",
                ],
                &[
                    "belgië", "nederland", "gent", "antwerpen", "brussel", "amsterdam",
                    "rotterdam", "brugge", "leuven", "vlaanderen", "utrecht",
                ],
            ),
            Language::German => (
                &[
                    "bürgermeister", "bürgermeisterin", "minister", "ministerin",
                    "kanzler", "kanzlerin", "präsident", "präsidentin", "richter",
                    "richterin", "senator", "dr", "prof", "herr", "frau",
                ],
                &[
                    "stadt", "gemeinde", "ministerium", "universität", "bundesamt",
                    "landgericht", "amtsgericht", "gesellschaft", "verein", "behörde",
                ],
                &[
                    "deutschland", "berlin", "münchen", "hamburg", "köln", "frankfurt",
                    "bayern", "österreich", "schweiz", "wien", "zürich",
                ],
            ),
            Language::English => (
                &[
                    "president", "minister", "mayor", "senator", "professor", "judge",
                    "director", "ceo", "chancellor", "dr", "mr", "mrs", "ms",
                ],
                &[
                    "university", "ministry", "city", "department", "council", "court",
                    "agency", "company", "committee", "institute",
                ],
                &[
                    "england", "london", "amsterdam", "berlin", "brussels", "washington",
                    "europe", "netherlands", "germany", "belgium", "ghent",
                ],
            ),
        };

        Self {
            name: format!("lexicon-{language}"),
            person_titles,
            org_keywords,
            gpe_names,
        }
    }

    /// Estende um span a partir de `start` por tokens capitalizados,
    /// aceitando os conectores dados no meio. Retorna o índice (exclusivo) do
    /// último token incluído, ou `start` se nada foi incluído.
    fn extend_capitalized(&self, words: &[Word], start: usize, connectors: &[&str]) -> usize {
        let mut end = start;
        let mut i = start;
        while i < words.len() && i - start < MAX_SPAN_TOKENS {
            let w = &words[i];
            if w.capitalized && !w.numeric {
                end = i + 1;
                i += 1;
            } else if connectors.contains(&w.lower.as_str()) {
                // conector só entra no span se depois vier token capitalizado
                // (end só avança em tokens capitalizados)
                i += 1;
            } else {
                break;
            }
        }
        end
    }

    fn push_span(
        &self,
        text: &str,
        words: &[Word],
        first: usize,
        last: usize,
        label: EntityLabel,
        confidence: f64,
        taken: &mut [bool],
        spans: &mut Vec<EntitySpan>,
    ) {
        let start = words[first].start;
        let end = words[last].end;
        spans.push(EntitySpan {
            text: text[start..end].to_string(),
            start,
            end,
            label,
            confidence,
            source: SourceMethod::Model,
        });
        for slot in taken[first..=last].iter_mut() {
            *slot = true;
        }
    }
}

impl SequenceTagger for LexiconTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractError> {
        let words = split_words(text);
        let mut taken = vec![false; words.len()];
        let mut spans = Vec::new();

        // 1. Organizações: palavra-chave capitalizada + continuação capitalizada
        for i in 0..words.len() {
            if taken[i] || !words[i].capitalized {
                continue;
            }
            if !self.org_keywords.contains(&words[i].lower.as_str()) {
                continue;
            }
            let end = self.extend_capitalized(&words, i + 1, ORG_CONNECTORS);
            if end > i + 1 {
                self.push_span(text, &words, i, end - 1, EntityLabel::Org, 0.85, &mut taken, &mut spans);
            }
        }

        // 2. Pessoas: título seguido de nome capitalizado
        for i in 0..words.len().saturating_sub(1) {
            if taken[i + 1] || !self.person_titles.contains(&words[i].lower.as_str()) {
                continue;
            }
            if !words[i + 1].capitalized || words[i + 1].numeric {
                continue;
            }
            let end = self.extend_capitalized(&words, i + 1, PERSON_PARTICLES);
            if end > i + 1 {
                self.push_span(text, &words, i + 1, end - 1, EntityLabel::Person, 0.80, &mut taken, &mut spans);
            }
        }

        // 3. Topônimos
        for i in 0..words.len() {
            if taken[i] {
                continue;
            }
            if self.gpe_names.contains(&words[i].lower.as_str()) {
                self.push_span(text, &words, i, i, EntityLabel::Gpe, 0.90, &mut taken, &mut spans);
            }
        }

        // 4. Cardinais
        for i in 0..words.len() {
            if taken[i] || !words[i].numeric {
                continue;
            }
            self.push_span(text, &words, i, i, EntityLabel::Cardinal, 0.60, &mut taken, &mut spans);
        }

        Ok(spans)
    }
}

/// Loader padrão: constrói o [`LexiconTagger`] da língua pedida.
///
/// Nunca falha por si só — serve de implementação de referência da trait;
/// loaders de modelos externos é que reportam [`ExtractError::ModelUnavailable`].
pub struct LexiconLoader;

impl TaggerLoader for LexiconLoader {
    fn load(&self, language: Language) -> Result<Arc<dyn SequenceTagger>, ExtractError> {
        Ok(Arc::new(LexiconTagger::new(language)))
    }
}
