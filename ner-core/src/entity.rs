//! # Spans de Entidade e Ordem Total
//!
//! Define o tipo central do sistema: o [`EntitySpan`], um trecho rotulado do
//! texto com uma pontuação de confiança. Também define a **ordem total** entre
//! spans que torna a fusão ([`crate::merge`]) e o corte top-k
//! ([`crate::filter`]) determinísticos.
//!
//! ## Categorias de Entidades
//!
//! | Rótulo   | Significado            | Exemplos                        |
//! |----------|------------------------|---------------------------------|
//! | DATE     | Data                   | "3 februari 2025", "02.04.2025" |
//! | PERSON   | Pessoa                 | "Jan Peeters"                   |
//! | ORG      | Organização            | "Gemeente Zonnedorp"            |
//! | GPE      | Entidade geopolítica   | "Gent", "Deutschland"           |
//! | CARDINAL | Número cardinal        | "90", "2"                       |
//! | EVENT    | Evento nomeado         | "Gemeenteraad 2023"             |
//! | MISC     | Demais categorias      | (rótulos não mapeados)          |

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Categorias de entidade emitidas pelos extratores.
///
/// A enumeração cobre os rótulos dos padrões regex e dos taggers
/// estatísticos; rótulos desconhecidos reportados por um tagger são
/// coagidos para [`EntityLabel::Misc`] em vez de derrubar a requisição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Date,
    Time,
    Person,
    Org,
    Gpe,
    Loc,
    Cardinal,
    Ordinal,
    Money,
    Percent,
    Event,
    Law,
    Misc,
}

impl EntityLabel {
    /// Nome do rótulo como string (para serialização e logs).
    pub fn name(&self) -> &'static str {
        match self {
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Cardinal => "CARDINAL",
            EntityLabel::Ordinal => "ORDINAL",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Event => "EVENT",
            EntityLabel::Law => "LAW",
            EntityLabel::Misc => "MISC",
        }
    }

    /// Tenta parsear a partir do nome exato (ex: "DATE" → Some(Date)).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DATE" => Some(EntityLabel::Date),
            "TIME" => Some(EntityLabel::Time),
            "PERSON" => Some(EntityLabel::Person),
            "ORG" => Some(EntityLabel::Org),
            "GPE" => Some(EntityLabel::Gpe),
            "LOC" => Some(EntityLabel::Loc),
            "CARDINAL" => Some(EntityLabel::Cardinal),
            "ORDINAL" => Some(EntityLabel::Ordinal),
            "MONEY" => Some(EntityLabel::Money),
            "PERCENT" => Some(EntityLabel::Percent),
            "EVENT" => Some(EntityLabel::Event),
            "LAW" => Some(EntityLabel::Law),
            "MISC" => Some(EntityLabel::Misc),
            _ => None,
        }
    }

    /// Coage um rótulo reportado por um tagger externo para a enumeração.
    ///
    /// Cobre as variações usuais dos esquemas de anotação (`PER` do CoNLL,
    /// `PERSON` do OntoNotes); o que não for reconhecido vira `MISC`.
    pub fn from_tagger_label(s: &str) -> Self {
        match s {
            "PER" => EntityLabel::Person,
            "NORP" | "FAC" | "PRODUCT" | "WORK_OF_ART" | "LANGUAGE" | "QUANTITY" => {
                EntityLabel::Misc
            }
            other => EntityLabel::parse(other).unwrap_or(EntityLabel::Misc),
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Qual extrator produziu o span. Mantido para o desempate da fusão:
/// a saída do modelo é mais rica, então `Model` vence `Pattern` em empates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMethod {
    Model,
    Pattern,
}

impl SourceMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SourceMethod::Model => "model",
            SourceMethod::Pattern => "pattern",
        }
    }

    /// Posição na ordem total: modelo antes de padrão.
    fn rank(&self) -> u8 {
        match self {
            SourceMethod::Model => 0,
            SourceMethod::Pattern => 1,
        }
    }
}

impl std::fmt::Display for SourceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Uma entidade identificada no texto.
///
/// Imutável depois de produzida: os extratores criam spans novos a cada
/// requisição e nada no núcleo os altera depois da fusão.
///
/// `start` e `end` são offsets de **byte** no texto UTF-8 original, intervalo
/// meio-aberto (`0 <= start < end <= text.len()`). Offsets de byte permitem
/// fatiar o texto original diretamente (`&text[start..end]`) sem reescanear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// O trecho exato do texto original (ex: "3 februari 2025").
    pub text: String,
    /// Offset de byte inicial (inclusivo).
    pub start: usize,
    /// Offset de byte final (exclusivo).
    pub end: usize,
    /// Categoria da entidade.
    pub label: EntityLabel,
    /// Confiança em [0.0, 1.0]. Padrões regex emitem sempre 1.0;
    /// o modelo repassa a pontuação própria.
    pub confidence: f64,
    /// Extrator de origem ("pattern" ou "model").
    pub source: SourceMethod,
}

impl EntitySpan {
    /// Comprimento do span em bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Dois spans se sobrepõem se seus intervalos meio-abertos se intersectam,
    /// independentemente do rótulo.
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Chave de duplicata exata: dois spans com a mesma chave são a mesma
    /// entidade reportada duas vezes, não candidatos concorrentes.
    pub fn dedup_key(&self) -> (usize, usize, EntityLabel) {
        (self.start, self.end, self.label)
    }
}

/// Ordem total de **prioridade** entre spans (o "melhor" vem primeiro):
/// confiança decrescente, depois span mais longo, depois início mais cedo,
/// depois `model` antes de `pattern`.
///
/// Por ser total, a fusão e o corte top-k produzem o mesmo resultado para a
/// mesma entrada, em qualquer ordem de iteração.
pub fn cmp_priority(a: &EntitySpan, b: &EntitySpan) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.source.rank().cmp(&b.source.rank()))
}

/// Ordem de **leitura**: início crescente, empates pelo span mais longo
/// primeiro. É a ordem de todo resultado final.
pub fn cmp_position(a: &EntitySpan, b: &EntitySpan) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.len().cmp(&a.len()))
}
