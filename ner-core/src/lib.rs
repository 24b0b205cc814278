//! # ner-core — Extração Multi-Método de Entidades Nomeadas
//!
//! Este crate implementa o núcleo de um serviço de NER para textos
//! administrativos em **holandês, alemão e inglês**. Ele combina dois
//! métodos de extração complementares e funde os resultados em uma única
//! lista determinística:
//!
//! 1. **Padrões** ([`patterns`]): expressões regulares por língua (datas),
//!    confiança sempre 1.0.
//! 2. **Modelo** ([`models`] + [`tagger`]): um tagger estatístico por língua,
//!    carregado de forma preguiçosa e memoizada; a implementação embutida é o
//!    tagger lexical ([`lexicon`]), mas qualquer modelo atrás da trait
//!    [`tagger::SequenceTagger`] serve.
//! 3. **Fusão** ([`merge`]): deduplicação exata + resolução de sobreposições
//!    por uma ordem total (confiança, comprimento, posição, origem).
//! 4. **Filtro** ([`filter`]): piso de confiança e teto top-k.
//!
//! O [`extractor::Extractor`] orquestra tudo: valida a requisição, despacha
//! para os métodos pedidos (`pattern`, `model` ou `composite`) e aplica
//! fusão + filtro. No modo `composite`, um modelo indisponível degrada a
//! requisição para somente-padrões em vez de falhá-la.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ner_core::{ExtractionRequest, Extractor};
//!
//! let extractor = Extractor::standard().unwrap();
//!
//! let request = ExtractionRequest::new(
//!     "Besloten op 3 februari 2025 en herzien in december 2017.",
//!     "dutch",
//!     "pattern",
//! );
//!
//! let extraction = extractor.process(&request).unwrap();
//! assert_eq!(extraction.count(), 2);
//! for entity in &extraction.entities {
//!     println!("{} ({}) — {:.2}", entity.text, entity.label, entity.confidence);
//! }
//! ```

pub mod entity;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod language;
pub mod lexicon;
pub mod merge;
pub mod models;
pub mod patterns;
pub mod tagger;

pub use entity::{EntityLabel, EntitySpan, SourceMethod};
pub use error::ExtractError;
pub use extractor::{Extraction, ExtractionRequest, ExtractionSettings, Extractor, Method};
pub use filter::filter_spans;
pub use language::Language;
pub use merge::merge_spans;
pub use models::ModelRegistry;
pub use patterns::PatternLibrary;
pub use tagger::{SequenceTagger, TaggerLoader};
