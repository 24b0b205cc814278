//! # Registro de Modelos — Carregamento Preguiçoso por Língua
//!
//! O tagger estatístico é o recurso caro e compartilhado do serviço, então o
//! registro garante três propriedades:
//!
//! 1. **No máximo um carregamento por língua**: o resultado é memoizado e
//!    reutilizado por todas as requisições seguintes.
//! 2. **Coalescência sob concorrência**: requisições simultâneas para a mesma
//!    língua ainda não carregada disputam o slot daquela língua; uma carrega,
//!    as outras esperam e recebem a instância pronta.
//! 3. **Independência entre línguas**: cada língua tem seu próprio slot com
//!    sua própria trava — carregar alemão nunca bloqueia holandês.
//!
//! Uma falha de carregamento **não** é memoizada: a próxima requisição tenta
//! de novo (o modelo pode ter sido instalado nesse meio-tempo).

use std::sync::{Arc, Mutex};

use crate::entity::{EntitySpan, SourceMethod};
use crate::error::ExtractError;
use crate::language::Language;
use crate::lexicon::LexiconLoader;
use crate::tagger::{SequenceTagger, TaggerLoader};

type Slot = Mutex<Option<Arc<dyn SequenceTagger>>>;

/// Cache de taggers carregados, um slot por língua.
pub struct ModelRegistry {
    loader: Box<dyn TaggerLoader>,
    slots: [Slot; Language::COUNT],
}

impl ModelRegistry {
    /// Registro com um loader customizado (modelos externos, mocks de teste).
    pub fn new(loader: Box<dyn TaggerLoader>) -> Self {
        Self {
            loader,
            slots: [Mutex::new(None), Mutex::new(None), Mutex::new(None)],
        }
    }

    /// Registro padrão do serviço: o tagger lexical embutido.
    pub fn standard() -> Self {
        Self::new(Box::new(LexiconLoader))
    }

    /// Retorna o tagger da língua, carregando na primeira chamada.
    ///
    /// A trava do slot fica segurada durante o carregamento, o que é
    /// exatamente o comportamento de coalescência desejado: quem chegar
    /// durante o load espera e encontra o slot preenchido.
    pub fn get(&self, language: Language) -> Result<Arc<dyn SequenceTagger>, ExtractError> {
        let mut slot = self.slots[language.index()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(tagger) = slot.as_ref() {
            return Ok(Arc::clone(tagger));
        }

        let tagger = self.loader.load(language)?;
        tracing::info!(language = %language, model = tagger.name(), "modelo carregado");
        *slot = Some(Arc::clone(&tagger));
        Ok(tagger)
    }

    /// A língua já tem um tagger carregado? (só observação, não carrega)
    pub fn is_loaded(&self, language: Language) -> bool {
        self.slots[language.index()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Extrai entidades do texto via o tagger da língua, coagindo a saída
    /// para a forma comum: fonte marcada como `model` e confiança presa ao
    /// intervalo [0, 1], independentemente do que o tagger reportar.
    pub fn extract(&self, text: &str, language: Language) -> Result<Vec<EntitySpan>, ExtractError> {
        let tagger = self.get(language)?;
        let mut spans = tagger.tag(text)?;
        for span in &mut spans {
            span.source = SourceMethod::Model;
            span.confidence = span.confidence.clamp(0.0, 1.0);
        }
        Ok(spans)
    }
}
