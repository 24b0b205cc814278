//! # Interface do Tagger Estatístico
//!
//! O extrator de modelo trata o tagger como uma **capacidade opaca**: dado um
//! texto, produza spans com rótulo e pontuação. Tudo que o núcleo exige está
//! nestas duas traits — a implementação concreta (o [`crate::lexicon`]
//! embutido, ou um modelo externo de verdade) fica atrás da fronteira.
//!
//! A separação entre [`SequenceTagger`] (usar um modelo carregado) e
//! [`TaggerLoader`] (carregar um modelo para uma língua) existe porque o
//! carregamento é a operação cara: o [`crate::models::ModelRegistry`] chama o
//! loader no máximo uma vez por língua e memoiza o resultado.

use std::sync::Arc;

use crate::entity::EntitySpan;
use crate::error::ExtractError;
use crate::language::Language;

/// Um modelo de anotação de sequência já carregado.
///
/// Implementações devem ser puras em relação ao texto: mesma entrada, mesma
/// saída. Os spans retornados precisam ter offsets de byte válidos no texto
/// recebido; rótulo e confiança são repassados como o modelo os reporta (a
/// coerção para a forma comum acontece no registro).
pub trait SequenceTagger: Send + Sync {
    /// Nome do modelo, para logs (ex: "lexicon-dutch").
    fn name(&self) -> &str;

    /// Anota o texto, retornando os spans encontrados.
    fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractError>;
}

impl std::fmt::Debug for dyn SequenceTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceTagger")
            .field("name", &self.name())
            .finish()
    }
}

/// Constrói o tagger de uma língua.
///
/// Falhas de carregamento (modelo ausente, pesos corrompidos) devem ser
/// reportadas como [`ExtractError::ModelUnavailable`] — é essa variante que o
/// orquestrador reconhece ao decidir degradar o modo composto.
pub trait TaggerLoader: Send + Sync {
    fn load(&self, language: Language) -> Result<Arc<dyn SequenceTagger>, ExtractError>;
}
