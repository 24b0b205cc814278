//! # Línguas Suportadas
//!
//! O serviço reconhece entidades em exatamente três línguas. A enumeração é
//! fechada de propósito: cada língua precisa de um conjunto de padrões regex
//! registrado ([`crate::patterns`]) e de um tagger estatístico carregável
//! ([`crate::models`]), então aceitar uma língua nova é uma mudança de
//! configuração, não um caso de borda em tempo de execução.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Língua do texto de entrada.
///
/// Valores serializados em minúsculas ("dutch", "german", "english"),
/// idênticos aos aceitos pela API HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Holandês (nl) — a língua padrão do serviço.
    Dutch,
    /// Alemão (de).
    German,
    /// Inglês (en).
    English,
}

impl Language {
    /// Número total de línguas suportadas (dimensiona caches por língua).
    pub const COUNT: usize = 3;

    /// Nome canônico da língua, como aparece na API.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Dutch => "dutch",
            Language::German => "german",
            Language::English => "english",
        }
    }

    /// Índice estável 0..COUNT, usado para indexar os slots do registro de
    /// modelos sem precisar de um HashMap.
    pub fn index(&self) -> usize {
        match self {
            Language::Dutch => 0,
            Language::German => 1,
            Language::English => 2,
        }
    }

    /// Todas as línguas, em ordem de índice.
    pub fn all() -> [Language; Language::COUNT] {
        [Language::Dutch, Language::German, Language::English]
    }

    /// Valida uma string vinda da requisição.
    ///
    /// Falha rápido com [`ExtractError::InvalidRequest`] em vez de assumir um
    /// padrão silencioso: uma língua errada produziria entidades erradas.
    pub fn parse(s: &str) -> Result<Self, ExtractError> {
        match s {
            "dutch" => Ok(Language::Dutch),
            "german" => Ok(Language::German),
            "english" => Ok(Language::English),
            other => Err(ExtractError::InvalidRequest(format!(
                "língua não suportada: '{other}' (esperado: dutch, german ou english)"
            ))),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
