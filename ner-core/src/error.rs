//! # Taxonomia de Erros da Extração
//!
//! Cada falha do núcleo cai em exatamente uma das categorias abaixo. A camada
//! HTTP usa a categoria para escolher o código de status; o orquestrador usa
//! a categoria para decidir se o modo composto pode degradar (ver
//! [`crate::extractor`]).
//!
//! | Variante           | Origem                                   | Recuperável?                  |
//! |--------------------|------------------------------------------|-------------------------------|
//! | `InvalidRequest`   | língua/método desconhecido, texto vazio  | não — erro do cliente         |
//! | `Configuration`    | língua sem padrões, regex inválida       | não — bug de implantação      |
//! | `ModelUnavailable` | tagger não carregou para a língua        | no modo composto, sim         |
//! | `Extraction`       | falha inesperada dentro de um método     | no modo composto, sim         |

use thiserror::Error;

use crate::language::Language;

/// Erro estruturado do núcleo de extração.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Língua ou método fora das enumerações aceitas, ou texto vazio.
    /// Nunca é retentado; vira erro 4xx na borda HTTP.
    #[error("requisição inválida: {0}")]
    InvalidRequest(String),

    /// Problema de configuração do processo (ex: língua que deveria ter
    /// padrões registrados mas não tem). Fatal para o caminho afetado.
    #[error("erro de configuração: {0}")]
    Configuration(String),

    /// O tagger estatístico da língua não pôde ser carregado. No modo
    /// `composite` o orquestrador degrada para somente-padrões; no modo
    /// `model` o erro é propagado sem alteração.
    #[error("modelo indisponível para {language}: {reason}")]
    ModelUnavailable { language: Language, reason: String },

    /// Falha genérica dentro de um método de extração (o equivalente a uma
    /// exceção inesperada no extrator).
    #[error("falha na extração: {0}")]
    Extraction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExtractError::InvalidRequest("língua não suportada: 'klingon'".to_string());
        assert!(err.to_string().contains("klingon"));

        let err = ExtractError::ModelUnavailable {
            language: Language::Dutch,
            reason: "arquivo de pesos ausente".to_string(),
        };
        assert!(err.to_string().contains("dutch"));
    }
}
