//! # Configuração do Serviço
//!
//! Toda a configuração vem de variáveis de ambiente, com padrões que
//! funcionam dentro de um stack mu.semte.ch (o endpoint SPARQL aponta para o
//! hostname `database` da rede Docker).
//!
//! | Variável              | Padrão                          |
//! |-----------------------|---------------------------------|
//! | `NER_BIND`            | `0.0.0.0:3000`                  |
//! | `MU_SPARQL_ENDPOINT`  | `http://database:8890/sparql`   |
//! | `NER_DEFAULT_LANGUAGE`| `dutch`                         |
//! | `NER_DEFAULT_METHOD`  | `pattern`                       |
//! | `NER_MIN_CONFIDENCE`  | `0.5`                           |
//! | `NER_MAX_ENTITIES`    | `1000`                          |
//! | `NER_JOB_BATCH`       | `5`                             |

use ner_core::ExtractionSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("valor inválido para {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuração completa do serviço web.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Endereço de escuta do servidor HTTP.
    pub bind: String,
    /// Endpoint SPARQL do triplestore.
    pub sparql_endpoint: String,
    /// Língua assumida quando a requisição não informa uma.
    pub default_language: String,
    /// Método assumido quando a requisição não informa um.
    pub default_method: String,
    /// Piso de confiança padrão.
    pub min_confidence: f64,
    /// Teto de entidades padrão.
    pub max_entities: usize,
    /// Quantos documentos buscar por lote em `/ner/process-jobs`.
    pub job_batch_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ExtractionSettings::default();
        Self {
            bind: "0.0.0.0:3000".to_string(),
            sparql_endpoint: "http://database:8890/sparql".to_string(),
            default_language: "dutch".to_string(),
            default_method: "pattern".to_string(),
            min_confidence: settings.min_confidence,
            max_entities: settings.max_entities,
            job_batch_size: 5,
        }
    }
}

impl AppConfig {
    /// Monta a configuração a partir do ambiente, caindo nos padrões para
    /// qualquer variável ausente.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("NER_BIND") {
            config.bind = value;
        }
        if let Ok(value) = std::env::var("MU_SPARQL_ENDPOINT") {
            config.sparql_endpoint = value;
        }
        if let Ok(value) = std::env::var("NER_DEFAULT_LANGUAGE") {
            config.default_language = value;
        }
        if let Ok(value) = std::env::var("NER_DEFAULT_METHOD") {
            config.default_method = value;
        }
        if let Ok(value) = std::env::var("NER_MIN_CONFIDENCE") {
            config.min_confidence = parse_var("NER_MIN_CONFIDENCE", &value)?;
        }
        if let Ok(value) = std::env::var("NER_MAX_ENTITIES") {
            config.max_entities = parse_var("NER_MAX_ENTITIES", &value)?;
        }
        if let Ok(value) = std::env::var("NER_JOB_BATCH") {
            config.job_batch_size = parse_var("NER_JOB_BATCH", &value)?;
        }

        Ok(config)
    }

    /// Padrões de filtragem no formato que o núcleo espera.
    pub fn settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            min_confidence: self.min_confidence,
            max_entities: self.max_entities,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
