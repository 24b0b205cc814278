//! # Orquestrador de Extração
//!
//! Conecta os estágios do pipeline para uma requisição:
//!
//! 1. **Validação** — língua, método e texto são checados antes de qualquer
//!    extrator rodar (falha rápida, nenhum trabalho parcial).
//! 2. **Despacho** — o método escolhe quais extratores executar.
//! 3. **Fusão** — os candidatos de todos os extratores passam pelo
//!    [`crate::merge`].
//! 4. **Filtro** — piso de confiança e teto de contagem do
//!    [`crate::filter`], com overrides por requisição.
//!
//! ## Degradação no modo composto
//!
//! `composite` é tolerante a falhas **por política**: se um dos métodos
//! falhar (modelo indisponível, erro inesperado no extrator) mas o outro
//! produzir resultado, a requisição segue com o que houver, registrando um
//! aviso. O modo `model` explícito NÃO degrada — o chamador pediu aquele
//! método, então a falha é propagada sem alteração.

use serde::{Deserialize, Serialize};

use crate::entity::EntitySpan;
use crate::error::ExtractError;
use crate::filter::filter_spans;
use crate::language::Language;
use crate::merge::merge_spans;
use crate::models::ModelRegistry;
use crate::patterns::PatternLibrary;

/// Método de extração pedido na requisição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Somente expressões regulares por língua.
    Pattern,
    /// Somente o tagger estatístico.
    Model,
    /// Os dois, com fusão dos resultados. Tolerante a modelo ausente.
    Composite,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Pattern => "pattern",
            Method::Model => "model",
            Method::Composite => "composite",
        }
    }

    /// Valida uma string vinda da requisição; falha rápido em valor
    /// desconhecido, sem assumir um padrão.
    pub fn parse(s: &str) -> Result<Self, ExtractError> {
        match s {
            "pattern" => Ok(Method::Pattern),
            "model" => Ok(Method::Model),
            "composite" => Ok(Method::Composite),
            other => Err(ExtractError::InvalidRequest(format!(
                "método não suportado: '{other}' (esperado: pattern, model ou composite)"
            ))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Limites padrão do processo, aplicados quando a requisição não traz
/// overrides próprios.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Confiança mínima para um span entrar no resultado.
    pub min_confidence: f64,
    /// Número máximo de entidades retornadas.
    pub max_entities: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            max_entities: 1000,
        }
    }
}

/// Uma requisição de extração.
///
/// `language` e `method` chegam como strings cruas e são validados pelo
/// orquestrador — assim valores inválidos viram um
/// [`ExtractError::InvalidRequest`] descritivo em vez de um erro de
/// desserialização opaco na borda HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub language: String,
    pub method: String,
    /// Override do piso de confiança (senão, o padrão do processo).
    pub min_confidence: Option<f64>,
    /// Override do teto de entidades (senão, o padrão do processo).
    pub max_entities: Option<usize>,
}

impl ExtractionRequest {
    pub fn new(
        text: impl Into<String>,
        language: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            method: method.into(),
            min_confidence: None,
            max_entities: None,
        }
    }
}

/// Resultado bem-sucedido de uma extração.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub language: Language,
    pub method: Method,
    /// Entidades finais: fundidas, filtradas e em ordem de leitura.
    pub entities: Vec<EntitySpan>,
}

impl Extraction {
    pub fn count(&self) -> usize {
        self.entities.len()
    }
}

/// O orquestrador: guarda o registro de padrões, o registro de modelos e os
/// limites padrão. Todas as operações usam `&self`; a struct é compartilhada
/// entre requisições concorrentes sem estado mutável além do cache de
/// modelos.
pub struct Extractor {
    patterns: PatternLibrary,
    models: ModelRegistry,
    settings: ExtractionSettings,
}

impl Extractor {
    /// Extrator padrão do serviço: padrões de data das três línguas, tagger
    /// lexical embutido, limites padrão.
    pub fn standard() -> Result<Self, ExtractError> {
        Ok(Self {
            patterns: PatternLibrary::standard()?,
            models: ModelRegistry::standard(),
            settings: ExtractionSettings::default(),
        })
    }

    pub fn new(
        patterns: PatternLibrary,
        models: ModelRegistry,
        settings: ExtractionSettings,
    ) -> Self {
        Self {
            patterns,
            models,
            settings,
        }
    }

    /// Processa uma requisição do início ao fim.
    pub fn process(&self, request: &ExtractionRequest) -> Result<Extraction, ExtractError> {
        if request.text.trim().is_empty() {
            return Err(ExtractError::InvalidRequest(
                "o texto da requisição está vazio".to_string(),
            ));
        }
        let language = Language::parse(&request.language)?;
        let method = Method::parse(&request.method)?;

        let min_confidence = request.min_confidence.unwrap_or(self.settings.min_confidence);
        let max_entities = request.max_entities.unwrap_or(self.settings.max_entities);

        let candidates = match method {
            Method::Pattern => self.patterns.find_matches(&request.text, language)?,
            Method::Model => self.models.extract(&request.text, language)?,
            Method::Composite => self.run_composite(&request.text, language)?,
        };

        let entities = filter_spans(merge_spans(candidates), min_confidence, max_entities);

        tracing::debug!(
            language = %language,
            method = %method,
            entities = entities.len(),
            "extração concluída"
        );

        Ok(Extraction {
            language,
            method,
            entities,
        })
    }

    /// Executa os dois extratores e une os candidatos.
    ///
    /// Um método que falha é absorvido enquanto o outro tiver produzido
    /// resultado; se os dois falharem não há o que degradar e a requisição
    /// falha inteira.
    fn run_composite(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<EntitySpan>, ExtractError> {
        let pattern_result = self.patterns.find_matches(text, language);
        let model_result = self.models.extract(text, language);

        match (pattern_result, model_result) {
            (Ok(mut patterns), Ok(mut models)) => {
                patterns.append(&mut models);
                Ok(patterns)
            }
            (Ok(patterns), Err(err)) => {
                tracing::warn!(
                    language = %language,
                    error = %err,
                    "modo composto degradado: seguindo somente com padrões"
                );
                Ok(patterns)
            }
            (Err(err), Ok(models)) => {
                tracing::warn!(
                    language = %language,
                    error = %err,
                    "modo composto degradado: seguindo somente com o modelo"
                );
                Ok(models)
            }
            (Err(pattern_err), Err(model_err)) => Err(ExtractError::Extraction(format!(
                "nenhum método produziu resultado — padrões: {pattern_err}; modelo: {model_err}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityLabel, SourceMethod};
    use crate::tagger::{SequenceTagger, TaggerLoader};
    use std::sync::Arc;

    /// Loader que sempre falha: simula uma língua com modelo indisponível.
    struct UnavailableLoader;

    impl TaggerLoader for UnavailableLoader {
        fn load(
            &self,
            language: Language,
        ) -> Result<Arc<dyn SequenceTagger>, ExtractError> {
            Err(ExtractError::ModelUnavailable {
                language,
                reason: "modelo não instalado".to_string(),
            })
        }
    }

    /// Tagger que quebra durante a extração (a "exceção inesperada").
    struct CrashingTagger;

    impl SequenceTagger for CrashingTagger {
        fn name(&self) -> &str {
            "crashing"
        }

        fn tag(&self, _text: &str) -> Result<Vec<EntitySpan>, ExtractError> {
            Err(ExtractError::Extraction("estouro interno do tagger".to_string()))
        }
    }

    struct CrashingLoader;

    impl TaggerLoader for CrashingLoader {
        fn load(&self, _language: Language) -> Result<Arc<dyn SequenceTagger>, ExtractError> {
            Ok(Arc::new(CrashingTagger))
        }
    }

    fn extractor_with_loader(loader: Box<dyn TaggerLoader>) -> Extractor {
        Extractor::new(
            PatternLibrary::standard().unwrap(),
            ModelRegistry::new(loader),
            ExtractionSettings::default(),
        )
    }

    const DUTCH_TEXT: &str = "Besloten op 3 februari 2025 en herzien in december 2017.";

    #[test]
    fn test_dutch_pattern_scenario() {
        let extractor = Extractor::standard().unwrap();
        let result = extractor
            .process(&ExtractionRequest::new(DUTCH_TEXT, "dutch", "pattern"))
            .unwrap();

        assert_eq!(result.count(), 2);
        assert_eq!(result.entities[0].text, "3 februari 2025");
        assert_eq!(result.entities[1].text, "december 2017");
        for e in &result.entities {
            assert_eq!(e.label, EntityLabel::Date);
            assert_eq!(e.confidence, 1.0);
        }
        assert!(result.entities[0].start < result.entities[1].start);
    }

    #[test]
    fn test_invalid_language_fails_fast() {
        let extractor = Extractor::standard().unwrap();
        let err = extractor
            .process(&ExtractionRequest::new("tekst", "klingon", "pattern"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRequest(_)));
    }

    #[test]
    fn test_invalid_method_fails_fast() {
        let extractor = Extractor::standard().unwrap();
        let err = extractor
            .process(&ExtractionRequest::new("tekst", "dutch", "flair"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_text_is_invalid_request() {
        let extractor = Extractor::standard().unwrap();
        let err = extractor
            .process(&ExtractionRequest::new("   ", "dutch", "pattern"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRequest(_)));
    }

    #[test]
    fn test_composite_degrades_when_model_unavailable() {
        let extractor = extractor_with_loader(Box::new(UnavailableLoader));
        let result = extractor
            .process(&ExtractionRequest::new(DUTCH_TEXT, "dutch", "composite"))
            .unwrap();

        // Degradou para somente-padrões: as duas datas ainda estão lá
        assert_eq!(result.count(), 2);
        assert!(result.entities.iter().all(|e| e.source == SourceMethod::Pattern));
    }

    #[test]
    fn test_model_only_propagates_unavailable() {
        let extractor = extractor_with_loader(Box::new(UnavailableLoader));
        let err = extractor
            .process(&ExtractionRequest::new(DUTCH_TEXT, "dutch", "model"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_composite_absorbs_tagger_crash() {
        // Falha no meio da extração recebe o mesmo tratamento de degradação
        // que a falha de carregamento
        let extractor = extractor_with_loader(Box::new(CrashingLoader));
        let result = extractor
            .process(&ExtractionRequest::new(DUTCH_TEXT, "dutch", "composite"))
            .unwrap();
        assert_eq!(result.count(), 2);
    }

    #[test]
    fn test_model_only_surfaces_tagger_crash() {
        let extractor = extractor_with_loader(Box::new(CrashingLoader));
        let err = extractor
            .process(&ExtractionRequest::new(DUTCH_TEXT, "dutch", "model"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Extraction(_)));
    }

    #[test]
    fn test_composite_merges_both_sources() {
        let extractor = Extractor::standard().unwrap();
        let text = "De burgemeester Jan Peeters besliste op 3 februari 2025.";
        let result = extractor
            .process(&ExtractionRequest::new(text, "dutch", "composite"))
            .unwrap();

        let labels: Vec<EntityLabel> = result.entities.iter().map(|e| e.label).collect();
        assert!(labels.contains(&EntityLabel::Date));
        assert!(labels.contains(&EntityLabel::Person));
        // invariante: sem sobreposições no resultado final
        for (i, a) in result.entities.iter().enumerate() {
            for b in result.entities.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn test_request_overrides_settings() {
        let extractor = Extractor::standard().unwrap();
        let mut request = ExtractionRequest::new(DUTCH_TEXT, "dutch", "pattern");
        request.max_entities = Some(1);
        let result = extractor.process(&request).unwrap();
        assert_eq!(result.count(), 1);

        let mut request = ExtractionRequest::new(DUTCH_TEXT, "dutch", "pattern");
        request.min_confidence = Some(1.1); // acima de qualquer confiança
        let result = extractor.process(&request).unwrap();
        assert_eq!(result.count(), 0);
    }
}
