//! # Processamento em Lote de Documentos
//!
//! Fluxo da rota `/ner/process-jobs`: busca um lote de documentos no
//! triplestore, roda a extração composta sobre o texto de cada um e monta um
//! relatório por documento. Uma falha em um documento não derruba o lote —
//! ela vira um item `success: false` no relatório.

use std::sync::Arc;

use ner_core::{ExtractionRequest, Extractor};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::triplestore::{StoreError, Triplestore};

/// Resultado de um único documento do lote.
#[derive(Debug, Serialize)]
pub struct DocumentResult {
    pub document_uri: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    fn failure(document_uri: String, error: impl Into<String>) -> Self {
        Self {
            document_uri,
            success: false,
            entities_found: None,
            error: Some(error.into()),
        }
    }
}

/// Relatório do lote inteiro.
#[derive(Debug, Serialize)]
pub struct JobReport {
    pub message: String,
    pub documents_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<DocumentResult>,
}

/// Processa um lote de documentos pendentes.
///
/// Só a consulta inicial ao triplestore pode falhar o lote como um todo;
/// depois dela, cada documento é tratado isoladamente.
pub async fn process_documents(
    store: &Triplestore,
    extractor: Arc<Extractor>,
    config: &AppConfig,
) -> Result<JobReport, StoreError> {
    let documents = store.query_documents(config.job_batch_size).await?;
    if documents.is_empty() {
        info!("nenhum documento pendente no triplestore");
        return Ok(JobReport {
            message: "nenhum documento para processar".to_string(),
            documents_processed: 0,
            successful: 0,
            failed: 0,
            results: Vec::new(),
        });
    }

    let mut results = Vec::with_capacity(documents.len());
    for document_uri in documents {
        results.push(process_one(store, Arc::clone(&extractor), config, document_uri).await);
    }

    let successful = results.iter().filter(|r| r.success).count();
    Ok(JobReport {
        message: format!("{} documento(s) processado(s)", results.len()),
        documents_processed: results.len(),
        successful,
        failed: results.len() - successful,
        results,
    })
}

async fn process_one(
    store: &Triplestore,
    extractor: Arc<Extractor>,
    config: &AppConfig,
    document_uri: String,
) -> DocumentResult {
    let text = match store.fetch_document_text(&document_uri).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            warn!(document = %document_uri, "documento sem texto de decisão");
            return DocumentResult::failure(
                document_uri,
                "documento sem texto em eli-dl:decision_basis",
            );
        }
        Err(err) => {
            warn!(document = %document_uri, error = %err, "falha ao buscar o texto");
            return DocumentResult::failure(document_uri, format!("falha ao buscar o texto: {err}"));
        }
    };

    // O núcleo é síncrono; roda fora do executor para não travar o runtime.
    let request = ExtractionRequest::new(text, &config.default_language, &config.default_method);
    let extraction = match tokio::task::spawn_blocking(move || extractor.process(&request)).await {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(err)) => {
            warn!(document = %document_uri, error = %err, "extração falhou");
            return DocumentResult::failure(document_uri, format!("extração falhou: {err}"));
        }
        Err(err) => {
            return DocumentResult::failure(
                document_uri,
                format!("tarefa de extração abortada: {err}"),
            );
        }
    };

    // TODO: gravar as entidades de volta no triplestore quando o modelo de
    // anotações estiver definido; por enquanto o resultado só é reportado.
    info!(
        document = %document_uri,
        entities = extraction.count(),
        "documento processado"
    );

    DocumentResult {
        document_uri,
        success: true,
        entities_found: Some(extraction.count()),
        error: None,
    }
}
