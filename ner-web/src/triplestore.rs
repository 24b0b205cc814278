//! # Cliente SPARQL
//!
//! Acesso ao triplestore da aplicação (Virtuoso atrás de mu-authorization,
//! no stack padrão). Só o que o serviço precisa: `SELECT`s que devolvem as
//! linhas como mapas `variável → valor`.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("falha na requisição SPARQL: {0}")]
    Http(#[from] reqwest::Error),
    #[error("resposta SPARQL malformada: {0}")]
    Format(String),
}

/// Uma linha do resultado: variável → valor lexical.
pub type Row = HashMap<String, String>;

/// Cliente fino sobre um endpoint SPARQL HTTP.
pub struct Triplestore {
    endpoint: String,
    client: reqwest::Client,
}

impl Triplestore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Executa um `SELECT` e devolve as linhas de `results.bindings`.
    pub async fn select(&self, query: &str) -> Result<Vec<Row>, StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .form(&[("query", query)])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_bindings(&body)
    }

    /// URIs dos documentos ainda a processar (até `limit`).
    pub async fn query_documents(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let query = format!(
            "PREFIX eli: <http://data.europa.eu/eli/ontology#>\n\
             \n\
             SELECT DISTINCT ?document\n\
             WHERE {{\n\
                 ?document a eli:LegalExpression .\n\
             }}\n\
             LIMIT {limit}"
        );
        let rows = self.select(&query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| row.remove("document"))
            .collect())
    }

    /// Texto de decisão de um documento, se houver.
    pub async fn fetch_document_text(
        &self,
        document_uri: &str,
    ) -> Result<Option<String>, StoreError> {
        let query = format!(
            "PREFIX eli-dl: <http://data.europa.eu/eli/eli-dl#>\n\
             \n\
             SELECT ?text\n\
             WHERE {{\n\
                 <{document_uri}> eli-dl:decision_basis ?text .\n\
             }}\n\
             LIMIT 1"
        );
        let rows = self.select(&query).await?;
        Ok(rows.into_iter().next().and_then(|mut row| row.remove("text")))
    }
}

/// Converte um corpo `application/sparql-results+json` em linhas simples.
fn parse_bindings(body: &Value) -> Result<Vec<Row>, StoreError> {
    let bindings = body
        .pointer("/results/bindings")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Format("corpo sem results.bindings".to_string()))?;

    let mut rows = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let cells = binding
            .as_object()
            .ok_or_else(|| StoreError::Format("binding não é um objeto".to_string()))?;
        let mut row = Row::new();
        for (var, cell) in cells {
            if let Some(value) = cell.get("value").and_then(Value::as_str) {
                row.insert(var.clone(), value.to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bindings() {
        let body = json!({
            "head": { "vars": ["document", "text"] },
            "results": {
                "bindings": [
                    {
                        "document": { "type": "uri", "value": "http://data.example.org/besluiten/42" },
                        "text": { "type": "literal", "value": "Besloten op 3 februari 2025." }
                    },
                    {
                        "document": { "type": "uri", "value": "http://data.example.org/besluiten/43" }
                    }
                ]
            }
        });

        let rows = parse_bindings(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0]["document"],
            "http://data.example.org/besluiten/42"
        );
        assert_eq!(rows[0]["text"], "Besloten op 3 februari 2025.");
        assert!(!rows[1].contains_key("text"));
    }

    #[test]
    fn test_parse_bindings_rejects_bad_shape() {
        let body = json!({ "results": "oops" });
        assert!(matches!(
            parse_bindings(&body),
            Err(StoreError::Format(_))
        ));
    }

    #[test]
    fn test_parse_bindings_empty() {
        let body = json!({ "results": { "bindings": [] } });
        assert!(parse_bindings(&body).unwrap().is_empty());
    }
}
