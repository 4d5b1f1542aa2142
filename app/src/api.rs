use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::AutofillConfig;
use crate::error::LookupError;
use crate::models::LookupResponse;
use crate::utils;

/// Fonte dos dados cadastrais de um CNPJ.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Consulta um CNPJ de 14 dígitos, sem pontuação.
    async fn consultar(&self, cnpj: &str) -> Result<LookupResponse, LookupError>;
}

/// Cliente HTTP da consulta pública de CNPJ.
///
/// Uma única requisição por consulta: sem retry e, a menos que configurado,
/// sem timeout.
#[derive(Debug, Clone)]
pub struct CnpjaClient {
    client: reqwest::Client,
    config: AutofillConfig,
}

impl CnpjaClient {
    pub fn new(config: AutofillConfig) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AutofillConfig {
        &self.config
    }
}

#[async_trait]
impl RegistryLookup for CnpjaClient {
    async fn consultar(&self, cnpj: &str) -> Result<LookupResponse, LookupError> {
        let cnpj_limpo =
            utils::cnpj_limpo(cnpj).ok_or_else(|| LookupError::InvalidCnpj(cnpj.to_string()))?;
        let url = self.config.url_para(&cnpj_limpo);
        debug!(%url, "consultando CNPJ");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let corpo = response.bytes().await?;

        // O corpo é lido como JSON qualquer que seja o status HTTP: a rejeição
        // do CNPJ pode vir junto com 4xx.
        let dados: LookupResponse = serde_json::from_slice(&corpo).map_err(|e| {
            warn!(%status, erro = %e, "resposta do serviço não é JSON válido");
            LookupError::Parse(e)
        })?;

        if dados.is_error() {
            debug!(%status, cnpj = %cnpj_limpo, "serviço rejeitou o CNPJ");
            return Ok(dados);
        }

        if !status.is_success() {
            warn!(%status, cnpj = %cnpj_limpo, "serviço respondeu com erro HTTP");
            return Err(LookupError::Http { status: status.as_u16() });
        }

        Ok(dados)
    }
}
