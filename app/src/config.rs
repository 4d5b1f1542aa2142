use std::time::Duration;

use crate::error::ConfigError;

pub const URL_CONSULTA_CNPJ: &str = "https://open.cnpja.com/office/";
pub const CODIGO_ATIVIDADE: u64 = 5320202;
pub const USER_AGENT: &str = concat!("cnpj-autofill/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AutofillConfig {
    /// Prefixo da URL; o CNPJ é concatenado ao final.
    pub base_url: String,
    /// CNAE exigido entre as atividades da empresa.
    pub codigo_atividade: u64,
    /// Sem timeout por padrão: a consulta fica pendente até responder.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            base_url: URL_CONSULTA_CNPJ.to_string(),
            codigo_atividade: CODIGO_ATIVIDADE,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl AutofillConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_codigo_atividade(mut self, codigo: u64) -> Self {
        self.codigo_atividade = codigo;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::BaseUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    pub fn url_para(&self, cnpj: &str) -> String {
        format!("{}{}", self.base_url, cnpj)
    }

    pub fn mensagem_atividade_ausente(&self) -> String {
        format!("Não possui atividade cod: {}", self.codigo_atividade)
    }
}
