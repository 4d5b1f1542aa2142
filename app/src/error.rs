use thiserror::Error;

use crate::form::FieldId;

/// Falhas da consulta ao serviço de CNPJ.
///
/// Para o formulário todas viram o mesmo aviso genérico. A rejeição do CNPJ
/// pelo serviço não é erro: chega como resposta com `status: "ERROR"`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("falha de comunicação com o serviço: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serviço respondeu HTTP {status}")]
    Http { status: u16 },

    #[error("resposta inválida do serviço: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CNPJ deve ter 14 dígitos: {0:?}")]
    InvalidCnpj(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("URL base inválida: {0}")]
    BaseUrl(String),

    #[error("concorrência deve ser maior que zero")]
    Concorrencia,
}

/// Motivo pelo qual o formulário não pode virar um [`crate::registro::Registro`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("campo obrigatório não preenchido: {0}")]
    Obrigatorio(FieldId),

    #[error("CNPJ inválido: {0}")]
    CnpjInvalido(String),

    #[error("data de fundação inválida: {0:?}")]
    DataInvalida(String),

    #[error("{campo} excede {maximo} caracteres")]
    TamanhoExcedido { campo: FieldId, maximo: usize },
}
