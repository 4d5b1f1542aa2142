//! Registro em memória para os testes do controlador e da sessão.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::RegistryLookup;
use crate::error::LookupError;
use crate::models::{
    Activity, Address, Company, LookupResponse, Porte, Regime, Situacao, SituacaoCadastral,
};

#[derive(Debug, Clone)]
pub enum Resposta {
    Dados(LookupResponse),
    Falha,
    Atrasada(Duration, LookupResponse),
}

#[derive(Default)]
pub struct RegistroFake {
    respostas: HashMap<String, Resposta>,
    chamadas: Mutex<Vec<String>>,
}

impl RegistroFake {
    pub fn com(mut self, cnpj: &str, resposta: Resposta) -> Self {
        self.respostas.insert(cnpj.to_string(), resposta);
        self
    }

    pub fn chamadas(&self) -> Vec<String> {
        self.chamadas.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryLookup for RegistroFake {
    async fn consultar(&self, cnpj: &str) -> Result<LookupResponse, LookupError> {
        self.chamadas.lock().unwrap().push(cnpj.to_string());
        match self.respostas.get(cnpj).cloned() {
            Some(Resposta::Dados(dados)) => Ok(dados),
            Some(Resposta::Atrasada(atraso, dados)) => {
                tokio::time::sleep(atraso).await;
                Ok(dados)
            }
            Some(Resposta::Falha) | None => Err(falha_http()),
        }
    }
}

pub fn falha_http() -> LookupError {
    LookupError::Http { status: 503 }
}

pub fn resposta_rejeitada() -> LookupResponse {
    LookupResponse {
        status: Some(Situacao::Codigo("ERROR".into())),
        ..Default::default()
    }
}

pub fn resposta_completa() -> LookupResponse {
    LookupResponse {
        status: Some(Situacao::Cadastral(SituacaoCadastral {
            text: Some("Ativa".into()),
        })),
        founded: Some("2001-03-14".into()),
        company: Some(Company {
            name: Some("TRANSPORTES EXEMPLO LTDA".into()),
            size: Some(Porte { text: Some("Microempresa".into()) }),
            simples: Some(Regime { optant: Some(true) }),
            simei: Some(Regime { optant: Some(false) }),
        }),
        address: Some(Address {
            street: Some("Avenida Paulista".into()),
            number: Some("1000".into()),
            details: None,
            zip: Some("01310100".into()),
            district: Some("Bela Vista".into()),
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
        }),
        main_activity: Some(Activity {
            id: Some(4930202),
            text: Some("Transporte rodoviário de carga".into()),
        }),
        side_activities: vec![
            Activity { id: Some(8211300), text: Some("Serviços de escritório".into()) },
            Activity { id: Some(5320202), text: Some("Serviços de entrega rápida".into()) },
        ],
    }
}
