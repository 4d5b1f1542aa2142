//! Controlador do preenchimento automático a partir do CNPJ.
//!
//! Cada edição do campo de CNPJ limpa os campos dependentes e oculta os
//! avisos. Com exatamente 14 dígitos, uma consulta é iniciada e o resultado
//! só é aplicado se nenhuma edição posterior tiver acontecido.
//!
//! ```text
//! Idle --(14 dígitos)--> Pending --> Populated | InvalidAlert | ActivityAlert | ErrorAlert
//!   ^                                          |
//!   +--------------- qualquer edição ----------+
//! ```

use tracing::{debug, info, warn};

use crate::api::RegistryLookup;
use crate::config::AutofillConfig;
use crate::error::LookupError;
use crate::form::{FieldId, FieldValue, FormSchema};
use crate::models::LookupResponse;
use crate::utils;

pub const EMOJI: &str = "⚠️ ";
pub const MSG_CNPJ_INVALIDO: &str = "CNPJ inválido ou não encontrado";
pub const MSG_ERRO_CONSULTA: &str = "Erro ao buscar CNPJ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutofillState {
    Idle,
    Pending,
    Populated,
    /// Serviço rejeitou o CNPJ.
    InvalidAlert,
    /// Consulta ok, mas sem a atividade exigida.
    ActivityAlert,
    /// Falha de comunicação ou resposta ilegível.
    ErrorAlert,
}

/// Identifica uma consulta em andamento e a edição que a originou.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    geracao: u64,
    cnpj: String,
}

impl LookupTicket {
    pub fn cnpj(&self) -> &str {
        &self.cnpj
    }

    pub fn geracao(&self) -> u64 {
        self.geracao
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Aplicado(AutofillState),
    /// Uma edição mais nova chegou antes da resposta.
    Descartado,
}

#[derive(Debug, Clone)]
pub struct AutofillController {
    form: FormSchema,
    config: AutofillConfig,
    geracao: u64,
    estado: AutofillState,
}

impl AutofillController {
    pub fn new(form: FormSchema, config: AutofillConfig) -> Self {
        Self {
            form,
            config,
            geracao: 0,
            estado: AutofillState::Idle,
        }
    }

    pub fn form(&self) -> &FormSchema {
        &self.form
    }

    pub fn into_form(self) -> FormSchema {
        self.form
    }

    pub fn estado(&self) -> AutofillState {
        self.estado
    }

    /// Edição no campo de CNPJ.
    ///
    /// Limpa sempre os dependentes; devolve um ticket apenas quando o valor
    /// mascarado tem 14 dígitos. Sem campo de CNPJ no formulário, nada
    /// acontece.
    pub fn on_input(&mut self, valor: &str) -> Option<LookupTicket> {
        if !self.form.possui(FieldId::Cnpj) {
            debug!("formulário sem campo de CNPJ, edição ignorada");
            return None;
        }

        self.form.digitar(FieldId::Cnpj, valor);
        self.geracao += 1;
        self.form.limpar_dependentes();

        let digitos = utils::only_digits(self.form.texto(FieldId::Cnpj).unwrap_or_default());
        if digitos.len() != 14 {
            self.estado = AutofillState::Idle;
            return None;
        }

        debug!(cnpj = %digitos, geracao = self.geracao, "CNPJ completo, iniciando consulta");
        self.estado = AutofillState::Pending;
        Some(LookupTicket {
            geracao: self.geracao,
            cnpj: digitos,
        })
    }

    /// Aplica o resultado de uma consulta, se ela ainda for a mais recente.
    pub fn aplicar(
        &mut self,
        ticket: &LookupTicket,
        resultado: Result<LookupResponse, LookupError>,
    ) -> Applied {
        if ticket.geracao != self.geracao {
            debug!(
                cnpj = %ticket.cnpj,
                ticket = ticket.geracao,
                atual = self.geracao,
                "resposta obsoleta descartada"
            );
            return Applied::Descartado;
        }

        let estado = match resultado {
            Ok(dados) if dados.is_error() => {
                info!(cnpj = %ticket.cnpj, "CNPJ inválido ou não encontrado");
                self.form.alerta_cnpj.mostrar(format!("{}{}", EMOJI, MSG_CNPJ_INVALIDO));
                AutofillState::InvalidAlert
            }
            Ok(dados) => self.preencher(&dados),
            Err(e) => {
                warn!(cnpj = %ticket.cnpj, erro = %e, "falha na consulta de CNPJ");
                self.form.limpar(FieldId::Atividade);
                self.form.alerta_cnpj.mostrar(format!("{}{}", EMOJI, MSG_ERRO_CONSULTA));
                AutofillState::ErrorAlert
            }
        };

        self.estado = estado;
        Applied::Aplicado(estado)
    }

    /// Edição seguida da consulta, aguardando a resposta.
    pub async fn handle_input<R>(&mut self, registry: &R, valor: &str) -> AutofillState
    where
        R: RegistryLookup + ?Sized,
    {
        if let Some(ticket) = self.on_input(valor) {
            let resultado = registry.consultar(ticket.cnpj()).await;
            self.aplicar(&ticket, resultado);
        }
        self.estado
    }

    fn preencher(&mut self, dados: &LookupResponse) -> AutofillState {
        for id in FieldId::DEPENDENTES {
            if let Some(valor) = valor_dependente(id, dados) {
                self.form.atribuir(id, valor);
            }
        }

        match dados.atividade(self.config.codigo_atividade) {
            Some(texto) => {
                self.form.atribuir_texto(FieldId::Atividade, texto);
                self.form.alerta_atividade.ocultar();
                AutofillState::Populated
            }
            None => {
                self.form.limpar(FieldId::Atividade);
                if !self.form.possui(FieldId::Atividade) {
                    return AutofillState::Populated;
                }
                info!(codigo = self.config.codigo_atividade, "atividade exigida não encontrada");
                let mensagem = format!("{}{}", EMOJI, self.config.mensagem_atividade_ausente());
                self.form.alerta_atividade.mostrar(mensagem);
                AutofillState::ActivityAlert
            }
        }
    }
}

/// Valor de cada campo dependente a partir da resposta. A atividade é
/// resolvida à parte e os identificadores nunca vêm da consulta.
fn valor_dependente(id: FieldId, dados: &LookupResponse) -> Option<FieldValue> {
    let endereco = dados.address.as_ref();
    let texto = |v: Option<&str>| Some(FieldValue::Texto(v.unwrap_or_default().to_string()));

    match id {
        FieldId::Cnpj | FieldId::Cpf | FieldId::Rg | FieldId::Atividade => None,
        FieldId::FundadoEm => texto(dados.founded.as_deref()),
        FieldId::Porte => texto(dados.porte_texto()),
        FieldId::Simples => Some(FieldValue::Marcado(dados.optante_simples())),
        FieldId::Simei => Some(FieldValue::Marcado(dados.optante_simei())),
        FieldId::RazaoSocial => texto(dados.razao_social()),
        FieldId::Logradouro => texto(endereco.and_then(|a| a.street.as_deref())),
        FieldId::Numero => texto(endereco.and_then(|a| a.number.as_deref())),
        FieldId::Complemento => texto(endereco.and_then(|a| a.details.as_deref())),
        FieldId::Cep => texto(endereco.and_then(|a| a.zip.as_deref())),
        FieldId::Bairro => texto(endereco.and_then(|a| a.district.as_deref())),
        FieldId::Cidade => texto(endereco.and_then(|a| a.city.as_deref())),
        FieldId::Estado => texto(endereco.and_then(|a| a.state.as_deref())),
        FieldId::Status => texto(dados.situacao_texto()),
    }
}
