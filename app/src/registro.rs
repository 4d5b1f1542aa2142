//! Limpeza do formulário preenchido antes de salvar a empresa.
//!
//! CNPJ e CEP ficam só com dígitos, os campos de texto cadastrais vão para
//! maiúsculas e o CNPJ tem os dígitos verificadores conferidos. A consulta
//! não depende disso: ela dispara com 14 dígitos quaisquer.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::form::{FieldId, FormSchema};
use crate::mask::Mascara;
use crate::utils;

/// Empresa pronta para ser gravada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registro {
    pub cnpj: String,
    pub atividade: Option<String>,
    pub fundado_em: NaiveDate,
    pub porte: String,
    pub simples: bool,
    pub simei: bool,
    pub razao_social: String,
    pub logradouro: String,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub cep: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub status: String,
}

impl Registro {
    /// CEP como `00000-000` quando tiver 8 dígitos.
    pub fn formatted_cep(&self) -> String {
        utils::formatar_cep(&self.cep)
    }
}

impl FormSchema {
    /// Limpa e valida os campos, na ordem do cadastro. Devolve o primeiro
    /// problema encontrado.
    pub fn registro(&self) -> Result<Registro, ValidationError> {
        let cnpj = utils::only_digits(self.texto(FieldId::Cnpj).unwrap_or_default());
        if cnpj.is_empty() {
            return Err(ValidationError::Obrigatorio(FieldId::Cnpj));
        }
        if !Mascara::Cnpj.completo(&cnpj) || !utils::cnpj_valido(&cnpj) {
            return Err(ValidationError::CnpjInvalido(cnpj));
        }

        let atividade = self.opcional(FieldId::Atividade, 255, true)?;
        let fundado_em = self.data_fundacao()?;
        let porte = self.obrigatorio(FieldId::Porte, 50, true)?;
        let simples = self.marcado(FieldId::Simples).unwrap_or(false);
        let simei = self.marcado(FieldId::Simei).unwrap_or(false);
        let razao_social = self.obrigatorio(FieldId::RazaoSocial, 255, true)?;
        let logradouro = self.obrigatorio(FieldId::Logradouro, 255, true)?;
        let numero = self.opcional(FieldId::Numero, 10, false)?;
        let complemento = self.opcional(FieldId::Complemento, 255, true)?;

        let cep = utils::only_digits(self.texto(FieldId::Cep).unwrap_or_default());
        if cep.is_empty() {
            return Err(ValidationError::Obrigatorio(FieldId::Cep));
        }
        limite(FieldId::Cep, &cep, 10)?;

        let bairro = self.obrigatorio(FieldId::Bairro, 100, true)?;
        let cidade = self.obrigatorio(FieldId::Cidade, 100, true)?;
        let estado = self.obrigatorio(FieldId::Estado, 2, true)?;
        let status = self.obrigatorio(FieldId::Status, 255, true)?;

        Ok(Registro {
            cnpj,
            atividade,
            fundado_em,
            porte,
            simples,
            simei,
            razao_social,
            logradouro,
            numero,
            complemento,
            cep,
            bairro,
            cidade,
            estado,
            status,
        })
    }

    fn opcional(
        &self,
        id: FieldId,
        maximo: usize,
        maiusculas: bool,
    ) -> Result<Option<String>, ValidationError> {
        let texto = self.texto(id).map(str::trim).unwrap_or_default();
        if texto.is_empty() {
            return Ok(None);
        }
        limite(id, texto, maximo)?;
        Ok(Some(if maiusculas { texto.to_uppercase() } else { texto.to_string() }))
    }

    fn obrigatorio(
        &self,
        id: FieldId,
        maximo: usize,
        maiusculas: bool,
    ) -> Result<String, ValidationError> {
        self.opcional(id, maximo, maiusculas)?
            .ok_or(ValidationError::Obrigatorio(id))
    }

    fn data_fundacao(&self) -> Result<NaiveDate, ValidationError> {
        let texto = self.texto(FieldId::FundadoEm).map(str::trim).unwrap_or_default();
        if texto.is_empty() {
            return Err(ValidationError::Obrigatorio(FieldId::FundadoEm));
        }
        NaiveDate::parse_from_str(texto, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(texto, "%d/%m/%Y"))
            .map_err(|_| ValidationError::DataInvalida(texto.to_string()))
    }
}

fn limite(campo: FieldId, texto: &str, maximo: usize) -> Result<(), ValidationError> {
    if texto.chars().count() > maximo {
        return Err(ValidationError::TamanhoExcedido { campo, maximo });
    }
    Ok(())
}
