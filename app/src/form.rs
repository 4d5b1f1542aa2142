//! Esquema do formulário: os 17 campos opcionais e os dois avisos inline.
//!
//! Campos ausentes são válidos. Toda leitura ou escrita num campo ausente é
//! ignorada em silêncio.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::mask::Mascara;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Cnpj,
    Cpf,
    Rg,
    Cep,
    FundadoEm,
    Porte,
    Simples,
    Simei,
    RazaoSocial,
    Logradouro,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Estado,
    Status,
    Atividade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Texto,
    Checkbox,
}

impl FieldId {
    pub const TODOS: [FieldId; 17] = [
        FieldId::Cnpj,
        FieldId::Cpf,
        FieldId::Rg,
        FieldId::Cep,
        FieldId::FundadoEm,
        FieldId::Porte,
        FieldId::Simples,
        FieldId::Simei,
        FieldId::RazaoSocial,
        FieldId::Logradouro,
        FieldId::Numero,
        FieldId::Complemento,
        FieldId::Bairro,
        FieldId::Cidade,
        FieldId::Estado,
        FieldId::Status,
        FieldId::Atividade,
    ];

    /// Campos limpos a cada edição do CNPJ e preenchidos pela consulta.
    pub const DEPENDENTES: [FieldId; 14] = [
        FieldId::Atividade,
        FieldId::FundadoEm,
        FieldId::Porte,
        FieldId::Simples,
        FieldId::Simei,
        FieldId::RazaoSocial,
        FieldId::Logradouro,
        FieldId::Numero,
        FieldId::Complemento,
        FieldId::Cep,
        FieldId::Bairro,
        FieldId::Cidade,
        FieldId::Estado,
        FieldId::Status,
    ];

    pub fn nome(&self) -> &'static str {
        match self {
            FieldId::Cnpj => "cnpj",
            FieldId::Cpf => "cpf",
            FieldId::Rg => "rg",
            FieldId::Cep => "cep",
            FieldId::FundadoEm => "fundado_em",
            FieldId::Porte => "porte",
            FieldId::Simples => "simples",
            FieldId::Simei => "simei",
            FieldId::RazaoSocial => "razao_social",
            FieldId::Logradouro => "logradouro",
            FieldId::Numero => "numero",
            FieldId::Complemento => "complemento",
            FieldId::Bairro => "bairro",
            FieldId::Cidade => "cidade",
            FieldId::Estado => "estado",
            FieldId::Status => "status",
            FieldId::Atividade => "atividade",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Simples | FieldId::Simei => FieldKind::Checkbox,
            _ => FieldKind::Texto,
        }
    }

    pub fn mascara(&self) -> Option<Mascara> {
        match self {
            FieldId::Cnpj => Some(Mascara::Cnpj),
            FieldId::Cpf => Some(Mascara::Cpf),
            FieldId::Rg => Some(Mascara::Rg),
            FieldId::Cep => Some(Mascara::Cep),
            _ => None,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Texto(String),
    Marcado(bool),
}

impl FieldValue {
    fn vazio(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Texto => FieldValue::Texto(String::new()),
            FieldKind::Checkbox => FieldValue::Marcado(false),
        }
    }
}

/// Um campo presente no formulário, com a máscara já vinculada.
#[derive(Debug, Clone)]
pub struct Field {
    id: FieldId,
    valor: FieldValue,
    mascara: Option<Mascara>,
}

impl Field {
    fn novo(id: FieldId) -> Self {
        Self {
            id,
            valor: FieldValue::vazio(id.kind()),
            mascara: id.mascara(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn valor(&self) -> &FieldValue {
        &self.valor
    }

    /// Simula a digitação: passa pela máscara quando houver uma.
    fn digitar(&mut self, texto: &str) {
        let valor = match self.mascara {
            Some(m) => m.aplicar(texto),
            None => texto.to_string(),
        };
        self.valor = FieldValue::Texto(valor);
    }

    /// Atribuição programática, sem máscara. Ignora tipo incompatível.
    fn atribuir(&mut self, valor: FieldValue) {
        let compativel = matches!(
            (&self.valor, &valor),
            (FieldValue::Texto(_), FieldValue::Texto(_)) | (FieldValue::Marcado(_), FieldValue::Marcado(_))
        );
        if compativel {
            self.valor = valor;
        }
    }

    fn limpar(&mut self) {
        self.valor = FieldValue::vazio(self.id.kind());
    }
}

/// Aviso inline ligado a um campo: oculto ou exibindo uma mensagem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertNotice {
    mensagem: Option<String>,
}

impl AlertNotice {
    pub fn mostrar(&mut self, mensagem: impl Into<String>) {
        self.mensagem = Some(mensagem.into());
    }

    pub fn ocultar(&mut self) {
        self.mensagem = None;
    }

    pub fn visivel(&self) -> bool {
        self.mensagem.is_some()
    }

    pub fn mensagem(&self) -> Option<&str> {
        self.mensagem.as_deref()
    }
}

/// O formulário inteiro como um único valor.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    campos: BTreeMap<FieldId, Field>,
    pub alerta_cnpj: AlertNotice,
    pub alerta_atividade: AlertNotice,
}

impl FormSchema {
    /// Monta o formulário com os campos informados, já com as máscaras.
    /// Ids repetidos são ignorados.
    pub fn init<I>(presentes: I) -> Self
    where
        I: IntoIterator<Item = FieldId>,
    {
        let campos = presentes
            .into_iter()
            .map(|id| (id, Field::novo(id)))
            .collect();

        Self {
            campos,
            alerta_cnpj: AlertNotice::default(),
            alerta_atividade: AlertNotice::default(),
        }
    }

    /// Formulário com todos os 17 campos.
    pub fn completo() -> Self {
        Self::init(FieldId::TODOS)
    }

    pub fn possui(&self, id: FieldId) -> bool {
        self.campos.contains_key(&id)
    }

    pub fn campo(&self, id: FieldId) -> Option<&Field> {
        self.campos.get(&id)
    }

    pub fn campos(&self) -> impl Iterator<Item = &Field> {
        self.campos.values()
    }

    /// Texto do campo; `None` para campo ausente ou checkbox.
    pub fn texto(&self, id: FieldId) -> Option<&str> {
        match self.campos.get(&id).map(Field::valor) {
            Some(FieldValue::Texto(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Estado do checkbox; `None` para campo ausente ou de texto.
    pub fn marcado(&self, id: FieldId) -> Option<bool> {
        match self.campos.get(&id).map(Field::valor) {
            Some(FieldValue::Marcado(m)) => Some(*m),
            _ => None,
        }
    }

    pub fn digitar(&mut self, id: FieldId, texto: &str) {
        if let Some(campo) = self.campos.get_mut(&id) {
            campo.digitar(texto);
        }
    }

    pub fn atribuir(&mut self, id: FieldId, valor: FieldValue) {
        if let Some(campo) = self.campos.get_mut(&id) {
            campo.atribuir(valor);
        }
    }

    pub fn atribuir_texto(&mut self, id: FieldId, texto: impl Into<String>) {
        self.atribuir(id, FieldValue::Texto(texto.into()));
    }

    pub fn limpar(&mut self, id: FieldId) {
        if let Some(campo) = self.campos.get_mut(&id) {
            campo.limpar();
        }
    }

    /// Limpa todos os dependentes e oculta os dois avisos.
    pub fn limpar_dependentes(&mut self) {
        for id in FieldId::DEPENDENTES {
            self.limpar(id);
        }
        self.alerta_cnpj.ocultar();
        self.alerta_atividade.ocultar();
    }

    /// Verdadeiro quando nenhum dependente presente tem conteúdo.
    pub fn dependentes_vazios(&self) -> bool {
        FieldId::DEPENDENTES
            .iter()
            .filter_map(|id| self.campo(*id))
            .all(|campo| match campo.valor() {
                FieldValue::Texto(t) => t.is_empty(),
                FieldValue::Marcado(m) => !m,
            })
    }
}
