use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Documento "office" devolvido pela consulta pública de CNPJ.
///
/// Todos os atributos são opcionais e `null` conta como ausente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    #[serde(default)]
    pub status: Option<Situacao>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub founded: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub main_activity: Option<Activity>,
    #[serde(default, deserialize_with = "lista_ou_nula")]
    pub side_activities: Vec<Activity>,
}

/// O serviço usa `status` tanto para sinalizar erro (`"ERROR"`) quanto para
/// descrever a situação cadastral (`{ "id": 2, "text": "Ativa" }`).
/// Qualquer outro formato cai em `Outro` e é ignorado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Situacao {
    Codigo(String),
    Cadastral(SituacaoCadastral),
    Outro(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SituacaoCadastral {
    #[serde(default, deserialize_with = "texto_opcional")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "texto_opcional")]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<Porte>,
    #[serde(default)]
    pub simples: Option<Regime>,
    #[serde(default)]
    pub simei: Option<Regime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Porte {
    #[serde(default, deserialize_with = "texto_opcional")]
    pub text: Option<String>,
}

/// Opção pelo Simples Nacional ou pelo SIMEI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Regime {
    #[serde(default, deserialize_with = "booleano_opcional")]
    pub optant: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "texto_opcional")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub state: Option<String>,
}

/// Atividade econômica (CNAE): código numérico e descrição.
///
/// Código que não seja inteiro JSON (inclusive `"5320202"` em texto) vira
/// `None` e nunca coincide com o código procurado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "codigo_opcional")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "texto_opcional")]
    pub text: Option<String>,
}

impl LookupResponse {
    /// Consulta marcada pelo serviço como inválida ou não encontrada.
    pub fn is_error(&self) -> bool {
        matches!(&self.status, Some(Situacao::Codigo(c)) if c == "ERROR")
    }

    pub fn situacao_texto(&self) -> Option<&str> {
        match &self.status {
            Some(Situacao::Cadastral(s)) => s.text.as_deref(),
            _ => None,
        }
    }

    pub fn porte_texto(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.size.as_ref())
            .and_then(|s| s.text.as_deref())
    }

    pub fn optante_simples(&self) -> bool {
        self.company
            .as_ref()
            .and_then(|c| c.simples.as_ref())
            .and_then(|r| r.optant)
            .unwrap_or(false)
    }

    pub fn optante_simei(&self) -> bool {
        self.company
            .as_ref()
            .and_then(|c| c.simei.as_ref())
            .and_then(|r| r.optant)
            .unwrap_or(false)
    }

    pub fn razao_social(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Procura a atividade pelo código: primeiro na principal, depois nas
    /// secundárias, na ordem em que vieram.
    ///
    /// Se a principal tem o código, as secundárias não são consultadas.
    /// Descrição vazia conta como não encontrada.
    pub fn atividade(&self, codigo: u64) -> Option<&str> {
        let encontrada = match &self.main_activity {
            Some(principal) if principal.id == Some(codigo) => principal.text.as_deref(),
            _ => self
                .side_activities
                .iter()
                .find(|a| a.id == Some(codigo))
                .and_then(|a| a.text.as_deref()),
        };
        encontrada.filter(|t| !t.is_empty())
    }
}

/// Aceita string, número ou booleano e converte para texto.
fn texto_opcional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = Option::<Value>::deserialize(deserializer)?;
    Ok(valor.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Só inteiros não negativos contam como código.
fn codigo_opcional<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = Option::<Value>::deserialize(deserializer)?;
    Ok(valor.and_then(|v| v.as_u64()))
}

fn booleano_opcional<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = Option::<Value>::deserialize(deserializer)?;
    Ok(valor.and_then(|v| v.as_bool()))
}

fn lista_ou_nula<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
