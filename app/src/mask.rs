use std::fmt;
use std::str::FromStr;

use crate::utils;

/// Máscaras de padrão fixo dos campos de identificação.
///
/// No padrão, `0` representa um dígito e qualquer outro caractere é literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mascara {
    Cnpj,
    Cpf,
    Rg,
    Cep,
}

impl Mascara {
    pub const TODAS: [Mascara; 4] = [Mascara::Cnpj, Mascara::Cpf, Mascara::Rg, Mascara::Cep];

    pub fn padrao(&self) -> &'static str {
        match self {
            Mascara::Cnpj => "00.000.000/0000-00",
            Mascara::Cpf => "000.000.000-00",
            Mascara::Rg => "00.000.000-0",
            Mascara::Cep => "00.000-000",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            Mascara::Cnpj => "cnpj",
            Mascara::Cpf => "cpf",
            Mascara::Rg => "rg",
            Mascara::Cep => "cep",
        }
    }

    /// Quantidade de dígitos que o padrão comporta.
    pub fn capacidade(&self) -> usize {
        self.padrao().chars().filter(|c| *c == '0').count()
    }

    /// Aplica a máscara ao texto digitado.
    ///
    /// Só os dígitos da entrada são aproveitados. Um literal do padrão só é
    /// emitido quando ainda há dígito para vir depois dele, e dígitos além da
    /// capacidade do padrão são descartados.
    pub fn aplicar(&self, entrada: &str) -> String {
        let digitos = utils::only_digits(entrada);
        let mut restantes = digitos.chars().peekable();
        let mut saida = String::with_capacity(self.padrao().len());

        for slot in self.padrao().chars() {
            if restantes.peek().is_none() {
                break;
            }
            if slot == '0' {
                if let Some(d) = restantes.next() {
                    saida.push(d);
                }
            } else {
                saida.push(slot);
            }
        }

        saida
    }

    /// Verdadeiro quando todos os slots de dígito estão preenchidos.
    pub fn completo(&self, valor: &str) -> bool {
        utils::only_digits(valor).len() == self.capacidade()
    }
}

impl fmt::Display for Mascara {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

impl FromStr for Mascara {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mascara::TODAS
            .iter()
            .copied()
            .find(|m| m.nome().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("máscara desconhecida: {} (use cnpj, cpf, rg ou cep)", s))
    }
}
