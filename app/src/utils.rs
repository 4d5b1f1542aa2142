use std::time::Duration;

/// Remove tudo que não for dígito ASCII.
pub fn only_digits(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normaliza um CNPJ digitado com ou sem pontuação.
/// Retorna `None` se não sobrarem exatamente 14 dígitos.
pub fn cnpj_limpo(valor: &str) -> Option<String> {
    let digitos = only_digits(valor);
    if digitos.len() == 14 {
        Some(digitos)
    } else {
        None
    }
}

/// Confere os dois dígitos verificadores de um CNPJ de 14 dígitos.
/// Sequências de um só dígito repetido são recusadas.
pub fn cnpj_valido(digitos: &str) -> bool {
    let numeros: Vec<u32> = digitos.chars().filter_map(|c| c.to_digit(10)).collect();
    if numeros.len() != 14 || digitos.len() != 14 {
        return false;
    }
    if numeros.iter().all(|n| *n == numeros[0]) {
        return false;
    }

    let digito = |base: &[u32]| -> u32 {
        let pesos = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
        // O primeiro dígito usa os 12 últimos pesos, o segundo usa os 13
        let soma: u32 = base
            .iter()
            .zip(pesos[pesos.len() - base.len()..].iter())
            .map(|(n, p)| n * p)
            .sum();
        match soma % 11 {
            0 | 1 => 0,
            resto => 11 - resto,
        }
    };

    digito(&numeros[..12]) == numeros[12] && digito(&numeros[..13]) == numeros[13]
}

/// CEP de 8 dígitos no formato `00000-000`; outros valores voltam como estão.
pub fn formatar_cep(cep: &str) -> String {
    if cep.len() == 8 && cep.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", &cep[..5], &cep[5..])
    } else {
        cep.to_string()
    }
}

pub fn format_elapsed(duracao: Duration) -> String {
    let ms = duracao.as_millis();
    if ms < 1000 {
        format!("{} ms", ms)
    } else {
        format!("{:.1} s", duracao.as_secs_f64())
    }
}
