use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::autofill::AutofillState;
use crate::form::{FieldValue, FormSchema};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn init(quiet: bool, verbose: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue(), message);
    }
}

pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), message.green());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet() {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_header(message: &str) {
    if !is_quiet() {
        println!("\n{}", message.bold().cyan());
        println!("{}", "─".repeat(message.chars().count()).cyan());
    }
}

pub fn print_verbose(message: &str) {
    if is_verbose() && !is_quiet() {
        println!("  {}", message.dimmed());
    }
}

pub fn print_separator() {
    if !is_quiet() {
        println!("{}", "=".repeat(60).dimmed());
    }
}

/// Resumo do resultado da consulta. Sai mesmo em modo silencioso.
pub fn print_estado(cnpj: &str, estado: AutofillState) {
    let rotulo = match estado {
        AutofillState::Populated => "preenchido".green().bold(),
        AutofillState::ActivityAlert => "preenchido, sem atividade".yellow().bold(),
        AutofillState::InvalidAlert => "inválido".red().bold(),
        AutofillState::ErrorAlert => "erro na consulta".red().bold(),
        AutofillState::Pending => "pendente".blue(),
        AutofillState::Idle => "incompleto".dimmed(),
    };
    println!("{} {}", cnpj.bold(), rotulo);
}

/// Resultado da limpeza do formulário para gravação.
pub fn print_registro(form: &FormSchema) {
    match form.registro() {
        Ok(registro) => print_success(&format!(
            "Pronto para gravar: {} | CEP {}",
            registro.razao_social,
            registro.formatted_cep()
        )),
        Err(e) => print_warning(&format!("Formulário não pode ser gravado: {}", e)),
    }
}

/// Lista os campos presentes e os avisos visíveis do formulário.
pub fn print_form(form: &FormSchema) {
    if is_quiet() {
        return;
    }

    let largura = form.campos().map(|c| c.id().nome().len()).max().unwrap_or(0);
    for campo in form.campos() {
        let valor = match campo.valor() {
            FieldValue::Texto(t) if t.is_empty() => "—".dimmed().to_string(),
            FieldValue::Texto(t) => t.clone(),
            FieldValue::Marcado(true) => "[x]".green().to_string(),
            FieldValue::Marcado(false) => "[ ]".to_string(),
        };
        println!("  {:<largura$}  {}", campo.id().nome().bold(), valor, largura = largura);
    }

    for aviso in [&form.alerta_cnpj, &form.alerta_atividade] {
        if aviso.visivel() {
            println!("  {}", aviso.mensagem().unwrap_or_default().yellow().bold());
        }
    }
}
