use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use futures::future::join_all;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use cnpj_autofill::config::{CODIGO_ATIVIDADE, URL_CONSULTA_CNPJ};
use cnpj_autofill::{
    ui, utils, AutofillConfig, AutofillController, AutofillSession, AutofillState, CnpjaClient,
    ConfigError, FieldId, FormSchema, Mascara,
};

#[derive(Parser)]
#[command(name = "cnpj-autofill")]
#[command(about = "Preenche formulários a partir da consulta pública de CNPJ", long_about = None)]
struct Cli {
    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ConsultaArgs {
    /// URL base do serviço; o CNPJ é concatenado ao final
    #[arg(long, default_value = URL_CONSULTA_CNPJ)]
    base_url: String,
    /// Código de atividade (CNAE) exigido
    #[arg(short, long, default_value_t = CODIGO_ATIVIDADE)]
    atividade: u64,
    /// Timeout da consulta em segundos (padrão: sem timeout)
    #[arg(short, long)]
    timeout: Option<u64>,
}

impl ConsultaArgs {
    fn config(&self) -> Result<AutofillConfig> {
        let config = AutofillConfig::default()
            .with_base_url(self.base_url.clone())
            .with_codigo_atividade(self.atividade)
            .with_timeout(self.timeout.map(Duration::from_secs));
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Consulta um ou mais CNPJs e mostra o formulário preenchido
    Consultar {
        /// CNPJs, com ou sem pontuação
        #[arg(required = true)]
        cnpjs: Vec<String>,
        /// Consultas simultâneas
        #[arg(short, long, default_value = "3")]
        concorrencia: usize,
        #[command(flatten)]
        consulta: ConsultaArgs,
    },
    /// Aplica a máscara de um campo (cnpj, cpf, rg ou cep)
    Mascara {
        tipo: Mascara,
        valor: String,
    },
    /// Lê edições do campo de CNPJ pela entrada padrão, uma por linha
    Interativo {
        #[command(flatten)]
        consulta: ConsultaArgs,
    },
}

fn init_tracing(quiet: bool, verbose: bool) {
    let padrao = if verbose {
        "cnpj_autofill=debug"
    } else if quiet {
        "error"
    } else {
        "cnpj_autofill=warn"
    };
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(padrao));
    tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Consultar { cnpjs, concorrencia, consulta } => {
            consultar(cnpjs, concorrencia, consulta.config()?).await?;
        }
        Commands::Mascara { tipo, valor } => {
            println!("{}", tipo.aplicar(&valor));
        }
        Commands::Interativo { consulta } => {
            interativo(consulta.config()?).await?;
        }
    }

    Ok(())
}

async fn consultar(cnpjs: Vec<String>, concorrencia: usize, config: AutofillConfig) -> Result<()> {
    if concorrencia == 0 {
        return Err(ConfigError::Concorrencia.into());
    }

    ui::print_header("🔎 Consulta de CNPJ");
    ui::print_info(&format!("Hora de início: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    ui::print_verbose(&format!("Serviço: {}", config.base_url));
    ui::print_verbose(&format!("Atividade exigida: {}", config.codigo_atividade));

    let client = Arc::new(CnpjaClient::new(config.clone()).context("Falha ao criar cliente HTTP")?);
    let semaphore = Arc::new(Semaphore::new(concorrencia));
    let inicio = Instant::now();

    // Um formulário por CNPJ; o semáforo limita as consultas simultâneas
    let mut tasks = Vec::new();
    for cnpj in cnpjs {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| anyhow::anyhow!("Erro ao adquirir semáforo: {}", e))?;

            let mut controller = AutofillController::new(FormSchema::completo(), config);
            let estado = controller.handle_input(client.as_ref(), &cnpj).await;
            Ok::<_, anyhow::Error>((cnpj, estado, controller.into_form()))
        }));
    }

    let mut falhas = 0usize;
    for resultado in join_all(tasks).await {
        let (cnpj, estado, form) = resultado.context("Erro na task de consulta")??;
        ui::print_separator();
        ui::print_estado(&cnpj, estado);
        if estado == AutofillState::Idle {
            ui::print_warning(&format!("{} não tem 14 dígitos, consulta não realizada", cnpj));
            continue;
        }
        if estado == AutofillState::ErrorAlert {
            falhas += 1;
        }
        ui::print_form(&form);
        ui::print_registro(&form);
    }

    ui::print_separator();
    ui::print_info(&format!("Tempo total: {}", utils::format_elapsed(inicio.elapsed())));
    if falhas > 0 {
        ui::print_error(&format!("{} consulta(s) falharam", falhas));
    } else {
        ui::print_success("Consultas concluídas");
    }

    Ok(())
}

async fn interativo(config: AutofillConfig) -> Result<()> {
    let client = Arc::new(CnpjaClient::new(config.clone()).context("Falha ao criar cliente HTTP")?);
    let controller = AutofillController::new(FormSchema::completo(), config);
    let sessao = AutofillSession::new(controller, client);

    ui::print_header("⌨️  Edição interativa do campo CNPJ");
    ui::print_info("Digite o valor do campo a cada linha (Ctrl+D para sair).");

    let mut linhas = BufReader::new(tokio::io::stdin()).lines();
    while let Some(linha) = linhas.next_line().await.context("Falha ao ler entrada padrão")? {
        if let Some(tarefa) = sessao.editar(&linha).await {
            tarefa.await.context("Erro na task de consulta")?;
        }

        let form = sessao.form().await;
        let cnpj = form.texto(FieldId::Cnpj).unwrap_or_default().to_string();
        let estado = sessao.estado().await;
        ui::print_estado(&cnpj, estado);
        ui::print_form(&form);
        if matches!(estado, AutofillState::Populated | AutofillState::ActivityAlert) {
            ui::print_registro(&form);
        }
    }

    Ok(())
}
