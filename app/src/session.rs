use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::RegistryLookup;
use crate::autofill::{Applied, AutofillController, AutofillState};
use crate::form::FormSchema;

/// Executa as consultas em tarefas separadas sobre um controlador
/// compartilhado. O lock nunca fica preso durante a chamada de rede.
pub struct AutofillSession<R: ?Sized> {
    controller: Arc<Mutex<AutofillController>>,
    registry: Arc<R>,
}

impl<R> AutofillSession<R>
where
    R: RegistryLookup + ?Sized + 'static,
{
    pub fn new(controller: AutofillController, registry: Arc<R>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            registry,
        }
    }

    /// Registra a edição e, se houver consulta, devolve a tarefa que a aplica.
    pub async fn editar(&self, valor: &str) -> Option<JoinHandle<Applied>> {
        let ticket = self.controller.lock().await.on_input(valor)?;
        debug!(cnpj = %ticket.cnpj(), geracao = ticket.geracao(), "consulta agendada");

        let controller = Arc::clone(&self.controller);
        let registry = Arc::clone(&self.registry);
        Some(tokio::spawn(async move {
            let resultado = registry.consultar(ticket.cnpj()).await;
            controller.lock().await.aplicar(&ticket, resultado)
        }))
    }

    pub async fn estado(&self) -> AutofillState {
        self.controller.lock().await.estado()
    }

    pub async fn form(&self) -> FormSchema {
        self.controller.lock().await.form().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::join_all;

    use super::*;
    use crate::config::AutofillConfig;
    use crate::form::FieldId;
    use crate::models::LookupResponse;
    use crate::testing::{resposta_completa, RegistroFake, Resposta};

    fn sessao(registro: RegistroFake) -> AutofillSession<RegistroFake> {
        let ctrl = AutofillController::new(FormSchema::completo(), AutofillConfig::default());
        AutofillSession::new(ctrl, Arc::new(registro))
    }

    fn com_razao(nome: &str) -> LookupResponse {
        let mut dados = resposta_completa();
        if let Some(empresa) = dados.company.as_mut() {
            empresa.name = Some(nome.to_string());
        }
        dados
    }

    #[tokio::test]
    async fn resposta_lenta_de_edicao_antiga_nao_sobrescreve() {
        let antigo = "11222333000181";
        let novo = "99888777000166";
        let registro = RegistroFake::default()
            .com(antigo, Resposta::Atrasada(Duration::from_millis(150), com_razao("ANTIGA")))
            .com(novo, Resposta::Dados(com_razao("NOVA")));
        let sessao = sessao(registro);

        let primeira = sessao.editar(antigo).await.unwrap();
        let segunda = sessao.editar(novo).await.unwrap();
        let resultados: Vec<Applied> = join_all([primeira, segunda])
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(resultados[0], Applied::Descartado);
        assert_eq!(resultados[1], Applied::Aplicado(AutofillState::Populated));
        assert_eq!(sessao.form().await.texto(FieldId::RazaoSocial), Some("NOVA"));
    }

    #[tokio::test]
    async fn edicao_incompleta_invalida_consulta_em_andamento() {
        let cnpj = "11222333000181";
        let registro = RegistroFake::default()
            .com(cnpj, Resposta::Atrasada(Duration::from_millis(50), resposta_completa()));
        let sessao = sessao(registro);

        let pendente = sessao.editar(cnpj).await.unwrap();
        assert_eq!(sessao.estado().await, AutofillState::Pending);
        assert!(sessao.editar("11.222").await.is_none());

        assert_eq!(pendente.await.unwrap(), Applied::Descartado);
        assert_eq!(sessao.estado().await, AutofillState::Idle);
        assert!(sessao.form().await.dependentes_vazios());
    }
}
