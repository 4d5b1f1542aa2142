use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::json;

use cnpj_autofill::{
    AutofillConfig, AutofillController, AutofillState, CnpjaClient, FieldId, FormSchema,
    LookupError, RegistryLookup,
};

const ATIVO: &str = "11222333000181";
const REJEITADO: &str = "00000000000000";
const ERRO_SERVIDOR: &str = "22333444000155";
const NAO_JSON: &str = "33444555000166";

async fn office(cnpj: web::Path<String>) -> HttpResponse {
    match cnpj.as_str() {
        ATIVO => HttpResponse::Ok().json(json!({
            "taxId": ATIVO,
            "founded": "2001-03-14",
            "status": { "id": 2, "text": "Ativa" },
            "company": {
                "name": "TRANSPORTES EXEMPLO LTDA",
                "size": { "id": 1, "acronym": "ME", "text": "Microempresa" },
                "simples": { "optant": true },
                "simei": { "optant": null }
            },
            "address": {
                "street": "Avenida Paulista",
                "number": 1000,
                "details": "Sala 1",
                "zip": "01310100",
                "district": "Bela Vista",
                "city": "São Paulo",
                "state": "SP"
            },
            "mainActivity": { "id": 4930202, "text": "Transporte rodoviário de carga" },
            "sideActivities": [
                { "id": 5320202, "text": "Serviços de entrega rápida" }
            ]
        })),
        REJEITADO => HttpResponse::BadRequest().json(json!({
            "status": "ERROR",
            "message": "invalid tax id"
        })),
        ERRO_SERVIDOR => HttpResponse::InternalServerError().json(json!({ "message": "falha interna" })),
        NAO_JSON => HttpResponse::Ok().content_type("text/html").body("<html>manutenção</html>"),
        _ => HttpResponse::NotFound().json(json!({ "status": "ERROR" })),
    }
}

fn iniciar_servidor() -> std::io::Result<String> {
    let servidor = HttpServer::new(|| App::new().route("/office/{cnpj}", web::get().to(office)))
        .workers(1)
        .bind(("127.0.0.1", 0))?;
    let endereco = servidor.addrs()[0];
    actix_web::rt::spawn(servidor.run());
    Ok(format!("http://{}/office/", endereco))
}

fn cliente(base_url: &str) -> CnpjaClient {
    CnpjaClient::new(AutofillConfig::default().with_base_url(base_url)).unwrap()
}

#[actix_web::test]
async fn consulta_documento_ativo() {
    let base = iniciar_servidor().unwrap();
    let dados = cliente(&base).consultar("11.222.333/0001-81").await.unwrap();

    assert!(!dados.is_error());
    assert_eq!(dados.razao_social(), Some("TRANSPORTES EXEMPLO LTDA"));
    assert!(dados.optante_simples());
    assert!(!dados.optante_simei());
    assert_eq!(dados.atividade(5320202), Some("Serviços de entrega rápida"));
}

#[actix_web::test]
async fn rejeicao_vem_como_resposta_mesmo_com_http_400() {
    let base = iniciar_servidor().unwrap();
    let dados = cliente(&base).consultar(REJEITADO).await.unwrap();
    assert!(dados.is_error());
}

#[actix_web::test]
async fn http_de_erro_sem_status_error_e_falha() {
    let base = iniciar_servidor().unwrap();
    let erro = cliente(&base).consultar(ERRO_SERVIDOR).await.unwrap_err();
    assert!(matches!(erro, LookupError::Http { status: 500 }));
}

#[actix_web::test]
async fn corpo_que_nao_e_json_e_falha_de_leitura() {
    let base = iniciar_servidor().unwrap();
    let erro = cliente(&base).consultar(NAO_JSON).await.unwrap_err();
    assert!(matches!(erro, LookupError::Parse(_)));
}

#[actix_web::test]
async fn cnpj_incompleto_nem_chega_ao_servico() {
    let erro = cliente("http://127.0.0.1:1/office/").consultar("1122233300018").await.unwrap_err();
    assert!(matches!(erro, LookupError::InvalidCnpj(_)));
}

#[actix_web::test]
async fn conexao_recusada_vira_erro_generico_no_formulario() {
    let porta = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = cliente(&format!("http://127.0.0.1:{}/office/", porta));
    let mut ctrl = AutofillController::new(FormSchema::completo(), client.config().clone());

    let estado = ctrl.handle_input(&client, ATIVO).await;

    assert_eq!(estado, AutofillState::ErrorAlert);
    assert_eq!(ctrl.form().texto(FieldId::Atividade), Some(""));
    assert_eq!(ctrl.form().alerta_cnpj.mensagem(), Some("⚠️ Erro ao buscar CNPJ"));
}

#[actix_web::test]
async fn controlador_preenche_formulario_pelo_servico() {
    let base = iniciar_servidor().unwrap();
    let client = cliente(&base);
    let form = FormSchema::init([
        FieldId::Cnpj,
        FieldId::RazaoSocial,
        FieldId::Numero,
        FieldId::Complemento,
        FieldId::Simples,
        FieldId::Simei,
        FieldId::Atividade,
    ]);
    let mut ctrl = AutofillController::new(form, client.config().clone());

    let estado = ctrl.handle_input(&client, "11222333000181").await;
    let form = ctrl.form();

    assert_eq!(estado, AutofillState::Populated);
    assert_eq!(form.texto(FieldId::Cnpj), Some("11.222.333/0001-81"));
    assert_eq!(form.texto(FieldId::RazaoSocial), Some("TRANSPORTES EXEMPLO LTDA"));
    assert_eq!(form.texto(FieldId::Numero), Some("1000"));
    assert_eq!(form.texto(FieldId::Complemento), Some("Sala 1"));
    assert_eq!(form.marcado(FieldId::Simples), Some(true));
    assert_eq!(form.marcado(FieldId::Simei), Some(false));
    assert_eq!(form.texto(FieldId::Atividade), Some("Serviços de entrega rápida"));
    assert!(!form.possui(FieldId::Logradouro));
}

#[actix_web::test]
async fn controlador_mostra_aviso_de_cnpj_rejeitado() {
    let base = iniciar_servidor().unwrap();
    let client = cliente(&base);
    let mut ctrl = AutofillController::new(FormSchema::completo(), client.config().clone());

    let estado = ctrl.handle_input(&client, "00.000.000/0000-00").await;

    assert_eq!(estado, AutofillState::InvalidAlert);
    assert!(ctrl.form().dependentes_vazios());
    assert_eq!(ctrl.form().alerta_cnpj.mensagem(), Some("⚠️ CNPJ inválido ou não encontrado"));
}

#[actix_web::test]
async fn controlador_mostra_erro_generico_para_corpo_que_nao_e_json() {
    let base = iniciar_servidor().unwrap();
    let client = cliente(&base);
    let mut ctrl = AutofillController::new(FormSchema::completo(), client.config().clone());

    let estado = ctrl.handle_input(&client, NAO_JSON).await;

    assert_eq!(estado, AutofillState::ErrorAlert);
    assert_eq!(ctrl.form().texto(FieldId::Atividade), Some(""));
    assert!(!ctrl.form().alerta_atividade.visivel());
    assert_eq!(ctrl.form().alerta_cnpj.mensagem(), Some("⚠️ Erro ao buscar CNPJ"));
}
