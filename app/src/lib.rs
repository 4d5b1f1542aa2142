//! Preenchimento automático de formulários a partir da consulta pública de CNPJ.
//!
//! O formulário é um [`form::FormSchema`] com campos opcionais. O
//! [`autofill::AutofillController`] observa o campo de CNPJ, limpa os
//! dependentes a cada edição e, com 14 dígitos, consulta o serviço e
//! preenche o restante. [`FormSchema::registro`] limpa e valida o resultado
//! antes de gravar.

pub mod api;
pub mod autofill;
pub mod config;
pub mod error;
pub mod form;
pub mod mask;
pub mod models;
pub mod registro;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod testing;

pub use api::{CnpjaClient, RegistryLookup};
pub use autofill::{Applied, AutofillController, AutofillState, LookupTicket};
pub use config::AutofillConfig;
pub use error::{ConfigError, LookupError, ValidationError};
pub use form::{AlertNotice, FieldId, FieldValue, FormSchema};
pub use mask::Mascara;
pub use models::LookupResponse;
pub use registro::Registro;
pub use session::AutofillSession;
