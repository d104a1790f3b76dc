pub mod server;
pub mod session;

pub use crate::domain::model::*;
pub use crate::domain::ports::{
    ChatResponder, MailSender, PaymentGateway, SessionValidator, WebhookRelay,
};
pub use crate::utils::error::Result;
