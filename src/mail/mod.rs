pub mod transport;
pub mod worker;

pub use transport::{Email, HttpMailer, Mailer};
pub use worker::Notifier;
