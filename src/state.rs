use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    db::PgStore,
    mail::{HttpMailer, Mailer, Notifier},
    records::repo::DocumentStore,
    users::repo::UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub users: Arc<dyn UserStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub notifier: Notifier,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::connect(&config).await?;
        // Run migrations if present
        if let Err(e) = store.migrate().await {
            warn!(error = ?e, "migration failed; continuing");
        }
        store.ping().await?;
        info!("connected to database");

        let notifier = match &config.mail {
            Some(mail) => {
                let mailer = Arc::new(HttpMailer::new(mail.clone())?) as Arc<dyn Mailer>;
                Notifier::spawn(mailer)
            }
            None => {
                warn!("MAIL_API_KEY or MAIL_FROM unset; welcome emails disabled");
                Notifier::disabled()
            }
        };

        let store = Arc::new(store);
        Ok(Self::from_parts(
            config,
            store.clone() as Arc<dyn UserStore>,
            store as Arc<dyn DocumentStore>,
            notifier,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        documents: Arc<dyn DocumentStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            keys: JwtKeys::new(&config.jwt.secret),
            config,
            users,
            documents,
            notifier,
        }
    }
}
