use anyhow::{bail, Context};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Argon2 iteration count.
    pub cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    /// `None` disables the welcome mail.
    pub mail: Option<MailConfig>,
    pub host: String,
    pub port: u16,
}

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = var("DB_USER").context("DATABASE_URL or DB_USER must be set")?;
                let pass = var("DB_PASS").context("DB_PASS must be set")?;
                let host = var("DB_HOST").unwrap_or_else(|| "localhost:5432".into());
                let name = var("DB_NAME").unwrap_or_else(|| "health_chamber".into());
                format!("postgres://{user}:{pass}@{host}/{name}")
            }
        };

        let secret = var("JWT_SECRET")
            .or_else(|| var("ACCESS_TOKEN_SECRET"))
            .context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let cost = match var("PASSWORD_HASH_COST") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("invalid PASSWORD_HASH_COST {v:?}"))?,
            None => argon2::Params::DEFAULT_T_COST,
        };
        if cost == 0 {
            bail!("PASSWORD_HASH_COST must be at least 1");
        }

        let mail = match (
            var("MAIL_API_KEY").or_else(|| var("TRANSPORTER_PASS")),
            var("MAIL_FROM").or_else(|| var("TRANSPORTER_EMAIL")),
        ) {
            (Some(api_key), Some(from)) => Some(MailConfig {
                api_url: var("MAIL_API_URL").unwrap_or_else(|| DEFAULT_MAIL_API_URL.into()),
                api_key,
                from,
            }),
            _ => None,
        };

        let port = var("APP_PORT")
            .or_else(|| var("PORT"))
            .map(|p| p.parse::<u16>().with_context(|| format!("invalid port {p:?}")))
            .transpose()?
            .unwrap_or(5000);

        Ok(Self {
            database_url,
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            jwt: JwtConfig { secret },
            password: PasswordConfig { cost },
            mail,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}
