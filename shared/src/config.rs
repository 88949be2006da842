use std::{env, str::FromStr};

use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub report: ReportConfig,
    pub registration: RegistrationConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST").context("DATABASE_HOST is not set")?,
            port: parse_var("DATABASE_PORT", 5432)?,
            username: env::var("DATABASE_USERNAME").context("DATABASE_USERNAME is not set")?,
            password: env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD is not set")?,
            database: env::var("DATABASE_NAME").context("DATABASE_NAME is not set")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST").context("REDIS_HOST is not set")?,
            port: parse_var("REDIS_PORT", 6379)?,
        };
        let auth = AuthConfig {
            ttl: parse_var("AUTH_TOKEN_TTL", 86_400)?,
        };
        let report = ReportConfig {
            directory: env::var("REPORTS_DIR").unwrap_or_else(|_| "reports_files".into()),
        };
        let registration = RegistrationConfig {
            student_code: env::var("REGISTRATION_CODE_STUDENT").unwrap_or_else(|_| "1111".into()),
            cook_code: env::var("REGISTRATION_CODE_COOK").unwrap_or_else(|_| "2222".into()),
            admin_code: env::var("REGISTRATION_CODE_ADMIN").unwrap_or_else(|_| "1234".into()),
            seed_defaults: parse_var("SEED_DEFAULTS", true)?,
        };
        let server = ServerConfig {
            port: parse_var("APP_PORT", 8080)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            report,
            registration,
            server,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Copy)]
pub struct AuthConfig {
    // seconds
    pub ttl: u64,
}

#[derive(Clone)]
pub struct ReportConfig {
    pub directory: String,
}

#[derive(Clone)]
pub struct RegistrationConfig {
    pub student_code: String,
    pub cook_code: String,
    pub admin_code: String,
    pub seed_defaults: bool,
}

#[derive(Clone, Copy)]
pub struct ServerConfig {
    pub port: u16,
}
