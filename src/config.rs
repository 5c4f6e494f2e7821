use crate::services::{wallet::WalletService, HashMode};
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testnet,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Simulated ledger
    pub verification_delay: Duration,
    pub verification_success_rate: f64,
    pub transactions_per_block: usize,
    pub hash_mode: HashMode,

    // Crypto payments
    pub eth_usd_rate: f64,
    pub collection_address: String,

    // Rate Limiting
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            verification_delay: Duration::from_millis(200),
            verification_success_rate: 0.95,
            transactions_per_block: 3,
            hash_mode: HashMode::Simulated,
            eth_usd_rate: 2000.0,
            collection_address: "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".to_string(),
            rate_limit_per_second: 10,
            rate_limit_burst: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            environment: Self::parse_environment()?,
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: Self::parse_var("PORT", defaults.port)?,

            verification_delay: Duration::from_millis(Self::parse_var(
                "VERIFICATION_DELAY_MS",
                defaults.verification_delay.as_millis() as u64,
            )?),
            verification_success_rate: Self::parse_var(
                "VERIFICATION_SUCCESS_RATE",
                defaults.verification_success_rate,
            )?,
            transactions_per_block: Self::parse_var(
                "TRANSACTIONS_PER_BLOCK",
                defaults.transactions_per_block,
            )?,
            hash_mode: Self::parse_var("LEDGER_HASH_MODE", defaults.hash_mode)?,

            eth_usd_rate: Self::parse_var("ETH_USD_RATE", defaults.eth_usd_rate)?,
            collection_address: std::env::var("TOLL_COLLECTION_ADDRESS")
                .unwrap_or(defaults.collection_address),

            rate_limit_per_second: Self::parse_var(
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )?,
            rate_limit_burst: Self::parse_var("RATE_LIMIT_BURST", defaults.rate_limit_burst)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testnet" | "test" => Ok(Environment::Testnet),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn parse_var<T>(var: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match std::env::var(var) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Invalid {}", var)),
            Err(_) => Ok(default),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.verification_success_rate) {
            bail!("VERIFICATION_SUCCESS_RATE must be between 0 and 1");
        }
        if self.transactions_per_block == 0 {
            bail!("TRANSACTIONS_PER_BLOCK must be at least 1");
        }
        if !(self.eth_usd_rate.is_finite() && self.eth_usd_rate > 0.0) {
            bail!("ETH_USD_RATE must be a positive number");
        }
        if !WalletService::is_valid_address(&self.collection_address) {
            bail!("TOLL_COLLECTION_ADDRESS must be a 0x-prefixed 20-byte hex address");
        }
        if self.rate_limit_per_second == 0 || self.rate_limit_burst == 0 {
            bail!("Rate limits must be greater than zero");
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
