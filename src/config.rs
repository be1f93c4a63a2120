//! Configuração do EduConnect carregada a partir de `educonnect.toml`.
//!
//! A struct [`EduConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `EDUCONNECT_LOG_LEVEL` tem precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::EduError;

/// Nome do arquivo procurado no diretório atual quando `--config` não é passado.
pub const DEFAULT_CONFIG_FILE: &str = "educonnect.toml";

/// Variável de ambiente que sobrescreve `log_level`.
pub const LOG_LEVEL_ENV: &str = "EDUCONNECT_LOG_LEVEL";

/// Configuração de nível superior carregada de `educonnect.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EduConfig {
    /// Carrega o conjunto de dados de demonstração na inicialização.
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Custo do bcrypt usado ao cadastrar usuários.
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,

    /// Filtro padrão do `env_logger` quando `RUST_LOG` não está definido.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largura dos banners dos relatórios.
    #[serde(default = "default_report_width")]
    pub report_width: usize,
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

// Valor padrão para o nível de log: "warn".
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_report_width() -> usize {
    60
}

impl Default for EduConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
            password_cost: default_password_cost(),
            log_level: default_log_level(),
            report_width: default_report_width(),
        }
    }
}

impl EduConfig {
    /// Carrega a configuração de `path`, ou de `educonnect.toml` no diretório atual.
    ///
    /// Usa valores padrão se o arquivo padrão não existir; um caminho
    /// explícito que não existe é erro.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração.
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV)
            && !level.is_empty()
        {
            config.log_level = level;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, EduError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str::<EduConfig>(&contents)?;
        if !(4..=31).contains(&config.password_cost) {
            return Err(EduError::Config(format!(
                "password_cost must be between 4 and 31, got {}",
                config.password_cost
            )));
        }
        Ok(config)
    }
}
