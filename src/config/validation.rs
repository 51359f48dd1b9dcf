use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound accepted for the concurrency ceiling
const MAX_CONCURRENT_FETCHES: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_retry_config(&config.retry)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Parses the seed into an absolute http(s) URL with a host
pub fn parse_seed_url(seed: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Unable to parse given url {}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Only HTTP and HTTPS seeds are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!("Seed has no host: {}", seed)));
    }

    Ok(url)
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_seed_url(&config.seed_url)?;

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "HTTP timeouts must be at least one second".to_string(),
        ));
    }

    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.initial_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "initial_interval_ms must be > 0".to_string(),
        ));
    }

    if !config.multiplier.is_finite() || config.multiplier < 1.0 {
        return Err(ConfigError::Validation(format!(
            "multiplier must be >= 1.0, got {}",
            config.multiplier
        )));
    }

    if config.max_interval_ms < config.initial_interval_ms {
        return Err(ConfigError::Validation(format!(
            "max_interval_ms ({}) must be >= initial_interval_ms ({})",
            config.max_interval_ms, config.initial_interval_ms
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.graphviz && config.dot_command.is_empty() {
        return Err(ConfigError::Validation(
            "dot_command cannot be empty when graphviz output is enabled".to_string(),
        ));
    }

    Ok(())
}
