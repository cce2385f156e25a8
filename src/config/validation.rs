use crate::config::types::{Config, CrawlerConfig, QueueConfig, SitemapSource, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sitemap_sources(&config.sitemaps)?;
    if let Some(queue) = &config.queue {
        validate_queue_config(queue)?;
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.max_sitemap_depth < 1 || config.max_sitemap_depth > 32 {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_depth must be between 1 and 32, got {}",
            config.max_sitemap_depth
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the configured sitemap sources
fn validate_sitemap_sources(sources: &[SitemapSource]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[sitemaps]] entry is required".to_string(),
        ));
    }

    for source in sources {
        validate_http_url(&source.url, "sitemap url")?;
    }

    Ok(())
}

/// Validates the external queue configuration
fn validate_queue_config(config: &QueueConfig) -> Result<(), ConfigError> {
    validate_http_url(&config.endpoint, "queue endpoint")?;

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "queue batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }

    Ok(())
}

/// Validates that a string is an absolute http(s) URL
fn validate_http_url(value: &str, what: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https scheme",
            what, value
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
