use anyhow::{anyhow, Result};

/// Untappd pages are capped at 50 items.
pub const MAX_PAGE_SIZE: usize = 50;

pub fn validate_max_count(value: usize) -> Result<()> {
    if value == 0 || value > MAX_PAGE_SIZE {
        return Err(anyhow!(
            "max_count must be between 1 and {}, got {}",
            MAX_PAGE_SIZE,
            value
        ));
    }
    Ok(())
}

pub fn validate_base_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("api_base_url must not be empty"));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(anyhow!("api_base_url must be an http(s) url"));
    }
    Ok(())
}
