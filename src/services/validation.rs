use anyhow::{anyhow, Result};
use regex::Regex;

/// Stateless input validation and normalization for the service layer
pub struct ValidationService;

impl ValidationService {
    /// Validate a prompt title
    pub fn validate_prompt_title(title: &str) -> Result<String> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("Prompt title cannot be empty"));
        }

        if trimmed.len() > 200 {
            return Err(anyhow!("Prompt title is too long (max 200 characters)"));
        }

        Ok(trimmed.to_string())
    }

    /// Validate prompt content
    pub fn validate_prompt_content(content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Err(anyhow!("Prompt content cannot be empty"));
        }

        Ok(content.to_string())
    }

    /// Validate an optional prompt description
    pub fn validate_prompt_description(description: &str) -> Result<String> {
        let trimmed = description.trim();

        if trimmed.len() > 1000 {
            return Err(anyhow!(
                "Prompt description is too long (max 1000 characters)"
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Normalize and validate a tag name. Names are stored trimmed and
    /// lowercased so uniqueness is case-insensitive.
    pub fn validate_tag_name(name: &str) -> Result<String> {
        let normalized = name.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(anyhow!("Tag name cannot be empty"));
        }

        if normalized.len() > 50 {
            return Err(anyhow!("Tag name is too long (max 50 characters)"));
        }

        Ok(normalized)
    }

    /// Validate a tag display color as a `#rrggbb` hex string
    pub fn validate_tag_color(color: &str) -> Result<String> {
        let trimmed = color.trim();

        let regex = Regex::new(r"^#[0-9a-fA-F]{6}$")
            .map_err(|e| anyhow!("Failed to compile color regex: {}", e))?;
        if !regex.is_match(trimmed) {
            return Err(anyhow!(
                "Tag color must be a hex color like #1a2b3c, got '{}'",
                trimmed
            ));
        }

        Ok(trimmed.to_lowercase())
    }

    /// Validate a favorite set name
    pub fn validate_favorite_name(name: &str) -> Result<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("Favorite set name cannot be empty"));
        }

        if trimmed.len() > 100 {
            return Err(anyhow!("Favorite set name is too long (max 100 characters)"));
        }

        Ok(trimmed.to_string())
    }
}
