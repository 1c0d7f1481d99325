//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Transactional email. With no Resend key, mail is written to the log.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub resend_api_key: Option<String>,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.resend_api_key {
            if !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "office@church.example.org".to_string()
}

fn default_from_name() -> String {
    "Church Office".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_without_a_key() {
        let config = EmailConfig::default();
        assert!(config.resend_api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_header() {
        let config = EmailConfig {
            from_email: "giving@example.org".to_string(),
            from_name: "St Mary's Giving".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "St Mary's Giving <giving@example.org>");
    }

    #[test]
    fn resend_key_prefix_is_checked() {
        let config = EmailConfig {
            resend_api_key: Some("sk_xxx".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidResendKey)));
    }

    #[test]
    fn invalid_from_email_is_rejected() {
        let config = EmailConfig {
            from_email: "invalid-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
