use std::env;
use std::error::Error;
use std::fmt::{self, Display};

use quickcall_email::{SendGridConfig, SendGridConfigBuilder};
use quickcall_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

use crate::tools::{StripeKeys, StripeSettings};

const DEFAULT_EMAIL_TO: &str = "recipient@example.com";
const DEFAULT_EMAIL_FROM: &str = "sender@example.com";

/// A required variable is not set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingVarError {
    name: &'static str,
}

impl MissingVarError {
    /// Returns the name of the missing variable.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for MissingVarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} environment variable is not set", self.name)
    }
}

impl Error for MissingVarError {}

/// Everything the email tool needs besides the message itself.
#[derive(Clone, Debug)]
pub struct EmailSettings {
    /// SendGrid credentials and endpoint.
    pub sendgrid: SendGridConfig,
    /// Fixed recipient address.
    pub to: String,
    /// Fixed (verified) sender address.
    pub from: String,
}

/// Settings collected once and injected into the chat client and tools.
///
/// Nothing is read lazily: build the settings up front (usually with
/// [`Settings::from_env`]) and pass the derived configs around.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    groq_api_key: Option<String>,
    groq_base_url: Option<String>,
    groq_model: Option<String>,
    sendgrid_api_key: Option<String>,
    sendgrid_base_url: Option<String>,
    email_to: Option<String>,
    email_from: Option<String>,
    stripe_base_url: Option<String>,
    stripe_keys: StripeKeys,
}

impl Settings {
    /// Reads settings from the process environment.
    #[inline]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
            .with_stripe_keys(StripeKeys::from_vars(env::vars()))
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty values count as unset.
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            groq_api_key: var("GROQ_API_KEY"),
            groq_base_url: var("GROQ_BASE_URL"),
            groq_model: var("GROQ_MODEL"),
            sendgrid_api_key: var("SENDGRID_API_KEY"),
            sendgrid_base_url: var("SENDGRID_BASE_URL"),
            email_to: var("EMAIL_TO"),
            email_from: var("EMAIL_FROM"),
            stripe_base_url: var("STRIPE_BASE_URL"),
            stripe_keys: StripeKeys::default(),
        }
    }

    /// Replaces the Stripe secret keys.
    ///
    /// Keys are named after the sales organization and currency they
    /// serve, so they cannot be looked up by a fixed variable name.
    #[inline]
    pub fn with_stripe_keys(mut self, keys: StripeKeys) -> Self {
        self.stripe_keys = keys;
        self
    }

    /// Returns the chat provider configuration.
    pub fn chat_config(&self) -> Result<OpenAIConfig, MissingVarError> {
        let Some(api_key) = &self.groq_api_key else {
            return Err(MissingVarError {
                name: "GROQ_API_KEY",
            });
        };
        let mut builder = OpenAIConfigBuilder::with_api_key(api_key);
        if let Some(base_url) = &self.groq_base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(model) = &self.groq_model {
            builder = builder.with_model(model);
        }
        Ok(builder.build())
    }

    /// Returns the email settings.
    pub fn email_settings(&self) -> Result<EmailSettings, MissingVarError> {
        let Some(api_key) = &self.sendgrid_api_key else {
            return Err(MissingVarError {
                name: "SENDGRID_API_KEY",
            });
        };
        let mut builder = SendGridConfigBuilder::with_api_key(api_key);
        if let Some(base_url) = &self.sendgrid_base_url {
            builder = builder.with_base_url(base_url);
        }
        Ok(EmailSettings {
            sendgrid: builder.build(),
            to: self
                .email_to
                .clone()
                .unwrap_or_else(|| DEFAULT_EMAIL_TO.to_owned()),
            from: self
                .email_from
                .clone()
                .unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_owned()),
        })
    }

    /// Returns the Stripe settings. Having no key at all is not an error:
    /// the payment intent tool reports the missing pair per call.
    pub fn stripe_settings(&self) -> StripeSettings {
        StripeSettings {
            keys: self.stripe_keys.clone(),
            base_url: self.stripe_base_url.clone(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Settings")
            .field("groq_api_key", &redact(&self.groq_api_key))
            .field("groq_base_url", &self.groq_base_url)
            .field("groq_model", &self.groq_model)
            .field("sendgrid_api_key", &redact(&self.sendgrid_api_key))
            .field("sendgrid_base_url", &self.sendgrid_base_url)
            .field("email_to", &self.email_to)
            .field("email_from", &self.email_from)
            .field("stripe_base_url", &self.stripe_base_url)
            .field("stripe_keys", &self.stripe_keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_missing_keys() {
        let settings = settings(&[("GROQ_API_KEY", "")]);
        assert_eq!(settings.chat_config().unwrap_err().name(), "GROQ_API_KEY");
        assert_eq!(
            settings.email_settings().unwrap_err().name(),
            "SENDGRID_API_KEY"
        );
    }

    #[test]
    fn test_chat_config() {
        let settings = settings(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
        ]);
        let config = settings.chat_config().unwrap();
        assert_eq!(config.model(), "llama-3.1-8b-instant");
        assert_eq!(config.base_url(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_email_settings() {
        let settings = settings(&[
            ("SENDGRID_API_KEY", "SG.test"),
            ("EMAIL_TO", "me@example.org"),
        ]);
        let email = settings.email_settings().unwrap();
        assert_eq!(email.to, "me@example.org");
        assert_eq!(email.from, DEFAULT_EMAIL_FROM);
    }

    #[test]
    fn test_stripe_settings() {
        let settings =
            settings(&[("STRIPE_BASE_URL", "http://localhost:12111")])
                .with_stripe_keys(
                    StripeKeys::new().with_key("IN01", "USD", "sk_test_in"),
                );
        let stripe = settings.stripe_settings();
        assert_eq!(stripe.base_url.as_deref(), Some("http://localhost:12111"));
        assert_eq!(stripe.keys.get("IN01", "USD"), Some("sk_test_in"));
        assert!(!format!("{settings:?}").contains("sk_test_in"));
    }

    #[test]
    fn test_debug_hides_keys() {
        let settings = settings(&[
            ("GROQ_API_KEY", "gsk_secret"),
            ("SENDGRID_API_KEY", "SG.secret"),
        ]);
        let debug = format!("{settings:?}");
        assert!(!debug.contains("gsk_secret"));
        assert!(!debug.contains("SG.secret"));
    }
}
