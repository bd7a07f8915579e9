use std::collections::HashMap;
use std::fmt;

use quickcall_core::tool::Tool;
use reqwest::{Client, Response, header};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com";
const KEY_VAR_PREFIX: &str = "STRIPE_SECRET_KEY_";

/// Stripe secret keys, one per sales organization and currency.
///
/// Each Stripe account serves a single `(salesOrg, currency)` pair, so the
/// key is picked per call from the arguments.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StripeKeys {
    keys: HashMap<(String, String), String>,
}

impl StripeKeys {
    /// Creates an empty key set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects keys from `STRIPE_SECRET_KEY_<salesOrg>_<currency>`
    /// variables. Other variables and empty values are ignored.
    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut keys = Self::new();
        for (name, value) in vars {
            if value.is_empty() {
                continue;
            }
            let Some(rest) = name.strip_prefix(KEY_VAR_PREFIX) else {
                continue;
            };
            // The sales organization may itself contain underscores, the
            // currency code never does.
            match rest.rsplit_once('_') {
                Some((sales_org, currency))
                    if !sales_org.is_empty() && !currency.is_empty() =>
                {
                    keys = keys.with_key(sales_org, currency, value);
                }
                _ => warn!("ignoring malformed variable {name}"),
            }
        }
        keys
    }

    /// Adds (or replaces) the key of a `(sales_org, currency)` pair.
    pub fn with_key(
        mut self,
        sales_org: impl Into<String>,
        currency: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.keys
            .insert((sales_org.into(), currency.into()), secret_key.into());
        self
    }

    /// Returns the key of the given pair, matched exactly.
    pub fn get(&self, sales_org: &str, currency: &str) -> Option<&str> {
        self.keys
            .get(&(sales_org.to_owned(), currency.to_owned()))
            .map(String::as_str)
    }

    /// Returns the number of configured keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no key is configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for StripeKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self
            .keys
            .keys()
            .map(|(org, currency)| format!("{org}/{currency}"))
            .collect();
        pairs.sort();
        f.debug_struct("StripeKeys").field("pairs", &pairs).finish()
    }
}

/// Stripe keys and endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StripeSettings {
    /// Secret keys by sales organization and currency.
    pub keys: StripeKeys,
    /// API base URL, `https://api.stripe.com` when unset.
    pub base_url: Option<String>,
}

/// Arguments of [`PaymentIntentTool`].
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct PaymentIntentParameters {
    #[schemars(description = "The Stripe PaymentIntent ID (e.g. 'pi_123').")]
    id: String,
    #[serde(rename = "salesOrg")]
    #[schemars(description = "The sales organization (e.g. 'IN01').")]
    sales_org: String,
    #[schemars(description = "The currency (e.g. 'USD').")]
    currency: String,
}

impl PaymentIntentParameters {
    fn failure(&self, error: impl fmt::Display) -> Value {
        json!({
            "error": error.to_string(),
            "id": self.id,
            "salesOrg": self.sales_org,
            "currency": self.currency,
        })
    }
}

/// A tool that retrieves one Stripe payment intent.
///
/// Returns the payment intent object as Stripe sent it. Failures are
/// returned as `{error, id, salesOrg, currency}` so the caller always gets
/// an object back.
#[derive(Clone)]
pub struct PaymentIntentTool {
    client: Client,
    keys: StripeKeys,
    base_url: String,
    parameter_schema: Value,
}

impl PaymentIntentTool {
    /// Creates a tool using `keys` against the public Stripe API.
    #[inline]
    pub fn new(keys: StripeKeys) -> Self {
        PaymentIntentTool {
            client: Client::new(),
            keys,
            base_url: DEFAULT_BASE_URL.to_owned(),
            parameter_schema: schema_for!(PaymentIntentParameters).to_value(),
        }
    }

    /// Creates a tool with the keys and endpoint from `settings`.
    pub fn with_settings(settings: &StripeSettings) -> Self {
        let tool = Self::new(settings.keys.clone());
        match &settings.base_url {
            Some(base_url) => tool.with_base_url(base_url),
            None => tool,
        }
    }

    /// Sends requests to `base_url` instead of the public API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

async fn read_payment_intent(resp: Response) -> Result<Value, String> {
    let status = resp.status();
    let text = resp.text().await.map_err(|err| format!("{status}: {err}"))?;
    if !status.is_success() {
        // Stripe describes failures as `{"error": {"message": ...}}`.
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| {
                body["error"]["message"].as_str().map(ToOwned::to_owned)
            });
        return Err(match message {
            Some(message) => format!("{status}: {message}"),
            None if text.is_empty() => format!("{status}"),
            None => format!("{status}: {text}"),
        });
    }
    serde_json::from_str(&text)
        .map_err(|err| format!("invalid response: {err}"))
}

impl Tool for PaymentIntentTool {
    type Input = PaymentIntentParameters;
    type Output = Value;

    fn name(&self) -> &str {
        "get_pi"
    }

    fn description(&self) -> &str {
        r#"
Retrieves a Stripe payment intent. Find the fields you need in the returned
object."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: PaymentIntentParameters,
    ) -> impl Future<Output = Value> + Send + 'static {
        debug!(
            "retrieving payment intent {} ({}/{})",
            input.id, input.sales_org, input.currency
        );
        let secret_key = self.keys.get(&input.sales_org, &input.currency);
        let resp_fut = match secret_key {
            None => Err(format!(
                "no Stripe secret key for salesOrg {} and currency {}",
                input.sales_org, input.currency
            )),
            Some(_) if !is_valid_id(&input.id) => {
                Err(format!("invalid payment intent id: {:?}", input.id))
            }
            Some(secret_key) => Ok(self
                .client
                .get(format!(
                    "{}/v1/payment_intents/{}",
                    self.base_url, input.id
                ))
                .header(header::AUTHORIZATION, format!("Bearer {secret_key}"))
                .send()),
        };

        async move {
            let result = match resp_fut {
                Ok(resp_fut) => match resp_fut.await {
                    Ok(resp) => read_payment_intent(resp).await,
                    Err(err) => Err(format!("{err}")),
                },
                Err(err) => Err(err),
            };
            match result {
                Ok(payment_intent) => {
                    trace!("payment intent: {payment_intent}");
                    payment_intent
                }
                Err(err) => {
                    error!(
                        "error retrieving payment intent {}: {err}",
                        input.id
                    );
                    input.failure(err)
                }
            }
        }
    }
}
