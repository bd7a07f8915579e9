use quickcall_core::tool::Tool;
use reqwest::{Client, StatusCode};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Arguments of [`FetchPageTool`].
#[derive(Deserialize, JsonSchema)]
pub struct FetchPageParameters {
    #[schemars(description = "The URL of the page to fetch.")]
    url: String,
}

/// A tool that downloads a web page and returns its raw content.
#[derive(Clone)]
pub struct FetchPageTool {
    client: Client,
    parameter_schema: Value,
}

impl FetchPageTool {
    /// Creates a new fetch page tool.
    #[inline]
    pub fn new() -> Self {
        FetchPageTool {
            client: Client::new(),
            parameter_schema: schema_for!(FetchPageParameters).to_value(),
        }
    }
}

impl Default for FetchPageTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for FetchPageTool {
    type Input = FetchPageParameters;
    type Output = String;

    fn name(&self) -> &str {
        "fetch_page"
    }

    fn description(&self) -> &str {
        r#"
Fetches a web page with a single GET request and returns its content.
Failures are described in the returned text."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: FetchPageParameters,
    ) -> impl Future<Output = String> + Send + 'static {
        debug!("fetching {}", input.url);
        let resp_fut = self.client.get(&input.url).send();
        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    warn!("failed to fetch page: {err}");
                    return format!("Failed to retrieve page. Error: {err}");
                }
            };
            let status = resp.status();
            if status != StatusCode::OK {
                return format!(
                    "Failed to retrieve page. Status code: {}",
                    status.as_u16()
                );
            }
            match resp.text().await {
                Ok(text) => text,
                Err(err) => format!("Failed to read page. Error: {err}"),
            }
        }
    }
}
