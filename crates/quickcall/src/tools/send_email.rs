use quickcall_core::tool::{Tool, ToolStatus};
use quickcall_email::{EmailMessage, EmailTransport};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use crate::EmailSettings;

/// Arguments of [`SendEmailTool`].
#[derive(Deserialize, JsonSchema)]
pub struct SendEmailParameters {
    #[schemars(description = "The subject line of the email.")]
    subject: String,
    #[schemars(description = "The email body, as HTML.")]
    html_body: String,
}

/// A tool that sends one HTML email to a fixed recipient.
///
/// Recipient and sender are part of the tool state, only the subject and
/// body come from the caller.
pub struct SendEmailTool<T> {
    transport: T,
    to: String,
    from: String,
    parameter_schema: Value,
}

impl<T: EmailTransport> SendEmailTool<T> {
    /// Creates a tool sending from `from` to `to` through `transport`.
    #[inline]
    pub fn new(
        transport: T,
        to: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        SendEmailTool {
            transport,
            to: to.into(),
            from: from.into(),
            parameter_schema: schema_for!(SendEmailParameters).to_value(),
        }
    }

    /// Creates a tool with the addresses from `settings`.
    #[inline]
    pub fn with_settings(transport: T, settings: &EmailSettings) -> Self {
        Self::new(transport, &settings.to, &settings.from)
    }
}

impl<T: EmailTransport> Tool for SendEmailTool<T> {
    type Input = SendEmailParameters;
    type Output = ToolStatus;

    fn name(&self) -> &str {
        "send_email"
    }

    fn description(&self) -> &str {
        "Sends out an email with the given subject and HTML body."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: SendEmailParameters,
    ) -> impl Future<Output = ToolStatus> + Send + 'static {
        let msg = EmailMessage::new(
            &self.to,
            &self.from,
            input.subject,
            input.html_body,
        );
        let send_fut = self.transport.send(&msg);
        async move {
            match send_fut.await {
                Ok(receipt) => {
                    info!("email response: {}", receipt.status_code);
                    ToolStatus::Success
                }
                Err(err) => {
                    error!("email send error: {err}");
                    ToolStatus::error(err.message())
                }
            }
        }
    }
}
