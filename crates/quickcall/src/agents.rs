//! Agent configurations for external runtimes.

use quickcall_core::{AgentConfig, AgentConfigBuilder};
use quickcall_email::EmailTransport;

use crate::tools::{PaymentIntentTool, SendEmailTool};

/// Instructions of the email agent.
pub const EMAIL_AGENT_INSTRUCTIONS: &str = "You are able to send a nicely \
formatted HTML email based on a detailed report.
You will be provided with a detailed report. You should use your tool to \
send one email, providing the report converted into clean, well presented \
HTML with an appropriate subject line.";

/// Returns the email agent, which turns a report into one HTML email.
pub fn email_agent<T: EmailTransport>(tool: SendEmailTool<T>) -> AgentConfig {
    AgentConfigBuilder::with_name("Email agent")
        .with_instructions(EMAIL_AGENT_INSTRUCTIONS)
        .with_tool(tool)
        .with_model("gpt-4o-mini")
        .build()
}

/// Instructions of the Stripe assistant.
pub const STRIPE_AGENT_INSTRUCTIONS: &str = "You are a helpful assistant \
that answers the user's questions related to Stripe.
Use the provided tools to answer the questions.
If you don't find the answer in the tools, reply calmly that you don't have \
any tool to handle the request.
Give short responses.";

/// Returns the Stripe assistant, which looks up payment intents.
pub fn stripe_agent(tool: PaymentIntentTool) -> AgentConfig {
    AgentConfigBuilder::with_name("stripe_assistant")
        .with_instructions(STRIPE_AGENT_INSTRUCTIONS)
        .with_tool(tool)
        .with_model("openai/gpt-oss-20b")
        .build()
}
