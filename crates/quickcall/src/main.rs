//! A small CLI around the `quickcall` library.
//!
//! ```text
//! quickcall translate <text>
//! quickcall email <subject> <html body>
//! quickcall fetch <url>
//! quickcall stripe <payment intent id> <sales org> <currency>
//! quickcall agent [email | stripe]
//! ```

#[macro_use]
extern crate tracing;

use std::env;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use quickcall::agents::{email_agent, stripe_agent};
use quickcall::core::{AgentConfig, ChatClient};
use quickcall::core::tool::Tool;
use quickcall::tools::{FetchPageTool, PaymentIntentTool, SendEmailTool};
use quickcall::{Settings, translate};
use quickcall_email::SendGridTransport;
use quickcall_openai_model::OpenAIProvider;
use serde_json::json;

const BAR_CHAR: &str = "▎";
const USAGE: &str = "usage: quickcall <translate TEXT | email SUBJECT HTML \
| fetch URL | stripe ID SALES_ORG CURRENCY | agent [email | stripe]>";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = dotenv::dotenv() {
        debug!("no .env file loaded: {err}");
    }
    let settings = Settings::from_env();
    trace!("settings: {settings:?}");

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["translate", words @ ..] if !words.is_empty() => {
            run_translate(&settings, &words.join(" ")).await
        }
        ["email", subject, html_body] => {
            run_email(&settings, subject, html_body).await
        }
        ["fetch", url] => run_fetch(url).await,
        ["stripe", id, sales_org, currency] => {
            run_stripe(&settings, id, sales_org, currency).await
        }
        ["agent"] | ["agent", "email"] => run_agent(&settings),
        ["agent", "stripe"] => {
            let stripe = settings.stripe_settings();
            print_agent(&stripe_agent(PaymentIntentTool::with_settings(&stripe)))
        }
        _ => eprintln!("{USAGE}"),
    }
}

async fn run_translate(settings: &Settings, text: &str) {
    let config = match settings.chat_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let client = ChatClient::new(OpenAIProvider::new(config));

    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}") {
        progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    progress_bar.set_message("🤔 Translating...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let result = translate(&client, text).await;
    progress_bar.finish_and_clear();

    match result {
        Ok(reply) => {
            println!("{}🤖 {}", BAR_CHAR.bright_cyan(), reply.bright_white())
        }
        Err(err) => {
            eprintln!("{}{}", BAR_CHAR.bright_red(), err.detail())
        }
    }
}

async fn run_email(settings: &Settings, subject: &str, html_body: &str) {
    let email = match settings.email_settings() {
        Ok(email) => email,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let transport = SendGridTransport::new(email.sendgrid.clone());
    let agent = email_agent(SendEmailTool::with_settings(transport, &email));

    let args = json!({ "subject": subject, "html_body": html_body });
    match agent.call_tool("send_email", args).await {
        Ok(status) => println!("{status}"),
        Err(err) => eprintln!("{err}"),
    }
}

async fn run_fetch(url: &str) {
    let tool = FetchPageTool::new();
    let input = match serde_json::from_value(json!({ "url": url })) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    println!("{}", tool.execute(input).await);
}

fn run_agent(settings: &Settings) {
    let email = match settings.email_settings() {
        Ok(email) => email,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let transport = SendGridTransport::new(email.sendgrid.clone());
    print_agent(&email_agent(SendEmailTool::with_settings(transport, &email)));
}

fn print_agent(agent: &AgentConfig) {
    match serde_json::to_string_pretty(agent) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("failed to serialize agent: {err}"),
    }
}

async fn run_stripe(
    settings: &Settings,
    id: &str,
    sales_org: &str,
    currency: &str,
) {
    let stripe = settings.stripe_settings();
    if stripe.keys.is_empty() {
        warn!("no STRIPE_SECRET_KEY_<salesOrg>_<currency> variable is set");
    }
    let agent = stripe_agent(PaymentIntentTool::with_settings(&stripe));

    let args = json!({ "id": id, "salesOrg": sales_org, "currency": currency });
    match agent.call_tool("get_pi", args).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("{err}"),
        },
        Err(err) => eprintln!("{err}"),
    }
}
