//! Tools that agent runtimes can call.

mod fetch_page;
mod payment_intent;
mod send_email;

pub use fetch_page::{FetchPageParameters, FetchPageTool};
pub use payment_intent::{
    PaymentIntentParameters, PaymentIntentTool, StripeKeys, StripeSettings,
};
pub use send_email::{SendEmailParameters, SendEmailTool};
