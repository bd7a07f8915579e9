use serde::Serialize;

use crate::EmailMessage;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Content<'a> {
    r#type: &'static str,
    value: &'a str,
}

/// Body of a SendGrid v3 `mail/send` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[inline]
pub fn create_request(msg: &EmailMessage) -> MailSendRequest<'_> {
    MailSendRequest {
        personalizations: [Personalization {
            to: [Address { email: msg.to() }],
        }],
        from: Address { email: msg.from() },
        subject: msg.subject(),
        content: [Content {
            r#type: "text/html",
            value: msg.html(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let msg = EmailMessage::new(
            "reader@example.com",
            "reports@example.com",
            "Weekly report",
            "<h1>Done</h1>",
        );
        let body = serde_json::to_value(create_request(&msg)).unwrap();
        assert_eq!(
            body,
            json!({
                "personalizations": [{ "to": [{ "email": "reader@example.com" }] }],
                "from": { "email": "reports@example.com" },
                "subject": "Weekly report",
                "content": [{ "type": "text/html", "value": "<h1>Done</h1>" }]
            })
        );
    }
}
