use quickcall::Settings;
use quickcall::agents::email_agent;
use quickcall::tools::SendEmailTool;
use quickcall_email::SendGridTransport;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let base_url = server.uri();
    Settings::from_lookup(|name| match name {
        "SENDGRID_API_KEY" => Some("SG.test".to_owned()),
        "SENDGRID_BASE_URL" => Some(base_url.clone()),
        "EMAIL_TO" => Some("reader@example.com".to_owned()),
        "EMAIL_FROM" => Some("reports@example.com".to_owned()),
        _ => None,
    })
}

#[tokio::test]
async fn test_agent_sends_one_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(header("authorization", "Bearer SG.test"))
        .and(body_json(json!({
            "personalizations": [{ "to": [{ "email": "reader@example.com" }] }],
            "from": { "email": "reports@example.com" },
            "subject": "S",
            "content": [{ "type": "text/html", "value": "H" }]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let email = settings_for(&server).email_settings().unwrap();
    let transport = SendGridTransport::new(email.sendgrid.clone());
    let agent = email_agent(SendEmailTool::with_settings(transport, &email));

    let output = agent
        .call_tool("send_email", json!({ "subject": "S", "html_body": "H" }))
        .await
        .unwrap();
    assert_eq!(output, json!({ "status": "success" }));
}

#[tokio::test]
async fn test_agent_reports_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let email = settings_for(&server).email_settings().unwrap();
    let transport = SendGridTransport::new(email.sendgrid.clone());
    let agent = email_agent(SendEmailTool::with_settings(transport, &email));

    let output = agent
        .call_tool("send_email", json!({ "subject": "S", "html_body": "H" }))
        .await
        .unwrap();
    assert_eq!(output["status"], json!("error"));
    assert!(output["message"].as_str().unwrap().contains("bad key"));
}
