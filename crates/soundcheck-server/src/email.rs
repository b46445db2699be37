//! Contact-notification email: HTML rendering and dispatch.
//!
//! Renders the "new inquiry" notification and posts it to the
//! transactional email provider. Dispatch is best-effort: a failure is
//! reported to the caller but never rolls back the stored submission.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};
use url::Url;

use soundcheck_config::EmailConfig;

/// Default transactional email endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";

/// A contact record as delivered by the store's insert webhook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Resolved settings for the notify function.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub api_key: SecretString,
    pub from: String,
    pub to: String,
    pub endpoint: Url,
}

impl EmailSettings {
    /// Resolve from config; `None` if the provider key is absent
    /// (the notify function then reports itself unconfigured).
    pub fn from_config(config: &EmailConfig) -> Option<Self> {
        let env_name = config.api_key_env.as_deref().unwrap_or("RESEND_API_KEY");
        let api_key = std::env::var(env_name).ok()?;
        Some(Self {
            api_key: SecretString::from(api_key),
            from: config
                .from
                .clone()
                .unwrap_or_else(|| "Soundcheck <notifications@localhost>".into()),
            to: config.to.clone().unwrap_or_else(|| "owner@localhost".into()),
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is valid"),
        })
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub message_id: Option<String>,
}

#[derive(Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Render and send the notification email for one contact record.
pub async fn send_contact_email(
    http: &reqwest::Client,
    settings: &EmailSettings,
    record: &ContactRecord,
) -> Result<DispatchOutcome, String> {
    let subject = format!(
        "New inquiry from {}",
        record.name.as_deref().unwrap_or("a website visitor")
    );
    let html = render_contact_email(record);

    let mut body = json!({
        "from": settings.from,
        "to": [settings.to],
        "subject": subject,
        "html": html,
    });
    if let Some(reply_to) = &record.email {
        body["reply_to"] = json!(reply_to);
    }

    debug!(endpoint = %settings.endpoint, "dispatching contact notification");
    let resp = http
        .post(settings.endpoint.clone())
        .bearer_auth(settings.api_key.expose_secret())
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("email provider unreachable: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        error!(%status, "email provider rejected the dispatch");
        return Err(format!("email provider error: {status} {body}"));
    }

    let parsed: ProviderResponse = resp
        .json()
        .await
        .map_err(|e| format!("email provider returned an unreadable body: {e}"))?;
    Ok(DispatchOutcome {
        message_id: parsed.id,
    })
}

/// Render the notification HTML: an event-details table plus the
/// visitor's message block.
pub fn render_contact_email(record: &ContactRecord) -> String {
    let name = escape(record.name.as_deref().unwrap_or("Not provided"));
    let email = escape(record.email.as_deref().unwrap_or("Not provided"));
    let phone = escape(record.phone.as_deref().unwrap_or("Not provided"));
    let event_type = escape(record.event_type.as_deref().unwrap_or("Not specified"));
    let event_date = escape(record.event_date.as_deref().unwrap_or("Not provided"));
    let submitted = escape(record.created_at.as_deref().unwrap_or("just now"));
    let message = escape(record.message.as_deref().unwrap_or("No message provided."))
        .replace('\n', "<br />");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>New Contact Inquiry</title>
    <meta name="color-scheme" content="only light" />
  </head>
  <body style="margin:0;padding:24px;background:#f7fafc;font-family:'Helvetica Neue',Arial,sans-serif;color:#0f172a;">
    <table role="presentation" style="width:100%;max-width:640px;margin:0 auto;background:#ffffff;border-radius:16px;border:1px solid #e2e8f0;overflow:hidden;">
      <tbody>
        <tr>
          <td style="padding:32px;background:linear-gradient(135deg,#fbbf24,#f59e0b);color:#0f172a;">
            <h1 style="margin:0;font-size:26px;font-weight:700;">New Contact Inquiry</h1>
            <p style="margin:10px 0 0;font-size:16px;">{name} just reached out through the website.</p>
          </td>
        </tr>
        <tr>
          <td style="padding:32px;">
            <table role="presentation" style="width:100%;font-size:15px;color:#1e293b;">
              <tbody>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">NAME</td><td style="padding:6px 0;font-weight:500;">{name}</td></tr>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">EMAIL</td><td style="padding:6px 0;font-weight:500;">{email}</td></tr>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">PHONE</td><td style="padding:6px 0;font-weight:500;">{phone}</td></tr>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">EVENT TYPE</td><td style="padding:6px 0;font-weight:500;">{event_type}</td></tr>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">EVENT DATE</td><td style="padding:6px 0;font-weight:500;">{event_date}</td></tr>
                <tr><td style="padding:6px 0;color:#64748b;font-size:12px;font-weight:600;">SUBMITTED</td><td style="padding:6px 0;font-weight:500;">{submitted}</td></tr>
              </tbody>
            </table>
            <div style="margin-top:24px;border-radius:12px;border:1px solid #facc15;background:#fefce8;padding:24px;">
              <h3 style="margin:0 0 12px;font-size:18px;font-weight:600;color:#854d0e;">Message</h3>
              <div style="color:#78350f;font-size:15px;line-height:1.7;">{message}</div>
            </div>
          </td>
        </tr>
        <tr>
          <td style="background:#f8fafc;padding:24px;text-align:center;color:#64748b;font-size:12px;">
            Sent automatically from the site contact form. Reply directly to keep the conversation going.
          </td>
        </tr>
      </tbody>
    </table>
  </body>
</html>"#
    )
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_visitor_details() {
        let html = render_contact_email(&ContactRecord {
            name: Some("Leilani K.".into()),
            email: Some("leilani@example.com".into()),
            event_type: Some("wedding".into()),
            message: Some("Beach ceremony\nSecond line".into()),
            ..ContactRecord::default()
        });

        assert!(html.contains("Leilani K."));
        assert!(html.contains("leilani@example.com"));
        assert!(html.contains("wedding"));
        assert!(html.contains("Beach ceremony<br />Second line"));
    }

    #[test]
    fn render_escapes_markup_in_fields() {
        let html = render_contact_email(&ContactRecord {
            name: Some("<script>alert(1)</script>".into()),
            ..ContactRecord::default()
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn render_defaults_missing_fields() {
        let html = render_contact_email(&ContactRecord::default());
        assert!(html.contains("Not provided"));
        assert!(html.contains("No message provided."));
    }
}
