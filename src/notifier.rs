use anyhow::{Context, Result};
use chrono::NaiveDate;
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::NotifyConfig;
use crate::report::{Delivery, DeliveryReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    NotUpdated,
}

impl Outcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Updated
        } else {
            Outcome::NotUpdated
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    pub fn compose(outcome: Outcome, site_name: &str, today: NaiveDate) -> Self {
        let date = today.format("%Y-%m-%d");
        match outcome {
            Outcome::Updated => EmailTemplate {
                subject: format!("{} Updated", site_name),
                body: format!("The {} website has been updated on {}.", site_name, date),
            },
            Outcome::NotUpdated => EmailTemplate {
                subject: format!("{} Not Updated", site_name),
                body: format!(
                    "The {} website has NOT been updated on {}.",
                    site_name, date
                ),
            },
        }
    }
}

pub trait Mailer {
    fn send(&self, recipient: &str, template: &EmailTemplate) -> Result<()>;
}

/// STARTTLS submission with an app password. The transport is built without
/// a pool, so every message opens and authenticates its own session.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &NotifyConfig, sender: &str, sender_key: &str) -> Result<Self> {
        let from: Mailbox = sender
            .parse()
            .with_context(|| format!("Invalid sender address '{}'", sender))?;

        let transport = SmtpTransport::starttls_relay(&config.smtp_host)
            .with_context(|| format!("Failed to create SMTP transport for {}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(Credentials::new(sender.to_string(), sender_key.to_string()))
            .build();

        Ok(SmtpMailer { transport, from })
    }

    fn build_message(&self, recipient: &str, template: &EmailTemplate) -> Result<Message> {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address '{}'", recipient))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(template.subject.as_str())
            .multipart(
                MultiPart::mixed().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(template.body.clone()),
                ),
            )
            .context("Failed to build email")
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, recipient: &str, template: &EmailTemplate) -> Result<()> {
        let message = self.build_message(recipient, template)?;
        self.transport
            .send(&message)
            .context("Failed to send email via SMTP")?;
        Ok(())
    }
}

/// Attempts every recipient in order. A failed delivery is recorded and the
/// loop moves on.
pub fn notify(mailer: &dyn Mailer, template: &EmailTemplate, recipients: &[String]) -> DeliveryReport {
    let start_time = Instant::now();
    let mut deliveries = Vec::with_capacity(recipients.len());

    for recipient in recipients {
        let result = match mailer.send(recipient, template) {
            Ok(()) => {
                info!(action = "send", component = "notifier", recipient = %recipient, subject = %template.subject, "Email delivered");
                Ok(())
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                error!(action = "send", component = "notifier", recipient = %recipient, error = %reason, "Email delivery failed");
                Err(reason)
            }
        };
        deliveries.push(Delivery {
            recipient: recipient.clone(),
            result,
        });
    }

    let report = DeliveryReport::from_deliveries(deliveries);
    info!(
        action = "complete",
        component = "notifier",
        succeeded = report.succeeded(),
        failed = report.failed(),
        duration_ms = start_time.elapsed().as_millis(),
        "Notification round completed"
    );
    report
}

/// Builds the live SMTP transport. Passed to [`run_notifications`] so the
/// transport is only set up once there is something to send.
pub fn connect_smtp(config: &NotifyConfig, sender: &str, sender_key: &str) -> Result<Box<dyn Mailer>> {
    Ok(Box::new(SmtpMailer::new(config, sender, sender_key)?))
}

/// Sends the outcome email to every configured recipient. Missing recipients
/// or sender credentials skip delivery with a diagnostic instead of failing.
pub fn run_notifications(
    config: &NotifyConfig,
    connect: &dyn Fn(&NotifyConfig, &str, &str) -> Result<Box<dyn Mailer>>,
    outcome: Outcome,
    today: NaiveDate,
) -> DeliveryReport {
    let (sender, sender_key) = match preflight(config) {
        Ok(credentials) => credentials,
        Err(report) => return report,
    };

    let mailer = match connect(config, sender, sender_key) {
        Ok(mailer) => mailer,
        Err(e) => {
            let reason = format!("{:#}", e);
            error!(action = "setup", component = "smtp_transport", error = %reason, "Could not set up SMTP transport");
            return DeliveryReport::skipped(reason);
        }
    };

    let template = EmailTemplate::compose(outcome, &config.site_name, today);
    notify(mailer.as_ref(), &template, &config.recipients)
}

fn preflight(config: &NotifyConfig) -> Result<(&str, &str), DeliveryReport> {
    let reason = match (
        config.recipients.is_empty(),
        config.sender.as_deref(),
        config.sender_key.as_deref(),
    ) {
        (true, _, _) => "no recipients configured",
        (false, None, _) => "no sender address configured",
        (false, Some(_), None) => "no sender key configured",
        (false, Some(sender), Some(sender_key)) => return Ok((sender, sender_key)),
    };

    warn!(action = "skip", component = "notifier", reason = reason, "Skipping email delivery");
    Err(DeliveryReport::skipped(reason))
}
