use chrono::NaiveDate;

use crate::notifier::Outcome;

#[derive(Debug, Clone)]
pub struct Delivery {
    pub recipient: String,
    pub result: Result<(), String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryReport {
    pub deliveries: Vec<Delivery>,
    /// Set when delivery was not attempted at all.
    pub skipped: Option<String>,
}

impl DeliveryReport {
    pub fn from_deliveries(deliveries: Vec<Delivery>) -> Self {
        DeliveryReport {
            deliveries,
            skipped: None,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        DeliveryReport {
            deliveries: Vec::new(),
            skipped: Some(reason.into()),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.deliveries.iter().filter(|d| d.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.deliveries.len() - self.succeeded()
    }

    pub fn summary(&self) -> String {
        if let Some(reason) = &self.skipped {
            return format!("Email not sent: {}.", reason);
        }

        let mut line = format!(
            "Email sent to {}/{} recipients.",
            self.succeeded(),
            self.deliveries.len()
        );
        let failed: Vec<&str> = self
            .deliveries
            .iter()
            .filter(|d| d.result.is_err())
            .map(|d| d.recipient.as_str())
            .collect();
        if !failed.is_empty() {
            line.push_str(&format!(" Failed: {}.", failed.join(", ")));
        }
        line
    }
}

pub fn status_line(outcome: Outcome, today: NaiveDate) -> String {
    match outcome {
        Outcome::Updated => format!("Website has been updated on {}.", today.format("%Y-%m-%d")),
        Outcome::NotUpdated => format!("No updates on the website on {}.", today.format("%Y-%m-%d")),
    }
}
