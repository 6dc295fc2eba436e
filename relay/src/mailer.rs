// Mailer: delivers summaries over SMTP. Built once at startup and shared by handlers.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Email is not configured")]
    NotConfigured,

    #[error("At least one recipient is required")]
    NoRecipients,

    #[error("Invalid email address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let (user, pass) = match (&config.smtp_user, &config.smtp_pass) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => {
                info!("SMTP credentials missing, email delivery disabled");
                return Ok(Self::disabled());
            }
        };

        let from_raw = config.mail_from.clone().unwrap_or_else(|| user.clone());
        let from = parse_mailbox(&from_raw)?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(user, pass));
        if let Some(port) = config.smtp_port {
            builder = builder.port(port);
        }

        info!("SMTP transport configured for {}", config.smtp_host);
        Ok(Self {
            transport: Some(builder.build()),
            from: Some(from),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Recipients are validated before the transport is consulted.
    pub async fn send_summary(
        &self,
        recipients: &[String],
        subject: &str,
        summary: &str,
    ) -> Result<(), MailError> {
        let mailboxes = parse_recipients(recipients)?;

        let (transport, from) = match (&self.transport, &self.from) {
            (Some(transport), Some(from)) => (transport, from),
            _ => return Err(MailError::NotConfigured),
        };

        let email = build_message(from.clone(), mailboxes, subject, summary)?;
        transport.send(email).await?;

        info!("Summary emailed to {} recipient(s)", recipients.len());
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse::<Mailbox>().map_err(|e| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_recipients(recipients: &[String]) -> Result<Vec<Mailbox>, MailError> {
    if recipients.is_empty() {
        return Err(MailError::NoRecipients);
    }
    recipients.iter().map(|r| parse_mailbox(r)).collect()
}

pub fn build_message(
    from: Mailbox,
    to: Vec<Mailbox>,
    subject: &str,
    summary: &str,
) -> Result<Message, MailError> {
    let mut builder = Message::builder().from(from).subject(subject);
    for mailbox in to {
        builder = builder.to(mailbox);
    }

    let message = builder.multipart(MultiPart::alternative_plain_html(
        summary.to_string(),
        render_html(subject, summary),
    ))?;
    Ok(message)
}

pub fn render_html(subject: &str, summary: &str) -> String {
    let body = escape_html(summary).replace('\n', "<br>\n");
    format!(
        "<html><body style=\"font-family: sans-serif; line-height: 1.5\">\
         <h2>{}</h2><p>{}</p></body></html>",
        escape_html(subject),
        body
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
