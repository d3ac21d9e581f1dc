//! Email service for sending purchase orders to vendors.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Sending is
//! always an explicit, separately-reported side effect: a failure here never
//! rolls back the purchase order it was about.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;

use crate::config::EmailConfig;
use crate::models::PurchaseOrder;

/// Line item view for email templates.
struct LineItemView<'a> {
    ingredient_name: &'a str,
    order_quantity_lbs: String,
}

/// HTML template for the vendor purchase-order email.
#[derive(Template)]
#[template(path = "email/purchase_order.html")]
struct PurchaseOrderEmailHtml<'a> {
    po_number: &'a str,
    vendor_name: &'a str,
    needed_by_date: String,
    pickup_date: String,
    line_items: Vec<LineItemView<'a>>,
    total_lbs: String,
    notes: Option<&'a str>,
}

/// Plain text template for the vendor purchase-order email.
#[derive(Template)]
#[template(path = "email/purchase_order.txt")]
struct PurchaseOrderEmailText<'a> {
    po_number: &'a str,
    vendor_name: &'a str,
    needed_by_date: String,
    pickup_date: String,
    line_items: Vec<LineItemView<'a>>,
    total_lbs: String,
    notes: Option<&'a str>,
}

/// Errors that can occur when sending email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a purchase order to the vendor.
    ///
    /// Renders from the persisted order - the operator-edited quantities,
    /// never recomputed defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to
    /// render.
    pub async fn send_purchase_order(
        &self,
        to: &str,
        order: &PurchaseOrder,
    ) -> Result<(), EmailError> {
        let line_items: Vec<LineItemView<'_>> = order
            .line_items
            .iter()
            .map(|l| LineItemView {
                ingredient_name: &l.ingredient_name,
                order_quantity_lbs: format!("{:.1}", l.order_quantity_lbs),
            })
            .collect();
        let text_line_items: Vec<LineItemView<'_>> = order
            .line_items
            .iter()
            .map(|l| LineItemView {
                ingredient_name: &l.ingredient_name,
                order_quantity_lbs: format!("{:.1}", l.order_quantity_lbs),
            })
            .collect();

        let html = PurchaseOrderEmailHtml {
            po_number: &order.po_number,
            vendor_name: &order.vendor_name,
            needed_by_date: order.needed_by_date.format("%B %-d, %Y").to_string(),
            pickup_date: order.pickup_date.format("%B %-d, %Y").to_string(),
            line_items,
            total_lbs: format!("{:.1}", order.total_order_lbs()),
            notes: order.notes.as_deref(),
        }
        .render()?;

        let text = PurchaseOrderEmailText {
            po_number: &order.po_number,
            vendor_name: &order.vendor_name,
            needed_by_date: order.needed_by_date.format("%B %-d, %Y").to_string(),
            pickup_date: order.pickup_date.format("%B %-d, %Y").to_string(),
            line_items: text_line_items,
            total_lbs: format!("{:.1}", order.total_order_lbs()),
            notes: order.notes.as_deref(),
        }
        .render()?;

        let subject = format!("Freshpaw Purchase Order {}", order.po_number);
        self.send_multipart_email(to, &subject, &text, &html).await
    }

    /// Send a multipart (text + HTML) email.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.to_string()),
                    ),
            )?;

        self.mailer.send(message).await?;
        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}
