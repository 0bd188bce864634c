use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    config::{AgencyConfig, MailConfig},
    domain::{Booking, Lead},
    error::{AppError, Result},
};

/// Outbound transactional mail. Delivery is fire-and-forget from the
/// caller's point of view: services spawn sends and log failures, a dead
/// SMTP relay never fails a booking.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    agency_name: String,
    agency_inbox: Mailbox,
}

impl Mailer {
    /// Returns `None` when mail is disabled or incompletely configured,
    /// mirroring how optional integrations are wired elsewhere.
    pub fn new(mail: &MailConfig, agency: &AgencyConfig) -> Option<Self> {
        if !mail.enabled {
            return None;
        }

        let host = mail.smtp_host.as_deref()?;
        let from_address = mail.from_address.as_deref()?;

        let from: Mailbox = format!("{} <{}>", agency.name, from_address).parse().ok()?;
        let agency_inbox: Mailbox = agency.inbox_email.parse().ok()?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?.port(mail.smtp_port);

        if let (Some(username), Some(password)) = (&mail.username, &mail.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Some(Self {
            transport: builder.build(),
            from,
            agency_name: agency.name.clone(),
            agency_inbox,
        })
    }

    /// Confirmation to the customer after the checkout flow creates a
    /// booking. Skipped silently when the booking has no email address.
    pub async fn send_booking_confirmation(&self, booking: &Booking) -> Result<()> {
        let to: Mailbox = match booking.email.parse() {
            Ok(mailbox) => mailbox,
            Err(_) => {
                tracing::debug!(booking_id = booking.id, "No usable customer email, skipping confirmation");
                return Ok(());
            }
        };

        let booked_on = booking
            .booked_at
            .map(|d| d.format("%B %d, %Y").to_string())
            .unwrap_or_else(|| "today".to_string());

        let body = format!(
            r#"<html><body>
            <h2>Thank you for booking with {agency}!</h2>
            <p>Dear {customer},</p>
            <p>We have received your booking for <strong>{package}</strong>
            ({destination}), made on {booked_on}.</p>
            <p>Booking reference: <strong>{reference}</strong><br>
            Amount: <strong>{amount:.2}</strong></p>
            <p>Our team will be in touch shortly with payment and travel details.</p>
            <p>— {agency}</p>
            </body></html>"#,
            agency = self.agency_name,
            customer = if booking.customer.is_empty() { "traveller" } else { &booking.customer },
            package = booking.package_name,
            destination = booking.destination,
            booked_on = booked_on,
            reference = booking.reference,
            amount = booking.amount,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("Booking confirmation — {}", booking.package_name))
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| AppError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        Ok(())
    }

    /// Heads-up to the agency inbox when a new enquiry lands.
    pub async fn send_lead_notification(&self, lead: &Lead) -> Result<()> {
        let body = format!(
            r#"<html><body>
            <h2>New enquiry</h2>
            <p><strong>{name}</strong> &lt;{email}&gt; {phone}</p>
            <p>Destination: {destination}<br>Source: {source}</p>
            <p>{message}</p>
            </body></html>"#,
            name = lead.name,
            email = lead.email,
            phone = lead.phone,
            destination = lead.destination,
            source = lead.source,
            message = lead.message,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.agency_inbox.clone())
            .subject(format!("New enquiry from {}", lead.name))
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| AppError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        Ok(())
    }
}
