//! Composition of the two RSVP emails: one to the organisers, one to the guest.

use super::Rsvp;
use super::ports::EmailMessage;

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Email telling the organisers a guest has replied.
///
/// Returns `None` when no organiser address is configured.
pub fn organizer_notification(rsvp: &Rsvp, recipients: &[String]) -> Option<EmailMessage> {
    if recipients.is_empty() {
        return None;
    }

    let message = rsvp.goodwill_message.as_deref().unwrap_or("(no message)");
    let text = format!(
        "New RSVP received.\n\nName: {name}\nEmail: {email}\nAccess code: {code}\nMessage: {message}\n",
        name = rsvp.name,
        email = rsvp.email,
        code = rsvp.access_code,
    );
    let html = format!(
        "<h2>New RSVP received</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Access code:</strong> {code}</p>\
         <p><strong>Message:</strong> {message}</p>",
        name = escape_html(&rsvp.name),
        email = escape_html(&rsvp.email),
        code = rsvp.access_code,
        message = escape_html(message),
    );

    Some(EmailMessage {
        to: recipients.to_vec(),
        subject: format!("New RSVP from {}", rsvp.name),
        html,
        text,
    })
}

/// Confirmation email sent to the guest with their access code.
pub fn guest_confirmation(rsvp: &Rsvp) -> EmailMessage {
    let text = format!(
        "Hi {name},\n\nThank you for your RSVP. Your access code is {code}.\n\
         Keep it handy: you will need it to view and share photos from the day.\n",
        name = rsvp.name,
        code = rsvp.access_code,
    );
    let html = format!(
        "<p>Hi {name},</p>\
         <p>Thank you for your RSVP. Your access code is <strong>{code}</strong>.</p>\
         <p>Keep it handy: you will need it to view and share photos from the day.</p>",
        name = escape_html(&rsvp.name),
        code = rsvp.access_code,
    );

    EmailMessage {
        to: vec![rsvp.email.clone()],
        subject: "Your RSVP is confirmed".to_owned(),
        html,
        text,
    }
}
