use htmlescape::encode_minimal;

use crate::domain::CommunicationType;

use super::email_client::{AdminNotification, UserConfirmation};

const HEADER_STYLE: &str = "background: linear-gradient(to right, #4f46e5, #3b82f6); color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0;";
const BODY_STYLE: &str =
    "background-color: #f9fafb; padding: 20px; border-radius: 0 0 8px 8px; color: #333;";
const BUTTON_STYLE: &str = "background-color: #4f46e5; color: white; text-decoration: none; padding: 10px 20px; border-radius: 5px; font-weight: bold;";
const FOOTER_STYLE: &str = "text-align: center; font-size: 12px; color: #6b7280; margin-top: 20px;";

/// Site wide values that appear in outgoing emails
#[derive(Debug, Clone)]
pub struct SiteDetails {
    /// Public domain of the website, e.g. `crewsity.com`
    pub domain: String,
    /// Domain mail is sent from, used for the unsubscribe mailbox
    pub mail_domain: String,
    pub support_phone: Option<String>,
}

impl SiteDetails {
    pub fn home_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    pub fn unsubscribe_url(&self, email: &str) -> String {
        format!(
            "https://{}/unsubscribe?email={}",
            self.domain,
            urlencoding::encode(email)
        )
    }
}

/// Subject and bodies of a rendered email
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

fn wrap(title: &str, content: &str, footer: &str, year: i32) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="{HEADER_STYLE}">
    <h1 style="margin: 0;">{title}</h1>
  </div>
  <div style="{BODY_STYLE}">
{content}
  </div>
  <div style="{FOOTER_STYLE}">
    <p>&copy; {year} CampusConnect. All rights reserved.</p>
{footer}
  </div>
</div>"#
    )
}

fn button(href: &str, label: &str) -> String {
    format!(
        r#"<div style="margin: 30px 0; text-align: center;"><a href="{}" style="{BUTTON_STYLE}">{}</a></div>"#,
        encode_minimal(href),
        encode_minimal(label)
    )
}

fn admin_subject(notification: &AdminNotification) -> String {
    if let Some(subject) = &notification.subject {
        return subject.clone();
    }

    let who = notification
        .name
        .as_deref()
        .unwrap_or(notification.email.as_ref());
    match notification.communication_type {
        CommunicationType::EarlyAccess => format!("[EARLY ACCESS REQUEST] from {}", who),
        CommunicationType::Newsletter => {
            format!("[NEWSLETTER SIGN-UP] from {}", notification.email)
        }
        CommunicationType::CampusAmbassador => {
            format!("[CAMPUS AMBASSADOR APPLICATION] from {}", who)
        }
        CommunicationType::Contact | CommunicationType::Other => "New User Inquiry".into(),
    }
}

pub fn admin_notification(notification: &AdminNotification, year: i32) -> Rendered {
    let name = notification.name.as_deref().unwrap_or("Not provided");
    let email = notification.email.as_ref();
    let message = notification
        .message
        .as_deref()
        .unwrap_or("No message provided");

    let mut content = format!(
        "    <p><strong>Name:</strong> {}</p>\n    <p><strong>Email:</strong> {}</p>\n",
        encode_minimal(name),
        encode_minimal(email)
    );
    let mut text = format!("Name: {}\nEmail: {}\n", name, email);

    if let Some(institution) = notification.institution.as_deref().filter(|i| !i.is_empty()) {
        content.push_str(&format!(
            "    <p><strong>Institution:</strong> {}</p>\n",
            encode_minimal(institution)
        ));
        text.push_str(&format!("Institution: {}\n", institution));
    }
    if let Some(link) = notification.resume_link.as_deref().filter(|l| !l.is_empty()) {
        content.push_str(&format!(
            "    <p><strong>Resume:</strong> <a href=\"{}\" target=\"_blank\">{}</a></p>\n",
            encode_minimal(link),
            encode_minimal(link)
        ));
        text.push_str(&format!("Resume: {}\n", link));
    }

    content.push_str(&format!(
        "    <p><strong>Message/Details:</strong></p>\n    <p style=\"background-color: #f0f0f0; padding: 15px; border-radius: 5px; white-space: pre-wrap;\">{}</p>\n",
        encode_minimal(message)
    ));
    content.push_str(&button(&format!("mailto:{}", email), "Reply to User"));
    text.push_str(&format!("\nMessage/Details:\n{}\n", message));

    let title = format!("New {} Request", notification.communication_type.label());

    Rendered {
        subject: admin_subject(notification),
        html_body: wrap(&encode_minimal(&title), &content, "", year),
        text_body: format!("{}\n\n{}", title, text),
    }
}

// (subject, paragraphs) of the confirmation for each communication type
fn confirmation_content(
    communication_type: CommunicationType,
    site: &SiteDetails,
) -> (&'static str, Vec<String>) {
    match communication_type {
        CommunicationType::Newsletter => (
            "Thanks for subscribing to CampusConnect Newsletter",
            vec![
                "You've been successfully added to our newsletter. We'll keep you updated with all the latest events, features, and opportunities at CampusConnect.".into(),
                "If you have any questions or feedback, feel free to reply to this email.".into(),
            ],
        ),
        CommunicationType::CampusAmbassador => (
            "Your Campus Ambassador Application",
            vec![
                "We've received your application to become a Campus Ambassador for CampusConnect.".into(),
                "Our team will review your application shortly. You can expect to hear back from us within 5-7 business days.".into(),
                "If you have any questions in the meantime, feel free to reach out to our support team.".into(),
            ],
        ),
        CommunicationType::EarlyAccess => (
            "Welcome to CampusConnect!",
            vec![
                "Thank you for signing up for early access to CampusConnect!".into(),
                "You've been added to our waitlist, and we'll notify you as soon as we're ready to welcome you to the platform.".into(),
            ],
        ),
        CommunicationType::Contact | CommunicationType::Other => (
            "Thank you for contacting CampusConnect",
            vec![
                "We've received your message and our team will get back to you shortly.".into(),
                format!(
                    "If your inquiry is urgent, please call our support line at {}.",
                    site.support_phone.as_deref().unwrap_or("our support team")
                ),
            ],
        ),
    }
}

pub fn user_confirmation(confirmation: &UserConfirmation, site: &SiteDetails, year: i32) -> Rendered {
    let (subject, paragraphs) = confirmation_content(confirmation.communication_type, site);
    let unsubscribe_url = site.unsubscribe_url(confirmation.email.as_ref());
    let home_url = site.home_url();

    let mut content = format!("    <p>Hello {},</p>\n", encode_minimal(&confirmation.name));
    for paragraph in &paragraphs {
        content.push_str(&format!("    <p>{}</p>\n", encode_minimal(paragraph)));
    }
    content.push_str(&button(&home_url, "Visit CampusConnect"));
    content.push_str("\n    <p>Best regards,<br>The CampusConnect Team</p>");

    let footer = format!(
        "    <p>If you didn't contact us, you can safely ignore this email.</p>\n    <p><a href=\"{}\" style=\"color: #6b7280; text-decoration: underline;\">Unsubscribe</a> from future emails.</p>",
        encode_minimal(&unsubscribe_url)
    );

    let text_body = format!(
        "Hello {},\n\n{}\n\nVisit CampusConnect: {}\n\nBest regards,\nThe CampusConnect Team\n\nUnsubscribe from future emails: {}",
        confirmation.name,
        paragraphs.join("\n\n"),
        home_url,
        unsubscribe_url
    );

    Rendered {
        subject: subject.into(),
        html_body: wrap("Thank You!", &content, &footer, year),
        text_body,
    }
}

/// `List-Unsubscribe` header value for confirmations sent to `email`
pub fn list_unsubscribe(email: &str, site: &SiteDetails) -> String {
    format!(
        "<{}>, <mailto:unsubscribe@{}?subject=Unsubscribe&body={}>",
        site.unsubscribe_url(email),
        site.mail_domain,
        urlencoding::encode(email)
    )
}
