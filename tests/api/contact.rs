use campusconnect::domain::CommunicationType;

use crate::helpers::{outcome, ContactBody, TestApp, ADMIN_EMAIL};

fn contact(email: &str) -> ContactBody {
    ContactBody {
        name: Some("Ananya".into()),
        email: Some(email.into()),
        subject: Some("Partnership".into()),
        message: Some("We would like to partner with CampusConnect.".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn contact_returns_ok_and_stores_every_message() {
    let app = TestApp::spawn().await;

    for _ in 0..2 {
        let res = app
            .contact(&contact("ananya@college.edu"))
            .await
            .expect("Failed to execute request");

        assert_eq!(
            (200, true, "Message received successfully".to_string()),
            outcome(res).await
        );
    }

    let stored = app.repo.stored();
    assert_eq!(2, stored.len());
    assert_eq!(CommunicationType::Contact, stored[0].communication_type);
    assert_eq!(Some("Partnership".to_string()), stored[0].subject);

    let sent = app.transport.sent();
    assert_eq!(4, sent.len());
    assert_eq!("Thank you for contacting CampusConnect", sent[0].subject);
    assert_eq!(ADMIN_EMAIL, sent[1].to.as_ref());
    assert_eq!("Partnership", sent[1].subject);
}

#[tokio::test]
async fn contact_fills_in_defaults() {
    let app = TestApp::spawn().await;

    let body = ContactBody {
        email: Some("ananya@college.edu".into()),
        message: Some("Hello".into()),
        ..Default::default()
    };
    let res = app.contact(&body).await.expect("Failed to execute request");
    assert_eq!(200, res.status().as_u16());

    let stored = app.repo.stored();
    assert_eq!(Some("Anonymous".to_string()), stored[0].name);
    assert_eq!(Some("No Subject".to_string()), stored[0].subject);

    let sent = app.transport.sent();
    assert!(sent[0].text_body.starts_with("Hello User,"));
    assert_eq!("New Contact Form Submission", sent[1].subject);
}

#[tokio::test]
async fn contact_requires_email() {
    let app = TestApp::spawn().await;

    let body = ContactBody {
        email: None,
        ..contact("ananya@college.edu")
    };
    let res = app.contact(&body).await.expect("Failed to execute request");

    assert_eq!(
        (400, false, "Email is required".to_string()),
        outcome(res).await
    );
}

#[tokio::test]
async fn message_only_required_for_contact_inquiries() {
    let app = TestApp::spawn().await;

    for inquiry_type in [None, Some("contact")] {
        let body = ContactBody {
            message: None,
            inquiry_type: inquiry_type.map(String::from),
            ..contact("ananya@college.edu")
        };
        let res = app.contact(&body).await.expect("Failed to execute request");

        assert_eq!(
            (
                400,
                false,
                "Message is required for contact inquiries".to_string()
            ),
            outcome(res).await
        );
    }

    let body = ContactBody {
        message: None,
        inquiry_type: Some("signup".into()),
        ..contact("ananya@college.edu")
    };
    let res = app.contact(&body).await.expect("Failed to execute request");
    assert_eq!(200, res.status().as_u16());
    assert_eq!(Some(String::new()), app.repo.stored()[0].message);
}

#[tokio::test]
async fn inquiry_type_selects_communication_type() {
    let app = TestApp::spawn().await;

    let cases = [
        ("newsletter", CommunicationType::Newsletter),
        ("ambassador", CommunicationType::CampusAmbassador),
        ("campus_ambassador", CommunicationType::CampusAmbassador),
        ("signup", CommunicationType::EarlyAccess),
        ("early_access", CommunicationType::EarlyAccess),
        ("feedback", CommunicationType::Contact),
    ];

    for (inquiry_type, _) in cases {
        let body = ContactBody {
            inquiry_type: Some(inquiry_type.into()),
            ..contact("ananya@college.edu")
        };
        let res = app.contact(&body).await.expect("Failed to execute request");
        assert_eq!(200, res.status().as_u16(), "{} was rejected", inquiry_type);
    }

    let stored: Vec<_> = app
        .repo
        .stored()
        .into_iter()
        .map(|c| c.communication_type)
        .collect();
    let expected: Vec<_> = cases.iter().map(|(_, t)| *t).collect();
    assert_eq!(expected, stored);
}

#[tokio::test]
async fn contact_rejects_invalid_email() {
    let app = TestApp::spawn().await;

    let res = app
        .contact(&contact("ananya.college.edu"))
        .await
        .expect("Failed to execute request");

    assert_eq!(
        (400, false, "Invalid email format".to_string()),
        outcome(res).await
    );
    assert!(app.repo.stored().is_empty());
}

#[tokio::test]
async fn null_inquiry_type_does_not_require_message() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::POST, "api/email")
        .json(&serde_json::json!({
            "email": "ananya@college.edu",
            "inquiryType": null,
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        (200, true, "Message received successfully".to_string()),
        outcome(res).await
    );
    let stored = app.repo.stored();
    assert_eq!(CommunicationType::Contact, stored[0].communication_type);
    assert_eq!(Some(String::new()), stored[0].message);
}
