use fake::faker::internet::en::SafeEmail;
use fake::Fake;

use campusconnect::domain::CommunicationType;
use campusconnect::settings::IntakeSettings;

use crate::helpers::{outcome, InMemoryRepo, NewsletterBody, RecordingTransport, TestApp, ADMIN_EMAIL};

#[tokio::test]
async fn subscribe_returns_ok_then_rejects_duplicate() {
    let app = TestApp::spawn().await;
    let email: String = SafeEmail().fake();
    let body = NewsletterBody {
        email: Some(email.clone()),
        name: None,
    };

    let first = app.newsletter(&body).await.expect("Failed to execute request");
    assert_eq!(
        (200, true, "Subscription successful".to_string()),
        outcome(first).await
    );

    let second = app.newsletter(&body).await.expect("Failed to execute request");
    assert_eq!(
        (
            400,
            false,
            "This email is already subscribed to our newsletter".to_string()
        ),
        outcome(second).await
    );

    let stored = app.repo.stored();
    assert_eq!(1, stored.len());
    assert_eq!(CommunicationType::Newsletter, stored[0].communication_type);
    assert_eq!(Some("Subscriber".to_string()), stored[0].name);
    assert_eq!(
        Some("Newsletter subscription request".to_string()),
        stored[0].message
    );
}

#[tokio::test]
async fn subscribe_emails_user_and_admin() {
    let app = TestApp::spawn().await;

    let body = NewsletterBody {
        email: Some("priya@college.edu".into()),
        name: Some("Priya".into()),
    };
    app.newsletter(&body).await.expect("Failed to execute request");

    let sent = app.transport.sent();
    assert_eq!(2, sent.len());
    assert_eq!(
        "Thanks for subscribing to CampusConnect Newsletter",
        sent[0].subject
    );
    assert!(sent[0].list_unsubscribe.is_some());
    assert_eq!(ADMIN_EMAIL, sent[1].to.as_ref());
    assert_eq!("New Newsletter Subscription", sent[1].subject);
    assert!(sent[1]
        .text_body
        .contains("A new user has subscribed to the newsletter with email: priya@college.edu"));
}

#[tokio::test]
async fn subscribe_is_separate_from_other_communications() {
    let app = TestApp::spawn().await;

    let contact = crate::helpers::ContactBody {
        email: Some("priya@college.edu".into()),
        message: Some("Hi".into()),
        ..Default::default()
    };
    app.contact(&contact).await.expect("Failed to execute request");

    let body = NewsletterBody {
        email: Some("priya@college.edu".into()),
        name: None,
    };
    let res = app.newsletter(&body).await.expect("Failed to execute request");

    assert_eq!(200, res.status().as_u16());
}

#[tokio::test]
async fn subscribe_returns_bad_request_for_invalid_data() {
    let app = TestApp::spawn().await;

    let test_cases = vec![
        ("missing email", None, "Email is required"),
        ("empty email", Some(""), "Email is required"),
        ("malformed email", Some("priya@college"), "Invalid email format"),
    ];

    for (desc, email, message) in test_cases {
        let body = NewsletterBody {
            email: email.map(String::from),
            name: Some("Priya".into()),
        };
        let res = app.newsletter(&body).await.expect("Failed to execute request");

        assert_eq!(
            (400, false, message.to_string()),
            outcome(res).await,
            "API did not fail with 400 when the payload was {}",
            desc
        );
    }
}

#[tokio::test]
async fn unpersisted_subscriptions_are_only_emailed() {
    let app = TestApp::spawn_with(
        InMemoryRepo::default(),
        RecordingTransport::default(),
        IntakeSettings {
            persist_newsletter: false,
            ..Default::default()
        },
    )
    .await;

    let body = NewsletterBody {
        email: Some("priya@college.edu".into()),
        name: None,
    };
    for _ in 0..2 {
        let res = app.newsletter(&body).await.expect("Failed to execute request");
        assert_eq!(200, res.status().as_u16());
    }

    assert!(app.repo.stored().is_empty());
    assert_eq!(4, app.transport.sent().len());
}
