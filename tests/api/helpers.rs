use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bson::oid::ObjectId;

use reqwest::{Client, Method, Response};

use serde::Serialize;

use campusconnect::app;
use campusconnect::client::{Email, EmailClient, EmailTransport, SiteDetails};
use campusconnect::domain::{CommunicationType, EmailAddress};
use campusconnect::model::{CommunicationUpdate, NewCommunication};
use campusconnect::repo::{CommunicationRepo, RepoError, RepoResult};
use campusconnect::settings::IntakeSettings;

pub const ADMIN_EMAIL: &str = "admin@crewsity.com";

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbassadorBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub phone: Option<String>,
    pub motivation: Option<String>,
    pub resume_link: Option<String>,
}

impl AmbassadorBody {
    pub fn valid(email: &str) -> Self {
        Self {
            name: Some("Ravi Kumar".into()),
            email: Some(email.into()),
            institution: Some("IIT Delhi".into()),
            year: Some("3rd Year".into()),
            phone: Some("9876543210".into()),
            motivation: Some(
                "I want to grow the student community on my campus and help peers find opportunities."
                    .into(),
            ),
            resume_link: None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_type: Option<String>,
    pub institution: Option<String>,
    pub resume_link: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct NewsletterBody {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Communications repo kept in memory
#[derive(Default)]
pub struct InMemoryRepo {
    pub fail: bool,
    pub stored: Mutex<Vec<NewCommunication>>,
}

impl InMemoryRepo {
    pub fn stored(&self) -> Vec<NewCommunication> {
        self.stored.lock().unwrap().clone()
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail {
            return Err(RepoError::UnexpectedId(bson::Bson::Null));
        }
        Ok(())
    }
}

#[async_trait]
impl CommunicationRepo for InMemoryRepo {
    async fn has_communicated(
        &self,
        email: &EmailAddress,
        communication_type: CommunicationType,
    ) -> RepoResult<bool> {
        self.check()?;
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .any(|c| &c.email == email && c.communication_type == communication_type))
    }

    async fn insert(&self, new_communication: NewCommunication) -> RepoResult<ObjectId> {
        self.check()?;
        self.stored.lock().unwrap().push(new_communication);
        Ok(ObjectId::new())
    }

    async fn update(&self, _id: ObjectId, _update: CommunicationUpdate) -> RepoResult<bool> {
        self.check()?;
        Ok(false)
    }

    async fn add_admin_response(
        &self,
        _id: ObjectId,
        _admin_id: &str,
        _message: &str,
    ) -> RepoResult<bool> {
        self.check()?;
        Ok(false)
    }
}

/// Email transport that records instead of sending
#[derive(Default)]
pub struct RecordingTransport {
    pub fail: bool,
    pub sent: Mutex<Vec<Email>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, email: &Email) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("SMTP server unavailable");
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("<{}@test.crewsity.com>", sent.len()))
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub repo: Arc<InMemoryRepo>,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(
            InMemoryRepo::default(),
            RecordingTransport::default(),
            IntakeSettings::default(),
        )
        .await
    }

    pub async fn spawn_with(
        repo: InMemoryRepo,
        transport: RecordingTransport,
        intake: IntakeSettings,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let repo = Arc::new(repo);
        let transport = Arc::new(transport);

        let email_client = {
            let admin = ADMIN_EMAIL
                .parse()
                .expect("Failed to parse admin email address");
            let site = SiteDetails {
                domain: "crewsity.com".into(),
                mail_domain: "crewsity.com".into(),
                support_phone: None,
            };

            EmailClient::new(transport.clone(), admin, site)
        };

        let server = app::run(listener, repo.clone(), email_client, intake)
            .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            repo,
            transport,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn campus_ambassador(&self, body: &AmbassadorBody) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/campus-ambassador")
            .json(body)
            .send()
            .await
    }

    pub async fn contact(&self, body: &ContactBody) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/email").json(body).send().await
    }

    pub async fn newsletter(&self, body: &NewsletterBody) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/newsletter")
            .json(body)
            .send()
            .await
    }
}

/// Status and `{ success, message }` of a response
pub async fn outcome(res: Response) -> (u16, bool, String) {
    let status = res.status().as_u16();
    let body: serde_json::Value = res.json().await.expect("Response body is not JSON");

    (
        status,
        body["success"].as_bool().expect("Missing success flag"),
        body["message"]
            .as_str()
            .expect("Missing message")
            .to_string(),
    )
}
