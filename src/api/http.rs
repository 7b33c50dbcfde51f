use anyhow::Result;
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::api::MailApi;
use crate::domain::email::{
    ComposeDraft, Credentials, EmailDetail, EmailId, EmailSummary, Folder, FolderListing,
    UserEntry,
};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Blocking client for the webmail REST API. The session cookie the backend
/// hands out on login lives in the client's cookie jar.
pub struct HttpApi {
    base: Url,
    client: Client,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { base, client })
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad url {path}: {e}")))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        debug!("GET {url}");
        let resp = check(self.client.get(url).send()?)?;
        Ok(resp.json()?)
    }

    fn post(&self, path: &str, body: Option<&impl serde::Serialize>) -> ApiResult<()> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let req = self.client.post(url);
        let req = match body {
            Some(b) => req.json(b),
            None => req,
        };
        check(req.send()?)?;
        Ok(())
    }
}

fn check(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.json::<ErrorBody>().ok().and_then(|b| b.error);
    debug!("request failed with {status}: {message:?}");
    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized(message))
    } else {
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl MailApi for HttpApi {
    fn login(&self, creds: &Credentials) -> ApiResult<()> {
        self.post("api/login", Some(creds))
    }

    fn register(&self, creds: &Credentials) -> ApiResult<()> {
        self.post("api/register", Some(creds))
    }

    fn logout(&self) -> ApiResult<()> {
        self.post("api/logout", None::<&()>)
    }

    fn list_folder(&self, folder: Folder) -> ApiResult<Vec<EmailSummary>> {
        let listing: FolderListing = self.get(folder.endpoint())?;
        Ok(listing.emails)
    }

    fn get_email(&self, id: EmailId) -> ApiResult<EmailDetail> {
        self.get(&format!("api/email/{id}"))
    }

    fn send_email(&self, draft: &ComposeDraft) -> ApiResult<()> {
        self.post("api/send_email", Some(draft))
    }

    fn list_users(&self) -> ApiResult<Vec<String>> {
        let users: Vec<UserEntry> = self.get("api/users")?;
        Ok(users.into_iter().filter_map(|u| u.email).collect())
    }
}
