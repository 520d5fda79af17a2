//! [`Http`] file [`Storage`] implementation.

use common::operations::{By, Delete, Insert};
use derive_more::{Display, Error as StdError, From};
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::agreement,
    infra::storage::{self, File, Key, Storage},
};

/// Configuration of an [`Http`] file [`Storage`] client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the file-hosting service.
    pub base_url: String,

    /// Bearer token to authorize requests with, if required.
    pub token: Option<String>,
}

/// File [`Storage`] client of an external file-hosting service.
///
/// Uploads a file under a [`Key`] and receives back the durable URL the
/// service hosts it under.
#[derive(Clone, Debug)]
pub struct Http {
    /// HTTP client performing the requests.
    client: reqwest::Client,

    /// Configuration of this client.
    config: Config,
}

impl Http {
    /// Creates a new [`Http`] file [`Storage`] client with the provided
    /// [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Returns the endpoint URL for the provided [`Key`].
    fn endpoint(&self, key: &Key) -> String {
        format!("{}/{key}", self.config.base_url.trim_end_matches('/'))
    }

    /// Attaches authorization to the provided request, if configured.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.config.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }
}

/// Successful upload response of the file-hosting service.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Durable URL the uploaded file is hosted under.
    url: String,
}

impl Storage<Insert<File>> for Http {
    type Ok = agreement::Url;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(file): Insert<File>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let File { key, bytes } = file;

        let response = self
            .authorize(self.client.put(self.endpoint(&key)))
            .body(bytes)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> E))
            .map_err(tracerr::map_from)?;

        let UploadResponse { url } = response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))
            .map_err(tracerr::map_from)?;

        agreement::Url::new(url)
            .ok_or_else(|| tracerr::new!(storage::Error::Http(E::BadUrl)))
    }
}

impl Storage<Delete<By<File, Key>>> for Http {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<File, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        use Error as E;

        let key = by.into_inner();

        self.authorize(self.client.delete(self.endpoint(&key)))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> E))
            .map_err(tracerr::map_from)
            .map(drop)
    }
}

/// [`Http`] file storage [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request to the file-hosting service failed.
    #[display("request to the file-hosting service failed: {_0}")]
    Request(reqwest::Error),

    /// File-hosting service returned an unusable URL.
    #[display("file-hosting service returned an unusable URL")]
    BadUrl,
}
