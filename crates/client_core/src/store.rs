//! Remote post collection.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Post, PostId},
    protocol::{NewPost, PostPatch},
};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: Url,
        source: reqwest::Error,
    },
    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: Url,
        status: StatusCode,
    },
    #[error("{method} {url} returned an unreadable body: {source}")]
    Decode {
        method: &'static str,
        url: Url,
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn fetch_post(&self, id: &PostId) -> Result<Post, StoreError>;
    async fn create_post(&self, post: &NewPost) -> Result<Post, StoreError>;
    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, StoreError>;
    async fn delete_post(&self, id: &PostId) -> Result<(), StoreError>;
}

/// JSON-over-HTTP store rooted at a collection URL such as
/// `http://localhost:3000/posts`.
pub struct HttpPostStore {
    http: Client,
    base_url: Url,
}

impl HttpPostStore {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn post_url(&self, id: &PostId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }
}

async fn execute(
    method: &'static str,
    url: &Url,
    request: RequestBuilder,
) -> Result<Response, StoreError> {
    let response = request
        .send()
        .await
        .map_err(|source| StoreError::Transport {
            method,
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Status {
            method,
            url: url.clone(),
            status,
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    method: &'static str,
    url: &Url,
    response: Response,
) -> Result<T, StoreError> {
    response
        .json::<T>()
        .await
        .map_err(|source| StoreError::Decode {
            method,
            url: url.clone(),
            source,
        })
}

#[async_trait]
impl PostStore for HttpPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let url = &self.base_url;
        let res = execute("GET", url, self.http.get(url.clone())).await?;
        decode("GET", url, res).await
    }

    async fn fetch_post(&self, id: &PostId) -> Result<Post, StoreError> {
        let url = self.post_url(id);
        let res = execute("GET", &url, self.http.get(url.clone())).await?;
        decode("GET", &url, res).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        let url = &self.base_url;
        let res = execute("POST", url, self.http.post(url.clone()).json(post)).await?;
        decode("POST", url, res).await
    }

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, StoreError> {
        let url = self.post_url(id);
        let res = execute("PATCH", &url, self.http.patch(url.clone()).json(patch)).await?;
        decode("PATCH", &url, res).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), StoreError> {
        let url = self.post_url(id);
        // Any success status counts; the body is not inspected.
        execute("DELETE", &url, self.http.delete(url.clone())).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
