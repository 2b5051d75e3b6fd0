//! Response helpers shared by every endpoint

use crate::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Status and body handling for backend responses
#[async_trait]
pub(crate) trait ResponseExt {
    /// Turn a non-2xx response into [`ClientError::Status`], keeping the body text
    async fn check_success(self) -> Result<Self>
    where
        Self: Sized;

    /// Read the whole body and decode it as JSON
    async fn read_json<T: DeserializeOwned + Send>(self) -> Result<T>
    where
        Self: Sized;
}

#[async_trait]
impl ResponseExt for Response {
    async fn check_success(self) -> Result<Self> {
        let status = self.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: self
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read response text".to_string()),
            });
        }
        Ok(self)
    }

    async fn read_json<T: DeserializeOwned + Send>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
