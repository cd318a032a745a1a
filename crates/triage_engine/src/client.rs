use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::{
    ClassifyRequest, ClassifyResponse, FailureKind, ProcessResponse, ProcessedEmail,
    ServiceConfig, ServiceError,
};

pub const EML_MIME_TYPE: &str = "message/rfc822";

/// The remote parsing/classification service.
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Uploads raw `.eml` bytes and returns the parsed email.
    async fn process_email(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<ProcessedEmail, ServiceError>;

    async fn classify_email(
        &self,
        request: &ClassifyRequest,
    ) -> Result<ClassifyResponse, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEmailService {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl ReqwestEmailService {
    /// No timeout is configured; requests wait for the service to answer.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl EmailService for ReqwestEmailService {
    async fn process_email(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<ProcessedEmail, ServiceError> {
        let part = Part::bytes(contents)
            .file_name(filename.to_string())
            .mime_str(EML_MIME_TYPE)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.process_url())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let payload: ProcessResponse = read_json(response).await?;
        Ok(payload.data)
    }

    async fn classify_email(
        &self,
        request: &ClassifyRequest,
    ) -> Result<ClassifyResponse, ServiceError> {
        let response = self
            .client
            .post(self.config.classify_url())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await
    }
}

/// Any non-2xx status is a failure; the body is ignored in that case.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ServiceError::new(FailureKind::InvalidResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidUrl, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::InvalidResponse, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
