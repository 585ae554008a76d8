use crate::domain::json::from_str_ci;
use crate::domain::{
    ApiError, BundledConfigSource, CodeApi, CodePair, Credentials, RecipeApi, ValidateCodeReply,
    ValidateCodeRequest,
};
use crate::interface_adapters::protocol::{
    CodePairResponse, ErrorResponse, GenerateCodesRequest, RecipeRequest, TodayCodeResponse,
    ValidateCodeResponse,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const VALIDATE_PATH: &str = "api/code/validate";
const TODAY_PATH: &str = "api/code/today";
const GENERATE_PATH: &str = "api/code/generate";
const RECIPE_PATH: &str = "api/ai/recipe";
const BUNDLED_CONFIG_PATH: &str = "data/wheel-config.json";

// Thin wrapper around reqwest for every recipe-wheel API call. Holds a handle
// onto the shared credentials and attaches the bearer token, when one is set,
// to each request it sends.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiClient {
    /// `base_url` must end with `/` so endpoint paths resolve beneath it.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Transport(format!("invalid endpoint {path}: {err}")))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Sends the request and turns any non-success status into `ApiError::Upstream`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let res = self
            .authorize(builder)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        // Keep upstream status/message/body so callers can report them.
        let body = res.text().await.unwrap_or_else(|err| {
            tracing::debug!(error = %err, "failed to read error response body.");
            String::new()
        });
        let message = from_str_ci::<ErrorResponse>(&body)
            .ok()
            .and_then(|payload| payload.message);
        tracing::debug!(status = status.as_u16(), "API returned an error status.");
        Err(ApiError::Upstream {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            message,
            body,
        })
    }

    async fn read_text(res: Response) -> Result<String, ApiError> {
        res.text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        let body = Self::read_text(res).await?;
        from_str_ci(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl CodeApi for ApiClient {
    async fn validate_code(
        &self,
        req: ValidateCodeRequest,
    ) -> Result<ValidateCodeReply, ApiError> {
        let url = self.endpoint(VALIDATE_PATH)?;
        let res = self.send(self.http.post(url).json(&req)).await?;
        let dto: ValidateCodeResponse = Self::read_json(res).await?;
        Ok(dto.into())
    }

    async fn todays_code(&self) -> Result<String, ApiError> {
        let url = self.endpoint(TODAY_PATH)?;
        let res = self.send(self.http.get(url)).await?;
        let dto: TodayCodeResponse = Self::read_json(res).await?;
        Ok(dto.code.unwrap_or_default())
    }

    async fn generate_codes(
        &self,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<CodePair>, ApiError> {
        let url = self.endpoint(GENERATE_PATH)?;
        let req = GenerateCodesRequest::new(start_date, days);
        let res = self.send(self.http.post(url).json(&req)).await?;
        let pairs: Vec<CodePairResponse> = Self::read_json(res).await?;

        pairs
            .into_iter()
            .map(|pair| {
                let raw_date = pair.date.clone();
                pair.into_pair()
                    .ok_or_else(|| ApiError::Decode(format!("invalid code date {raw_date}")))
            })
            .collect()
    }
}

#[async_trait]
impl RecipeApi for ApiClient {
    async fn request_recipe(&self, name: &str) -> Result<String, ApiError> {
        let url = self.endpoint(RECIPE_PATH)?;
        let res = self
            .send(self.http.post(url).json(&RecipeRequest { name }))
            .await?;
        Self::read_text(res).await
    }
}

#[async_trait]
impl BundledConfigSource for ApiClient {
    async fn fetch_bundled_config(&self) -> Result<String, ApiError> {
        let url = self.endpoint(BUNDLED_CONFIG_PATH)?;
        let res = self.send(self.http.get(url)).await?;
        Self::read_text(res).await
    }
}
