use crate::models::{
    ApiResponse, BlockchainResponse, CreateTransactionRequest, FeeQuote, SearchResponse,
    Transaction, TransactionCreatedResponse, TransactionListResponse, VehicleType,
};
use crate::services::TransactionFilter;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin client for the toll API, used by `toll-agent` and dashboards.
#[derive(Debug, Clone)]
pub struct TollApiClient {
    base_url: String,
    http: Client,
}

impl TollApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.http.get(self.url("/transactions")).send().await?;
        let body: TransactionListResponse = Self::parse(response).await?;
        Ok(body.transactions)
    }

    pub async fn submit_payment(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<TransactionCreatedResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/transactions"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn search(&self, filter: &TransactionFilter) -> Result<SearchResponse, ClientError> {
        let response = self
            .http
            .get(self.url("/transactions/search"))
            .query(filter)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn blocks(&self) -> Result<BlockchainResponse, ClientError> {
        let response = self.http.get(self.url("/blocks")).send().await?;
        Self::parse(response).await
    }

    pub async fn quote(
        &self,
        booth_id: &str,
        vehicle_type: VehicleType,
    ) -> Result<FeeQuote, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/booths/{}/quote", booth_id)))
            .query(&[("vehicleType", vehicle_type.as_str())])
            .send()
            .await?;
        let body: ApiResponse<FeeQuote> = Self::parse(response).await?;
        Ok(body.data)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
