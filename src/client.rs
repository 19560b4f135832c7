use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    dto::{
        auth::{BackendToken, LoginRequest, RegisterRequest},
        orders::OrderPatch,
        products::{CreateProductRequest, ProductPatch},
    },
    error::{AppError, AppResult},
    models::{BotSettings, Order, Product, Statistics, User},
};

/// Typed client for the storefront backend's REST API. One method per
/// endpoint, paths relative to `{backend_url}/api`. No retry, no backoff,
/// no explicit timeout; transport defaults apply.
#[derive(Clone)]
pub struct StorefrontClient {
    http: Client,
    base: String,
}

impl StorefrontClient {
    pub fn new(backend_url: &str) -> Self {
        Self {
            http: Client::new(),
            base: format!("{}/api", backend_url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn login(&self, payload: &LoginRequest) -> AppResult<BackendToken> {
        let response = self
            .send(self.http.post(self.url("/auth/login")).json(payload))
            .await?;
        decode(response).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> AppResult<serde_json::Value> {
        let response = self
            .send(self.http.post(self.url("/auth/register")).json(payload))
            .await?;
        decode(response).await
    }

    pub async fn list_users(&self, token: &str) -> AppResult<Vec<User>> {
        let response = self
            .send(self.http.get(self.url("/users/")).bearer_auth(token))
            .await?;
        decode(response).await
    }

    pub async fn get_user(&self, token: &str, id: &str) -> AppResult<User> {
        let response = self
            .send(
                self.http
                    .get(self.url(&format!("/users/{id}")))
                    .bearer_auth(token),
            )
            .await?;
        decode(response).await
    }

    /// Empty-body PATCH; the backend flips `is_blocked`.
    pub async fn toggle_user_block(&self, token: &str, id: &str) -> AppResult<()> {
        self.send(
            self.http
                .patch(self.url(&format!("/users/{id}/block")))
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }

    pub async fn list_orders(&self, token: &str, status: Option<&str>) -> AppResult<Vec<Order>> {
        let mut request = self.http.get(self.url("/orders/")).bearer_auth(token);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        let response = self.send(request).await?;
        decode(response).await
    }

    pub async fn get_order(&self, token: &str, id: &str) -> AppResult<Order> {
        let response = self
            .send(
                self.http
                    .get(self.url(&format!("/orders/{id}")))
                    .bearer_auth(token),
            )
            .await?;
        decode(response).await
    }

    pub async fn update_order(&self, token: &str, id: &str, patch: &OrderPatch) -> AppResult<()> {
        self.send(
            self.http
                .patch(self.url(&format!("/orders/{id}")))
                .bearer_auth(token)
                .json(patch),
        )
        .await?;
        Ok(())
    }

    pub async fn list_products(&self, token: &str) -> AppResult<Vec<Product>> {
        let response = self
            .send(self.http.get(self.url("/products/")).bearer_auth(token))
            .await?;
        decode(response).await
    }

    pub async fn create_product(
        &self,
        token: &str,
        payload: &CreateProductRequest,
    ) -> AppResult<()> {
        self.send(
            self.http
                .post(self.url("/products/"))
                .bearer_auth(token)
                .json(payload),
        )
        .await?;
        Ok(())
    }

    /// Partial update: `ProductPatch` serializes only the provided fields.
    pub async fn update_product(
        &self,
        token: &str,
        id: &str,
        patch: &ProductPatch,
    ) -> AppResult<()> {
        self.send(
            self.http
                .patch(self.url(&format!("/products/{id}")))
                .bearer_auth(token)
                .json(patch),
        )
        .await?;
        Ok(())
    }

    pub async fn get_settings(&self, token: &str) -> AppResult<BotSettings> {
        let response = self
            .send(self.http.get(self.url("/settings/")).bearer_auth(token))
            .await?;
        decode(response).await
    }

    /// Full overwrite of the singleton record; every field is serialized,
    /// nulls included.
    pub async fn put_settings(&self, token: &str, settings: &BotSettings) -> AppResult<()> {
        self.send(
            self.http
                .put(self.url("/settings/"))
                .bearer_auth(token)
                .json(settings),
        )
        .await?;
        Ok(())
    }

    pub async fn get_statistics(&self, token: &str) -> AppResult<Statistics> {
        let response = self
            .send(self.http.get(self.url("/statistics/")).bearer_auth(token))
            .await?;
        decode(response).await
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(upstream_error(response).await)
    }
}

/// Decode a success body. A garbled payload from a reachable backend is an
/// upstream fault, not a transport one.
async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status().as_u16();
    response.json::<T>().await.map_err(|err| {
        if err.is_decode() {
            AppError::Upstream {
                status,
                detail: format!("invalid backend response: {err}"),
            }
        } else {
            AppError::Transport(err)
        }
    })
}

/// Map a non-success backend response onto the error taxonomy. The backend
/// reports failures as `{"detail": ...}` bodies.
async fn upstream_error(response: Response) -> AppError {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("upstream error")
        .to_string();
    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| match body.get("detail") {
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or(fallback);

    match status.as_u16() {
        401 => AppError::Unauthorized(detail),
        403 => AppError::Forbidden,
        404 => AppError::NotFound,
        422 => AppError::Validation(detail),
        code => AppError::Upstream {
            status: code,
            detail,
        },
    }
}
