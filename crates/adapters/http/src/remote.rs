//! 远程数据源

use std::time::Duration;

use async_trait::async_trait;
use dify_common::{PagedResult, Pagination, Resource};
use dify_errors::{AppError, AppResult};
use dify_ports::DataSource;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// 分页总数响应头
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// 基于 REST 后端的数据源
#[derive(Clone)]
pub struct RemoteDataSource {
    client: Client,
    base_url: Url,
    token: Option<Secret<String>>,
}

impl RemoteDataSource {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        // 保证以 `/` 结尾，否则 join 会替换掉最后一段 (如 v1)
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            AppError::validation(format!("Invalid API base url {}: {}", base_url, e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: Secret<String>) -> Self {
        self.token = Some(token);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn collection_url(&self, resource: Resource) -> AppResult<Url> {
        self.base_url
            .join(&resource.path())
            .map_err(|e| AppError::internal(format!("Failed to build url: {}", e)))
    }

    pub fn item_url(&self, resource: Resource, id: &str) -> AppResult<Url> {
        let mut url = self.collection_url(resource)?;
        url.path_segments_mut()
            .map_err(|_| AppError::internal("API base url cannot carry a path"))?
            .push(id);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(
                AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            ),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Request failed: {}", e)))
    }
}

#[async_trait]
impl DataSource for RemoteDataSource {
    async fn list(
        &self,
        resource: Resource,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<Value>> {
        let url = self.collection_url(resource)?;
        debug!(%url, page = pagination.page, "Listing remote resource");

        let response = self
            .send(self.client.get(url).query(&[
                ("skip", pagination.offset()),
                ("limit", u64::from(pagination.limit())),
            ]))
            .await?;
        let response = check_status(response).await?;

        let header_total = total_count(response.headers());
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid response body: {}", e)))?;

        let (items, body_total) = split_list_body(body)?;
        let total = header_total
            .or(body_total)
            .unwrap_or(items.len() as u64);
        Ok(PagedResult::new(items, total, pagination))
    }

    async fn get(&self, resource: Resource, id: &str) -> AppResult<Option<Value>> {
        let url = self.item_url(resource, id)?;
        debug!(%url, "Fetching remote resource");

        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        let body = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid response body: {}", e)))?;
        Ok(Some(body))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(detail),
        StatusCode::FORBIDDEN => AppError::forbidden(detail),
        StatusCode::NOT_FOUND => AppError::not_found(detail),
        _ => AppError::external_service(format!("Backend returned {}: {}", status, detail)),
    })
}

/// 读取 `X-Total-Count`，缺失或非法时返回 None
pub fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// 列表响应可能是数组，也可能是 `{items, total}` 包装
fn split_list_body(body: Value) -> AppResult<(Vec<Value>, Option<u64>)> {
    match body {
        Value::Array(items) => Ok((items, None)),
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_u64);
            match map.remove("items") {
                Some(Value::Array(items)) => Ok((items, total)),
                _ => Err(AppError::external_service(
                    "List response has no items array",
                )),
            }
        }
        _ => Err(AppError::external_service("List response is not an array")),
    }
}
