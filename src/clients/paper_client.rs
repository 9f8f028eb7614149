/// 组卷 API 客户端
///
/// 把排版结果提交给后端生成试卷
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const GENERATE_ENDPOINT: &str = "api/paper/generate";

/// 组卷 API 客户端
pub struct PaperClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PaperClient {
    /// 创建新的组卷客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.paper_api_base_url.trim_end_matches('/').to_string(),
            token: config.paper_api_token.clone(),
        }
    }

    /// 提交组卷请求
    ///
    /// # 返回
    /// 返回接口响应 JSON；HTTP 状态码或业务 code 表示失败时返回 `ApiError::BadResponse`
    pub async fn generate_paper<T: Serialize + ?Sized>(&self, payload: &T) -> AppResult<Value> {
        let url = format!("{}/{}", self.base_url, GENERATE_ENDPOINT);

        debug!("提交组卷 Payload: {}", serde_json::to_string(payload)?);

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json, text/plain, */*")
            .header("token", &self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|t| !t.is_empty());
            return Err(ApiError::BadResponse {
                endpoint: url,
                code: Some(u64::from(status.as_u16())),
                message,
            }
            .into());
        }

        let result: Value = response.json().await?;
        debug!("组卷结果: {}", result);

        if result.is_null() {
            return Err(ApiError::EmptyResponse { endpoint: url }.into());
        }
        if !Self::is_success_response(&result) {
            return Err(ApiError::BadResponse {
                endpoint: url,
                code: result.get("code").and_then(|v| v.as_u64()),
                message: result
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            }
            .into());
        }

        Ok(result)
    }

    /// 检查 API 响应是否成功（没有 code 字段或 code 为 0 / 200）
    pub fn is_success_response(result: &Value) -> bool {
        if result.is_null() {
            return false;
        }
        match result.get("code").and_then(|v| v.as_u64()) {
            Some(code) => code == 0 || code == 200,
            None => true,
        }
    }
}
