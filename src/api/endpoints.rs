//! Page fetching and embedded descriptor extraction

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::error::{DanmugetError, Result};

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("invalid NEXT_DATA regex")
});

/// 抓取番剧页面并提取内嵌的 __NEXT_DATA__ JSON
pub async fn fetch_descriptor(client: &ApiClient, url: &str) -> Result<Value> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(DanmugetError::FetchError(format!(
            "HTTP状态码: {}",
            resp.status()
        )));
    }
    let html = resp.text().await?;
    extract_next_data(&html)
}

fn extract_next_data(html: &str) -> Result<Value> {
    let payload = NEXT_DATA_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            DanmugetError::FetchError("页面中未找到 __NEXT_DATA__ 脚本节点".to_string())
        })?;
    Ok(serde_json::from_str(payload.as_str())?)
}
