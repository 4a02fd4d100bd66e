//! Local cache for the raw descriptor document

use std::io::ErrorKind;

use serde_json::Value;

use crate::error::Result;

const CACHE_FILE: &str = "cache.json";

/// 读取本地缓存，文件不存在时返回 None
pub async fn try_read() -> Result<Option<Value>> {
    match tokio::fs::read_to_string(CACHE_FILE).await {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn write(doc: &Value) -> Result<()> {
    tokio::fs::write(CACHE_FILE, serde_json::to_string(doc)?).await?;
    Ok(())
}
