use thiserror::Error;

#[derive(Error, Debug)]
pub enum DanmugetError {
    #[error("请求错误: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("抓取错误: {0}")]
    FetchError(String),

    #[error("序列化错误: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("描述数据错误: {0}")]
    DescriptorError(String),

    #[error("XML错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DanmugetError>;
