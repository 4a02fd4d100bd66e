use clap::Parser;
use log::{debug, error, info, warn};

use ov_danmuget::api::client::ApiClient;
use ov_danmuget::api::endpoints;
use ov_danmuget::cache;
use ov_danmuget::config::{AppConfig, Cli};
use ov_danmuget::error::{DanmugetError, Result};
use ov_danmuget::process;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    if cli.quiet {
        // 如果是安静模式，只显示错误
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .try_init();
    } else {
        // 根据详细程度设置日志级别
        let level = match cli.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format(|buf, record| {
                use std::io::Write;
                writeln!(
                    buf,
                    "[{} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .try_init();
    }

    let config = AppConfig::new(cli);
    config.validate().map_err(|e| {
        error!("{}", e);
        e
    })?;
    debug!("配置已加载: {:?}", config);

    let raw = if config.no_cache {
        info!("忽略缓存，下载描述数据");
        fetch(&config).await?
    } else {
        match cache::try_read().await? {
            Some(doc) => {
                info!("使用缓存的描述数据");
                doc
            }
            None => {
                if config.skip_url {
                    error!("未找到 cache.json");
                    return Err(DanmugetError::FetchError("cache.json 不存在".to_string()));
                }
                info!("下载描述数据");
                let doc = fetch(&config).await?;
                cache::write(&doc).await?;
                doc
            }
        }
    };

    process::process_descriptor(&raw, &config).await?;

    if std::env::var_os("TMUX").is_none() && std::env::var_os("STY").is_none() {
        warn!("当前似乎不在 tmux 或 screen 会话中!");
    }

    Ok(())
}

async fn fetch(config: &AppConfig) -> Result<serde_json::Value> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| DanmugetError::ConfigError("未提供 URL".to_string()))?;
    let client = ApiClient::new();
    endpoints::fetch_descriptor(&client, url).await.map_err(|e| {
        error!("下载描述数据失败: {}", e);
        e
    })
}
