use clap::Parser;
use log::warn;

use crate::danmu::DanmuSource;
use crate::error::{DanmugetError, Result};
use crate::script::{Downloader, DownloaderCommand, ScriptDialect};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 番剧页面 URL (如 https://www.bilibili.com/bangumi/media/md28234679)
    pub url: Option<String>,

    /// 忽略本地 cache.json
    #[arg(long)]
    pub no_cache: bool,

    /// 不下载页面，仅使用缓存
    #[arg(long)]
    pub skip_url: bool,

    /// 保留预告片
    #[arg(long)]
    pub include_trailers: bool,

    /// 过滤时长低于该秒数的剧集 (0 表示不过滤)
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    pub min_duration: u64,

    /// 弹幕下载源
    #[arg(long, value_enum, default_value = "comment")]
    pub danmu_source: DanmuSource,

    /// 下载脚本类型
    #[arg(long, value_enum, default_value = "shell")]
    pub script: ScriptDialect,

    /// 脚本中使用的下载命令
    #[arg(long, value_enum, default_value = "curl")]
    pub downloader: DownloaderCommand,

    /// 追加到下载命令默认参数之后的额外参数
    #[arg(long, value_name = "ARGS", default_value = "")]
    pub downloader_args: String,

    /// 完全替换下载命令默认参数
    #[arg(long, value_name = "ARGS")]
    pub downloader_args_override: Option<String>,

    /// 增加日志详细程度 (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 安静模式，只显示错误
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Debug)]
pub struct AppConfig {
    pub url: Option<String>,
    pub no_cache: bool,
    pub skip_url: bool,
    pub include_trailers: bool,
    pub min_duration: u64,
    pub danmu_source: DanmuSource,
    pub script: ScriptDialect,
    pub downloader: Downloader,
}

impl AppConfig {
    pub fn new(cli: Cli) -> Self {
        if cli.downloader_args_override.is_some() && !cli.downloader_args.is_empty() {
            warn!("已指定 --downloader-args-override，--downloader-args 将被忽略");
        }

        Self {
            url: cli.url,
            no_cache: cli.no_cache,
            skip_url: cli.skip_url,
            include_trailers: cli.include_trailers,
            min_duration: cli.min_duration,
            danmu_source: cli.danmu_source,
            script: cli.script,
            downloader: Downloader::new(
                cli.downloader,
                cli.downloader_args,
                cli.downloader_args_override,
            ),
        }
    }

    /// 在任何 IO 之前检查互斥的配置组合
    pub fn validate(&self) -> Result<()> {
        if self.skip_url && self.no_cache {
            return Err(DanmugetError::ConfigError(
                "--skip-url 与 --no-cache 同时指定，没有可用的数据来源".to_string(),
            ));
        }
        if !self.skip_url && self.url.is_none() {
            return Err(DanmugetError::ConfigError(
                "未提供 URL，如需仅使用缓存请指定 --skip-url".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>, no_cache: bool, skip_url: bool) -> AppConfig {
        AppConfig {
            url: url.map(|u| u.to_string()),
            no_cache,
            skip_url,
            include_trailers: false,
            min_duration: 0,
            danmu_source: DanmuSource::Comment,
            script: ScriptDialect::Shell,
            downloader: Downloader::new(DownloaderCommand::Curl, String::new(), None),
        }
    }

    #[test]
    fn test_skip_url_with_no_cache_conflicts() {
        let err = config(None, true, true).validate().unwrap_err();
        assert!(matches!(err, DanmugetError::ConfigError(_)));
    }

    #[test]
    fn test_url_required_unless_skipped() {
        let err = config(None, false, false).validate().unwrap_err();
        assert!(matches!(err, DanmugetError::ConfigError(_)));
        assert!(config(None, false, true).validate().is_ok());
        assert!(config(Some("https://example.com"), false, false)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
