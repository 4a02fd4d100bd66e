//! Danmaku download target resolution

use clap::ValueEnum;

use crate::models::DownloadTarget;

/// 弹幕下载源策略，运行时由配置选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DanmuSource {
    /// comment.bilibili.com 历史弹幕归档
    Comment,
    /// api.bilibili.com 实时弹幕接口
    Api,
}

impl DanmuSource {
    pub fn convert(&self, cid: i64) -> DownloadTarget {
        match self {
            DanmuSource::Comment => DownloadTarget {
                uri: format!("https://comment.bilibili.com/{}.xml", cid),
                compressed: true,
            },
            DanmuSource::Api => DownloadTarget {
                uri: format!("https://api.bilibili.com/x/v1/dm/list.so?oid={}", cid),
                compressed: true,
            },
        }
    }
}
