//! Data models for the application

use std::fmt;

use serde::Deserialize;

/// 番剧描述数据中松散类型的标量 (字符串或数字原样透传)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Anime {
    pub title: String,      // 番剧标题
    pub season_id: Scalar,  // season 标识
    pub media_id: Scalar,   // media 标识
    pub alias: Option<String>, // 别名，可能缺失
    pub stat: Statistics,
    pub episodes: Vec<Episode>, // 过滤后的剧集，index 从 1 开始连续
}

#[derive(Debug, Clone)]
pub struct Statistics {
    pub coins: i64,     // 投币数
    pub danmakus: i64,  // 弹幕数
    pub favorite: i64,  // 收藏数
    pub favorites: i64, // 追番数
    pub likes: i64,     // 获赞数
    pub reply: i64,     // 评论数
    pub share: i64,     // 分享数
    pub views: i64,     // 播放数
    pub rating: Rating,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rating {
    pub score: f64, // 评分
    pub count: i64, // 评分人数
}

#[derive(Debug, Clone)]
pub struct Episode {
    pub index: usize,          // 过滤后的序号，从 1 开始
    pub title: String,         // 剧集标题 (long_title)
    pub display_title: String, // 播放器展示标题
    pub cid: i64,              // 弹幕 cid
    pub bvid: String,          // 稿件 bvid
    pub aid: i64,              // 稿件 avid
    pub duration: i64,         // 时长(毫秒)
    pub cover: String,         // 封面 url (无协议前缀)
    pub link: String,          // 播放页链接
    pub pub_time: Scalar,      // 发布时间，原样透传
    pub release_date: Scalar,  // 上映日期，原样透传
    pub skip: Option<SkipInfo>,
}

/// OP/ED 跳过区间，毫秒偏移
#[derive(Debug, Clone, Deserialize)]
pub struct SkipInfo {
    #[serde(default)]
    pub op: Option<SkipRange>,
    #[serde(default)]
    pub ed: Option<SkipRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkipRange {
    pub start: i64,
    pub end: i64,
}

// 以下为 __NEXT_DATA__ 中 mediaInfo 子树的原始镜像结构

#[derive(Debug, Deserialize)]
pub struct MediaInfo {
    pub title: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub season_id: Scalar,
    pub media_id: Scalar,
    pub stat: SourceStat,
    pub rating: Rating,
    pub episodes: Vec<SourceEpisode>,
}

#[derive(Debug, Deserialize)]
pub struct SourceStat {
    pub coins: i64,
    pub danmakus: i64,
    pub favorite: i64,
    pub favorites: i64,
    pub likes: i64,
    pub reply: i64,
    pub share: i64,
    pub views: i64,
}

#[derive(Debug, Deserialize)]
pub struct SourceEpisode {
    pub aid: i64,
    pub bvid: String,
    pub cid: i64,
    pub duration: i64, // 毫秒
    pub cover: String,
    pub link: String,
    pub pub_time: Scalar,
    pub release_date: Scalar,
    pub long_title: String,
    #[serde(rename = "playerEpTitle")]
    pub player_ep_title: String,
    #[serde(default)]
    pub badge: Option<String>, // 角标文本，预告片等
    #[serde(default)]
    pub skip: Option<SkipInfo>,
}

impl SourceEpisode {
    /// 日志展示用标题：long_title 为空时回退到播放器标题
    pub fn resolved_title(&self) -> &str {
        if self.long_title.is_empty() {
            &self.player_ep_title
        } else {
            &self.long_title
        }
    }
}

/// 一个可下载的资源地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub uri: String,
    pub compressed: bool, // 目标服务是否期望压缩传输
}
