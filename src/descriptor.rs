//! Descriptor parsing and episode filtering

use log::{info, warn};
use serde_json::Value;

use crate::error::{DanmugetError, Result};
use crate::models::{Anime, Episode, MediaInfo, Statistics};

/// 页面 __NEXT_DATA__ 中 mediaInfo 节点的路径
const MEDIA_INFO_POINTER: &str =
    "/props/pageProps/dehydratedState/queries/0/state/data/seasonInfo/mediaInfo";

/// 预告片角标文本
const TRAILER_BADGE: &str = "预告";

/// 短剧集提示阈值(毫秒)
const SHORT_EPISODE_MILLIS: i64 = 180_000;

pub fn parse(source: &Value, include_trailers: bool, min_duration_secs: u64) -> Result<Anime> {
    let media_info = source.pointer(MEDIA_INFO_POINTER).ok_or_else(|| {
        DanmugetError::DescriptorError("未在描述数据中找到 mediaInfo 节点".to_string())
    })?;
    let info: MediaInfo = serde_json::from_value(media_info.clone())?;

    let min_duration_millis = min_duration_secs as i64 * 1000;
    let mut episodes = Vec::with_capacity(info.episodes.len());
    for ep in info.episodes {
        // 先判预告角标，再判时长，命中前者不再判后者
        if !include_trailers
            && ep
                .badge
                .as_deref()
                .is_some_and(|badge| badge.contains(TRAILER_BADGE))
        {
            info!("跳过预告片: {}", ep.resolved_title());
            continue;
        }
        if ep.duration < min_duration_millis {
            info!("跳过时长不足的剧集: {}", ep.resolved_title());
            continue;
        }

        episodes.push(Episode {
            index: episodes.len() + 1,
            title: ep.long_title,
            display_title: ep.player_ep_title,
            cid: ep.cid,
            bvid: ep.bvid,
            aid: ep.aid,
            duration: ep.duration,
            cover: ep.cover,
            link: ep.link,
            pub_time: ep.pub_time,
            release_date: ep.release_date,
            skip: ep.skip,
        });
    }

    if min_duration_secs == 0
        && episodes
            .iter()
            .any(|ep| ep.duration < SHORT_EPISODE_MILLIS)
    {
        warn!("存在时长低于 3 分钟的剧集，可使用 --min-duration 过滤 PV/花絮");
    }

    Ok(Anime {
        title: info.title,
        season_id: info.season_id,
        media_id: info.media_id,
        alias: info.alias,
        stat: Statistics {
            coins: info.stat.coins,
            danmakus: info.stat.danmakus,
            favorite: info.stat.favorite,
            favorites: info.stat.favorites,
            likes: info.stat.likes,
            reply: info.stat.reply,
            share: info.stat.share,
            views: info.stat.views,
            rating: info.rating,
        },
        episodes,
    })
}
