//! XML descriptor rendering

use std::time::{SystemTime, UNIX_EPOCH};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::models::{Anime, Episode, SkipRange, Statistics};

pub const DESC_XMLNS: &str = "nyanpasu:descriptor";

pub fn render(anime: &Anime) -> Result<String> {
    let export_time = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(t) => t.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    };
    render_at(anime, export_time)
}

/// 以给定的导出时间戳渲染，其余与 [`render`] 一致
pub fn render_at(anime: &Anime, export_time: u64) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut root = BytesStart::new("xml");
    root.push_attribute(("xmlns", DESC_XMLNS));
    writer.write_event(Event::Start(root))?;
    write_anime(&mut writer, anime, export_time)?;
    writer.write_event(Event::End(BytesEnd::new("xml")))?;

    Ok(String::from_utf8(writer.into_inner()).expect("xml output is utf-8"))
}

fn write_anime(w: &mut Writer<Vec<u8>>, anime: &Anime, export_time: u64) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("anime")))?;

    text_element(w, "title", Some(&anime.title))?;
    text_element(w, "seasonId", Some(&anime.season_id.to_string()))?;
    text_element(w, "mediaId", Some(&anime.media_id.to_string()))?;
    text_element(w, "alias", anime.alias.as_deref())?;

    write_statistics(w, &anime.stat)?;

    w.write_event(Event::Start(BytesStart::new("episodes")))?;
    for episode in &anime.episodes {
        write_episode(w, episode)?;
    }
    w.write_event(Event::End(BytesEnd::new("episodes")))?;

    text_element(w, "exportTime", Some(&export_time.to_string()))?;

    w.write_event(Event::End(BytesEnd::new("anime")))?;
    Ok(())
}

fn write_statistics(w: &mut Writer<Vec<u8>>, stat: &Statistics) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("statistics")))?;

    text_element(w, "coins", Some(&stat.coins.to_string()))?;
    text_element(w, "danmakus", Some(&stat.danmakus.to_string()))?;
    text_element(w, "favorite", Some(&stat.favorite.to_string()))?;
    text_element(w, "favorites", Some(&stat.favorites.to_string()))?;
    text_element(w, "likes", Some(&stat.likes.to_string()))?;
    text_element(w, "reply", Some(&stat.reply.to_string()))?;
    text_element(w, "share", Some(&stat.share.to_string()))?;
    text_element(w, "views", Some(&stat.views.to_string()))?;

    // rating 的分数作为文本，评分人数作为 count 属性
    let mut rating = BytesStart::new("rating");
    rating.push_attribute(("count", stat.rating.count.to_string().as_str()));
    w.write_event(Event::Start(rating))?;
    w.write_event(Event::Text(BytesText::new(&stat.rating.score.to_string())))?;
    w.write_event(Event::End(BytesEnd::new("rating")))?;

    w.write_event(Event::End(BytesEnd::new("statistics")))?;
    Ok(())
}

fn write_episode(w: &mut Writer<Vec<u8>>, episode: &Episode) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("episode")))?;

    text_element(w, "index", Some(&episode.index.to_string()))?;
    text_element(w, "title", Some(&episode.title))?;
    text_element(w, "displayTitle", Some(&episode.display_title))?;
    text_element(w, "cid", Some(&episode.cid.to_string()))?;
    text_element(w, "bvid", Some(&episode.bvid))?;
    text_element(w, "aid", Some(&episode.aid.to_string()))?;
    text_element(w, "duration", Some(&episode.duration.to_string()))?;
    text_element(w, "publishTime", Some(&episode.pub_time.to_string()))?;
    text_element(w, "link", Some(&episode.link))?;
    text_element(w, "releaseDate", Some(&episode.release_date.to_string()))?;

    // skip 节点仅在来源数据带有跳过区间时生成
    if let Some(skip) = &episode.skip {
        w.write_event(Event::Start(BytesStart::new("skip")))?;
        skip_section(w, "op", skip.op.as_ref())?;
        skip_section(w, "ed", skip.ed.as_ref())?;
        w.write_event(Event::End(BytesEnd::new("skip")))?;
    }

    w.write_event(Event::End(BytesEnd::new("episode")))?;
    Ok(())
}

fn skip_section(w: &mut Writer<Vec<u8>>, tag: &str, range: Option<&SkipRange>) -> Result<()> {
    if let Some(range) = range {
        let mut section = BytesStart::new(tag);
        section.push_attribute(("start", range.start.to_string().as_str()));
        section.push_attribute(("end", range.end.to_string().as_str()));
        w.write_event(Event::Empty(section))?;
    }
    Ok(())
}

/// 有值时生成单行文本元素，无值时生成空元素 (标签保留)
fn text_element(w: &mut Writer<Vec<u8>>, tag: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            w.write_event(Event::Start(BytesStart::new(tag)))?;
            w.write_event(Event::Text(BytesText::new(value)))?;
            w.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        None => {
            w.write_event(Event::Empty(BytesStart::new(tag)))?;
        }
    }
    Ok(())
}
