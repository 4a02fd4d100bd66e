//! Pipeline orchestration: parse, render and write all artifacts

use std::path::Path;

use log::info;
use serde_json::Value;

use crate::config::AppConfig;
use crate::descriptor;
use crate::error::Result;
use crate::models::DownloadTarget;
use crate::script::ScriptBuilder;
use crate::xml;

/// 在当前目录生成 descriptor.xml、下载脚本与 vlist.txt
pub async fn process_descriptor(raw: &Value, config: &AppConfig) -> Result<()> {
    run_in(raw, config, Path::new(".")).await
}

async fn run_in(raw: &Value, config: &AppConfig, dir: &Path) -> Result<()> {
    let anime = descriptor::parse(raw, config.include_trailers, config.min_duration)?;
    info!("标题: {}", anime.title);
    info!("共 {} 集", anime.episodes.len());
    for episode in &anime.episodes {
        info!(" * 第 {} 集: {}", episode.index, episode.title);
    }

    let xml = xml::render(&anime)?;

    let mut builder = ScriptBuilder::new(config.script, config.downloader.clone());
    let mut links = Vec::with_capacity(anime.episodes.len());
    for episode in &anime.episodes {
        builder.add_danmu(config.danmu_source.convert(episode.cid));
        builder.add_cover(DownloadTarget {
            uri: episode.cover.clone(),
            compressed: false,
        });
        links.push(episode.link.clone());
    }

    info!("命令提示: yt-dlp -a vlist.txt -o \"%(autonumber)s.%(ext)s\" -f mp4");

    let script = builder.render();
    let script_path = builder
        .file_extension()
        .map(|ext| dir.join(format!("download-danmu.{}", ext)));

    // 三个输出文件相互独立，并发写入，任一失败即整体失败，已写入的文件不回滚
    let write_script = async {
        match (&script, &script_path) {
            (Some(text), Some(path)) => tokio::fs::write(path, text).await,
            _ => Ok(()),
        }
    };
    futures::try_join!(
        tokio::fs::write(dir.join("descriptor.xml"), xml.as_bytes()),
        tokio::fs::write(dir.join("vlist.txt"), links.join("\n")),
        write_script,
    )?;

    #[cfg(unix)]
    {
        if let (Some(_), Some(path)) = (&script, &script_path) {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danmu::DanmuSource;
    use crate::script::{Downloader, DownloaderCommand, ScriptDialect};
    use serde_json::json;

    fn test_config(min_duration: u64, script: ScriptDialect) -> AppConfig {
        AppConfig {
            url: None,
            no_cache: false,
            skip_url: true,
            include_trailers: false,
            min_duration,
            danmu_source: DanmuSource::Comment,
            script,
            downloader: Downloader::new(DownloaderCommand::Curl, String::new(), None),
        }
    }

    fn source_doc(episodes: Vec<Value>) -> Value {
        json!({
            "props": { "pageProps": { "dehydratedState": { "queries": [ { "state": { "data": {
                "seasonInfo": { "mediaInfo": {
                    "title": "测试番剧",
                    "alias": "Test Anime",
                    "season_id": 114,
                    "media_id": 514,
                    "stat": {
                        "coins": 1, "danmakus": 2, "favorite": 3, "favorites": 4,
                        "likes": 5, "reply": 6, "share": 7, "views": 8
                    },
                    "rating": { "score": 9.5, "count": 10 },
                    "episodes": episodes
                } }
            } } } ] } } }
        })
    }

    fn episode(cid: i64, duration: i64) -> Value {
        json!({
            "aid": cid * 10,
            "bvid": format!("BV1xx41{}", cid),
            "cid": cid,
            "duration": duration,
            "cover": format!("//i0.hdslb.com/bfs/archive/{}.jpg", cid),
            "link": format!("https://www.bilibili.com/bangumi/play/ep{}", cid),
            "pub_time": 1609430400,
            "release_date": "2021-01-01",
            "long_title": format!("标题{}", cid),
            "playerEpTitle": format!("第{}话", cid),
        })
    }

    #[tokio::test]
    async fn test_end_to_end_single_episode() {
        let dir = tempfile::TempDir::new().unwrap();
        let doc = source_doc(vec![episode(1176840, 200_000)]);
        run_in(&doc, &test_config(0, ScriptDialect::Shell), dir.path())
            .await
            .unwrap();

        let script = std::fs::read_to_string(dir.path().join("download-danmu.sh")).unwrap();
        let curl_lines: Vec<&str> = script
            .lines()
            .filter(|line| line.starts_with("curl") && line.contains(".xml"))
            .collect();
        assert_eq!(curl_lines.len(), 1);
        assert!(curl_lines[0].contains("--compressed"));
        assert!(curl_lines[0].contains("https://comment.bilibili.com/1176840.xml"));
        assert!(curl_lines[0].contains("-o \"00001.xml\""));

        let vlist = std::fs::read_to_string(dir.path().join("vlist.txt")).unwrap();
        assert_eq!(vlist, "https://www.bilibili.com/bangumi/play/ep1176840");

        let xml = std::fs::read_to_string(dir.path().join("descriptor.xml")).unwrap();
        assert_eq!(xml.matches("<episode>").count(), 1);
        assert!(xml.contains("<index>1</index>"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir.path().join("download-danmu.sh"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn test_end_to_end_all_filtered() {
        let dir = tempfile::TempDir::new().unwrap();
        let doc = source_doc(vec![episode(1, 30_000)]);
        run_in(&doc, &test_config(60, ScriptDialect::Shell), dir.path())
            .await
            .unwrap();

        let vlist = std::fs::read_to_string(dir.path().join("vlist.txt")).unwrap();
        assert_eq!(vlist, "");

        let script = std::fs::read_to_string(dir.path().join("download-danmu.sh")).unwrap();
        assert!(!script.contains("curl"));

        let xml = std::fs::read_to_string(dir.path().join("descriptor.xml")).unwrap();
        assert_eq!(xml.matches("<episode>").count(), 0);
    }

    #[tokio::test]
    async fn test_no_script_for_none_dialect() {
        let dir = tempfile::TempDir::new().unwrap();
        let doc = source_doc(vec![episode(1, 200_000)]);
        run_in(&doc, &test_config(0, ScriptDialect::None), dir.path())
            .await
            .unwrap();

        assert!(dir.path().join("descriptor.xml").exists());
        assert!(dir.path().join("vlist.txt").exists());
        for ext in ["sh", "bat", "ps1"] {
            assert!(!dir.path().join(format!("download-danmu.{}", ext)).exists());
        }
    }

    #[tokio::test]
    async fn test_shared_cover_downloaded_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut first = episode(1, 200_000);
        let mut second = episode(2, 200_000);
        first["cover"] = json!("//i0.hdslb.com/bfs/archive/shared.jpg");
        second["cover"] = json!("//i0.hdslb.com/bfs/archive/shared.jpg");
        let doc = source_doc(vec![first, second]);
        run_in(&doc, &test_config(0, ScriptDialect::Shell), dir.path())
            .await
            .unwrap();

        let script = std::fs::read_to_string(dir.path().join("download-danmu.sh")).unwrap();
        assert_eq!(script.matches("shared.jpg").count(), 1);
        assert_eq!(script.matches("cover-").count(), 1);
    }
}
