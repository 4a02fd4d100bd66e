//! Download script building and rendering

use std::collections::HashSet;

use clap::ValueEnum;

use crate::models::DownloadTarget;

/// 下载脚本类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptDialect {
    /// POSIX shell 脚本
    Shell,
    /// Windows 批处理
    Batch,
    /// PowerShell 脚本
    Powershell,
    /// 不生成脚本
    None,
}

/// 脚本中使用的下载命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DownloaderCommand {
    Curl,
    WebRequest,
}

impl DownloaderCommand {
    fn default_args(&self) -> &'static str {
        match self {
            DownloaderCommand::Curl => "-fL",
            DownloaderCommand::WebRequest => "-UseBasicParsing",
        }
    }
}

/// 下载命令及其参数配置，同一脚本内弹幕与封面共用
#[derive(Debug, Clone)]
pub struct Downloader {
    pub command: DownloaderCommand,
    pub custom_args: String,
    pub args_override: Option<String>,
}

impl Downloader {
    pub fn new(
        command: DownloaderCommand,
        custom_args: String,
        args_override: Option<String>,
    ) -> Self {
        Self {
            command,
            custom_args,
            args_override,
        }
    }

    /// 实际使用的参数：override 完全替换默认参数，custom_args 追加在默认参数之后
    fn flags(&self) -> String {
        if let Some(full) = &self.args_override {
            return full.clone();
        }
        let default = self.command.default_args();
        if self.custom_args.is_empty() {
            default.to_string()
        } else {
            format!("{} {}", default, self.custom_args)
        }
    }

    fn download_line(&self, uri: &str, output: &str, compressed: bool) -> String {
        let flags = self.flags();
        let mut parts: Vec<String> = Vec::new();
        match self.command {
            DownloaderCommand::Curl => {
                parts.push("curl".to_string());
                if !flags.is_empty() {
                    parts.push(flags);
                }
                if compressed {
                    parts.push("--compressed".to_string());
                }
                parts.push(format!("-o \"{}\"", output));
                parts.push(format!("\"{}\"", uri));
            }
            DownloaderCommand::WebRequest => {
                parts.push("Invoke-WebRequest".to_string());
                if !flags.is_empty() {
                    parts.push(flags);
                }
                parts.push(format!("-Uri \"{}\"", uri));
                parts.push(format!("-OutFile \"{}\"", output));
            }
        }
        parts.join(" ")
    }
}

/// 按剧集顺序累积下载目标并渲染为完整脚本
pub struct ScriptBuilder {
    dialect: ScriptDialect,
    downloader: Downloader,
    danmu: Vec<DownloadTarget>,
    covers: Vec<DownloadTarget>,
    seen_covers: HashSet<String>,
}

impl ScriptBuilder {
    pub fn new(dialect: ScriptDialect, downloader: Downloader) -> Self {
        Self {
            dialect,
            downloader,
            danmu: Vec::new(),
            covers: Vec::new(),
            seen_covers: HashSet::new(),
        }
    }

    pub fn add_danmu(&mut self, target: DownloadTarget) {
        self.danmu.push(target);
    }

    /// 按原始 uri 去重，保留首次出现顺序
    pub fn add_cover(&mut self, target: DownloadTarget) {
        if self.seen_covers.insert(target.uri.clone()) {
            self.covers.push(target);
        }
    }

    pub fn file_extension(&self) -> Option<&'static str> {
        match self.dialect {
            ScriptDialect::Shell => Some("sh"),
            ScriptDialect::Batch => Some("bat"),
            ScriptDialect::Powershell => Some("ps1"),
            ScriptDialect::None => None,
        }
    }

    pub fn render(&self) -> Option<String> {
        if self.dialect == ScriptDialect::None {
            return None;
        }

        let mut statements: Vec<String> = Vec::new();
        for (i, target) in self.danmu.iter().enumerate() {
            statements.push(self.downloader.download_line(
                &target.uri,
                &format!("{:05}.xml", i + 1),
                target.compressed,
            ));
        }
        // 封面 uri 不带协议，输出时补全 https:，且不使用压缩传输
        for (i, target) in self.covers.iter().enumerate() {
            statements.push(self.downloader.download_line(
                &format!("https:{}", target.uri),
                &format!("cover-{}.jpg", i + 1),
                false,
            ));
        }

        let script = match self.dialect {
            ScriptDialect::Shell => {
                let mut lines = vec!["#!/bin/sh".to_string(), "set -e".to_string()];
                lines.extend(statements);
                format!("{}\n", lines.join("\n"))
            }
            ScriptDialect::Batch => {
                // 批处理合并为单行语句，CRLF 换行
                let mut out = String::from("@echo off\r\n");
                if !statements.is_empty() {
                    out.push_str(&statements.join(" && "));
                    out.push_str("\r\n");
                }
                out
            }
            ScriptDialect::Powershell => {
                let mut lines = vec!["$ErrorActionPreference = \"Stop\"".to_string()];
                lines.extend(statements);
                format!("{}\r\n", lines.join("\r\n"))
            }
            ScriptDialect::None => unreachable!(),
        };
        Some(script)
    }
}
