//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use docsite::deploy::UserPrompter;

pub const VIEWER_SCRIPT: &str = r#"for (let i = 1; i <= this.totalPages; i++) {
    const paddedNumber = String(i).padStart(2, '0');
    this.images.push({
        filename: `2_CamScanner 06-10-2025 08.32_页面_${paddedNumber}.png`,
        page: i
    });
}
"#;

/// A throwaway site directory with scans and a viewer script.
pub struct SiteFixture {
    temp_dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn with_scan(self, name: &str, width: u32, height: u32) -> Self {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
        })
        .save(self.file(name))
        .expect("write scan");
        self
    }

    pub fn with_transparent_scan(self, name: &str, width: u32, height: u32) -> Self {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
            .save(self.file(name))
            .expect("write scan");
        self
    }

    pub fn with_corrupt_scan(self, name: &str) -> Self {
        std::fs::write(self.file(name), b"\x89PNG\r\n\x1a\ntruncated").expect("write scan");
        self
    }

    pub fn with_script(self) -> Self {
        std::fs::write(self.file("script.js"), VIEWER_SCRIPT).expect("write script");
        self
    }

    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.file("docsite.toml"), toml).expect("write config");
        self
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).expect("read file")
    }
}

/// Answers prompts from a fixed list, in order.
pub struct ScriptedPrompter {
    answers: Mutex<Vec<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|s| s.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserPrompter for ScriptedPrompter {
    async fn prompt_text(&self, message: &str) -> io::Result<String> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}
