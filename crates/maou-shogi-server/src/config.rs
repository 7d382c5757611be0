//! サーバ設定
//!
//! TOML ファイル（任意）から読み込み、CLI 引数で上書きする。

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// セッション層の設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// 同時に存在できる部屋の上限
    pub max_rooms: usize,
    /// 入室時に指定がない場合の魔王の味方貫通設定
    pub default_friendly_pierce: bool,
    /// 名前未指定のプレイヤーに付ける名前の接頭辞
    pub player_name_prefix: String,
    /// 既定名の乱数シード（未指定なら毎回異なる）
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_rooms: 1024,
            default_friendly_pierce: false,
            player_name_prefix: "Player".to_string(),
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// TOML 文字列から読み込む（省略したキーは既定値）
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// TOML ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
