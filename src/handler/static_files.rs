//! Static asset module
//!
//! The handful of fixed assets are read once at startup and served from memory.

use hyper::body::Bytes;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

use crate::config::StaticConfig;
use crate::http::{self, mime, HttpResponse};
use crate::logger;

/// Files looked up in the static directory, each served at `/<name>`
const ASSET_FILES: [&str; 3] = ["favicon.ico", "favicon.svg", "robots.txt"];

const INDEX_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone)]
pub struct StaticAsset {
    pub data: Bytes,
    pub content_type: &'static str,
}

/// Preloaded assets keyed by request path
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    routes: HashMap<String, StaticAsset>,
}

impl StaticAssets {
    /// Load the index placeholder and every asset file that exists
    pub async fn load(cfg: &StaticConfig) -> Self {
        let mut assets = Self::with_index(&cfg.index_body);
        let dir = Path::new(&cfg.dir);

        for name in ASSET_FILES {
            let file_path = dir.join(name);
            match fs::read(&file_path).await {
                Ok(data) => {
                    assets.insert(&format!("/{name}"), Bytes::from(data), mime::content_type_for_path(name));
                }
                Err(e) => logger::log_warning(&format!(
                    "Static asset {} not loaded ({e}), route disabled",
                    file_path.display()
                )),
            }
        }

        assets
    }

    /// Only the `/` placeholder
    pub fn with_index(body: &str) -> Self {
        let mut assets = Self::default();
        assets.insert("/", Bytes::from(body.to_string()), INDEX_CONTENT_TYPE);
        assets
    }

    pub fn insert(&mut self, path: &str, data: Bytes, content_type: &'static str) {
        self.routes
            .insert(path.to_string(), StaticAsset { data, content_type });
    }

    pub fn get(&self, path: &str) -> Option<&StaticAsset> {
        self.routes.get(path)
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Serve a preloaded asset
pub fn serve_asset(asset: &StaticAsset, is_head: bool) -> HttpResponse {
    http::build_static_response(asset.data.clone(), asset.content_type, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_skips_missing_files() {
        let dir = std::env::temp_dir().join(format!("regexplanet-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("robots.txt"), "User-agent: *\n").unwrap();

        let cfg = StaticConfig {
            dir: dir.to_string_lossy().into_owned(),
            index_body: "running!".to_string(),
        };
        let assets = StaticAssets::load(&cfg).await;

        let robots = assets.get("/robots.txt").unwrap();
        assert_eq!(robots.content_type, "text/plain; charset=utf-8");
        assert_eq!(&robots.data[..], b"User-agent: *\n");
        assert!(assets.get("/favicon.ico").is_none());
        assert_eq!(assets.paths(), vec!["/", "/robots.txt"]);
        assert_eq!(assets.get("/").unwrap().content_type, INDEX_CONTENT_TYPE);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_with_index() {
        let assets = StaticAssets::with_index("running!");
        assert_eq!(assets.paths(), vec!["/"]);
        assert_eq!(&assets.get("/").unwrap().data[..], b"running!");
    }
}
