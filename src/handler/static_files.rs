//! Static file serving module
//!
//! Serves the page, its scripts and styles, and the detector model files from
//! the public directory.

use crate::config::AssetsConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, CachePolicy};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A file read from the public directory
#[derive(Debug)]
pub struct Asset {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    pub is_index: bool,
}

/// Serve the root page
pub async fn serve_index(ctx: &RequestContext<'_>, assets: &AssetsConfig) -> Response<Full<Bytes>> {
    let path = Path::new(&assets.public_dir).join(&assets.index_file);
    match fs::read(&path).await {
        Ok(content) => build_asset_response(
            ctx,
            &Asset {
                content,
                content_type: mime::get_content_type(Some("html")),
                is_index: true,
            },
        ),
        Err(e) => {
            logger::log_error(&format!(
                "Index page '{}' unavailable: {e}",
                path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Serve any other path from the public directory
pub async fn serve_asset(ctx: &RequestContext<'_>, assets: &AssetsConfig) -> Response<Full<Bytes>> {
    match load_from_directory(&assets.public_dir, ctx.path, &assets.index_file).await {
        Some(asset) => build_asset_response(ctx, &asset),
        None => http::build_404_response(),
    }
}

/// Load a file below `public_dir`, falling back to the index file for directories
pub async fn load_from_directory(public_dir: &str, path: &str, index_file: &str) -> Option<Asset> {
    let relative = sanitize_path(path)?;

    let root = match Path::new(public_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Public directory not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = root.join(&relative);
    let mut is_index = false;
    if file_path.is_dir() {
        file_path = file_path.join(index_file);
        is_index = true;
    }

    // File not found is common (404), no need to log at warning level
    let Ok(canonical) = file_path.canonicalize() else {
        return None;
    };
    // Symlinks may still point outside the root
    if !canonical.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(canonical.extension().and_then(|e| e.to_str()));
    Some(Asset {
        content,
        content_type,
        is_index,
    })
}

/// Turn a URL path into a relative filesystem path
///
/// Returns `None` for `..` segments or anything that is not a plain name.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => relative.push(name),
            (Some(Component::CurDir), None) => {}
            _ => return None,
        }
    }
    Some(relative)
}

/// Build asset response with `ETag` revalidation
fn build_asset_response(ctx: &RequestContext<'_>, asset: &Asset) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&asset.content);
    let policy = CachePolicy::for_asset(asset.is_index);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, policy);
    }

    http::build_cached_response(
        Bytes::from(asset.content.clone()),
        asset.content_type,
        &etag,
        policy,
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    fn public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
        stdfs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        stdfs::create_dir(dir.path().join("models")).unwrap();
        stdfs::write(dir.path().join("models/index.html"), "models").unwrap();
        stdfs::write(
            dir.path().join("models/tiny_face_detector_model-shard1"),
            [0u8, 1, 2],
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/a/b.js"), Some(PathBuf::from("a/b.js")));
        assert_eq!(sanitize_path("/./a//b"), Some(PathBuf::from("a/b")));
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
        assert_eq!(sanitize_path("/../etc/passwd"), None);
        assert_eq!(sanitize_path("/models/../../secret"), None);
    }

    #[tokio::test]
    async fn test_load_file_with_type() {
        let dir = public_dir();
        let root = dir.path().to_str().unwrap();
        let asset = load_from_directory(root, "/app.js", "index.html").await.unwrap();
        assert_eq!(asset.content, b"console.log(1)");
        assert_eq!(asset.content_type, "application/javascript; charset=utf-8");
        assert!(!asset.is_index);

        let shard = load_from_directory(root, "/models/tiny_face_detector_model-shard1", "index.html")
            .await
            .unwrap();
        assert_eq!(shard.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_directory_uses_index() {
        let dir = public_dir();
        let root = dir.path().to_str().unwrap();
        let asset = load_from_directory(root, "/models/", "index.html").await.unwrap();
        assert_eq!(asset.content, b"models");
        assert!(asset.is_index);
    }

    #[tokio::test]
    async fn test_missing_and_traversal() {
        let dir = public_dir();
        let root = dir.path().to_str().unwrap();
        assert!(load_from_directory(root, "/nope.css", "index.html").await.is_none());
        assert!(load_from_directory(root, "/../index.html", "index.html").await.is_none());
        assert!(load_from_directory("/definitely/not/here", "/app.js", "index.html")
            .await
            .is_none());
    }
}
