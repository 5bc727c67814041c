//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension. Covers the
//! page itself, its scripts and styles, and the detector's model files
//! (`*-weights_manifest.json` plus extension-less or `.bin` weight shards).

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use skinscan::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("json")), "application/json");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "map" | "json" => "application/json",
        "txt" | "md" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",

        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",

        // Model weight shards and anything unknown
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_assets() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css")), "text/css; charset=utf-8");
        assert_eq!(
            get_content_type(Some("js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_content_type(Some("JS")), "application/javascript; charset=utf-8");
    }

    #[test]
    fn test_model_files() {
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("bin")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }
}
