//! MIME type detection module
//!
//! Returns the Content-Type for a static asset based on its file extension.

/// Get MIME Content-Type based on file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Content-Type for a path such as `favicon.ico`
pub fn content_type_for_path(path: &str) -> &'static str {
    get_content_type(std::path::Path::new(path).extension().and_then(|e| e.to_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_types() {
        assert_eq!(content_type_for_path("favicon.ico"), "image/x-icon");
        assert_eq!(content_type_for_path("favicon.svg"), "image/svg+xml");
        assert_eq!(content_type_for_path("robots.txt"), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type_for_path("noext"), "application/octet-stream");
    }
}
