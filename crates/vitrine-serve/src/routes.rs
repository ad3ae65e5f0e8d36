//! The two file routes: allow-listed inline pages and markdown files.

use std::path::{Component, Path, PathBuf};

use crate::config::ServeConfig;
use crate::error::{Result, ServeError};
use crate::http::{Request, Response};

pub const INLINE_PREFIX: &str = "/inline/";
pub const MARKDOWN_PATH: &str = "/markdown";

/// Dispatch a request to its route.
pub async fn route(config: &ServeConfig, request: &Request) -> Result<Response> {
    if request.method != "GET" {
        return Err(ServeError::MethodNotAllowed(request.method.clone()));
    }

    if let Some(name) = request.path.strip_prefix(INLINE_PREFIX) {
        let page = inline_page(config, name).await?;
        return Ok(Response::html(page));
    }

    if request.path == MARKDOWN_PATH {
        let name = request
            .query_param("file")?
            .ok_or_else(|| ServeError::BadRequest("missing file parameter".into()))?;
        let path = resolve_markdown(&config.markdown_dir, &name).await?;
        let file = tokio::fs::File::open(&path).await?;
        let len = file.metadata().await?.len();
        tracing::debug!(path = %path.display(), len, "streaming markdown");
        return Ok(Response::markdown(file, len, config.chunk_size));
    }

    Err(ServeError::NotFound(request.path.clone()))
}

/// Build an allow-listed page with its stylesheet and script inlined.
pub async fn inline_page(config: &ServeConfig, name: &str) -> Result<String> {
    if !config.is_inline_page(name) {
        return Err(ServeError::NotFound(format!("{INLINE_PREFIX}{name}")));
    }

    let html_path = config.inline_root.join(name);
    let html = read_page_part(&html_path).await?;
    let css = read_page_part(&html_path.with_extension("css")).await?;
    let js = read_page_part(&html_path.with_extension("js")).await?;

    Ok(inline_assets(&html, &css, &js))
}

async fn read_page_part(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ServeError::NotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Insert `css` before `</head>` and `js` before `</body>`, appending
/// either one when its marker is missing.
pub fn inline_assets(html: &str, css: &str, js: &str) -> String {
    let style = format!("<style>\n{css}\n</style>\n");
    let script = format!("<script>\n{js}\n</script>\n");

    let mut page = insert_before(html, "</head>", &style);
    page = insert_before(&page, "</body>", &script);
    page
}

fn insert_before(html: &str, marker: &str, fragment: &str) -> String {
    // Tags are ASCII so lowercasing keeps byte offsets intact
    match html.to_ascii_lowercase().rfind(marker) {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + fragment.len());
            out.push_str(&html[..at]);
            out.push_str(fragment);
            out.push_str(&html[at..]);
            out
        }
        None => format!("{html}{fragment}"),
    }
}

/// Check a requested markdown name without touching the filesystem.
pub fn check_markdown_name(name: &str) -> Result<&Path> {
    if name.is_empty() {
        return Err(ServeError::BadRequest("empty file name".into()));
    }
    if name.contains('\0') {
        return Err(ServeError::BadRequest("file name contains NUL".into()));
    }
    if name.contains('\\') {
        return Err(ServeError::Forbidden(format!("{name}: backslashes are not allowed")));
    }

    let path = Path::new(name);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ServeError::Forbidden(format!("{name}: parent directory")))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ServeError::Forbidden(format!("{name}: absolute path")))
            }
        }
    }

    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false);
    if !is_markdown {
        return Err(ServeError::Forbidden(format!("{name}: not a markdown file")));
    }

    Ok(path)
}

/// Resolve a markdown name to a canonical path inside `dir`.
pub async fn resolve_markdown(dir: &Path, name: &str) -> Result<PathBuf> {
    let relative = check_markdown_name(name)?;

    let root = tokio::fs::canonicalize(dir).await?;
    let resolved = match tokio::fs::canonicalize(root.join(relative)).await {
        Ok(path) => path,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServeError::NotFound(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    // Symlinks may still point outside the directory
    if !resolved.starts_with(&root) {
        tracing::warn!(name, resolved = %resolved.display(), "markdown path escapes its directory");
        return Err(ServeError::Forbidden(format!("{name}: outside markdown directory")));
    }
    if !resolved.is_file() {
        return Err(ServeError::NotFound(name.to_string()));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_assets_before_markers() {
        let html = "<html><head><title>t</title></head><body><p>hi</p></body></html>";
        let page = inline_assets(html, "p { color: red; }", "console.log(1);");
        assert_eq!(
            page,
            "<html><head><title>t</title><style>\np { color: red; }\n</style>\n</head>\
             <body><p>hi</p><script>\nconsole.log(1);\n</script>\n</body></html>"
        );
    }

    #[test]
    fn test_inline_assets_uppercase_markers() {
        let page = inline_assets("<HEAD></HEAD><BODY></BODY>", "a", "b");
        assert_eq!(
            page,
            "<HEAD><style>\na\n</style>\n</HEAD><BODY><script>\nb\n</script>\n</BODY>"
        );
    }

    #[test]
    fn test_inline_assets_without_markers_appends() {
        let page = inline_assets("<p>fragment</p>", "a", "b");
        assert_eq!(
            page,
            "<p>fragment</p><style>\na\n</style>\n<script>\nb\n</script>\n"
        );
    }

    #[test]
    fn test_markdown_name_checks() {
        assert!(check_markdown_name("guide.md").is_ok());
        assert!(check_markdown_name("docs/Intro.MARKDOWN").is_ok());
        assert!(check_markdown_name("./notes.Md").is_ok());

        assert!(matches!(check_markdown_name(""), Err(ServeError::BadRequest(_))));
        assert!(matches!(check_markdown_name("a\0.md"), Err(ServeError::BadRequest(_))));
        for name in [
            "../secret.md",
            "docs/../../secret.md",
            "/etc/passwd.md",
            "..\\secret.md",
            "notes.txt",
            "README",
            "md",
        ] {
            assert!(
                matches!(check_markdown_name(name), Err(ServeError::Forbidden(_))),
                "{name:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_markdown_inside_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/guide.md"), "# Guide").unwrap();

        let resolved = resolve_markdown(dir.path(), "docs/guide.md").await.unwrap();
        assert!(resolved.ends_with("docs/guide.md"));

        assert!(matches!(
            resolve_markdown(dir.path(), "missing.md").await,
            Err(ServeError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_forbidden() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.md"), "nope").unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.md"), dir.path().join("link.md"))
            .unwrap();

        assert!(matches!(
            resolve_markdown(dir.path(), "link.md").await,
            Err(ServeError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_inline_page_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("grid.html"), "<head></head><body></body>").unwrap();
        std::fs::write(dir.path().join("grid.css"), "td {}").unwrap();
        std::fs::write(dir.path().join("grid.js"), "run();").unwrap();
        std::fs::write(dir.path().join("extra.html"), "<p>not listed</p>").unwrap();

        let config = ServeConfig {
            inline_root: dir.path().to_path_buf(),
            ..Default::default()
        };

        let page = inline_page(&config, "grid.html").await.unwrap();
        assert!(page.contains("<style>\ntd {}\n</style>"));
        assert!(page.contains("<script>\nrun();\n</script>"));

        assert!(matches!(
            inline_page(&config, "extra.html").await,
            Err(ServeError::NotFound(_))
        ));
        // Listed but not on disk
        assert!(matches!(
            inline_page(&config, "flow.html").await,
            Err(ServeError::NotFound(_))
        ));
    }
}
