use anyhow::Context;

const EXPORT_DIR: &str = "export";

pub(crate) fn write_newspaper(path: &std::path::Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

pub(crate) fn export_json(stories: &[crate::Story]) -> anyhow::Result<std::path::PathBuf> {
    export_json_to(std::path::Path::new(EXPORT_DIR), stories)
}

fn export_json_to(
    dir: &std::path::Path,
    stories: &[crate::Story],
) -> anyhow::Result<std::path::PathBuf> {
    let json = serde_json::to_string_pretty(stories)?;
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("stories.json");
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Opens the written page in the default browser, where it can be printed.
pub(crate) fn open_for_printing(path: &std::path::Path) -> anyhow::Result<()> {
    let path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    let url = url::Url::from_file_path(&path)
        .map_err(|()| anyhow::anyhow!("Not an absolute path: {}", path.display()))?;

    webbrowser::open(url.as_str()).with_context(|| format!("Failed to open {url} in a browser"))
}

#[cfg(test)]
mod tests {
    use super::*;

    static COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    fn temp_dir() -> std::path::PathBuf {
        let unique = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "hn_newspaper_test_{}_{unique}",
            std::process::id()
        ))
    }

    #[test]
    fn test_write_newspaper_creates_parent_dirs() {
        let dir = temp_dir();
        let path = dir.join("nested").join("paper.html");

        write_newspaper(&path, "<html></html>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_json() {
        let dir = temp_dir();
        let stories = vec![crate::Story {
            id: 1,
            title: "Hello".to_string(),
            score: 12,
            story_type: "story".to_string(),
            ..Default::default()
        }];

        let path = export_json_to(&dir, &stories).unwrap();

        let exported: Vec<crate::Story> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].title, "Hello");
        assert_eq!(exported[0].score, 12);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"type\": \"story\""));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_for_printing_missing_file() {
        let path = temp_dir().join("does-not-exist.html");

        assert!(open_for_printing(&path).is_err());
    }
}
