//! Outputs and system icon lookup.

use std::path::PathBuf;

/// A display output. The headless backend exposes one synthetic entry.
#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    pub port: String,
    pub description: String,
    pub fps: f32,
}

impl Output {
    pub(crate) fn headless() -> Self {
        Self {
            name: "HEADLESS-1".into(),
            port: "virtual".into(),
            description: "Virtual headless output".into(),
            fps: 60.0,
        }
    }
}

/// Result of an icon lookup.
#[derive(Debug, Clone)]
pub struct IconDescription {
    pub name: String,
    pub exists: bool,
    pub scalable: bool,
}

/// Icon lookup over the theme's on-disk directories.
#[derive(Debug, Clone)]
pub struct SystemIcons {
    theme: String,
    search_paths: Vec<PathBuf>,
}

impl SystemIcons {
    pub fn new(theme: impl Into<String>) -> Self {
        let theme = theme.into();
        let search_paths = vec![
            PathBuf::from("/usr/share/icons").join(&theme),
            PathBuf::from("/usr/share/pixmaps"),
        ];
        Self { theme, search_paths }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn lookup(&self, name: &str) -> IconDescription {
        for dir in &self.search_paths {
            if dir.join(format!("{name}.svg")).is_file() {
                return IconDescription { name: name.into(), exists: true, scalable: true };
            }
            if dir.join(format!("{name}.png")).is_file() {
                return IconDescription { name: name.into(), exists: true, scalable: false };
            }
        }
        IconDescription { name: name.into(), exists: false, scalable: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_icon_reports_not_found() {
        let icons = SystemIcons::new("no-such-theme");
        let desc = icons.lookup("definitely-not-an-icon-name");
        assert!(!desc.exists);
        assert!(!desc.scalable);
    }
}
