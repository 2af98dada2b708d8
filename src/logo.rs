//! Header logo.
//!
//! The logo is optional decoration. Probing never fails: a missing, unreadable
//! or non-image path simply yields `None` and the header renders without it.

use std::fs::File;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const LOGO_WIDTH_PX: u32 = 120;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg", "gif", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogoAsset {
    pub path: PathBuf,
    pub width_px: u32,
}

impl LogoAsset {
    pub fn probe(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }

        let meta = std::fs::metadata(path).ok()?;
        if !meta.is_file() {
            return None;
        }
        // Must be openable, not merely present.
        File::open(path).ok()?;

        Some(Self {
            path: path.to_path_buf(),
            width_px: LOGO_WIDTH_PX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("quaytwin-logo-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_logo_is_none() {
        let dir = scratch_dir("missing");
        assert_eq!(LogoAsset::probe(dir.join("apm_logo.png")), None);
    }

    #[test]
    fn directory_or_unknown_extension_is_none() {
        let dir = scratch_dir("kinds");
        assert_eq!(LogoAsset::probe(&dir), None);

        let txt = dir.join("notes.txt");
        std::fs::File::create(&txt).unwrap();
        assert_eq!(LogoAsset::probe(&txt), None);
    }

    #[test]
    fn present_logo_is_found() {
        let dir = scratch_dir("present");
        let path = dir.join("apm_logo.PNG");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\x89PNG\r\n\x1a\n").unwrap();

        let logo = LogoAsset::probe(&path).unwrap();
        assert_eq!(logo.path, path);
        assert_eq!(logo.width_px, 120);
    }
}
