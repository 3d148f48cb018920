use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::imageops::FilterType;
use image::ImageFormat;

pub struct IconSpec {
    pub file_name: &'static str,
    pub size: u32,
}

pub const ICONS: [IconSpec; 6] = [
    IconSpec { file_name: "favicon-16x16.png", size: 16 },
    IconSpec { file_name: "favicon-32x32.png", size: 32 },
    IconSpec { file_name: "apple-touch-icon.png", size: 180 },
    IconSpec { file_name: "mstile-150x150.png", size: 150 },
    IconSpec { file_name: "android-chrome-192x192.png", size: 192 },
    IconSpec { file_name: "android-chrome-512x512.png", size: 512 },
];

pub const MANIFEST_FILE: &str = "site.webmanifest";

/// Renders every icon in [`ICONS`] from `source` into `out_dir`, plus the web
/// manifest. Non-square sources are center-cropped.
pub fn generate_icons(source: &Path, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let img = image::open(source)
        .with_context(|| format!("failed to decode source image {}", source.display()))?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(ICONS.len() + 1);
    for spec in &ICONS {
        let path = out_dir.join(spec.file_name);
        img.resize_to_fill(spec.size, spec.size, FilterType::Lanczos3)
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(file = spec.file_name, size = spec.size, "icon written");
        written.push(path);
    }

    let manifest_path = out_dir.join(MANIFEST_FILE);
    let manifest = serde_json::to_string_pretty(&web_manifest())?;
    fs::write(&manifest_path, manifest)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    written.push(manifest_path);

    Ok(written)
}

fn web_manifest() -> serde_json::Value {
    let icons: Vec<_> = ICONS
        .iter()
        .filter(|spec| spec.file_name.starts_with("android-chrome"))
        .map(|spec| {
            serde_json::json!({
                "src": format!("/{}", spec.file_name),
                "sizes": format!("{0}x{0}", spec.size),
                "type": "image/png",
            })
        })
        .collect();

    serde_json::json!({
        "name": "Café Gringo",
        "short_name": "Gringo",
        "icons": icons,
        "theme_color": "#6f4e37",
        "background_color": "#fdf8f3",
        "display": "standalone",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_generate_icons() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        RgbaImage::from_pixel(64, 40, Rgba([111, 78, 55, 255]))
            .save(&source)
            .unwrap();

        let out = dir.path().join("public");
        let written = generate_icons(&source, &out).unwrap();
        assert_eq!(written.len(), ICONS.len() + 1);

        for spec in &ICONS {
            let (w, h) = image::image_dimensions(out.join(spec.file_name)).unwrap();
            assert_eq!((w, h), (spec.size, spec.size), "{}", spec.file_name);
        }

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(MANIFEST_FILE)).unwrap()).unwrap();
        let icons = manifest["icons"].as_array().unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[1]["sizes"], "512x512");
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = generate_icons(&dir.path().join("nope.png"), dir.path());
        assert!(result.is_err());
    }
}
