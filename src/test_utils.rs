//! Test utilities and fixture builders.
//!
//! Only compiled in test builds.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::discovery::windows::lnk::{
    HAS_ARGUMENTS, HAS_EXP_ICON, HAS_EXP_STRING, HAS_ICON_LOCATION, HAS_LINK_INFO,
    HAS_LINK_TARGET_ID_LIST, HAS_NAME, HAS_RELATIVE_PATH, HAS_WORKING_DIR, IS_UNICODE,
};
use crate::models::Application;

/// Create a mock Application.
pub fn mock_application(name: &str) -> Application {
    let slug = name.to_lowercase().replace(' ', "-");
    Application::new(name, format!("/usr/bin/{}", slug)).with_icon(slug)
}

/// Create a set of mock Applications for testing.
pub fn mock_applications() -> Vec<Application> {
    vec![
        mock_application("Firefox"),
        mock_application("Chrome"),
        mock_application("Code"),
        mock_application("Terminal"),
        mock_application("Files"),
    ]
}

/// Write a desktop entry below `dir`, creating parent directories.
pub fn write_desktop_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Write a solid-color square PNG.
pub fn write_png(dir: &Path, name: &str, size: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(size, size, Rgba([200, 30, 30, 255]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

/// Write a single-image ICO file.
pub fn write_ico(dir: &Path, name: &str, size: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(size, size, Rgba([30, 30, 200, 255]))
        .save_with_format(&path, ImageFormat::Ico)
        .unwrap();
    path
}

const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

/// Builds shell-link bytes field by field.
#[derive(Default)]
pub struct LnkBuilder {
    ansi: bool,
    unicode_link_info: bool,
    icon_index: i32,
    id_list: Option<Vec<u8>>,
    local_base_path: Option<String>,
    common_path_suffix: Option<String>,
    name: Option<String>,
    relative_path: Option<String>,
    working_dir: Option<String>,
    arguments: Option<String>,
    icon_location: Option<String>,
    env_target: Option<String>,
    env_icon: Option<String>,
}

impl LnkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `StringData` as single-byte text.
    pub fn ansi_strings(mut self) -> Self {
        self.ansi = true;
        self
    }

    /// Include the Unicode path fields in `LinkInfo`.
    pub fn unicode_link_info(mut self) -> Self {
        self.unicode_link_info = true;
        self
    }

    pub fn icon_index(mut self, index: i32) -> Self {
        self.icon_index = index;
        self
    }

    pub fn id_list(mut self, items: &[u8]) -> Self {
        self.id_list = Some(items.to_vec());
        self
    }

    pub fn local_base_path(mut self, path: &str) -> Self {
        self.local_base_path = Some(path.to_string());
        self
    }

    pub fn common_path_suffix(mut self, suffix: &str) -> Self {
        self.common_path_suffix = Some(suffix.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn relative_path(mut self, path: &str) -> Self {
        self.relative_path = Some(path.to_string());
        self
    }

    pub fn working_dir(mut self, dir: &str) -> Self {
        self.working_dir = Some(dir.to_string());
        self
    }

    pub fn arguments(mut self, args: &str) -> Self {
        self.arguments = Some(args.to_string());
        self
    }

    pub fn icon_location(mut self, location: &str) -> Self {
        self.icon_location = Some(location.to_string());
        self
    }

    pub fn env_target(mut self, target: &str) -> Self {
        self.env_target = Some(target.to_string());
        self
    }

    pub fn env_icon(mut self, icon: &str) -> Self {
        self.env_icon = Some(icon.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let strings = [
            (HAS_NAME, &self.name),
            (HAS_RELATIVE_PATH, &self.relative_path),
            (HAS_WORKING_DIR, &self.working_dir),
            (HAS_ARGUMENTS, &self.arguments),
            (HAS_ICON_LOCATION, &self.icon_location),
        ];

        let mut flags = if self.ansi { 0 } else { IS_UNICODE };
        if self.id_list.is_some() {
            flags |= HAS_LINK_TARGET_ID_LIST;
        }
        if self.local_base_path.is_some() {
            flags |= HAS_LINK_INFO;
        }
        for (flag, value) in &strings {
            if value.is_some() {
                flags |= flag;
            }
        }
        if self.env_target.is_some() {
            flags |= HAS_EXP_STRING;
        }
        if self.env_icon.is_some() {
            flags |= HAS_EXP_ICON;
        }

        let mut out = vec![0u8; 0x4C];
        out[0..4].copy_from_slice(&0x4Cu32.to_le_bytes());
        out[4..20].copy_from_slice(&LINK_CLSID);
        out[20..24].copy_from_slice(&flags.to_le_bytes());
        out[0x38..0x3C].copy_from_slice(&self.icon_index.to_le_bytes());

        if let Some(items) = &self.id_list {
            out.extend_from_slice(&(items.len() as u16).to_le_bytes());
            out.extend_from_slice(items);
        }

        if let Some(base) = &self.local_base_path {
            out.extend(self.link_info(base));
        }

        for (_, value) in &strings {
            if let Some(value) = value {
                if self.ansi {
                    out.extend_from_slice(&(value.len() as u16).to_le_bytes());
                    out.extend_from_slice(value.as_bytes());
                } else {
                    let units: Vec<u16> = value.encode_utf16().collect();
                    out.extend_from_slice(&(units.len() as u16).to_le_bytes());
                    units.iter().for_each(|u| out.extend_from_slice(&u.to_le_bytes()));
                }
            }
        }

        if let Some(target) = &self.env_target {
            out.extend(environment_block(0xA000_0001, target));
        }
        if let Some(icon) = &self.env_icon {
            out.extend(environment_block(0xA000_0007, icon));
        }
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    /// Build and write to `dir/file_name`, creating `dir`.
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, self.build()).unwrap();
        path
    }

    fn link_info(&self, base: &str) -> Vec<u8> {
        let suffix = self.common_path_suffix.as_deref().unwrap_or("");
        let header_size: u32 = if self.unicode_link_info { 0x24 } else { 0x1C };

        // Minimal VolumeID: size, drive type, serial, label offset, empty label.
        let mut volume = Vec::new();
        volume.extend_from_slice(&0x11u32.to_le_bytes());
        volume.extend_from_slice(&3u32.to_le_bytes());
        volume.extend_from_slice(&0u32.to_le_bytes());
        volume.extend_from_slice(&0x10u32.to_le_bytes());
        volume.push(0);

        let volume_offset = header_size;
        let base_offset = volume_offset + volume.len() as u32;
        let base_ansi = ansi_c_string(base);
        let suffix_offset = base_offset + base_ansi.len() as u32;
        let suffix_ansi = ansi_c_string(suffix);
        let base_unicode_offset = suffix_offset + suffix_ansi.len() as u32;
        let base_unicode = utf16_c_string(base);
        let suffix_unicode_offset = base_unicode_offset + base_unicode.len() as u32;
        let suffix_unicode = utf16_c_string(suffix);

        let mut body = Vec::new();
        body.extend_from_slice(&header_size.to_le_bytes());
        body.extend_from_slice(&1u32.to_le_bytes());
        body.extend_from_slice(&volume_offset.to_le_bytes());
        body.extend_from_slice(&base_offset.to_le_bytes());
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&suffix_offset.to_le_bytes());
        if self.unicode_link_info {
            body.extend_from_slice(&base_unicode_offset.to_le_bytes());
            body.extend_from_slice(&suffix_unicode_offset.to_le_bytes());
        }
        body.extend(volume);
        body.extend(base_ansi);
        body.extend(suffix_ansi);
        if self.unicode_link_info {
            body.extend(base_unicode);
            body.extend(suffix_unicode);
        }

        let mut info = Vec::with_capacity(body.len() + 4);
        info.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
        info.extend(body);
        info
    }
}

fn ansi_c_string(s: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = s
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect();
    bytes.push(0);
    bytes
}

fn utf16_c_string(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(|u| u.to_le_bytes())
        .collect()
}

fn environment_block(signature: u32, value: &str) -> Vec<u8> {
    let mut block = Vec::with_capacity(0x314);
    block.extend_from_slice(&0x314u32.to_le_bytes());
    block.extend_from_slice(&signature.to_le_bytes());

    let mut ansi = ansi_c_string(value);
    ansi.resize(260, 0);
    block.extend(ansi);

    let mut unicode = utf16_c_string(value);
    unicode.resize(520, 0);
    block.extend(unicode);
    block
}
