//! Binary shell-link (`.lnk`) decoder.
//!
//! Reads the parts of the format that locate the link target and its icon:
//! the header, `LinkInfo`, `StringData`, and the environment-variable
//! `ExtraData` blocks. The item ID list is skipped. Pure Rust, so shortcuts
//! can be decoded on any host.

use std::path::Path;

use crate::error::ShortcutError;

const HEADER_SIZE: usize = 0x4C;

/// `{00021401-0000-0000-C000-000000000046}` in on-disk byte order.
const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

pub const HAS_LINK_TARGET_ID_LIST: u32 = 0x0000_0001;
pub const HAS_LINK_INFO: u32 = 0x0000_0002;
pub const HAS_NAME: u32 = 0x0000_0004;
pub const HAS_RELATIVE_PATH: u32 = 0x0000_0008;
pub const HAS_WORKING_DIR: u32 = 0x0000_0010;
pub const HAS_ARGUMENTS: u32 = 0x0000_0020;
pub const HAS_ICON_LOCATION: u32 = 0x0000_0040;
pub const IS_UNICODE: u32 = 0x0000_0080;
pub const FORCE_NO_LINK_INFO: u32 = 0x0000_0100;
pub const HAS_EXP_STRING: u32 = 0x0000_0200;
pub const HAS_EXP_ICON: u32 = 0x0000_4000;

const VOLUME_ID_AND_LOCAL_BASE_PATH: u32 = 0x0000_0001;

const ENVIRONMENT_BLOCK_SIGNATURE: u32 = 0xA000_0001;
const ICON_ENVIRONMENT_BLOCK_SIGNATURE: u32 = 0xA000_0007;
const ENVIRONMENT_BLOCK_SIZE: usize = 0x314;
const ANSI_TARGET_LEN: usize = 260;

/// The decoded fields of a shell link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellLink {
    pub flags: u32,
    /// Icon index from the header.
    pub icon_index: i32,
    pub local_base_path: Option<String>,
    pub common_path_suffix: Option<String>,
    pub name: Option<String>,
    pub relative_path: Option<String>,
    pub working_dir: Option<String>,
    pub arguments: Option<String>,
    pub icon_location: Option<String>,
    /// Target from the environment-variable block, with `%VAR%` tokens intact.
    pub env_target: Option<String>,
    /// Icon path from the icon environment block, with `%VAR%` tokens intact.
    pub env_icon: Option<String>,
}

impl ShellLink {
    /// Read and decode a shortcut file.
    pub fn open(path: &Path) -> Result<Self, ShortcutError> {
        let data = std::fs::read(path).map_err(|source| ShortcutError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Decode a shortcut from its bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ShortcutError> {
        let mut reader = Reader::new(data);

        if reader.u32()? as usize != HEADER_SIZE || reader.bytes(16)? != LINK_CLSID {
            return Err(ShortcutError::BadHeader);
        }

        let flags = reader.u32()?;
        let mut link = ShellLink {
            flags,
            icon_index: reader.i32_at(0x38)?,
            ..Default::default()
        };
        reader.seek(HEADER_SIZE)?;

        if flags & HAS_LINK_TARGET_ID_LIST != 0 {
            let size = reader.u16()? as usize;
            reader.skip(size)?;
        }

        if flags & HAS_LINK_INFO != 0 {
            let start = reader.pos;
            let size = reader.u32()? as usize;
            if flags & FORCE_NO_LINK_INFO == 0 {
                link.read_link_info(&data[start..reader.end_of(start, size)?])?;
            }
            reader.seek(start + size)?;
        }

        let unicode = flags & IS_UNICODE != 0;
        let fields: [(u32, &mut Option<String>); 5] = [
            (HAS_NAME, &mut link.name),
            (HAS_RELATIVE_PATH, &mut link.relative_path),
            (HAS_WORKING_DIR, &mut link.working_dir),
            (HAS_ARGUMENTS, &mut link.arguments),
            (HAS_ICON_LOCATION, &mut link.icon_location),
        ];
        for (flag, field) in fields {
            if flags & flag != 0 {
                *field = non_empty(reader.string_data(unicode)?);
            }
        }

        // Extra data is optional trailing information; a damaged block only
        // loses what it carried.
        link.read_extra_data(&mut reader);

        Ok(link)
    }

    fn read_link_info(&mut self, info: &[u8]) -> Result<(), ShortcutError> {
        let mut reader = Reader::new(info);
        reader.skip(4)?;
        let header_size = reader.u32()? as usize;
        let info_flags = reader.u32()?;
        let _volume_id_offset = reader.u32()?;
        let local_base_offset = reader.u32()? as usize;
        let _network_offset = reader.u32()?;
        let suffix_offset = reader.u32()? as usize;

        let (local_base_unicode, suffix_unicode) = if header_size >= 0x24 {
            (reader.u32()? as usize, reader.u32()? as usize)
        } else {
            (0, 0)
        };

        if info_flags & VOLUME_ID_AND_LOCAL_BASE_PATH != 0 {
            self.local_base_path = if local_base_unicode != 0 {
                non_empty(reader.c_string_utf16_at(local_base_unicode)?)
            } else {
                non_empty(reader.c_string_ansi_at(local_base_offset)?)
            };
        }

        self.common_path_suffix = if suffix_unicode != 0 {
            non_empty(reader.c_string_utf16_at(suffix_unicode)?)
        } else if suffix_offset != 0 {
            non_empty(reader.c_string_ansi_at(suffix_offset)?)
        } else {
            None
        };

        Ok(())
    }

    fn read_extra_data(&mut self, reader: &mut Reader<'_>) {
        loop {
            let start = reader.pos;
            let Ok(size) = reader.u32() else { return };
            let size = size as usize;
            if size < 8 {
                return;
            }
            let Ok(signature) = reader.u32() else { return };
            let Ok(end) = reader.end_of(start, size) else {
                return;
            };

            if size >= ENVIRONMENT_BLOCK_SIZE
                && matches!(
                    signature,
                    ENVIRONMENT_BLOCK_SIGNATURE | ICON_ENVIRONMENT_BLOCK_SIGNATURE
                )
            {
                let value = read_environment_block(&reader.data[start + 8..end]);
                if signature == ENVIRONMENT_BLOCK_SIGNATURE {
                    self.env_target = value;
                } else {
                    self.env_icon = value;
                }
            }

            if reader.seek(end).is_err() {
                return;
            }
        }
    }

    /// Local base path joined with the common path suffix.
    pub fn link_info_target(&self) -> Option<String> {
        let base = self.local_base_path.as_deref()?;
        Some(match self.common_path_suffix.as_deref() {
            Some(suffix) => join_windows_path(base, suffix),
            None => base.to_string(),
        })
    }

    /// Environment-block target, when the link says to use it.
    pub fn expandable_target(&self) -> Option<&str> {
        if self.flags & HAS_EXP_STRING != 0 {
            self.env_target.as_deref()
        } else {
            None
        }
    }

    /// Environment-block icon path, when the link says to use it.
    pub fn expandable_icon(&self) -> Option<&str> {
        if self.flags & HAS_EXP_ICON != 0 {
            self.env_icon.as_deref()
        } else {
            None
        }
    }
}

/// `TargetAnsi` (260 bytes) followed by `TargetUnicode` (520 bytes).
fn read_environment_block(body: &[u8]) -> Option<String> {
    let reader = Reader::new(body);
    reader
        .c_string_utf16_at(ANSI_TARGET_LEN)
        .ok()
        .and_then(non_empty)
        .or_else(|| reader.c_string_ansi_at(0).ok().and_then(non_empty))
}

/// Join with a backslash unless one side already provides it.
fn join_windows_path(base: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return base.to_string();
    }
    if base.ends_with(['\\', '/']) {
        format!("{}{}", base, suffix)
    } else {
        format!("{}\\{}", base, suffix)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Decode system-codepage text. ASCII is exact; other bytes map to Latin-1.
fn decode_ansi(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Little-endian cursor over a byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn end_of(&self, start: usize, len: usize) -> Result<usize, ShortcutError> {
        let end = start.checked_add(len).ok_or(ShortcutError::Truncated(start))?;
        if end > self.data.len() {
            return Err(ShortcutError::Truncated(start));
        }
        Ok(end)
    }

    fn seek(&mut self, pos: usize) -> Result<(), ShortcutError> {
        if pos > self.data.len() {
            return Err(ShortcutError::Truncated(pos));
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, len: usize) -> Result<(), ShortcutError> {
        let end = self.end_of(self.pos, len)?;
        self.pos = end;
        Ok(())
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], ShortcutError> {
        let start = self.pos;
        let end = self.end_of(start, len)?;
        self.pos = end;
        Ok(&self.data[start..end])
    }

    fn u16(&mut self) -> Result<u16, ShortcutError> {
        let b = self.bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ShortcutError> {
        let b = self.bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32_at(&self, offset: usize) -> Result<i32, ShortcutError> {
        let end = self.end_of(offset, 4)?;
        let b = &self.data[offset..end];
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// A `StringData` entry: a character count followed by the characters.
    fn string_data(&mut self, unicode: bool) -> Result<String, ShortcutError> {
        let count = self.u16()? as usize;
        if unicode {
            let raw = self.bytes(count * 2)?;
            Ok(decode_utf16(raw))
        } else {
            Ok(decode_ansi(self.bytes(count)?))
        }
    }

    fn c_string_ansi_at(&self, offset: usize) -> Result<String, ShortcutError> {
        let tail = self.data.get(offset..).ok_or(ShortcutError::Truncated(offset))?;
        let len = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        Ok(decode_ansi(&tail[..len]))
    }

    fn c_string_utf16_at(&self, offset: usize) -> Result<String, ShortcutError> {
        let tail = self.data.get(offset..).ok_or(ShortcutError::Truncated(offset))?;
        let units: Vec<u16> = tail
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&u| u != 0)
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }
}

fn decode_utf16(raw: &[u8]) -> String {
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
