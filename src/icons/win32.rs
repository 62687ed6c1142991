//! Icon extraction through the Win32 shell and GDI.
//!
//! Every handle is owned by a guard that releases it on drop, so early
//! returns never leak.

use std::ffi::c_void;
use std::path::Path;

use image::RgbaImage;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAP, BITMAPINFO, BITMAPINFOHEADER, CreateCompatibleDC, CreateDIBSection,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetObjectW, HBITMAP, HDC, HGDIOBJ, ReleaseDC,
    SelectObject,
};
use windows::Win32::Storage::FileSystem::FILE_FLAGS_AND_ATTRIBUTES;
use windows::Win32::UI::Shell::{
    ExtractIconExW, SHFILEINFOW, SHGFI_ICON, SHGFI_LARGEICON, SHGetFileInfoW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DI_NORMAL, DestroyIcon, DrawIconEx, GetIconInfo, HICON, ICONINFO,
};
use windows::core::PCWSTR;

use crate::error::IconError;

/// Used when the icon's bitmaps do not report a size.
const FALLBACK_SIZE: i32 = 32;

/// Paths at least this long need the `\\?\` prefix.
const MAX_PATH: usize = 260;

/// Extract the icon resource at `index` from an executable, library or icon file.
pub fn extract_icon(path: &Path, index: i32) -> Result<RgbaImage, IconError> {
    let wide = wide_path(path);
    let mut large = HICON::default();

    // SAFETY: `wide` is NUL-terminated and outlives the call.
    let count = unsafe { ExtractIconExW(PCWSTR(wide.as_ptr()), index, Some(&mut large), None, 1) };
    if count == 0 || large.is_invalid() {
        return Err(IconError::NoResource {
            path: path.to_path_buf(),
            index,
        });
    }

    hicon_to_image(&OwnedIcon(large))
}

/// The icon the shell shows for the file at `path`.
pub fn shell_icon(path: &Path) -> Result<RgbaImage, IconError> {
    let wide = wide_path(path);
    let mut info = SHFILEINFOW::default();

    // SAFETY: `wide` is NUL-terminated and `info` is sized as declared.
    let result = unsafe {
        SHGetFileInfoW(
            PCWSTR(wide.as_ptr()),
            FILE_FLAGS_AND_ATTRIBUTES(0),
            Some(&mut info),
            std::mem::size_of::<SHFILEINFOW>() as u32,
            SHGFI_ICON | SHGFI_LARGEICON,
        )
    };
    if result == 0 || info.hIcon.is_invalid() {
        return Err(IconError::NoResource {
            path: path.to_path_buf(),
            index: 0,
        });
    }

    hicon_to_image(&OwnedIcon(info.hIcon))
}

/// Render an icon into a 32-bit top-down bitmap and copy it out as RGBA.
fn hicon_to_image(icon: &OwnedIcon) -> Result<RgbaImage, IconError> {
    let mut info = ICONINFO::default();
    // SAFETY: `icon` holds a live icon handle.
    unsafe { GetIconInfo(icon.0, &mut info) }.map_err(|_| IconError::Os("GetIconInfo"))?;

    // GetIconInfo hands ownership of both bitmaps to the caller.
    let color = OwnedBitmap(info.hbmColor);
    let mask = OwnedBitmap(info.hbmMask);
    let (width, height) = icon_size(&color, &mask);

    let screen = ScreenDc::get()?;
    let memory = MemoryDc::compatible_with(&screen)?;

    let header = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            // Negative height selects a top-down DIB
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bits: *mut c_void = std::ptr::null_mut();
    // SAFETY: `header` describes a 32bpp DIB and `bits` receives its pixel buffer.
    let dib = unsafe {
        CreateDIBSection(Some(memory.0), &header, DIB_RGB_COLORS, &mut bits, None, 0)
    }
    .map_err(|_| IconError::Os("CreateDIBSection"))?;
    let dib = OwnedBitmap(dib);
    if bits.is_null() {
        return Err(IconError::Os("CreateDIBSection"));
    }

    {
        let _selected = Selection::select(&memory, dib.0.into());
        // SAFETY: the DIB is selected into `memory` and sized width x height.
        unsafe {
            DrawIconEx(memory.0, 0, 0, icon.0, width, height, 0, None, DI_NORMAL)
        }
        .map_err(|_| IconError::Os("DrawIconEx"))?;
    }

    let len = width as usize * height as usize * 4;
    // SAFETY: the DIB section owns `len` bytes at `bits` until `dib` drops.
    let bgra = unsafe { std::slice::from_raw_parts(bits as *const u8, len) };
    let rgba = bgra
        .chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect();

    RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or(IconError::Os("pixel copy"))
}

/// Width and height from the color bitmap, or from the mask (which stacks
/// AND and XOR halves) for monochrome icons.
fn icon_size(color: &OwnedBitmap, mask: &OwnedBitmap) -> (i32, i32) {
    if let Some(bm) = bitmap_info(color.0) {
        return (bm.bmWidth, bm.bmHeight.abs());
    }
    if let Some(bm) = bitmap_info(mask.0) {
        return (bm.bmWidth, bm.bmHeight.abs() / 2);
    }
    (FALLBACK_SIZE, FALLBACK_SIZE)
}

fn bitmap_info(bitmap: HBITMAP) -> Option<BITMAP> {
    if bitmap.is_invalid() {
        return None;
    }
    let mut bm = BITMAP::default();
    // SAFETY: `bm` is a BITMAP and its size is passed along.
    let written = unsafe {
        GetObjectW(
            bitmap.into(),
            std::mem::size_of::<BITMAP>() as i32,
            Some(&mut bm as *mut BITMAP as *mut c_void),
        )
    };
    (written != 0 && bm.bmWidth > 0 && bm.bmHeight != 0).then_some(bm)
}

/// Quotes stripped, NUL-terminated, `\\?\`-prefixed when too long.
fn wide_path(path: &Path) -> Vec<u16> {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_matches('"');
    let prefixed = if trimmed.len() >= MAX_PATH && !trimmed.starts_with(r"\\?\") {
        format!(r"\\?\{}", trimmed)
    } else {
        trimmed.to_string()
    };
    prefixed.encode_utf16().chain(std::iter::once(0)).collect()
}

struct OwnedIcon(HICON);

impl Drop for OwnedIcon {
    fn drop(&mut self) {
        // SAFETY: the icon was created for us and is destroyed once.
        let _ = unsafe { DestroyIcon(self.0) };
    }
}

struct OwnedBitmap(HBITMAP);

impl Drop for OwnedBitmap {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            // SAFETY: the bitmap is owned and no longer selected into a DC.
            let _ = unsafe { DeleteObject(self.0.into()) };
        }
    }
}

struct ScreenDc(HDC);

impl ScreenDc {
    fn get() -> Result<Self, IconError> {
        // SAFETY: a None window requests the screen DC.
        let dc = unsafe { GetDC(None::<HWND>) };
        if dc.is_invalid() {
            return Err(IconError::Os("GetDC"));
        }
        Ok(Self(dc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        // SAFETY: obtained from GetDC(None).
        unsafe { ReleaseDC(None, self.0) };
    }
}

struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(screen: &ScreenDc) -> Result<Self, IconError> {
        // SAFETY: `screen` is a live DC.
        let dc = unsafe { CreateCompatibleDC(Some(screen.0)) };
        if dc.is_invalid() {
            return Err(IconError::Os("CreateCompatibleDC"));
        }
        Ok(Self(dc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        // SAFETY: created by CreateCompatibleDC.
        let _ = unsafe { DeleteDC(self.0) };
    }
}

/// Restores the previously selected object when dropped.
struct Selection<'a> {
    dc: &'a MemoryDc,
    previous: HGDIOBJ,
}

impl<'a> Selection<'a> {
    fn select(dc: &'a MemoryDc, object: HGDIOBJ) -> Self {
        // SAFETY: both handles are live for the guard's lifetime.
        let previous = unsafe { SelectObject(dc.0, object) };
        Self { dc, previous }
    }
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        // SAFETY: restores the object that was selected before.
        unsafe { SelectObject(self.dc.0, self.previous) };
    }
}
