use std::io::Cursor;

use anyhow::Context;
use image::{ImageFormat, RgbaImage};

/// One raw RGBA8 video frame, row-major, as handed over by the camera layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            pixels.len() == (width as usize) * (height as usize) * 4,
            "frame buffer is {} bytes, expected {}x{}x4",
            pixels.len(),
            width,
            height
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Horizontal flip. The kiosk preview is mirrored, and the capture contract is
/// that captured pixels match the preview exactly, not the raw camera frame.
pub fn mirror(frame: &Frame) -> Frame {
    let w = frame.width as usize;
    let mut pixels = Vec::with_capacity(frame.pixels.len());
    for row in frame.pixels.chunks_exact(w * 4) {
        for px in row.chunks_exact(4).rev() {
            pixels.extend_from_slice(px);
        }
    }
    Frame {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}

/// Mirrors the frame and serializes it as PNG, the blob the wizard uploads.
pub fn capture_png(frame: &Frame) -> anyhow::Result<Vec<u8>> {
    let mirrored = mirror(frame);
    let img = RgbaImage::from_raw(mirrored.width, mirrored.height, mirrored.pixels)
        .context("frame dimensions do not match buffer")?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .context("encode captured frame as png")?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn frame_from(rows: &[&[[u8; 4]]]) -> Frame {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let pixels: Vec<u8> = rows.iter().flat_map(|r| r.iter().flatten().copied()).collect();
        Frame::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_mirror_flips_left_right_marker() {
        // Marker on the left edge must end up on the right edge.
        let frame = frame_from(&[&[RED, BLACK, BLACK]]);
        let mirrored = mirror(&frame);
        assert_eq!(mirrored, frame_from(&[&[BLACK, BLACK, RED]]));
    }

    #[test]
    fn test_mirror_preserves_rows() {
        let frame = frame_from(&[&[RED, BLUE], &[BLUE, BLACK]]);
        let mirrored = mirror(&frame);
        assert_eq!(mirrored, frame_from(&[&[BLUE, RED], &[BLACK, BLUE]]));
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let frame = frame_from(&[&[RED, BLUE, BLACK], &[BLACK, RED, BLUE]]);
        assert_eq!(mirror(&mirror(&frame)), frame);
    }

    #[test]
    fn test_capture_png_pixels_match_mirrored_preview() {
        let frame = frame_from(&[&[RED, BLACK]]);
        let png = capture_png(&frame).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 1));
        // Left marker of the raw frame appears flipped in the capture.
        assert_eq!(decoded.get_pixel(0, 0).0, BLACK);
        assert_eq!(decoded.get_pixel(1, 0).0, RED);
    }

    #[test]
    fn test_frame_rejects_wrong_buffer_size() {
        assert!(Frame::new(2, 2, vec![0; 15]).is_err());
    }
}
