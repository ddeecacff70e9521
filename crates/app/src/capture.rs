//! Signature and photo capture.
//!
//! Both widgets produce an [`ImageArtifact`] for the parent form and clear
//! themselves when the form's reset counter moves.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgba, RgbaImage};
use shared_types::{AppError, ImageArtifact};

/// Intrinsic resolution of the signature surface.
pub const SIGNATURE_WIDTH: u32 = 600;
pub const SIGNATURE_HEIGHT: u32 = 200;
/// Pen diameter in surface pixels.
pub const PEN_WIDTH: f32 = 3.0;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding box of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a screen point into surface coordinates.
    pub fn to_surface(&self, client: Point, surface_width: u32, surface_height: u32) -> Point {
        let sx = if self.width > 0.0 { surface_width as f32 / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { surface_height as f32 / self.height } else { 1.0 };
        Point::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}

/// Freehand signature surface.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    surface: RgbaImage,
    drawing: bool,
    last: Option<Point>,
    inked: bool,
    artifact: Option<ImageArtifact>,
    seen_reset: u32,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

impl SignaturePad {
    pub fn new() -> Self {
        Self {
            surface: RgbaImage::new(SIGNATURE_WIDTH, SIGNATURE_HEIGHT),
            drawing: false,
            last: None,
            inked: false,
            artifact: None,
            seen_reset: 0,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn has_ink(&self) -> bool {
        self.inked
    }

    pub fn artifact(&self) -> Option<&ImageArtifact> {
        self.artifact.as_ref()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&Rgba<u8>> {
        self.surface.get_pixel_checked(x, y)
    }

    pub fn pointer_down(&mut self, client: Point, viewport: Viewport) {
        self.drawing = true;
        self.last = Some(viewport.to_surface(client, SIGNATURE_WIDTH, SIGNATURE_HEIGHT));
    }

    /// Extend the stroke to `client`. Ignored unless a stroke is in progress.
    pub fn pointer_move(&mut self, client: Point, viewport: Viewport) {
        if !self.drawing {
            return;
        }
        let to = viewport.to_surface(client, SIGNATURE_WIDTH, SIGNATURE_HEIGHT);
        if let Some(from) = self.last {
            self.draw_segment(from, to);
        }
        self.last = Some(to);
    }

    /// Finish the stroke and re-encode the whole surface.
    ///
    /// Returns the new artifact when a stroke ended and the surface holds ink.
    pub fn pointer_up(&mut self) -> Result<Option<ImageArtifact>, AppError> {
        if !self.drawing {
            return Ok(None);
        }
        self.drawing = false;
        self.last = None;
        if !self.inked {
            return Ok(None);
        }
        let artifact = encode_png(&self.surface)?;
        self.artifact = Some(artifact.clone());
        Ok(Some(artifact))
    }

    pub fn pointer_leave(&mut self) -> Result<Option<ImageArtifact>, AppError> {
        self.pointer_up()
    }

    /// Wipe the surface and the stored artifact.
    pub fn clear(&mut self) {
        self.surface = RgbaImage::new(SIGNATURE_WIDTH, SIGNATURE_HEIGHT);
        self.drawing = false;
        self.last = None;
        self.inked = false;
        self.artifact = None;
    }

    /// Clear if the parent's reset counter moved since the last call.
    pub fn sync_reset(&mut self, trigger: u32) -> bool {
        if trigger == self.seen_reset {
            return false;
        }
        self.seen_reset = trigger;
        self.clear();
        true
    }

    fn draw_segment(&mut self, from: Point, to: Point) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = (dx.hypot(dy) * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(Point::new(from.x + dx * t, from.y + dy * t));
        }
    }

    /// Round pen tip centered on `at`.
    fn stamp(&mut self, at: Point) {
        let radius = PEN_WIDTH / 2.0;
        let x0 = (at.x - radius).floor().max(0.0) as u32;
        let y0 = (at.y - radius).floor().max(0.0) as u32;
        let x1 = ((at.x + radius).ceil().max(0.0) as u32).min(SIGNATURE_WIDTH.saturating_sub(1));
        let y1 = ((at.y + radius).ceil().max(0.0) as u32).min(SIGNATURE_HEIGHT.saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (cx, cy) = (x as f32 + 0.5 - at.x, y as f32 + 0.5 - at.y);
                if cx * cx + cy * cy <= radius * radius {
                    self.surface.put_pixel(x, y, INK);
                    self.inked = true;
                }
            }
        }
    }
}

fn encode_png(surface: &RgbaImage) -> Result<ImageArtifact, AppError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| AppError::internal(format!("Failed to encode signature: {}", e)))?;
    Ok(ImageArtifact::from_bytes("image/png", &bytes))
}

/// Photo picked from disk or a camera.
#[derive(Debug, Clone, Default)]
pub struct PhotoCapture {
    artifact: Option<ImageArtifact>,
    dimensions: Option<(u32, u32)>,
    seen_reset: u32,
}

impl PhotoCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an image file's bytes. Only PNG and JPEG that actually decode
    /// are accepted; on error the previous photo is kept.
    pub fn select(&mut self, bytes: &[u8]) -> Result<ImageArtifact, AppError> {
        let format = image::guess_format(bytes)
            .map_err(|_| AppError::field("photo", "Selected file is not an image"))?;
        let mime = match format {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            _ => return Err(AppError::field("photo", "Photo must be a PNG or JPEG image")),
        };
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| AppError::field("photo", format!("Photo could not be read: {}", e)))?;
        let artifact = ImageArtifact::from_bytes(mime, bytes);
        self.dimensions = Some((decoded.width(), decoded.height()));
        self.artifact = Some(artifact.clone());
        tracing::debug!(mime, width = decoded.width(), height = decoded.height(), "Photo selected");
        Ok(artifact)
    }

    pub fn artifact(&self) -> Option<&ImageArtifact> {
        self.artifact.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn clear(&mut self) {
        self.artifact = None;
        self.dimensions = None;
    }

    pub fn sync_reset(&mut self, trigger: u32) -> bool {
        if trigger == self.seen_reset {
            return false;
        }
        self.seen_reset = trigger;
        self.clear();
        true
    }
}
