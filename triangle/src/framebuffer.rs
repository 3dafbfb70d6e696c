use thiserror::Error;

use crate::scene::Color;

pub struct FrameBuffer {
    width: usize,
    height: usize,
    buffer: Vec<Pixel>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![Pixel::black(); width * height],
        }
    }

    /// Like [`FrameBuffer::new`], but reports sizes that cannot be allocated
    /// instead of panicking.
    pub fn try_new(width: usize, height: usize) -> Result<Self, FrameBufferError> {
        let too_large = || FrameBufferError::TooLarge(width, height);

        let len = width.checked_mul(height).ok_or_else(too_large)?;
        let bytes = len
            .checked_mul(std::mem::size_of::<Pixel>())
            .ok_or_else(too_large)?;

        if bytes > isize::MAX as usize {
            return Err(too_large());
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| FrameBufferError::Allocation(width, height))?;
        buffer.resize(len, Pixel::black());

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.into());
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.buffer.get(x + y * self.width)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.buffer.get_mut(x + y * self.width)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.buffer
    }

    /// Row-major 8-bit RGBA, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.buffer
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum FrameBufferError {
    #[error("framebuffer of {0}x{1} pixels is too large")]
    TooLarge(usize, usize),
    #[error("could not allocate a {0}x{1} framebuffer")]
    Allocation(usize, usize),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Pixel {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl From<Color> for Pixel {
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}
