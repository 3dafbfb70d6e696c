use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<(u32, VertexAttribute)>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    /// Attributes are interleaved in the order they are added.
    pub fn with_attribute(mut self, location: u32, attr: VertexAttribute) -> Self {
        self.attributes.push((location, attr));
        self
    }

    fn stride(&self) -> Result<usize, GBError> {
        let total_len: usize = self.attributes.iter().map(|(_, a)| a.size()).sum();

        if total_len == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.is_empty() || self.data.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        Ok(total_len)
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let total_len = self.stride()?;

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            if vao == 0 || vbo == 0 {
                return Err(GBError::Allocation);
            }

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (location, attr) in &self.attributes {
                gl::VertexAttribPointer(
                    *location,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (total_len * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(*location);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let vertices = self.data.len() / total_len;

        log::debug!("uploaded {vertices} vertices to buffer {vbo}");

        Ok(Geometry { vao, vbo, vertices })
    }
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Geometry needs at least one attribute")]
    NoAttributes,
    #[error("Could not create the buffer object")]
    Allocation,
}

pub enum VertexAttribute {
    Vec2,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Vec2 => 2,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }
    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_checks() {
        let data = [0.0, 0.5, -0.5, -0.5, 0.5, -0.5];

        let b = GeometryBuilder::new(&data).with_attribute(0, VertexAttribute::Vec2);
        assert_eq!(b.stride().unwrap(), 2);

        let b = GeometryBuilder::new(&data[..4])
            .with_attribute(0, VertexAttribute::Vec2)
            .with_attribute(1, VertexAttribute::Vec2);
        assert_eq!(b.stride().unwrap(), 4);

        let b = GeometryBuilder::new(&data)
            .with_attribute(0, VertexAttribute::Vec2)
            .with_attribute(1, VertexAttribute::Vec2);
        assert!(matches!(b.stride(), Err(GBError::InvalidDataLength)));

        let b = GeometryBuilder::new(&data[..5]).with_attribute(0, VertexAttribute::Vec2);
        assert!(matches!(b.stride(), Err(GBError::InvalidDataLength)));

        let b = GeometryBuilder::new(&data);
        assert!(matches!(b.stride(), Err(GBError::NoAttributes)));

        let b = GeometryBuilder::new(&[]).with_attribute(0, VertexAttribute::Vec2);
        assert!(matches!(b.stride(), Err(GBError::InvalidDataLength)));
    }
}
