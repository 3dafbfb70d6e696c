use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use thiserror::Error;

const LOG_LEN: usize = 1024;

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_stage(gl::VERTEX_SHADER, self.vert)?;

        let frag = match compile_stage(gl::FRAGMENT_SHADER, self.frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; LOG_LEN];

                gl::GetProgramInfoLog(
                    program,
                    LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(ProgramError::Linking(info_log(&buf)));
            }

            log::debug!("linked program {program}");

            Ok(Program { id: program })
        }
    }
}

fn compile_stage(kind: GLenum, src: &str) -> Result<GLuint, ProgramError> {
    let src = CString::new(src)
        .map_err(|_| ProgramError::Compilation("shader source contains a NUL byte".into()))?;

    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let mut buf = [0_u8; LOG_LEN];

            gl::GetShaderInfoLog(
                shader,
                LOG_LEN as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(ProgramError::Compilation(info_log(&buf)));
        }

        Ok(shader)
    }
}

fn info_log(buf: &[u8]) -> String {
    let data = buf.split(|a| *a == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("shader compilation failed: {0}")]
    Compilation(String),
    #[error("program linking failed: {0}")]
    Linking(String),
    #[error("no active uniform named `{0}`")]
    UnknownUniform(String),
    #[error("no active attribute named `{0}`")]
    UnknownAttribute(String),
}

#[derive(Debug, Copy, Clone)]
pub struct UniformLocation(GLint);

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// Fails for names the linker dropped as well as for typos.
    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation, ProgramError> {
        let c_name =
            CString::new(name).map_err(|_| ProgramError::UnknownUniform(name.to_string()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(ProgramError::UnknownUniform(name.to_string()));
        }

        Ok(UniformLocation(location))
    }

    pub fn attribute_location(&self, name: &str) -> Result<u32, ProgramError> {
        let c_name =
            CString::new(name).map_err(|_| ProgramError::UnknownAttribute(name.to_string()))?;

        let location = unsafe { gl::GetAttribLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(ProgramError::UnknownAttribute(name.to_string()));
        }

        Ok(location as u32)
    }

    pub fn set_float(&self, location: UniformLocation, value: f32) {
        unsafe {
            gl::UseProgram(self.id);
            gl::Uniform1f(location.0, value);
        }
    }

    pub fn set_vec4(&self, location: UniformLocation, value: [f32; 4]) {
        unsafe {
            gl::UseProgram(self.id);
            gl::Uniform4f(location.0, value[0], value[1], value[2], value[3]);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 16];
        buf[..6].copy_from_slice(b"error\n");

        assert_eq!(info_log(&buf), "error");
        assert_eq!(info_log(b"no terminator"), "no terminator");
    }
}
