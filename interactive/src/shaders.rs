use triangle::rotation::Formula;

/// Vertex and fragment stage handed to program setup.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSources {
    pub fn for_formula(formula: Formula) -> Self {
        let vertex = match formula {
            Formula::Standard => include_str!("gl_shaders/rotate.glsl"),
            Formula::Skewed => include_str!("gl_shaders/rotate_skewed.glsl"),
        };

        Self {
            vertex,
            fragment: include_str!("gl_shaders/solid.glsl"),
        }
    }
}

pub const ATTR_POSITION: &str = "a_Position";
pub const UNIFORM_COS: &str = "u_CosB";
pub const UNIFORM_SIN: &str = "u_SinB";
pub const UNIFORM_COLOR: &str = "u_Color";
