use anyhow::{anyhow, Result};
use gl::types::*;
use regex::Regex;
use std::{ffi::CString, ptr};

lazy_static::lazy_static! {
    /// Formats de log GLSL connus, le groupe 1 contient le numéro de ligne :
    /// - "0:12(105): ..." (Mesa/Intel)
    /// - "0(12) : error ..." (NVIDIA)
    /// - "ERROR: 0:12: ..." (AMD/ATI)
    static ref GLSL_ERROR_PATTERNS: Vec<Regex> = [
        r"\d+:(\d+)\(\d+\)",
        r"\d+\((\d+)\)\s*:",
        r":\s*\d+:(\d+):",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect();
}

/// Compile et lie un programme à partir des sources vertex/fragment.
///
/// En cas d'échec, l'erreur contient le log du driver et, si possible, un extrait
/// du source autour de la ligne fautive.
///
/// # Safety
/// Un contexte OpenGL doit être actif sur le thread appelant.
pub unsafe fn try_compile_shader_program(vertex_src: &str, fragment_src: &str) -> Result<u32> {
    let vs = compile_stage(vertex_src, gl::VERTEX_SHADER)?;
    let fs = match compile_stage(fragment_src, gl::FRAGMENT_SHADER) {
        Ok(fs) => fs,
        Err(e) => {
            gl::DeleteShader(vs);
            return Err(e);
        }
    };

    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);
    gl::DeleteShader(vs);
    gl::DeleteShader(fs);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let log = read_info_log(len, |len, buf| {
            gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf)
        });
        gl::DeleteProgram(program);
        return Err(anyhow!("Shader link failed:\n{}", log));
    }

    Ok(program)
}

unsafe fn compile_stage(src: &str, ty: GLenum) -> Result<u32> {
    let c_str = CString::new(src).map_err(|e| anyhow!("CString error: {}", e))?;
    let shader = gl::CreateShader(ty);
    gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut success = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success == gl::TRUE as GLint {
        return Ok(shader);
    }

    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    let log = read_info_log(len, |len, buf| {
        gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf)
    });
    gl::DeleteShader(shader);

    let mut message = format!("Shader compilation failed:\n{}", log);
    if let Some(line) = parse_glsl_error_line(&log) {
        message.push_str(&format_glsl_error_context(src, line));
    }
    Err(anyhow!(message))
}

unsafe fn read_info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLchar)) -> String {
    let mut buf = vec![0u8; len.max(1) as usize];
    fetch(buf.len() as GLsizei, buf.as_mut_ptr() as *mut GLchar);
    String::from_utf8_lossy(&buf)
        .trim_matches(char::from(0))
        .to_string()
}

/// Numéro de ligne de la première erreur GLSL reconnue.
fn parse_glsl_error_line(log: &str) -> Option<usize> {
    GLSL_ERROR_PATTERNS
        .iter()
        .find_map(|re| re.captures(log)?.get(1)?.as_str().parse().ok())
}

/// Extrait du source GLSL autour de la ligne fautive (2 lignes de contexte).
fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    const CONTEXT: usize = 2;
    let lines: Vec<&str> = src.lines().collect();
    if lines.is_empty() || line_number == 0 {
        return String::new();
    }

    let start = line_number.saturating_sub(1 + CONTEXT).min(lines.len());
    let end = (line_number + CONTEXT).min(lines.len());

    let mut output = format!("\n🔍 Error context (line {}):\n", line_number);
    for (current, line) in (start + 1..).zip(&lines[start..end]) {
        if current == line_number {
            output.push_str(&format!("> {:>3} | {}\n", current, line));
        } else {
            output.push_str(&format!("  {:>3} | {}\n", current, line));
        }
    }
    output
}
