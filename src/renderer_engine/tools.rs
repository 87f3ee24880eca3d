use gl::types::*;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGED_IDS: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[macro_export]
macro_rules! cstr {
    ($s:expr) => {
        concat!($s, "\0").as_ptr() as *const std::os::raw::c_char
    };
}

unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return "Unknown".to_string();
    }
    CStr::from_ptr(ptr as *const GLchar)
        .to_string_lossy()
        .into_owned()
}

/// Affiche les informations OpenGL / GPU du contexte actuel
///
/// # Safety
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn show_opengl_context_info() {
    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", gl_string(gl::VENDOR));
    info!("  Renderer : {}", gl_string(gl::RENDERER));
    info!("  OpenGL   : {}", gl_string(gl::VERSION));
    info!("  GLSL     : {}", gl_string(gl::SHADING_LANGUAGE_VERSION));

    let mut max_texture_size = 0;
    gl::GetIntegerv(gl::MAX_TEXTURE_SIZE, &mut max_texture_size);
    debug!("  GL_MAX_TEXTURE_SIZE = {}", max_texture_size);

    let err = gl::GetError();
    if err != gl::NO_ERROR {
        warn!("glerror consumed after getting context info: 0x{:X}", err);
    }
}

fn source_label(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

fn type_label(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "Other",
    }
}

fn severity_label(severity: GLenum) -> &'static str {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => "High",
        gl::DEBUG_SEVERITY_MEDIUM => "Medium",
        gl::DEBUG_SEVERITY_LOW => "Low",
        _ => "Notification",
    }
}

/// Callback OpenGL debug : un seul log par identifiant de message, notifications ignorées.
extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if severity == gl::DEBUG_SEVERITY_NOTIFICATION || message.is_null() {
        return;
    }

    let Ok(mut logged) = LOGGED_IDS.lock() else {
        return;
    };
    if !logged.insert(id) {
        return;
    }

    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };
    warn!(
        "[OpenGL Debug] id: {:X}, source: {}, type: {}, severity: {}, message: {}",
        id,
        source_label(source),
        type_label(type_),
        severity_label(severity),
        msg
    );
}

/// Configure le debug OpenGL via `glDebugMessageCallback`.
///
/// # Safety
/// Le contexte OpenGL doit être actif (4.3+ ou `KHR_debug`) ; le callback reste
/// enregistré pendant toute la durée du contexte.
pub unsafe fn setup_opengl_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        warn!("⚠️ glDebugMessageCallback unavailable, GL debug output disabled");
        return;
    }
    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
    gl::DebugMessageControl(
        gl::DONT_CARE,
        gl::DONT_CARE,
        gl::DONT_CARE,
        0,
        std::ptr::null(),
        gl::TRUE,
    );
}
