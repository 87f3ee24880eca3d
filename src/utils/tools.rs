use log::info;

/// Versions des crates "cœur" figées au build (voir `build.rs`).
pub fn core_dependency_versions() -> [(&'static str, &'static str); 3] {
    [
        ("GL", option_env!("GL_CRATE_VERSION").unwrap_or("Unknown")),
        ("GLFW", option_env!("GLFW_CRATE_VERSION").unwrap_or("Unknown")),
        ("IMAGE", option_env!("IMAGE_CRATE_VERSION").unwrap_or("Unknown")),
    ]
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    for (name, version) in core_dependency_versions() {
        info!("  {:<5} version: {}", name, version);
    }
}
