// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    // Récupère la metadata du projet
    let metadata = MetadataCommand::new()
        .exec()
        .expect("cargo metadata failed");

    // Crates dont on expose la version au runtime (cf. utils::show_rust_core_dependencies)
    let tracked = HashSet::from(["glfw", "gl", "image"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}_CRATE_VERSION={}",
                package.name.to_uppercase(),
                package.version
            );
        }
    }
}
