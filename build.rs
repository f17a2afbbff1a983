//! Build script for tilestrip
//!
//! Windows builds embed the application icon into the executable when the
//! resource files are present.

fn main() {
    #[cfg(target_os = "windows")]
    {
        let rc_path = std::path::Path::new("assets/icons/windows/app.rc");
        let ico_path = std::path::Path::new("assets/icons/windows/app.ico");

        if rc_path.exists() && ico_path.exists() {
            embed_resource::compile("assets/icons/windows/app.rc", embed_resource::NONE);
            println!("cargo:rerun-if-changed=assets/icons/windows/app.rc");
            println!("cargo:rerun-if-changed=assets/icons/windows/app.ico");
        } else {
            println!(
                "cargo:warning=No Windows icon resources at {:?} / {:?}; building without one.",
                rc_path, ico_path
            );
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
