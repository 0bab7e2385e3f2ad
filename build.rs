//! Points the linker at the native client library when the `ffi` feature is on.
//!
//! Set `AVAIL_FFI_LIB_DIR` to the directory holding `libavail_rust_ffi`.

fn main() {
    println!("cargo:rerun-if-env-changed=AVAIL_FFI_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_FFI").is_none() {
        return;
    }

    match std::env::var("AVAIL_FFI_LIB_DIR") {
        Ok(dir) if !dir.is_empty() => {
            println!("cargo:rustc-link-search=native={}", dir);
        }
        _ => {
            println!(
                "cargo:warning=AVAIL_FFI_LIB_DIR not set; relying on the default library search path"
            );
        }
    }
}
