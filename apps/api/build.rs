fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_prost_build::configure()
        .build_client(false)
        .compile_protos(&["../../proto/content.proto"], &["../../proto"])?;

    println!("cargo:rerun-if-changed=../../proto/content.proto");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
