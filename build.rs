fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_file = "proto/issuer_switch_transactions.proto";
    println!("cargo:rerun-if-changed={}", proto_file);
    println!("cargo:rerun-if-changed=proto");

    // Use the vendored protoc binary so the build works without a system install.
    let protoc = protoc_bin_vendored::protoc_bin_path()
        .expect("protoc-bin-vendored: could not locate vendored protoc binary");
    std::env::set_var("PROTOC", protoc);

    // The server stub is only used by the in-process fake in integration tests.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&[proto_file], &["proto"])?;

    Ok(())
}
