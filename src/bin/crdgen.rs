//! CRD YAML Generator
//!
//! This binary generates Kubernetes CRD manifests for the source kinds this
//! crate knows how to validate.
//!
//! Usage: cargo run --bin crdgen > components/crds.yaml

use asyncapi_tmctl::crd::generate_crds;

fn main() -> anyhow::Result<()> {
    for crd in generate_crds()? {
        println!("---");
        print!("{}", crd);
    }
    Ok(())
}
