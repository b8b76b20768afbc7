//! Generate bindings for the fixtures and the example schema into `OUT_DIR`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pipeline::GenerationContext;

/// Module name and schema documents of each generated tree.
const TREES: &[(&str, &[&str])] = &[
    (
        "cdp",
        &[
            "../../resources/fixtures/browser_protocol.json",
            "../../resources/fixtures/js_protocol.json",
        ],
    ),
    ("example", &["schemas/foo.json"]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    let mut bindings = String::new();
    for (module, inputs) in TREES {
        let inputs: Vec<PathBuf> = inputs.iter().map(|p| manifest_dir.join(p)).collect();
        for input in &inputs {
            println!("cargo:rerun-if-changed={}", input.display());
        }
        let output = out_dir.join(module);
        let ctx = GenerationContext::builder()
            .schema_paths(inputs)
            .output_dir(output.clone())
            .rustfmt(false)
            .build()?;
        pipeline::run(&ctx)?;
        write_module(&mut bindings, module, &output.join("mod.rs"))?;
    }

    std::fs::write(out_dir.join("bindings.rs"), bindings)?;
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}

fn write_module(buf: &mut String, module: &str, root: &Path) -> std::fmt::Result {
    writeln!(buf, "#[path = {:?}]", root.display().to_string())?;
    writeln!(buf, "pub mod {};", module)
}
