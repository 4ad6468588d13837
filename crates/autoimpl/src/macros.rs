// build
/// Run the generator from a `build.rs` whose `main` returns
/// `Result<(), Box<dyn std::error::Error>>`.
///
/// Reads `autoimpl.toml` (optional) and the schema next to the manifest and
/// writes artifacts under `OUT_DIR/autoimpl`.
#[macro_export]
macro_rules! build {
    () => {
        use std::{env::var, path::PathBuf};

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");

        let manifest_dir = PathBuf::from(var("CARGO_MANIFEST_DIR")?);
        let out_dir = PathBuf::from(var("OUT_DIR")?).join("autoimpl");

        //
        // GENERATE
        //

        let script = $crate::build::BuildScript {
            manifest_dir,
            out_dir,
        };
        let (generation, watched) = script.run()?;

        for path in watched {
            println!("cargo:rerun-if-changed={}", path.display());
        }
        for diagnostic in &generation.diagnostics {
            println!("cargo:warning={diagnostic}");
        }
    };
}

// include_generated
/// Include a generated file, relative to `OUT_DIR/autoimpl`, e.g.
/// `include_generated!("greet/greeter_impl.rs")` inside `mod greet`.
#[macro_export]
macro_rules! include_generated {
    ($file:literal) => {
        include!(concat!(env!("OUT_DIR"), "/autoimpl/", $file));
    };
}

// args
/// Build factory [`Args`](crate::factory::Args) from values, in order.
#[macro_export]
macro_rules! args {
    () => {
        $crate::factory::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::factory::Args::new()$(.with($value))+
    };
}
