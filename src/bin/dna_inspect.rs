//! dna-inspect: print the structure of a DNA manifest
//!
//! Usage:
//!   dna-inspect <manifest> [--format json|yaml] [--emit json|yaml] [--hash]
//!
//! The input format defaults to the file extension. Log output goes to stderr
//! and is filtered by DNA_LOG (or RUST_LOG), default `warn`.

use anyhow::{bail, Context};
use dna_manifest::{Dna, FnParameter, ManifestFormat};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct Options {
    path: PathBuf,
    format: Option<ManifestFormat>,
    emit: Option<ManifestFormat>,
    hash: bool,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            print_usage();
            std::process::exit(1);
        }
        Some("help" | "--help" | "-h") => print_usage(),
        Some("version" | "--version" | "-V") => {
            println!("dna-inspect {}", env!("CARGO_PKG_VERSION"))
        }
        Some(_) => {
            if let Err(e) = parse_options(&args).and_then(|opts| run(&opts)) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"dna-inspect: DNA manifest inspector

USAGE:
    dna-inspect <manifest> [OPTIONS]

OPTIONS:
    --format <json|yaml>    Input format (default: from file extension, else json)
    --emit <json|yaml>      Re-serialize the parsed manifest instead of printing the tree
    --hash                  Print the content hash of the parsed manifest

ENVIRONMENT:
    DNA_LOG                 Log filter (falls back to RUST_LOG, default: warn)"#
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DNA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_format(value: Option<&String>, flag: &str) -> anyhow::Result<ManifestFormat> {
    let Some(value) = value else {
        bail!("{flag} requires a value (json or yaml)");
    };
    ManifestFormat::from_extension(value)
        .with_context(|| format!("unsupported {flag} value '{value}' (expected json or yaml)"))
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut path = None;
    let mut format = None;
    let mut emit = None;
    let mut hash = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => format = Some(parse_format(iter.next(), "--format")?),
            "--emit" => emit = Some(parse_format(iter.next(), "--emit")?),
            "--hash" => hash = true,
            other if other.starts_with("--") => bail!("unknown option {other}"),
            other => {
                if path.replace(PathBuf::from(other)).is_some() {
                    bail!("only one manifest path may be given");
                }
            }
        }
    }

    let Some(path) = path else {
        bail!("missing manifest path");
    };
    Ok(Options {
        path,
        format,
        emit,
        hash,
    })
}

/// Read and parse one manifest file.
fn load(path: &Path, format: ManifestFormat) -> dna_manifest::Result<Dna> {
    let text = std::fs::read_to_string(path).map_err(|e| dna_manifest::Error::read(path, e))?;
    Ok(Dna::from_str_with_format(&text, format)?)
}

fn run(opts: &Options) -> anyhow::Result<()> {
    let format = opts
        .format
        .or_else(|| ManifestFormat::from_path(&opts.path))
        .unwrap_or_default();
    tracing::info!("Loading {} as {:?}", opts.path.display(), format);

    let dna = load(&opts.path, format).with_context(|| format!("loading {}", opts.path.display()))?;

    if let Some(emit) = opts.emit {
        println!("{}", dna.to_string_with_format(emit)?);
    } else {
        print_tree(&dna)?;
    }
    if opts.hash {
        println!("sha256: {}", dna.content_hash()?);
    }
    Ok(())
}

fn signature(params: &[FnParameter]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.parameter_type))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_tree(dna: &Dna) -> anyhow::Result<()> {
    println!(
        "DNA '{}' version '{}' (spec {}, uuid {})",
        dna.name, dna.version, dna.dna_spec_version, dna.uuid
    );
    if !dna.description.is_empty() {
        println!("  {}", dna.description);
    }

    for zome_name in dna.zome_names() {
        println!("zome {zome_name}");
        let zome = dna.zome(zome_name)?;
        for (type_name, def) in &zome.entry_types {
            println!("  entry_type {type_name} ({:?})", def.sharing);
        }
        for bridge in &zome.bridges {
            println!("  bridge {} ({:?})", bridge.handle, bridge.presence);
        }
        for cap_name in dna.capability_names(zome_name)? {
            let functions = dna.capability_function_names(zome_name, cap_name)?;
            println!("  capability {cap_name}: [{}]", functions.join(", "));
        }
        for fn_name in dna.function_names(zome_name)? {
            let decl = dna.get_function_with_zome_name(zome_name, fn_name)?;
            println!(
                "  fn {fn_name}({}) -> ({})",
                signature(&decl.inputs),
                signature(&decl.outputs)
            );
        }
    }
    Ok(())
}
