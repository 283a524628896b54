//! Branchgen - branch code generator
//!
//! Reads a branch definition file and prints the generated code for one
//! role on stdout.
//!
//! # Usage
//!
//! ```bash
//! branchgen muon.def --role element > muon_element.inc
//! ```

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use branchgen::{
    codegen::{DEFAULT_CAPACITY, DEFAULT_RUNTIME_NAMESPACE},
    dsl,
    error::{BranchgenError, Result},
    CodeWriter, Conventions, Emitter, NamingRule, Role, StorageMode,
};

/// Role-aware code generator for columnar branch definitions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the branch definition file
    #[arg(value_name = "DEFINITIONS")]
    definitions: PathBuf,

    /// Class the code is generated for
    #[arg(short, long, value_enum, default_value_t = Role::Storage)]
    role: Role,

    /// Back storage with std::vector instead of a raw array
    #[arg(long)]
    vector: bool,

    /// Namespace of the persistence runtime functions
    #[arg(long, default_value = DEFAULT_RUNTIME_NAMESPACE)]
    namespace: String,

    /// Capacity expression used when allocating storage
    #[arg(long, default_value = DEFAULT_CAPACITY)]
    capacity: String,

    /// Naming-rule block to print after the generated code
    #[arg(long, value_name = "FILE")]
    naming: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries generated code only
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    // Parse the definition file
    let branches = dsl::parse_file(&args.definitions)?;
    info!(
        file = %args.definitions.display(),
        branches = branches.len(),
        role = %args.role,
        "parsed definitions"
    );

    let conventions = Conventions::new()
        .with_runtime_namespace(args.namespace)
        .with_capacity(args.capacity);
    let emitter = Emitter::new(args.role)
        .with_storage_mode(StorageMode::from_vector_flag(args.vector))
        .with_conventions(conventions);

    let mut out = emitter.generate(&branches);

    if let Some(path) = &args.naming {
        let file = File::open(path).map_err(|e| BranchgenError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let rule = NamingRule::read(&mut BufReader::new(file))?;
        write_naming(&rule, &mut out);
    }

    io::stdout().write_all(out.as_str().as_bytes())?;

    Ok(())
}

fn write_naming(rule: &NamingRule, out: &mut CodeWriter) {
    out.line("// naming: parse");
    rule.write_parse(out);
    out.line("// naming: generate");
    rule.write_generate(out);
}
