// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! mtab CLI - link a JSON class hierarchy and inspect its method tables.

mod output;

use std::env;
use std::process;

use mtab_core::{BuildOptions, LinkageErrorKind, MirandaKind, Resolved, Tables, TypeFacts};
use mtab_model::{ClassRef, MethodRef, ModelError, Universe};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    output::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "tables" => {
            let cmd = parse_args(&args[2..], true)
                .unwrap_or_else(|msg| usage_error(&msg, "mtab tables <file> [class] [flags]"));
            cmd_tables(&cmd);
        }
        "check" => {
            let cmd = parse_args(&args[2..], false)
                .unwrap_or_else(|msg| usage_error(&msg, "mtab check <file> [flags]"));
            cmd_check(&cmd);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("mtab {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("{}: unknown command: {}", output::error_label(), other);
            print_usage();
            process::exit(1);
        }
    }
}

/// Log filter from `MTAB_LOG`, then `RUST_LOG`, else warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_env("MTAB_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        "{} {} - method table builder",
        output::title("mtab"),
        output::version(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!("Usage: mtab <command> [args]");
    println!();
    println!("Commands:");
    println!(
        "  {} {} [{}]  Print vtables, itables and mirandas",
        output::command("tables"),
        output::arg("<file>"),
        output::arg("class")
    );
    println!(
        "  {} {}           Link every class and report failures",
        output::command("check"),
        output::arg("<file>")
    );
    println!("  {}                   Show this help", output::command("help"));
    println!("  {}                Show version", output::command("version"));
    println!();
    println!("Flags:");
    println!("  --verbose-slots      Give every declared method its own slot");
    println!("  --private-interface  Let private methods implement interface methods");
    println!("  --no-mirandas        Keep mirandas out of the vtable");
    println!();
    println!("Set MTAB_LOG=debug (or trace) to log table construction.");
}

fn usage_error(msg: &str, usage: &str) -> ! {
    eprintln!("{}: {}", output::error_label(), msg);
    eprintln!("Usage: {}", usage);
    process::exit(1);
}

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Default)]
struct Flags {
    verbose_slots: bool,
    private_interface: bool,
    no_mirandas: bool,
}

impl Flags {
    /// Flags override what the hierarchy file asks for.
    fn apply(&self, mut options: BuildOptions) -> BuildOptions {
        if self.verbose_slots {
            options = options.with_verbose(true);
        }
        if self.private_interface {
            options = options.with_private_interface_resolution(true);
        }
        if self.no_mirandas {
            options = options.with_materialized_mirandas(false);
        }
        options
    }
}

#[derive(Debug)]
struct CommandArgs {
    file: String,
    class: Option<String>,
    flags: Flags,
}

fn parse_args(args: &[String], allow_class: bool) -> Result<CommandArgs, String> {
    let mut flags = Flags::default();
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--verbose-slots" => flags.verbose_slots = true,
            "--private-interface" => flags.private_interface = true,
            "--no-mirandas" => flags.no_mirandas = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {}", flag)),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let file = positional.next().ok_or("missing hierarchy file")?;
    let class = if allow_class { positional.next() } else { None };
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {}", extra));
    }
    Ok(CommandArgs { file, class, flags })
}

fn load(cmd: &CommandArgs) -> Universe {
    debug!(file = %cmd.file, "loading hierarchy");
    match Universe::load(&cmd.file) {
        Ok(universe) => {
            let options = cmd.flags.apply(universe.options());
            universe.with_options(options)
        }
        Err(e) => {
            report_error(&e);
            process::exit(1);
        }
    }
}

fn report_error(e: &ModelError) {
    eprintln!("{}: {}", output::error_label(), e);
    if let Some(kind) = e.kind() {
        let raised = match kind {
            LinkageErrorKind::IncompatibleClassChange => "incompatible class change",
            LinkageErrorKind::AbstractMethod => "abstract method error",
        };
        eprintln!("  {} {}: raises {}", output::hint_equals(), output::note_label(), raised);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_tables(cmd: &CommandArgs) {
    let universe = load(cmd);
    let names: Vec<String> = match &cmd.class {
        Some(name) => vec![name.clone()],
        None => universe.classes().map(|c| c.name().to_string()).collect(),
    };

    let mut failures = 0;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let printed = universe
            .class(name)
            .and_then(|class| universe.tables(name).map(|tables| print_tables(class, &tables)));
        if let Err(e) = printed {
            report_error(&e);
            failures += 1;
        }
    }
    if failures > 0 {
        process::exit(1);
    }
}

fn cmd_check(cmd: &CommandArgs) {
    let universe = load(cmd);
    let errors = universe.link_all();
    for e in &errors {
        report_error(e);
    }
    if errors.is_empty() {
        println!("{} ({} types)", output::banner_ok("Link"), universe.len());
    } else {
        println!("{}", output::banner_fail("Link", errors.len()));
        process::exit(1);
    }
}

fn print_tables(class: ClassRef<'_>, tables: &Tables<ClassRef<'_>>) {
    let kind = if class.is_interface() { "interface" } else { "class" };
    let mut header = output::type_header(kind, class.name());
    if !class.package().is_empty() {
        header.push_str(&format!(" {}", output::package(class.package())));
    }
    if let Some(superclass) = class.superclass() {
        header.push_str(&format!(" extends {}", superclass.name()));
    }
    println!("{}", header);

    if class.is_interface() {
        print_slots("table", tables.vtable());
        return;
    }
    print_slots("vtable", tables.vtable());
    for (interface, slots) in tables.itables() {
        print_slots(&format!("itable {}", interface.name()), slots);
    }
    if !tables.mirandas().is_empty() {
        println!("  {} ({})", output::section_header("mirandas"), tables.mirandas().len());
        for entry in tables.mirandas() {
            println!("    {}  {}", entry.method(), output::miranda_kind(entry.miranda_kind()));
        }
    }
}

fn print_slots(title: &str, slots: &[Resolved<MethodRef<'_>>]) {
    println!("  {} ({} slots)", output::section_header(title), slots.len());
    for (index, entry) in slots.iter().enumerate() {
        match entry.miranda_kind() {
            MirandaKind::Default => println!("    {}  {}", output::slot_index(index), entry.method()),
            kind => println!(
                "    {}  {}  {}",
                output::slot_index(index),
                entry.method(),
                output::kind_tag(kind)
            ),
        }
    }
}
