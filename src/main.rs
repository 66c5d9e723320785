// SPDX-License-Identifier: MIT
//
// quill — a pluggable text-buffer front-end demo.
//
// This binary stands in for the editor front-end: it wires the crates
// together the way an embedding editor would:
//
//   quill-buffer → capability flags, backend registry, dispatch facade
//   quill-rope   → the rope storage backend (ropey)
//
// Every byte of file content flows through the facade — the binary never
// touches a backend directly. Construction failures surface as `[error]:`
// diagnostics on stderr, the operator-facing channel.
//
// Usage:
//
//   quill [-b BACKEND] [-n LINES] FILE
//
// Reads FILE, opens a buffer through the chosen backend (default: rope),
// and prints the first LINES lines (default: 10) followed by a summary.

use std::env;
use std::fs;
use std::process;

use quill_buffer::facade::{self, OpenError};
use quill_buffer::registry::Registry;
use quill_rope::ROPE;

/// Every storage backend this build links. Fixed at process start;
/// resolution is by exact name.
static BACKENDS: Registry = Registry::new(&[&ROPE]);

/// Default number of lines to print when `-n` is not given.
const DEFAULT_LINES: usize = 10;

struct Args {
    backend: String,
    lines: usize,
    path: String,
}

fn usage() -> ! {
    eprintln!("usage: quill [-b BACKEND] [-n LINES] FILE");
    process::exit(2);
}

fn parse_args() -> Args {
    let mut backend = String::from("rope");
    let mut lines = DEFAULT_LINES;
    let mut path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-b" | "--backend" => {
                let Some(name) = args.next() else { usage() };
                backend = name;
            }
            "-n" | "--lines" => {
                let Some(value) = args.next() else { usage() };
                lines = value.parse().unwrap_or_else(|_| {
                    eprintln!("quill: invalid line count: '{value}'");
                    process::exit(2);
                });
            }
            "-h" | "--help" => usage(),
            _ if path.is_none() => path = Some(arg),
            _ => usage(),
        }
    }

    let Some(path) = path else { usage() };
    Args {
        backend,
        lines,
        path,
    }
}

fn main() {
    let args = parse_args();

    let text = fs::read_to_string(&args.path).unwrap_or_else(|e| {
        eprintln!("quill: {}: {e}", args.path);
        process::exit(1);
    });

    let buf = match facade::open_text(&BACKENDS, &args.backend, &text) {
        Ok(buf) => buf,
        Err(e) => {
            eprintln!("[error]: {e}");
            if matches!(e, OpenError::UnknownBackend(_)) {
                let names: Vec<_> = BACKENDS.names().collect();
                eprintln!("available backends: {}", names.join(", "));
            }
            process::exit(1);
        }
    };

    let mut lines = Vec::new();
    let shown = facade::read_lines(Some(&buf), 0, args.lines, &mut lines);
    for line in &lines {
        println!("{line}");
    }

    let chars = facade::len(Some(&buf));
    println!(
        "── {} · {chars} chars · first {shown} line(s) via '{}' ──",
        args.path,
        buf.backend_name()
    );

    facade::close(Some(buf));
}
