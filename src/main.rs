//! `jestpick` — Resolve the test under a cursor line to a runnable
//! Jest/Vitest invocation.
//!
//! Parses a TypeScript/JavaScript test file with tree-sitter, builds the
//! tree of `describe`/`it`/`test` declarations, finds the innermost one
//! containing the cursor line, and prints its fully-qualified name as a
//! `-t` filter inside a ready-to-run command. When no declaration contains
//! the line, the command targets the whole file.

mod command;
mod config;
mod discover;
mod error;
mod locate;
mod model;
mod parser;
mod resolve;
mod selection;
mod util;

use std::path::Path;

use command::Shell;
use error::PickError;
use model::TreeView;

struct CliArgs {
    line: Option<usize>,
    selection: Option<String>,
    name_only: bool,
    tree: bool,
    windows: bool,
    file: Option<String>,
    options: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut line: Option<usize> = None;
    let mut selection: Option<String> = None;
    let mut name_only = false;
    let mut tree = false;
    let mut windows = false;
    let mut file: Option<String> = None;
    let mut options = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--line" | "-l" => {
                i += 1;
                if i >= args.len() {
                    return Err("--line requires a number argument".to_string());
                }
                let n: usize = args[i]
                    .parse()
                    .map_err(|_| format!("--line: invalid number '{}'", args[i]))?;
                if n == 0 {
                    return Err("--line: lines are 1-based".to_string());
                }
                line = Some(n);
            }
            "--selection" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("--selection requires a text argument".to_string());
                }
                selection = Some(args[i].clone());
            }
            "--name-only" => name_only = true,
            "--tree" => tree = true,
            "--windows" => windows = true,
            "--" => {
                options.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            _ => {
                if file.is_some() {
                    return Err("only one file may be given".to_string());
                }
                file = Some(args[i].clone());
            }
        }
        i += 1;
    }

    if line.is_some() && selection.is_some() {
        return Err("--line and --selection are mutually exclusive".to_string());
    }

    if tree && selection.is_some() {
        return Err("--tree and --selection are mutually exclusive".to_string());
    }

    if file.is_none() && selection.is_none() {
        return Err("no file specified".to_string());
    }

    if file.is_none() && !name_only {
        return Err("--selection without a file requires --name-only".to_string());
    }

    Ok(CliArgs {
        line,
        selection,
        name_only,
        tree,
        windows,
        file,
        options,
    })
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    if raw.is_empty() || raw[0] == "-h" || raw[0] == "--help" {
        print_help();
        std::process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("jestpick: {msg}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("jestpick: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), PickError> {
    if args.tree {
        let path = Path::new(args.file.as_deref().unwrap_or_default());
        let (tree, source) = parser::parse_file(path)?;
        let root = discover::build(&tree, &source);
        print!("{}", TreeView(&root));
        if let Some(line) = args.line {
            match locate::locate(&root, line) {
                Some(node) => println!("line {line}: {:?}", node.name),
                None => println!("line {line}: no enclosing test"),
            }
        }
        return Ok(());
    }

    let test_name = find_test_name(args)?;

    if args.name_only {
        if let Some(name) = &test_name {
            println!("{name}");
        }
        return Ok(());
    }

    let file = Path::new(args.file.as_deref().unwrap_or_default());
    let shell = if args.windows {
        Shell::Windows
    } else {
        Shell::Posix
    };

    let project = config::detect(file);
    let runner_args = command::build_runner_args(
        file,
        project.config_path.as_deref(),
        test_name.as_deref(),
        &args.options,
        shell,
    );

    println!("{} {}", project.runner.command(), runner_args.join(" "));
    Ok(())
}

/// The name filter for this invocation: the normalized selection when one
/// was given, otherwise the resolved name at the cursor line. None means
/// run the whole file; an unparsable file degrades to the same fallback.
fn find_test_name(args: &CliArgs) -> Result<Option<String>, PickError> {
    if let Some(selection) = &args.selection {
        return Ok(Some(
            selection::normalize_selection_text(selection).to_string(),
        ));
    }

    let Some(line) = args.line else {
        return Ok(None);
    };

    let path = Path::new(args.file.as_deref().unwrap_or_default());
    let source = std::fs::read_to_string(path).map_err(|e| PickError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let resolved = parser::detect_language(ext)
        .and_then(|language| resolve::resolve_test_name_at_line(&source, &language, line));

    match resolved {
        Ok(name) => Ok(name),
        Err(e) => {
            eprintln!("jestpick: {e}; running the whole file");
            Ok(None)
        }
    }
}

fn print_help() {
    eprintln!("jestpick — Resolve the test under a cursor line to a runnable command");
    eprintln!("Usage: jestpick [options] <file> [-- <runner options>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --line N, -l N       Resolve the test at 1-based line N");
    eprintln!("  --selection TEXT     Use TEXT as the test name (skips parsing)");
    eprintln!("  --name-only          Print only the resolved name");
    eprintln!("  --tree               Print the discovered declaration tree");
    eprintln!("  --windows            Windows path and quoting conventions");
    eprintln!("  -h, --help           Show help");
    eprintln!();
    eprintln!("Without --line or --selection the command targets the whole file.");
}
