use std::path::Path;

/// Shell and path conventions of the terminal the command will run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Posix,
    Windows,
}

/// Convert path separators to the form the runner expects. Jest matches
/// paths with forward slashes even on Windows.
pub fn normalize_path(path: &str, shell: Shell) -> String {
    match shell {
        Shell::Windows => path.replace('\\', "/"),
        Shell::Posix => path.to_string(),
    }
}

/// Escape regex metacharacters in a path argument. The runner treats the
/// path position as a regex too, but `/` and `\` are left alone because the
/// path has already been separator-normalized.
pub fn escape_regex_for_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(
            c,
            '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap an argument in the quote character the destination shell honors.
pub fn quote(arg: &str, shell: Shell) -> String {
    match shell {
        Shell::Windows => format!("\"{arg}\""),
        Shell::Posix => format!("'{arg}'"),
    }
}

/// Make a single-quoted POSIX argument safe when the text itself contains
/// single quotes. cmd.exe double quoting needs no such escape.
pub fn escape_single_quotes(arg: &str, shell: Shell) -> String {
    match shell {
        Shell::Posix => arg.replace('\'', "'\\''"),
        Shell::Windows => arg.to_string(),
    }
}

/// Assemble the runner argument vector: escaped file path, `-c <config>`
/// when a config file was discovered, `-t <name>` when a test name
/// resolved, then any extra options with duplicates dropped.
pub fn build_runner_args(
    file: &Path,
    config: Option<&Path>,
    test_name: Option<&str>,
    options: &[String],
    shell: Shell,
) -> Vec<String> {
    let mut args = Vec::new();

    let file_arg = escape_regex_for_path(&normalize_path(&file.to_string_lossy(), shell));
    args.push(quote(&file_arg, shell));

    if let Some(config) = config {
        args.push("-c".to_string());
        let config_arg = normalize_path(&config.to_string_lossy(), shell);
        args.push(quote(&config_arg, shell));
    }

    if let Some(name) = test_name {
        args.push("-t".to_string());
        args.push(quote(&escape_single_quotes(name, shell), shell));
    }

    // Duplicates are dropped among the options themselves only; an option
    // that happens to equal an already-emitted token (say `-t`) still goes
    // through.
    let options_start = args.len();
    for option in options {
        if !args[options_start..].iter().any(|a| a == option) {
            args.push(option.clone());
        }
    }

    args
}
