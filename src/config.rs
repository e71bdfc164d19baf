use std::path::{Path, PathBuf};

/// Which test runner the project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runner {
    Jest,
    Vitest,
}

impl Runner {
    /// The command prefix the resolved arguments are appended to.
    pub fn command(&self) -> &'static str {
        match self {
            Runner::Jest => "npx jest",
            Runner::Vitest => "npx vitest run",
        }
    }
}

/// Runner and config file discovered for a test file's project.
#[derive(Debug)]
pub struct ProjectConfig {
    pub runner: Runner,
    /// Explicit config file to pass with `-c`, when one exists. A project
    /// configured through package.json needs no explicit config argument.
    pub config_path: Option<PathBuf>,
}

const JEST_CONFIGS: [&str; 5] = [
    "jest.config.js",
    "jest.config.cjs",
    "jest.config.mjs",
    "jest.config.ts",
    "jest.config.json",
];

const VITEST_CONFIGS: [&str; 4] = [
    "vitest.config.ts",
    "vitest.config.js",
    "vitest.config.mts",
    "vitest.config.mjs",
];

/// Walk up from the test file looking for a runner config. Detection order
/// per directory: jest config file, vitest config file, then package.json
/// (devDependencies, test script, inline `"jest"` key). The walk stops at
/// the first directory containing package.json, the project root.
pub fn detect(test_file: &Path) -> ProjectConfig {
    for dir in test_file.ancestors().skip(1) {
        for name in JEST_CONFIGS {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return ProjectConfig {
                    runner: Runner::Jest,
                    config_path: Some(candidate),
                };
            }
        }
        for name in VITEST_CONFIGS {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return ProjectConfig {
                    runner: Runner::Vitest,
                    config_path: Some(candidate),
                };
            }
        }

        let package = dir.join("package.json");
        if package.is_file() {
            return ProjectConfig {
                runner: runner_from_package(&package).unwrap_or(Runner::Jest),
                config_path: None,
            };
        }
    }

    ProjectConfig {
        runner: Runner::Jest,
        config_path: None,
    }
}

/// Read a package.json and decide which runner it declares.
fn runner_from_package(path: &Path) -> Option<Runner> {
    let text = std::fs::read_to_string(path).ok()?;
    let package: serde_json::Value = serde_json::from_str(&text).ok()?;

    for section in ["devDependencies", "dependencies"] {
        if let Some(deps) = package.get(section) {
            if deps.get("vitest").is_some() {
                return Some(Runner::Vitest);
            }
            if deps.get("jest").is_some() {
                return Some(Runner::Jest);
            }
        }
    }

    if let Some(script) = package
        .get("scripts")
        .and_then(|s| s.get("test"))
        .and_then(|t| t.as_str())
    {
        if script.contains("vitest") {
            return Some(Runner::Vitest);
        }
        if script.contains("jest") {
            return Some(Runner::Jest);
        }
    }

    if package.get("jest").is_some() {
        return Some(Runner::Jest);
    }

    None
}
