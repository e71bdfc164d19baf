use std::path::Path;

use tree_sitter::{Language, Tree};

use crate::error::PickError;

/// Detect the tree-sitter language from a file extension.
pub fn detect_language(ext: &str) -> Result<Language, PickError> {
    match ext {
        "tsx" | "jsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => {
            Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        }
        _ => Err(PickError::UnsupportedExtension(ext.to_string())),
    }
}

/// Parse source text with the given language.
pub fn parse_source(source: &str, language: &Language) -> Result<Tree, PickError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(language)
        .map_err(|e| PickError::ParseFailed(e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| PickError::ParseFailed("parser returned no tree".to_string()))
}

/// Read and parse a source file, returning the tree-sitter tree and source text.
pub fn parse_file(path: &Path) -> Result<(Tree, String), PickError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let source = std::fs::read_to_string(path).map_err(|e| PickError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let language = detect_language(ext)?;
    let tree = parse_source(&source, &language)?;

    Ok((tree, source))
}
