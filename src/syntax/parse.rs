use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// A parsed module plus the byte offset of the file inside the source map,
/// used to rebase swc spans onto plain offsets into the source string.
pub struct ParsedModule {
    pub module: Module,
    pub base: BytePos,
}

/// Parse JS/TS/JSX/TSX source into an AST.
///
/// Every call uses a fresh `SourceMap` holding exactly one file, so spans can
/// be rebased with a single subtraction.
pub fn parse_tsx_source(code: &str, file_path: &str) -> Result<ParsedModule> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map: Arc<SourceMap> = Default::default();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.to_string());

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedModule {
            module,
            base: source_file.start_pos,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_module() {
        let parsed = parse_tsx_source("const a = '你好';", "test.ts").unwrap();
        assert_eq!(parsed.module.body.len(), 1);
    }

    #[test]
    fn test_parse_tsx() {
        let parsed = parse_tsx_source("const el = <div title=\"hi\">你好</div>;", "test.tsx");
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_parse_error() {
        let parsed = parse_tsx_source("const = = ;", "broken.ts");
        assert!(parsed.is_err());
    }
}
