//! Detection of imports from a `nameof` macro module.
//!
//! `import alias from "ts-nameof.macro"` makes `alias` the marker for the
//! file. The import itself only exists for the build step and is dropped
//! from the output.

use nameof_ast::*;

/// One import binding a marker alias.
#[derive(Debug, Clone, Copy)]
pub struct MacroImport<'a> {
    pub alias: &'a str,
    pub declaration: &'a ImportDeclaration<'a>,
}

struct MacroImportScanner<'m, 'a> {
    macro_modules: &'m [String],
    found: Vec<MacroImport<'a>>,
}

impl<'m, 'a> AstVisitor<'a> for MacroImportScanner<'m, 'a> {
    fn visit_import_declaration(&mut self, node: &'a ImportDeclaration<'a>) {
        if !self.macro_modules.iter().any(|module| module == node.module_specifier.text) {
            return;
        }
        let Some(ref clause) = node.import_clause else {
            return;
        };
        if clause.is_type_only {
            return;
        }
        if let Some(ref name) = clause.name {
            self.found.push(MacroImport {
                alias: name.text,
                declaration: node,
            });
        }
        if let Some(NamedImportBindings::NamedImports(specifiers)) = clause.named_bindings {
            for specifier in specifiers.iter().filter(|specifier| !specifier.is_type_only) {
                self.found.push(MacroImport {
                    alias: specifier.name.text,
                    declaration: node,
                });
            }
        }
    }
}

/// Every value import of one of `macro_modules` in `source_file`, in
/// source order.
pub fn find_macro_imports<'a>(source_file: &'a SourceFile<'a>, macro_modules: &[String]) -> Vec<MacroImport<'a>> {
    if macro_modules.is_empty() {
        return Vec::new();
    }
    let mut scanner = MacroImportScanner {
        macro_modules,
        found: Vec::new(),
    };
    scanner.visit_source_file(source_file);
    scanner.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use nameof_parser::parse_source_text;

    fn modules() -> Vec<String> {
        vec!["ts-nameof.macro".to_string()]
    }

    #[test]
    fn test_default_import_alias() {
        let arena = Bump::new();
        let source = "import nm from \"ts-nameof.macro\";\nimport other from \"other\";\nnm(x);";
        let file = parse_source_text(&arena, "a.ts", source).source_file;
        let found = find_macro_imports(file, &modules());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].alias, "nm");
    }

    #[test]
    fn test_named_import_alias() {
        let arena = Bump::new();
        let source = "import { nameof as n } from 'ts-nameof.macro';";
        let file = parse_source_text(&arena, "a.ts", source).source_file;
        let found = find_macro_imports(file, &modules());
        assert_eq!(found.iter().map(|m| m.alias).collect::<Vec<_>>(), vec!["n"]);
    }

    #[test]
    fn test_type_only_and_unrelated_imports_are_ignored() {
        let arena = Bump::new();
        let source = "import type nm from \"ts-nameof.macro\";\nimport nameof from \"nameof\";";
        let file = parse_source_text(&arena, "a.ts", source).source_file;
        assert!(find_macro_imports(file, &modules()).is_empty());
        assert!(find_macro_imports(file, &[]).is_empty());
    }
}
