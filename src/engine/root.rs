//! Root-boundary resolution.
//!
//! Walks upward from a text-bearing leaf to the outermost ancestor that must
//! be replaced as one unit. An *absorbing* parent shape terminates the walk
//! because replacing at that boundary keeps the surrounding code's structural
//! expectations intact (a call keeps its argument shape, an object keeps its
//! property shape). Everything else is transparent glue — an intermediate `+`
//! link, a parenthesized subexpression — and gets absorbed into the unit.

use thiserror::Error;

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RootError {
    /// The walk reached the top of the file without hitting an absorbing
    /// ancestor. The caller must leave the node untouched and report it,
    /// never fabricate a root.
    #[error("no enclosing extraction boundary found")]
    NoRootFound,
    /// The starting node has no parent chain at all. Well-formed lowering
    /// never produces this.
    #[error("detached node has no parent chain")]
    DetachedNode,
}

/// Find the root expression for `start`: the last node on the upward walk
/// before the first absorbing ancestor.
pub fn find_root(tree: &SyntaxTree, start: NodeId) -> Result<NodeId, RootError> {
    let mut current = start;
    let Some(mut parent) = tree.parent(current) else {
        return Err(RootError::DetachedNode);
    };

    loop {
        if is_absorbing(tree.kind(parent)) {
            return Ok(current);
        }
        current = parent;
        match tree.parent(current) {
            Some(next) => parent = next,
            None => return Err(RootError::NoRootFound),
        }
    }
}

/// The fixed set of parent shapes where a translatable unit must end.
pub fn is_absorbing(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::ObjectProp
        | NodeKind::Cond
        | NodeKind::VarDeclarator
        | NodeKind::Assign
        | NodeKind::Return
        | NodeKind::JsxExprContainer
        | NodeKind::JsxAttr
        | NodeKind::Array
        | NodeKind::Call { .. }
        | NodeKind::New { .. }
        | NodeKind::AssignPat
        | NodeKind::Logical
        | NodeKind::ClassProp
        | NodeKind::SwitchStmt
        | NodeKind::SwitchCase
        | NodeKind::Arrow => true,
        NodeKind::Bin { op } => op.breaks_root(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lower, parse_tsx_source, SyntaxTree};

    fn tree_of(src: &str) -> SyntaxTree {
        let parsed = parse_tsx_source(src, "test.tsx").unwrap();
        lower(&parsed, src, "test.tsx")
    }

    #[test]
    fn test_call_argument_absorbs_whole_concat() {
        let src = "foo('你好' + name);";
        let tree = tree_of(src);
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(tree.source_of(root), "'你好' + name");
        assert!(matches!(tree.kind(root), NodeKind::Bin { .. }));
    }

    #[test]
    fn test_plain_string_argument_is_its_own_root() {
        let tree = tree_of("foo('你好');");
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(root, lit);
    }

    #[test]
    fn test_comparison_operator_breaks_root() {
        let tree = tree_of("if (status === '完成') { run(); }");
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(root, lit);
    }

    #[test]
    fn test_variable_initializer_absorbs_concat() {
        let tree = tree_of("const s = '你好' + name + '再见';");
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(tree.source_of(root), "'你好' + name + '再见'");
    }

    #[test]
    fn test_no_root_for_bare_expression_statement() {
        let tree = tree_of("'你好';");
        let lit = tree.candidates()[0];
        assert_eq!(find_root(&tree, lit), Err(RootError::NoRootFound));
    }

    #[test]
    fn test_default_parameter_value() {
        let tree = tree_of("function f(msg = '默认') {}");
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(root, lit);
    }

    #[test]
    fn test_arrow_concise_body() {
        let tree = tree_of("const f = (v) => '共' + v + '条';");
        let lit = tree.candidates()[0];
        let root = find_root(&tree, lit).unwrap();
        assert_eq!(tree.source_of(root), "'共' + v + '条'");
    }
}
