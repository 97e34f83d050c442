//! Node classification.
//!
//! Decides, for one node, whether it is pure static text, a pure variable
//! reference, or a composed expression, and recursively decomposes the
//! composed case into a placeholder template plus ordered parameters.
//!
//! The three cases are tried in a fixed priority order; a node matching none
//! of them is an *unresolved shape* — a reportable failure distinct from
//! "this subtree has no translatable content" (`Ok(None)`), so the caller can
//! skip the whole root instead of partially rewriting it.

use thiserror::Error;

use crate::config::Interpolation;
use crate::syntax::{NodeId, NodeKind, SyntaxTree, TextRange};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("cannot resolve expression shape `{kind}`")]
    UnresolvedShape { kind: &'static str, range: TextRange },
}

/// One classified subtree: the template text accumulated so far and the
/// parameters backing its placeholders, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub template: String,
    pub params: Vec<Param>,
}

/// A generated placeholder name paired with the verbatim source text of the
/// expression it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub source: String,
}

impl Fragment {
    fn text(template: String) -> Self {
        Self {
            template,
            params: Vec::new(),
        }
    }

    /// Concatenate in encounter order; placeholder order in the template
    /// stays aligned with parameter order.
    pub fn concat(mut self, other: Fragment) -> Fragment {
        self.template.push_str(&other.template);
        self.params.extend(other.params);
        self
    }
}

/// Generates run-unique placeholder names (`val0`, `val1`, ...). Uniqueness
/// scope is one root expression; every build starts from a fresh generator.
#[derive(Debug, Default)]
pub struct PlaceholderNames {
    next: usize,
}

impl PlaceholderNames {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_name(&mut self) -> String {
        let name = format!("val{}", self.next);
        self.next += 1;
        name
    }
}

/// Classify one node.
///
/// Returns `Ok(None)` when the subtree legitimately has no translatable
/// content (JSX empty expression), `Ok(Some(..))` with the decomposition
/// otherwise, and an error for shapes the engine does not understand.
pub fn classify(
    tree: &SyntaxTree,
    id: NodeId,
    interp: &Interpolation,
    names: &mut PlaceholderNames,
) -> Result<Option<Fragment>, ClassifyError> {
    let id = unwrap_parens(tree, id);

    match tree.kind(id) {
        NodeKind::JsxEmptyExpr => return Ok(None),
        NodeKind::JsxExprContainer => {
            // A bare expression container is invisible; classify its inner
            // expression. An empty container has a JsxEmptyExpr child.
            let Some(&inner) = tree.node(id).children.first() else {
                return Ok(None);
            };
            return classify(tree, inner, interp, names);
        }
        _ => {}
    }

    if let Some(fragment) = static_case(tree, id) {
        return Ok(Some(fragment));
    }
    if let Some(fragment) = variable_case(tree, id, interp, names) {
        return Ok(Some(fragment));
    }
    if let Some(fragment) = dynamic_case(tree, id, interp, names)? {
        return Ok(Some(fragment));
    }

    Err(ClassifyError::UnresolvedShape {
        kind: tree.kind(id).label(),
        range: tree.node(id).range,
    })
}

/// Parentheses are structural glue; classification always sees through them.
fn unwrap_parens(tree: &SyntaxTree, mut id: NodeId) -> NodeId {
    while let NodeKind::Paren = tree.kind(id) {
        match tree.node(id).children.first() {
            Some(&inner) => id = inner,
            None => break,
        }
    }
    id
}

fn static_case(tree: &SyntaxTree, id: NodeId) -> Option<Fragment> {
    match tree.kind(id) {
        NodeKind::StrLit { value } | NodeKind::JsxText { value } => {
            Some(Fragment::text(value.trim().to_string()))
        }
        _ => None,
    }
}

fn variable_case(
    tree: &SyntaxTree,
    id: NodeId,
    interp: &Interpolation,
    names: &mut PlaceholderNames,
) -> Option<Fragment> {
    let is_variable = match tree.kind(id) {
        NodeKind::Ident { .. }
        | NodeKind::Member
        | NodeKind::Call { .. }
        | NodeKind::Logical
        | NodeKind::Cond => true,
        // Arithmetic only: `+` is ambiguous between numbers and string
        // concatenation and belongs to the dynamic case.
        NodeKind::Bin { op } => op.is_arithmetic_variable(),
        _ => false,
    };
    if !is_variable {
        return None;
    }

    let name = names.next_name();
    let template = format!("{}{}{}", interp.prefix, name, interp.suffix);
    Some(Fragment {
        template,
        params: vec![Param {
            name,
            source: tree.source_of(id).to_string(),
        }],
    })
}

fn dynamic_case(
    tree: &SyntaxTree,
    id: NodeId,
    interp: &Interpolation,
    names: &mut PlaceholderNames,
) -> Result<Option<Fragment>, ClassifyError> {
    match tree.kind(id) {
        NodeKind::Bin {
            op: crate::syntax::BinOp::Add,
        } => {
            // Recurse into both operands; nested `+` chains recurse rather
            // than flatten, preserving source associativity.
            let children = &tree.node(id).children;
            let (left, right) = (children[0], children[1]);
            let left = classify(tree, left, interp, names)?;
            let right = classify(tree, right, interp, names)?;
            Ok(match (left, right) {
                (Some(l), Some(r)) => Some(l.concat(r)),
                (Some(f), None) | (None, Some(f)) => Some(f),
                (None, None) => None,
            })
        }
        NodeKind::TplStr { quasis, exprs } => {
            let mut fragment = Fragment::default();
            for (idx, quasi) in quasis.iter().enumerate() {
                fragment.template.push_str(quasi);
                if let Some(&expr) = exprs.get(idx) {
                    let name = names.next_name();
                    fragment
                        .template
                        .push_str(&format!("{}{}{}", interp.prefix, name, interp.suffix));
                    fragment.params.push(Param {
                        name,
                        source: tree.source_of(expr).to_string(),
                    });
                }
            }
            Ok(Some(fragment))
        }
        _ => Ok(None),
    }
}
