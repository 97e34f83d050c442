//! Template building and normalization.
//!
//! Builds one placeholder template (plus ordered parameters) out of a root
//! expression, which is either a single node or an ordered run of JSX
//! sibling nodes that together form one translatable unit.

use crate::config::Interpolation;
use crate::syntax::{NodeId, SyntaxTree};

use super::classify::{ClassifyError, Fragment, PlaceholderNames, classify};

/// Build the combined fragment for a root expression.
///
/// A single node delegates to the classifier; a sibling run classifies each
/// node independently and concatenates in list order. Any individual failure
/// fails the whole build — there is no partial extraction; the caller falls
/// back to treating siblings independently.
pub fn build(
    tree: &SyntaxTree,
    nodes: &[NodeId],
    interp: &Interpolation,
) -> Result<Option<Fragment>, ClassifyError> {
    let mut names = PlaceholderNames::new();
    let mut merged: Option<Fragment> = None;
    for &id in nodes {
        if let Some(fragment) = classify(tree, id, interp, &mut names)? {
            merged = Some(match merged {
                Some(acc) => acc.concat(fragment),
                None => fragment,
            });
        }
    }
    Ok(merged)
}

/// Normalize a built template: collapse all whitespace to nothing and strip
/// one trailing ASCII or full-width colon.
///
/// This is definitional, not cosmetic — normalized templates determine key
/// identity across runs, so the exact same transform must be applied every
/// scan for round-trip stability.
pub fn normalize_template(template: &str) -> String {
    let collapsed: String = template.chars().filter(|c| !c.is_whitespace()).collect();
    collapsed
        .strip_suffix(':')
        .or_else(|| collapsed.strip_suffix('：'))
        .map(str::to_string)
        .unwrap_or(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_collapses_whitespace_to_nothing() {
        assert_eq!(normalize_template("你 好\n世  界"), "你好世界");
        assert_eq!(normalize_template("你好　世界"), "你好世界"); // full-width space
    }

    #[test]
    fn test_normalize_strips_one_trailing_colon() {
        assert_eq!(normalize_template("姓名:"), "姓名");
        assert_eq!(normalize_template("姓名："), "姓名");
        assert_eq!(normalize_template("姓名::"), "姓名:");
        assert_eq!(normalize_template("时间:8:00"), "时间:8:00");
    }

    #[test]
    fn test_normalize_keeps_placeholders() {
        assert_eq!(normalize_template("共 {val0} 条："), "共{val0}条");
    }
}
