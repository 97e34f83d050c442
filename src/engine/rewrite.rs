//! The per-file rewrite coordinator.
//!
//! Drives the pipeline for every candidate node: skip if already converted
//! or excluded, resolve the root expression, build its template, allocate a
//! key, and record the span replacement. Edits are applied once the whole
//! file has been traversed; a classification failure abandons only the root
//! expression it belongs to.

use anyhow::Result;
use regex::Regex;
use thiserror::Error;

use crate::config::{CommentMode, Config};
use crate::store::{ResourceStore, TranslationEntry};
use crate::syntax::{NodeId, NodeKind, Slot, SyntaxTree, TextRange, lower, parse_tsx_source};
use crate::utils::has_chinese;

use super::classify::{ClassifyError, Fragment, Param};
use super::edits::EditSet;
use super::root::{RootError, find_root};
use super::template::{build, normalize_template};

/// Replacing a node in a syntactic position the coordinator has no rule for
/// would emit invalid code; this aborts the file instead.
#[derive(Debug, Error)]
#[error("unsupported replacement context at {file}:{line}:{col}: {snippet}")]
pub struct UnsupportedContext {
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub snippet: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A node shape the classifier does not recognize inside an otherwise
    /// translatable unit; the root was skipped.
    UnresolvedExpression,
    /// The upward walk reached the top of the file without a boundary.
    NoRootFound,
}

/// A non-fatal, per-node diagnostic with its source location.
#[derive(Debug, Clone)]
pub struct RewriteWarning {
    pub kind: WarningKind,
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

/// Result of rewriting one file.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// Rewritten source, or `None` when nothing was extracted.
    pub code: Option<String>,
    /// Entries allocated during this file, in extraction order.
    pub entries: Vec<(String, TranslationEntry)>,
    pub warnings: Vec<RewriteWarning>,
}

/// Run the whole pipeline over one file's source.
///
/// The store is only used for key allocation here; merging the returned
/// entries into the persisted data is the caller's responsibility, so a
/// dry run can discard them.
pub fn rewrite_source(
    source: &str,
    file: &str,
    config: &Config,
    date_patterns: &[Regex],
    store: &mut ResourceStore,
) -> Result<RewriteOutcome> {
    let parsed = parse_tsx_source(source, file)?;
    let tree = lower(&parsed, source, file);

    let mut rewriter = Rewriter {
        tree: &tree,
        config,
        date_patterns,
        store,
        edits: EditSet::default(),
        entries: Vec::new(),
        warnings: Vec::new(),
    };

    for &candidate in tree.candidates() {
        rewriter.visit_candidate(candidate)?;
    }

    let Rewriter {
        edits,
        entries,
        warnings,
        ..
    } = rewriter;

    let code = if edits.is_empty() {
        None
    } else {
        Some(edits.apply(source))
    };
    Ok(RewriteOutcome {
        code,
        entries,
        warnings,
    })
}

struct Rewriter<'a> {
    tree: &'a SyntaxTree,
    config: &'a Config,
    date_patterns: &'a [Regex],
    store: &'a mut ResourceStore,
    edits: EditSet,
    entries: Vec<(String, TranslationEntry)>,
    warnings: Vec<RewriteWarning>,
}

impl Rewriter<'_> {
    fn visit_candidate(&mut self, candidate: NodeId) -> Result<()> {
        // Leaves under an already-extracted root are inside its replacement
        // span; nothing left to do for them.
        if self.edits.covers(self.tree.node(candidate).range) {
            return Ok(());
        }
        if self.is_transformed(candidate) {
            return Ok(());
        }
        if self.is_excluded(candidate) {
            return Ok(());
        }

        match self.tree.kind(candidate) {
            NodeKind::JsxText { .. } => self.visit_jsx_text(candidate),
            _ => self.visit_string_like(candidate),
        }
    }

    /// String and template literals resolve their root upward; JSX text has
    /// no unambiguous syntactic start and is handled by `visit_jsx_text`.
    fn visit_string_like(&mut self, candidate: NodeId) -> Result<()> {
        match find_root(self.tree, candidate) {
            Ok(root) => self.extract_root(root),
            Err(RootError::NoRootFound) => {
                self.warn(
                    WarningKind::NoRootFound,
                    "no extraction boundary found".to_string(),
                    candidate,
                );
                Ok(())
            }
            Err(RootError::DetachedNode) => {
                anyhow::bail!(
                    "internal error: detached node at {}:{}",
                    self.tree.file(),
                    self.tree.node(candidate).range.start
                )
            }
        }
    }

    fn visit_jsx_text(&mut self, candidate: NodeId) -> Result<()> {
        if !self.config.fuse_jsx_children {
            return self.extract_root(candidate);
        }

        // Fuse adjacent text and expression children into one unit when the
        // enclosing element mixes Chinese text with variables and has no
        // nested element splitting the run.
        let element = self
            .tree
            .ancestor(candidate, |k| matches!(k, NodeKind::JsxElement));
        if let Some(element) = element {
            let children: Vec<NodeId> = self
                .tree
                .node(element)
                .children
                .iter()
                .copied()
                .filter(|&c| matches!(self.tree.node(c).slot, Slot::Child(_)))
                .collect();

            let has_child_element = children.iter().any(|&c| {
                matches!(
                    self.tree.kind(c),
                    NodeKind::JsxElement | NodeKind::JsxFragment
                )
            });
            let has_chinese_text = children.iter().any(|&c| {
                matches!(self.tree.kind(c), NodeKind::JsxText { value } if has_chinese(value))
            });
            let has_variable = children
                .iter()
                .any(|&c| matches!(self.tree.kind(c), NodeKind::JsxExprContainer));

            // An expression child may already contain an extracted root; a
            // fused edit over the run would overlap that edit and splice
            // with stale offsets, so each sibling goes alone instead.
            let run = self.replacement_range(&children);
            if !has_child_element && has_chinese_text && has_variable && !self.edits.intersects(run)
            {
                match self.try_extract(&children)? {
                    true => return Ok(()),
                    // Whole-run classification failed; fall back to the text
                    // node alone. Sibling candidates re-enter on their own.
                    false => {}
                }
            }
        }

        self.extract_root(candidate)
    }

    /// Extract a single-node root. Silent skips: static-only roots without
    /// Chinese, date-format literals, already transformed subtrees.
    fn extract_root(&mut self, root: NodeId) -> Result<()> {
        match self.tree.kind(root) {
            NodeKind::StrLit { value } | NodeKind::JsxText { value } => {
                if !has_chinese(value) {
                    return Ok(());
                }
                if self.is_date_format(value) {
                    return Ok(());
                }
            }
            _ => {}
        }
        if self.is_transformed(root) {
            return Ok(());
        }

        self.try_extract(&[root])?;
        Ok(())
    }

    /// Build, normalize, gate, allocate and record one extraction. Returns
    /// false when the unit produced nothing to extract (no template, no
    /// Chinese content, or an unresolved shape that was warned about).
    fn try_extract(&mut self, nodes: &[NodeId]) -> Result<bool> {
        let fragment = match build(self.tree, nodes, &self.config.interpolation) {
            Ok(Some(fragment)) => fragment,
            Ok(None) => return Ok(false),
            Err(ClassifyError::UnresolvedShape { kind, range }) => {
                let at = nodes[0];
                self.warn(
                    WarningKind::UnresolvedExpression,
                    format!(
                        "cannot resolve expression: `{}` ({})",
                        self.tree.text(range),
                        kind
                    ),
                    at,
                );
                return Ok(false);
            }
        };

        let template = normalize_template(&fragment.template);
        if !has_chinese(&template) {
            return Ok(false);
        }

        let key = self.store.allocate_key(&self.config.key_prefix);
        let range = self.replacement_range(nodes);
        let text = self.replacement_text(nodes, &key, &template, &fragment)?;

        let (line, col) = self.tree.line_col(self.tree.node(nodes[0]).range.start);
        self.entries.push((
            key,
            TranslationEntry {
                template,
                file: self.tree.file().to_string(),
                line,
                column: col,
            },
        ));
        self.edits.push(range, text);
        Ok(true)
    }

    fn replacement_range(&self, nodes: &[NodeId]) -> TextRange {
        let first = self.tree.node(nodes[0]).range;
        let last = self.tree.node(nodes[nodes.len() - 1]).range;
        TextRange::new(first.start, last.end)
    }

    /// Render the call and adjust for the syntactic position: JSX text and
    /// attribute values need an expression container, an object key needs to
    /// become computed, a fused sibling run collapses into one container.
    fn replacement_text(
        &self,
        nodes: &[NodeId],
        key: &str,
        template: &str,
        fragment: &Fragment,
    ) -> Result<String> {
        let call = self.render_call(key, template, &fragment.params);
        let node = nodes[0];

        if nodes.len() > 1 {
            let parent = self.tree.parent(node);
            let parent_is_markup = parent.is_some_and(|p| {
                matches!(
                    self.tree.kind(p),
                    NodeKind::JsxElement | NodeKind::JsxFragment
                )
            });
            if !parent_is_markup {
                let range = self.replacement_range(nodes);
                let (line, col) = self.tree.line_col(range.start);
                return Err(UnsupportedContext {
                    file: self.tree.file().to_string(),
                    line,
                    col,
                    snippet: self.tree.text(range).to_string(),
                }
                .into());
            }
            return Ok(format!("{{{}}}", call));
        }

        let wrapped = match self.tree.kind(node) {
            // A lone JSX text child becomes an expression container.
            NodeKind::JsxText { .. } => format!("{{{}}}", call),
            _ => match self.tree.parent(node).map(|p| self.tree.kind(p)) {
                // String attribute value: title="中文" -> title={i18n.t(..)}
                Some(NodeKind::JsxAttr) => format!("{{{}}}", call),
                // Object property key: { '中文': 1 } -> { [i18n.t(..)]: 1 }
                Some(NodeKind::ObjectProp) if self.tree.node(node).slot == Slot::Key => {
                    format!("[{}]", call)
                }
                _ => call,
            },
        };
        Ok(wrapped)
    }

    fn render_call(&self, key: &str, template: &str, params: &[Param]) -> String {
        let mut call = if params.is_empty() {
            format!("{}('{}')", self.config.call_name, key)
        } else {
            let pairs: Vec<String> = params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.source))
                .collect();
            format!(
                "{}('{}', {{ {} }})",
                self.config.call_name,
                key,
                pairs.join(", ")
            )
        };
        if self.config.comment_mode == CommentMode::Template {
            call.push_str(&format!(" /* {} */", template));
        }
        call
    }

    /// Whether the node or an ancestor is already a call to the configured
    /// translation function. This is what makes a re-scan a no-op: the key
    /// literal inside `i18n.t('k1')` is itself a string candidate.
    fn is_transformed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if let NodeKind::Call {
                callee: Some(callee),
            } = self.tree.kind(id)
            {
                if self.tree.source_of(*callee) == self.config.call_name {
                    return true;
                }
            }
            current = self.tree.parent(id);
        }
        false
    }

    /// Static context exclusions: import sources, computed member-access
    /// keys, and regular-expression constructor arguments.
    fn is_excluded(&self, node: NodeId) -> bool {
        let Some(parent) = self.tree.parent(node) else {
            return false;
        };
        match self.tree.kind(parent) {
            NodeKind::ImportDecl => true,
            // Only the key slot: a string as the member object is ordinary
            // expression material.
            NodeKind::Member => self.tree.node(node).slot == Slot::Key,
            NodeKind::New { callee } => self.tree.source_of(*callee) == "RegExp",
            _ => false,
        }
    }

    fn is_date_format(&self, value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty() && self.date_patterns.iter().any(|p| p.is_match(trimmed))
    }

    fn warn(&mut self, kind: WarningKind, message: String, node: NodeId) {
        let range = self.tree.node(node).range;
        let (line, col) = self.tree.line_col(range.start);
        let source_line = self
            .tree
            .source()
            .lines()
            .nth(line - 1)
            .unwrap_or("")
            .to_string();
        self.warnings.push(RewriteWarning {
            kind,
            message,
            line,
            col,
            source_line,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(src: &str) -> (String, Vec<(String, TranslationEntry)>, Vec<RewriteWarning>) {
        run_with(src, &Config::default())
    }

    fn run_with(
        src: &str,
        config: &Config,
    ) -> (String, Vec<(String, TranslationEntry)>, Vec<RewriteWarning>) {
        let mut store = ResourceStore::empty();
        let date_patterns = config.date_regexes().unwrap();
        let outcome = rewrite_source(src, "test.tsx", config, &date_patterns, &mut store).unwrap();
        (
            outcome.code.unwrap_or_else(|| src.to_string()),
            outcome.entries,
            outcome.warnings,
        )
    }

    #[test]
    fn test_plain_string_initializer() {
        let (code, entries, warnings) = run("const a = '你好';");
        assert_eq!(code, "const a = i18n.t('k1');");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "k1");
        assert_eq!(entries[0].1.template, "你好");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_call_argument_concat() {
        let (code, entries, _) = run("foo('你好' + name);");
        assert_eq!(code, "foo(i18n.t('k1', { val0: name }));");
        assert_eq!(entries[0].1.template, "你好{val0}");
    }

    #[test]
    fn test_param_order_matches_placeholders() {
        let (code, entries, _) = run("const s = '前缀' + v + '后缀' + (a * b);");
        assert_eq!(code, "const s = i18n.t('k1', { val0: v, val1: a * b });");
        assert_eq!(entries[0].1.template, "前缀{val0}后缀{val1}");
    }

    #[test]
    fn test_template_literal() {
        let (code, entries, _) = run("const s = `你好，${user.name}！`;");
        assert_eq!(code, "const s = i18n.t('k1', { val0: user.name });");
        assert_eq!(entries[0].1.template, "你好，{val0}！");
    }

    #[test]
    fn test_ascii_string_not_extracted() {
        let (code, entries, warnings) = run("const a = 'hello';");
        assert_eq!(code, "const a = 'hello';");
        assert!(entries.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_regexp_argument_skipped() {
        let (code, entries, _) = run("const r = new RegExp('中文');");
        assert_eq!(code, "const r = new RegExp('中文');");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_member_key_skipped() {
        let (code, entries, _) = run("const v = user['中文'];");
        assert_eq!(code, "const v = user['中文'];");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_member_object_string_discarded_silently() {
        // A string as the member *object* is not a computed key; it resolves
        // to a variable-only template with no Chinese and is dropped without
        // a warning.
        let src = "const n = '中文'.repeat(2);";
        let (code, entries, warnings) = run(src);
        assert_eq!(code, src);
        assert!(entries.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_import_source_skipped() {
        let src = "import x from './中文路径';";
        let (code, entries, _) = run(src);
        assert_eq!(code, src);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_date_format_literal_skipped() {
        let (code, entries, _) = run("const d = moment().format('YYYY年MM月DD日');");
        assert_eq!(code, "const d = moment().format('YYYY年MM月DD日');");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_rescan_is_noop() {
        let (first, entries, _) = run("const a = '你好';");
        assert_eq!(entries.len(), 1);

        let mut store = ResourceStore::empty();
        let config = Config::default();
        let date_patterns = config.date_regexes().unwrap();
        let outcome =
            rewrite_source(&first, "test.tsx", &config, &date_patterns, &mut store).unwrap();
        assert!(outcome.code.is_none());
        assert!(outcome.entries.is_empty());
    }

    #[test]
    fn test_one_key_per_root() {
        let (code, entries, _) = run("const a = '你好' + '世界';");
        assert_eq!(code, "const a = i18n.t('k1');");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.template, "你好世界");
    }

    #[test]
    fn test_conditional_branches_extract_separately() {
        let (code, entries, _) = run("const a = ok ? '是' : '否';");
        assert_eq!(code, "const a = ok ? i18n.t('k1') : i18n.t('k2');");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_switch_case_test() {
        let (code, entries, _) = run("switch (x) { case '中文': break; }");
        assert_eq!(code, "switch (x) { case i18n.t('k1'): break; }");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_object_key_becomes_computed() {
        let (code, _, _) = run("const m = { '中文': 1 };");
        assert_eq!(code, "const m = { [i18n.t('k1')]: 1 };");
    }

    #[test]
    fn test_jsx_attribute_value() {
        let (code, entries, _) = run("const el = <input placeholder=\"请输入\" />;");
        assert_eq!(code, "const el = <input placeholder={i18n.t('k1')} />;");
        assert_eq!(entries[0].1.template, "请输入");
    }

    #[test]
    fn test_jsx_text_alone() {
        let (code, entries, _) = run("const el = <div>你好</div>;");
        assert_eq!(code, "const el = <div>{i18n.t('k1')}</div>;");
        assert_eq!(entries[0].1.template, "你好");
    }

    #[test]
    fn test_jsx_fusion() {
        let (code, entries, _) = run("const el = <div>你好，{name}！</div>;");
        assert_eq!(
            code,
            "const el = <div>{i18n.t('k1', { val0: name })}</div>;"
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.template, "你好，{val0}！");
    }

    #[test]
    fn test_jsx_fusion_disabled() {
        let config = Config {
            fuse_jsx_children: false,
            ..Default::default()
        };
        let (code, entries, _) = run_with("const el = <div>你好，{name}！</div>;", &config);
        // The trailing punctuation run carries no CJK character, so only the
        // leading text is extracted.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.template, "你好，");
        assert!(code.contains("{i18n.t('k1')}"));
        assert!(code.contains("{name}"));
        assert!(code.contains("！"));
    }

    #[test]
    fn test_no_fusion_over_already_extracted_child() {
        // The string inside the expression container is its own root and is
        // extracted first; fusing the run afterwards would overlap that
        // edit, so the text child is extracted alone.
        let (code, entries, warnings) = run("const el = <div>{f('中文')}你好</div>;");
        assert_eq!(
            code,
            "const el = <div>{f(i18n.t('k1'))}{i18n.t('k2')}</div>;"
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1.template, "中文");
        assert_eq!(entries[1].1.template, "你好");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_fusion_failure_falls_back_to_text_alone() {
        // `%` is neither arithmetic-variable nor concatenation, so the fused
        // run fails to classify; the text child is extracted on its own and
        // the expression child is left untouched.
        let (code, entries, warnings) = run("const el = <div>你好{a % b}</div>;");
        assert_eq!(code, "const el = <div>{i18n.t('k1')}{a % b}</div>;");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.template, "你好");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnresolvedExpression);
    }

    #[test]
    fn test_jsx_no_fusion_with_nested_element() {
        // A nested element splits the run; each text child goes alone.
        let (_, entries, _) = run("const el = <div>你好<b>加粗</b>{name}</div>;");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1.template, "你好");
        assert_eq!(entries[1].1.template, "加粗");
    }

    #[test]
    fn test_unresolved_expression_warns_and_skips() {
        let src = "const a = 1 + x + '中';";
        let (code, entries, warnings) = run(src);
        assert_eq!(code, src);
        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnresolvedExpression);
    }

    #[test]
    fn test_no_root_warns() {
        let src = "'你好';";
        let (code, entries, warnings) = run(src);
        assert_eq!(code, src);
        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::NoRootFound);
    }

    #[test]
    fn test_comment_mode_template() {
        let config = Config {
            comment_mode: CommentMode::Template,
            ..Default::default()
        };
        let (code, _, _) = run_with("const a = '你好';", &config);
        assert_eq!(code, "const a = i18n.t('k1') /* 你好 */;");
    }

    #[test]
    fn test_trailing_colon_stripped_in_template() {
        let (code, entries, _) = run("const label = '姓名：';");
        assert_eq!(code, "const label = i18n.t('k1');");
        assert_eq!(entries[0].1.template, "姓名");
    }

    #[test]
    fn test_entry_location() {
        let (_, entries, _) = run("\nconst a = '你好';");
        assert_eq!(entries[0].1.line, 2);
        assert_eq!(entries[0].1.column, 11);
    }
}
