//! The owned syntax arena.
//!
//! Nodes live in a flat `Vec`; parent/child navigation goes through
//! [`NodeId`] indices. The kind enum is closed over exactly the shapes the
//! classifier and root resolver dispatch on; everything else lowers to
//! [`NodeKind::Other`], which the classifier reports as an unresolved shape
//! instead of silently skipping.

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Byte range into the file source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The slot a node occupies inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Root,
    Left,
    Right,
    Callee,
    Arg(u32),
    Elem(u32),
    Child(u32),
    Test,
    Cons,
    Alt,
    Init,
    Key,
    Value,
    Expr,
    Body,
    Discriminant,
    Src,
    Other,
}

/// Binary operators the engine distinguishes. Comparison/membership
/// operators break root resolution; `-`, `*`, `/` classify as arithmetic
/// variables; `+` is ambiguous between numbers and strings and is handled by
/// the dynamic (concatenation) case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    In,
    Other,
}

impl BinOp {
    pub fn is_arithmetic_variable(self) -> bool {
        matches!(self, BinOp::Sub | BinOp::Mul | BinOp::Div)
    }

    pub fn breaks_root(self) -> bool {
        matches!(
            self,
            BinOp::EqEq | BinOp::NotEq | BinOp::EqEqEq | BinOp::NotEqEq | BinOp::In
        )
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Module,
    StrLit { value: String },
    TplStr { quasis: Vec<String>, exprs: Vec<NodeId> },
    Ident { name: String },
    Member,
    Call { callee: Option<NodeId> },
    New { callee: NodeId },
    Logical,
    Cond,
    Bin { op: BinOp },
    Assign,
    AssignPat,
    VarDeclarator,
    Return,
    ObjectProp,
    Array,
    ClassProp,
    SwitchStmt,
    SwitchCase,
    Arrow,
    Paren,
    ImportDecl,
    JsxElement,
    JsxFragment,
    JsxText { value: String },
    JsxExprContainer,
    JsxEmptyExpr,
    JsxAttr,
    Other { label: &'static str },
}

impl NodeKind {
    /// Short name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Module => "Module",
            NodeKind::StrLit { .. } => "StringLiteral",
            NodeKind::TplStr { .. } => "TemplateLiteral",
            NodeKind::Ident { .. } => "Identifier",
            NodeKind::Member => "MemberExpression",
            NodeKind::Call { .. } => "CallExpression",
            NodeKind::New { .. } => "NewExpression",
            NodeKind::Logical => "LogicalExpression",
            NodeKind::Cond => "ConditionalExpression",
            NodeKind::Bin { .. } => "BinaryExpression",
            NodeKind::Assign => "AssignmentExpression",
            NodeKind::AssignPat => "AssignmentPattern",
            NodeKind::VarDeclarator => "VariableDeclarator",
            NodeKind::Return => "ReturnStatement",
            NodeKind::ObjectProp => "ObjectProperty",
            NodeKind::Array => "ArrayExpression",
            NodeKind::ClassProp => "ClassProperty",
            NodeKind::SwitchStmt => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::Arrow => "ArrowFunctionExpression",
            NodeKind::Paren => "ParenthesizedExpression",
            NodeKind::ImportDecl => "ImportDeclaration",
            NodeKind::JsxElement => "JSXElement",
            NodeKind::JsxFragment => "JSXFragment",
            NodeKind::JsxText { .. } => "JSXText",
            NodeKind::JsxExprContainer => "JSXExpressionContainer",
            NodeKind::JsxEmptyExpr => "JSXEmptyExpression",
            NodeKind::JsxAttr => "JSXAttribute",
            NodeKind::Other { label } => label,
        }
    }
}

#[derive(Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub slot: Slot,
    pub range: TextRange,
    pub children: Vec<NodeId>,
}

/// Arena of lowered nodes for one file, plus the original source text and a
/// line-start index for location lookups.
#[derive(Debug)]
pub struct SyntaxTree {
    file: String,
    source: String,
    nodes: Vec<SyntaxNode>,
    candidates: Vec<NodeId>,
    line_starts: Vec<usize>,
}

impl SyntaxTree {
    pub fn new(file: &str, source: &str) -> Self {
        Self {
            file: file.to_string(),
            source: source.to_string(),
            nodes: Vec::new(),
            candidates: Vec::new(),
            line_starts: build_line_index(source),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Text-bearing leaves in source order: string literals, template
    /// literals, and JSX text.
    pub fn candidates(&self) -> &[NodeId] {
        &self.candidates
    }

    /// Verbatim source text spanned by the node.
    pub fn source_of(&self, id: NodeId) -> &str {
        self.text(self.node(id).range)
    }

    pub fn text(&self, range: TextRange) -> &str {
        let end = range.end.min(self.source.len());
        let start = range.start.min(end);
        &self.source[start..end]
    }

    /// 1-based line and column for a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Result::Ok(idx) => idx + 1,
            Err(idx) => idx,
        };
        let line_start = self.line_starts[line - 1];
        let col = self.source[line_start..offset.min(self.source.len())]
            .chars()
            .count()
            + 1;
        (line, col)
    }

    /// Nearest ancestor (excluding `id` itself) matching the predicate.
    pub fn ancestor(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if pred(&self.node(p).kind) {
                return Some(p);
            }
            cur = self.parent(p);
        }
        None
    }

    pub(crate) fn push(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        slot: Slot,
        range: TextRange,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if matches!(
            kind,
            NodeKind::StrLit { .. } | NodeKind::TplStr { .. } | NodeKind::JsxText { .. }
        ) {
            self.candidates.push(id);
        }
        self.nodes.push(SyntaxNode {
            kind,
            parent,
            slot,
            range,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        id
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0 as usize].kind
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (idx, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(idx + 1);
        }
    }
    offsets
}
