//! Lowering from the swc AST into the syntax arena.
//!
//! Only shapes the engine dispatches on get a dedicated kind; statements that
//! are pure structure (blocks, loops, if/try) produce no node at all, so the
//! parent chain of an expression skips straight to the nearest shape that
//! matters for root resolution. Unknown expression shapes lower to
//! [`NodeKind::Other`] with their children still visited, so text-bearing
//! leaves inside them are not lost.

use swc_common::Spanned;
use swc_ecma_ast::{
    BinaryOp, BlockStmt, BlockStmtOrExpr, Callee, Class, ClassMember, Decl, DefaultDecl, Expr,
    ForHead, Function, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, JSXExpr,
    JSXFragment, Lit, Module, ModuleDecl, ModuleItem, ObjectPatProp, OptChainBase, Pat, Prop,
    PropName, PropOrSpread, Stmt, Str, VarDecl, VarDeclOrExpr,
};

use super::parse::ParsedModule;
use super::tree::{BinOp, NodeId, NodeKind, Slot, SyntaxTree, TextRange};

/// Lower a parsed module into a [`SyntaxTree`] over `source`.
pub fn lower(parsed: &ParsedModule, source: &str, file: &str) -> SyntaxTree {
    let mut lowerer = Lowerer {
        tree: SyntaxTree::new(file, source),
        base: parsed.base.0,
    };
    lowerer.module(&parsed.module);
    lowerer.tree
}

struct Lowerer {
    tree: SyntaxTree,
    base: u32,
}

impl Lowerer {
    fn range(&self, span: swc_common::Span) -> TextRange {
        TextRange::new(
            span.lo.0.saturating_sub(self.base) as usize,
            span.hi.0.saturating_sub(self.base) as usize,
        )
    }

    fn push(
        &mut self,
        kind: NodeKind,
        span: swc_common::Span,
        parent: NodeId,
        slot: Slot,
    ) -> NodeId {
        let range = self.range(span);
        self.tree.push(kind, Some(parent), slot, range)
    }

    fn module(&mut self, module: &Module) {
        let root = self
            .tree
            .push(NodeKind::Module, None, Slot::Root, self.range(module.span));
        for item in &module.body {
            match item {
                ModuleItem::Stmt(stmt) => self.stmt(stmt, root),
                ModuleItem::ModuleDecl(decl) => self.module_decl(decl, root),
            }
        }
    }

    fn module_decl(&mut self, decl: &ModuleDecl, parent: NodeId) {
        match decl {
            ModuleDecl::Import(import) => {
                let id = self.push(NodeKind::ImportDecl, import.span, parent, Slot::Other);
                self.push(
                    NodeKind::StrLit {
                        value: str_value(&import.src),
                    },
                    import.src.span,
                    id,
                    Slot::Src,
                );
            }
            ModuleDecl::ExportDecl(export) => self.decl(&export.decl, parent),
            ModuleDecl::ExportDefaultExpr(export) => {
                self.expr(&export.expr, parent, Slot::Expr);
            }
            ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
                DefaultDecl::Class(class) => self.class(&class.class, parent),
                DefaultDecl::Fn(f) => self.function(&f.function, parent),
                DefaultDecl::TsInterfaceDecl(_) => {}
            },
            _ => {}
        }
    }

    fn stmt(&mut self, stmt: &Stmt, parent: NodeId) {
        match stmt {
            Stmt::Block(block) => self.block(block, parent),
            Stmt::Expr(expr_stmt) => {
                self.expr(&expr_stmt.expr, parent, Slot::Expr);
            }
            Stmt::Return(ret) => {
                let id = self.push(NodeKind::Return, ret.span, parent, Slot::Other);
                if let Some(arg) = &ret.arg {
                    self.expr(arg, id, Slot::Expr);
                }
            }
            Stmt::If(if_stmt) => {
                self.expr(&if_stmt.test, parent, Slot::Test);
                self.stmt(&if_stmt.cons, parent);
                if let Some(alt) = &if_stmt.alt {
                    self.stmt(alt, parent);
                }
            }
            Stmt::Switch(switch) => {
                let id = self.push(NodeKind::SwitchStmt, switch.span, parent, Slot::Other);
                self.expr(&switch.discriminant, id, Slot::Discriminant);
                for case in &switch.cases {
                    let case_id = self.push(NodeKind::SwitchCase, case.span, parent, Slot::Other);
                    if let Some(test) = &case.test {
                        self.expr(test, case_id, Slot::Test);
                    }
                    for stmt in &case.cons {
                        self.stmt(stmt, case_id);
                    }
                }
            }
            Stmt::Throw(throw) => {
                self.expr(&throw.arg, parent, Slot::Expr);
            }
            Stmt::Try(try_stmt) => {
                self.block(&try_stmt.block, parent);
                if let Some(handler) = &try_stmt.handler {
                    self.block(&handler.body, parent);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.block(finalizer, parent);
                }
            }
            Stmt::While(while_stmt) => {
                self.expr(&while_stmt.test, parent, Slot::Test);
                self.stmt(&while_stmt.body, parent);
            }
            Stmt::DoWhile(do_while) => {
                self.stmt(&do_while.body, parent);
                self.expr(&do_while.test, parent, Slot::Test);
            }
            Stmt::For(for_stmt) => {
                match &for_stmt.init {
                    Some(VarDeclOrExpr::VarDecl(decl)) => self.var_decl(decl, parent),
                    Some(VarDeclOrExpr::Expr(expr)) => {
                        self.expr(expr, parent, Slot::Init);
                    }
                    None => {}
                }
                if let Some(test) = &for_stmt.test {
                    self.expr(test, parent, Slot::Test);
                }
                if let Some(update) = &for_stmt.update {
                    self.expr(update, parent, Slot::Other);
                }
                self.stmt(&for_stmt.body, parent);
            }
            Stmt::ForIn(for_in) => {
                self.for_head(&for_in.left, parent);
                self.expr(&for_in.right, parent, Slot::Right);
                self.stmt(&for_in.body, parent);
            }
            Stmt::ForOf(for_of) => {
                self.for_head(&for_of.left, parent);
                self.expr(&for_of.right, parent, Slot::Right);
                self.stmt(&for_of.body, parent);
            }
            Stmt::Labeled(labeled) => self.stmt(&labeled.body, parent),
            Stmt::With(with) => {
                self.expr(&with.obj, parent, Slot::Expr);
                self.stmt(&with.body, parent);
            }
            Stmt::Decl(decl) => self.decl(decl, parent),
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) | Stmt::Debugger(_) => {}
        }
    }

    fn block(&mut self, block: &BlockStmt, parent: NodeId) {
        for stmt in &block.stmts {
            self.stmt(stmt, parent);
        }
    }

    fn for_head(&mut self, head: &ForHead, parent: NodeId) {
        match head {
            ForHead::VarDecl(decl) => self.var_decl(decl, parent),
            ForHead::Pat(pat) => self.pat(pat, parent),
            ForHead::UsingDecl(_) => {}
        }
    }

    fn decl(&mut self, decl: &Decl, parent: NodeId) {
        match decl {
            Decl::Var(var) => self.var_decl(var, parent),
            Decl::Fn(f) => self.function(&f.function, parent),
            Decl::Class(class) => self.class(&class.class, parent),
            _ => {}
        }
    }

    fn var_decl(&mut self, var: &VarDecl, parent: NodeId) {
        for declarator in &var.decls {
            let id = self.push(NodeKind::VarDeclarator, declarator.span, parent, Slot::Other);
            self.pat(&declarator.name, id);
            if let Some(init) = &declarator.init {
                self.expr(init, id, Slot::Init);
            }
        }
    }

    fn function(&mut self, function: &Function, parent: NodeId) {
        for param in &function.params {
            self.pat(&param.pat, parent);
        }
        if let Some(body) = &function.body {
            self.block(body, parent);
        }
    }

    fn class(&mut self, class: &Class, parent: NodeId) {
        if let Some(super_class) = &class.super_class {
            self.expr(super_class, parent, Slot::Other);
        }
        for member in &class.body {
            match member {
                ClassMember::ClassProp(prop) => {
                    let id = self.push(NodeKind::ClassProp, prop.span, parent, Slot::Other);
                    if let PropName::Computed(computed) = &prop.key {
                        self.expr(&computed.expr, id, Slot::Key);
                    }
                    if let Some(value) = &prop.value {
                        self.expr(value, id, Slot::Value);
                    }
                }
                ClassMember::PrivateProp(prop) => {
                    let id = self.push(NodeKind::ClassProp, prop.span, parent, Slot::Other);
                    if let Some(value) = &prop.value {
                        self.expr(value, id, Slot::Value);
                    }
                }
                ClassMember::Method(method) => self.function(&method.function, parent),
                ClassMember::PrivateMethod(method) => self.function(&method.function, parent),
                ClassMember::Constructor(ctor) => {
                    for param in &ctor.params {
                        if let swc_ecma_ast::ParamOrTsParamProp::Param(param) = param {
                            self.pat(&param.pat, parent);
                        }
                    }
                    if let Some(body) = &ctor.body {
                        self.block(body, parent);
                    }
                }
                ClassMember::StaticBlock(static_block) => self.block(&static_block.body, parent),
                _ => {}
            }
        }
    }

    fn pat(&mut self, pat: &Pat, parent: NodeId) {
        match pat {
            Pat::Assign(assign) => {
                let id = self.push(NodeKind::AssignPat, assign.span, parent, Slot::Other);
                self.pat(&assign.left, id);
                self.expr(&assign.right, id, Slot::Right);
            }
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.pat(elem, parent);
                }
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.pat(&kv.value, parent),
                        ObjectPatProp::Assign(assign) => {
                            if let Some(value) = &assign.value {
                                let id = self.push(
                                    NodeKind::AssignPat,
                                    assign.span,
                                    parent,
                                    Slot::Other,
                                );
                                self.expr(value, id, Slot::Right);
                            }
                        }
                        ObjectPatProp::Rest(rest) => self.pat(&rest.arg, parent),
                    }
                }
            }
            Pat::Rest(rest) => self.pat(&rest.arg, parent),
            Pat::Expr(expr) => {
                self.expr(expr, parent, Slot::Other);
            }
            Pat::Ident(_) | Pat::Invalid(_) => {}
        }
    }

    fn expr(&mut self, expr: &Expr, parent: NodeId, slot: Slot) -> NodeId {
        match expr {
            Expr::Lit(Lit::Str(s)) => self.push(
                NodeKind::StrLit {
                    value: str_value(s),
                },
                s.span,
                parent,
                slot,
            ),
            Expr::Lit(lit) => self.push(NodeKind::Other { label: "Literal" }, lit.span(), parent, slot),
            Expr::Tpl(tpl) => {
                let id = self.push(
                    NodeKind::TplStr {
                        quasis: Vec::new(),
                        exprs: Vec::new(),
                    },
                    tpl.span,
                    parent,
                    slot,
                );
                let quasis: Vec<String> = tpl
                    .quasis
                    .iter()
                    .map(|q| {
                        q.cooked
                            .as_ref()
                            .and_then(|c| c.as_str())
                            .map(str::to_string)
                            .unwrap_or_else(|| q.raw.to_string())
                    })
                    .collect();
                let exprs: Vec<NodeId> = tpl
                    .exprs
                    .iter()
                    .map(|e| self.expr(e, id, Slot::Expr))
                    .collect();
                *self.tree.kind_mut(id) = NodeKind::TplStr { quasis, exprs };
                id
            }
            Expr::Ident(ident) => self.push(
                NodeKind::Ident {
                    name: ident.sym.to_string(),
                },
                ident.span,
                parent,
                slot,
            ),
            Expr::Member(member) => {
                let id = self.push(NodeKind::Member, member.span, parent, slot);
                self.expr(&member.obj, id, Slot::Other);
                if let swc_ecma_ast::MemberProp::Computed(computed) = &member.prop {
                    self.expr(&computed.expr, id, Slot::Key);
                }
                id
            }
            Expr::Call(call) => {
                let id = self.push(NodeKind::Call { callee: None }, call.span, parent, slot);
                let callee = match &call.callee {
                    Callee::Expr(callee) => Some(self.expr(callee, id, Slot::Callee)),
                    _ => None,
                };
                *self.tree.kind_mut(id) = NodeKind::Call { callee };
                for (idx, arg) in call.args.iter().enumerate() {
                    self.expr(&arg.expr, id, Slot::Arg(idx as u32));
                }
                id
            }
            Expr::New(new) => {
                let id = self.push(NodeKind::Call { callee: None }, new.span, parent, slot);
                let callee = self.expr(&new.callee, id, Slot::Callee);
                *self.tree.kind_mut(id) = NodeKind::New { callee };
                if let Some(args) = &new.args {
                    for (idx, arg) in args.iter().enumerate() {
                        self.expr(&arg.expr, id, Slot::Arg(idx as u32));
                    }
                }
                id
            }
            Expr::Bin(bin) => {
                let kind = match bin.op {
                    BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                        NodeKind::Logical
                    }
                    op => NodeKind::Bin {
                        op: lower_bin_op(op),
                    },
                };
                let id = self.push(kind, bin.span, parent, slot);
                self.expr(&bin.left, id, Slot::Left);
                self.expr(&bin.right, id, Slot::Right);
                id
            }
            Expr::Cond(cond) => {
                let id = self.push(NodeKind::Cond, cond.span, parent, slot);
                self.expr(&cond.test, id, Slot::Test);
                self.expr(&cond.cons, id, Slot::Cons);
                self.expr(&cond.alt, id, Slot::Alt);
                id
            }
            Expr::Assign(assign) => {
                let id = self.push(NodeKind::Assign, assign.span, parent, slot);
                self.expr(&assign.right, id, Slot::Right);
                id
            }
            Expr::Paren(paren) => {
                let id = self.push(NodeKind::Paren, paren.span, parent, slot);
                self.expr(&paren.expr, id, Slot::Expr);
                id
            }
            Expr::Arrow(arrow) => {
                let id = self.push(NodeKind::Arrow, arrow.span, parent, slot);
                for pat in &arrow.params {
                    self.pat(pat, id);
                }
                match &*arrow.body {
                    BlockStmtOrExpr::Expr(body) => {
                        self.expr(body, id, Slot::Body);
                    }
                    BlockStmtOrExpr::BlockStmt(block) => self.block(block, id),
                }
                id
            }
            Expr::Array(array) => {
                let id = self.push(NodeKind::Array, array.span, parent, slot);
                for (idx, elem) in array.elems.iter().enumerate() {
                    if let Some(elem) = elem {
                        self.expr(&elem.expr, id, Slot::Elem(idx as u32));
                    }
                }
                id
            }
            Expr::Object(object) => {
                let id = self.push(NodeKind::Other { label: "ObjectLiteral" }, object.span, parent, slot);
                for prop in &object.props {
                    self.object_prop(prop, id);
                }
                id
            }
            Expr::Fn(f) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "FunctionExpression",
                    },
                    f.function.span,
                    parent,
                    slot,
                );
                self.function(&f.function, id);
                id
            }
            Expr::Class(class) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "ClassExpression",
                    },
                    class.class.span,
                    parent,
                    slot,
                );
                self.class(&class.class, id);
                id
            }
            Expr::Seq(seq) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "SequenceExpression",
                    },
                    seq.span,
                    parent,
                    slot,
                );
                for expr in &seq.exprs {
                    self.expr(expr, id, Slot::Other);
                }
                id
            }
            Expr::Unary(unary) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "UnaryExpression",
                    },
                    unary.span,
                    parent,
                    slot,
                );
                self.expr(&unary.arg, id, Slot::Other);
                id
            }
            Expr::Update(update) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "UpdateExpression",
                    },
                    update.span,
                    parent,
                    slot,
                );
                self.expr(&update.arg, id, Slot::Other);
                id
            }
            Expr::Await(await_expr) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "AwaitExpression",
                    },
                    await_expr.span,
                    parent,
                    slot,
                );
                self.expr(&await_expr.arg, id, Slot::Other);
                id
            }
            Expr::Yield(yield_expr) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "YieldExpression",
                    },
                    yield_expr.span,
                    parent,
                    slot,
                );
                if let Some(arg) = &yield_expr.arg {
                    self.expr(arg, id, Slot::Other);
                }
                id
            }
            Expr::TaggedTpl(tagged) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "TaggedTemplateExpression",
                    },
                    tagged.span,
                    parent,
                    slot,
                );
                self.expr(&Expr::Tpl((*tagged.tpl).clone()), id, Slot::Expr);
                id
            }
            Expr::OptChain(opt) => {
                let id = self.push(
                    NodeKind::Other {
                        label: "OptionalChainExpression",
                    },
                    opt.span,
                    parent,
                    slot,
                );
                match &*opt.base {
                    OptChainBase::Member(member) => {
                        self.expr(&member.obj, id, Slot::Other);
                    }
                    OptChainBase::Call(call) => {
                        self.expr(&call.callee, id, Slot::Callee);
                        for arg in &call.args {
                            self.expr(&arg.expr, id, Slot::Other);
                        }
                    }
                }
                id
            }
            // TypeScript wrappers are invisible to the engine: the inner
            // expression takes the wrapper's place in the parent chain, so a
            // string behind `as const` still resolves its real root.
            Expr::TsAs(e) => self.expr(&e.expr, parent, slot),
            Expr::TsNonNull(e) => self.expr(&e.expr, parent, slot),
            Expr::TsConstAssertion(e) => self.expr(&e.expr, parent, slot),
            Expr::TsTypeAssertion(e) => self.expr(&e.expr, parent, slot),
            Expr::TsSatisfies(e) => self.expr(&e.expr, parent, slot),
            Expr::TsInstantiation(e) => self.expr(&e.expr, parent, slot),
            Expr::JSXElement(element) => self.jsx_element(element, parent, slot),
            Expr::JSXFragment(fragment) => self.jsx_fragment(fragment, parent, slot),
            other => self.push(
                NodeKind::Other {
                    label: "Expression",
                },
                other.span(),
                parent,
                slot,
            ),
        }
    }

    fn object_prop(&mut self, prop: &PropOrSpread, parent: NodeId) {
        match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => {
                    let id = self.push(NodeKind::ObjectProp, kv.span(), parent, Slot::Other);
                    self.prop_name(&kv.key, id);
                    self.expr(&kv.value, id, Slot::Value);
                }
                Prop::Method(method) => {
                    self.function(&method.function, parent);
                }
                Prop::Getter(getter) => {
                    if let Some(body) = &getter.body {
                        self.block(body, parent);
                    }
                }
                Prop::Setter(setter) => {
                    if let Some(body) = &setter.body {
                        self.block(body, parent);
                    }
                }
                Prop::Shorthand(_) | Prop::Assign(_) => {}
            },
            PropOrSpread::Spread(spread) => {
                self.expr(&spread.expr, parent, Slot::Other);
            }
        }
    }

    fn prop_name(&mut self, name: &PropName, parent: NodeId) {
        match name {
            PropName::Str(s) => {
                self.push(
                    NodeKind::StrLit {
                        value: str_value(s),
                    },
                    s.span,
                    parent,
                    Slot::Key,
                );
            }
            PropName::Computed(computed) => {
                self.expr(&computed.expr, parent, Slot::Key);
            }
            PropName::Ident(_) | PropName::Num(_) | PropName::BigInt(_) => {}
        }
    }

    fn jsx_element(&mut self, element: &JSXElement, parent: NodeId, slot: Slot) -> NodeId {
        let id = self.push(NodeKind::JsxElement, element.span, parent, slot);
        for attr in &element.opening.attrs {
            match attr {
                JSXAttrOrSpread::JSXAttr(attr) => {
                    let attr_id = self.push(NodeKind::JsxAttr, attr.span, id, Slot::Other);
                    match &attr.value {
                        Some(JSXAttrValue::Str(s)) => {
                            self.push(
                                NodeKind::StrLit {
                                    value: str_value(s),
                                },
                                s.span,
                                attr_id,
                                Slot::Value,
                            );
                        }
                        Some(JSXAttrValue::JSXExprContainer(container)) => {
                            self.jsx_container(container, attr_id, Slot::Value);
                        }
                        Some(JSXAttrValue::JSXElement(element)) => {
                            self.jsx_element(element, attr_id, Slot::Value);
                        }
                        Some(JSXAttrValue::JSXFragment(fragment)) => {
                            self.jsx_fragment(fragment, attr_id, Slot::Value);
                        }
                        _ => {}
                    }
                }
                JSXAttrOrSpread::SpreadElement(spread) => {
                    self.expr(&spread.expr, id, Slot::Other);
                }
            }
        }
        self.jsx_children(&element.children, id);
        id
    }

    fn jsx_fragment(&mut self, fragment: &JSXFragment, parent: NodeId, slot: Slot) -> NodeId {
        let id = self.push(NodeKind::JsxFragment, fragment.span, parent, slot);
        self.jsx_children(&fragment.children, id);
        id
    }

    fn jsx_children(&mut self, children: &[JSXElementChild], parent: NodeId) {
        for (idx, child) in children.iter().enumerate() {
            let slot = Slot::Child(idx as u32);
            match child {
                JSXElementChild::JSXText(text) => {
                    self.push(
                        NodeKind::JsxText {
                            value: text.value.to_string(),
                        },
                        text.span,
                        parent,
                        slot,
                    );
                }
                JSXElementChild::JSXExprContainer(container) => {
                    self.jsx_container(container, parent, slot);
                }
                JSXElementChild::JSXElement(element) => {
                    self.jsx_element(element, parent, slot);
                }
                JSXElementChild::JSXFragment(fragment) => {
                    self.jsx_fragment(fragment, parent, slot);
                }
                JSXElementChild::JSXSpreadChild(spread) => {
                    self.expr(&spread.expr, parent, slot);
                }
            }
        }
    }

    fn jsx_container(&mut self, container: &swc_ecma_ast::JSXExprContainer, parent: NodeId, slot: Slot) -> NodeId {
        let id = self.push(NodeKind::JsxExprContainer, container.span, parent, slot);
        match &container.expr {
            JSXExpr::Expr(expr) => {
                self.expr(expr, id, Slot::Expr);
            }
            JSXExpr::JSXEmptyExpr(empty) => {
                self.push(NodeKind::JsxEmptyExpr, empty.span, id, Slot::Expr);
            }
        }
        id
    }
}

/// String literal values are WTF-8. A literal holding a lone surrogate
/// cannot carry CJK text, so falling back to empty is safe for the engine.
fn str_value(s: &Str) -> String {
    s.value.as_str().map(str::to_string).unwrap_or_default()
}

fn lower_bin_op(op: BinaryOp) -> BinOp {
    match op {
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        BinaryOp::EqEq => BinOp::EqEq,
        BinaryOp::NotEq => BinOp::NotEq,
        BinaryOp::EqEqEq => BinOp::EqEqEq,
        BinaryOp::NotEqEq => BinOp::NotEqEq,
        BinaryOp::In => BinOp::In,
        _ => BinOp::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse::parse_tsx_source;

    fn tree_of(src: &str) -> SyntaxTree {
        let parsed = parse_tsx_source(src, "test.tsx").unwrap();
        lower(&parsed, src, "test.tsx")
    }

    #[test]
    fn test_candidates_in_source_order() {
        let tree = tree_of("const a = '你好' + name + '世界';");
        let texts: Vec<&str> = tree
            .candidates()
            .iter()
            .map(|&id| tree.source_of(id))
            .collect();
        assert_eq!(texts, vec!["'你好'", "'世界'"]);
    }

    #[test]
    fn test_string_parent_chain() {
        let tree = tree_of("foo('你好');");
        let lit = tree.candidates()[0];
        let call = tree.parent(lit).unwrap();
        assert!(matches!(tree.kind(call), NodeKind::Call { .. }));
    }

    #[test]
    fn test_template_literal_structure() {
        let tree = tree_of("const s = `你好${name}世界`;");
        let tpl = tree.candidates()[0];
        match tree.kind(tpl) {
            NodeKind::TplStr { quasis, exprs } => {
                assert_eq!(quasis, &["你好", "世界"]);
                assert_eq!(exprs.len(), 1);
                assert_eq!(tree.source_of(exprs[0]), "name");
            }
            other => panic!("expected template literal, got {:?}", other),
        }
    }

    #[test]
    fn test_jsx_children_slots() {
        let tree = tree_of("const el = <div>你好{name}</div>;");
        let text = tree
            .candidates()
            .iter()
            .copied()
            .find(|&id| matches!(tree.kind(id), NodeKind::JsxText { .. }))
            .unwrap();
        let element = tree.parent(text).unwrap();
        assert!(matches!(tree.kind(element), NodeKind::JsxElement));
        let child_slots: Vec<Slot> = tree
            .node(element)
            .children
            .iter()
            .map(|&c| tree.node(c).slot)
            .collect();
        assert!(child_slots.contains(&Slot::Child(0)));
        assert!(child_slots.contains(&Slot::Child(1)));
    }

    #[test]
    fn test_ts_as_is_transparent() {
        let tree = tree_of("foo('你好' as string);");
        let lit = tree.candidates()[0];
        let parent = tree.parent(lit).unwrap();
        assert!(matches!(tree.kind(parent), NodeKind::Call { .. }));
    }

    #[test]
    fn test_import_source_lowered_under_import_decl() {
        let tree = tree_of("import x from '某个路径';");
        let lit = tree.candidates()[0];
        let parent = tree.parent(lit).unwrap();
        assert!(matches!(tree.kind(parent), NodeKind::ImportDecl));
    }

    #[test]
    fn test_logical_vs_binary() {
        let tree = tree_of("const a = x || '你好'; const b = y === '世界';");
        let first = tree.candidates()[0];
        assert!(matches!(
            tree.kind(tree.parent(first).unwrap()),
            NodeKind::Logical
        ));
        let second = tree.candidates()[1];
        assert!(matches!(
            tree.kind(tree.parent(second).unwrap()),
            NodeKind::Bin { op: BinOp::EqEqEq }
        ));
    }

    #[test]
    fn test_object_prop_key_slot() {
        let tree = tree_of("const m = { '中文': 1 };");
        let key = tree.candidates()[0];
        assert_eq!(tree.node(key).slot, Slot::Key);
        assert!(matches!(
            tree.kind(tree.parent(key).unwrap()),
            NodeKind::ObjectProp
        ));
    }
}
