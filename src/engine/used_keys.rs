//! Collects translation keys referenced by already-rewritten source.
//!
//! The sync command scans every source file for calls to the configured
//! translation function and gathers their first string argument, so stale
//! store entries can be pruned without touching keys that are still live.

use anyhow::Result;
use indexmap::IndexSet;
use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, MemberProp};
use swc_ecma_visit::{Visit, VisitWith};

use crate::syntax::parse_tsx_source;

/// Parse one file and return every key passed to `call_name`, in source
/// order.
pub fn collect_used_keys(source: &str, file: &str, call_name: &str) -> Result<IndexSet<String>> {
    let parsed = parse_tsx_source(source, file)?;
    let mut collector = KeyCollector {
        call_name,
        keys: IndexSet::new(),
    };
    parsed.module.visit_with(&mut collector);
    Ok(collector.keys)
}

struct KeyCollector<'a> {
    call_name: &'a str,
    keys: IndexSet<String>,
}

impl Visit for KeyCollector<'_> {
    fn visit_call_expr(&mut self, call: &CallExpr) {
        call.visit_children_with(self);

        let Callee::Expr(callee) = &call.callee else {
            return;
        };
        if dotted_path(callee).as_deref() != Some(self.call_name) {
            return;
        }
        if let Some(arg) = call.args.first() {
            if let Expr::Lit(Lit::Str(key)) = &*arg.expr {
                if let Some(value) = key.value.as_str() {
                    self.keys.insert(value.to_string());
                }
            }
        }
    }
}

/// Render an identifier or dot-member chain as `a.b.c`. Computed access and
/// any other callee shape yields `None` and never matches.
fn dotted_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let object = dotted_path(&member.obj)?;
            match &member.prop {
                MemberProp::Ident(prop) => Some(format!("{}.{}", object, prop.sym)),
                _ => None,
            }
        }
        _ => None,
    }
}
