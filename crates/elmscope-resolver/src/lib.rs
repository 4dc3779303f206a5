pub mod resolve;
pub mod scope;
pub mod usages;

use rayon::prelude::*;

use elmscope_core::SyntaxTree;

pub use resolve::{Reference, ReferenceRecord, Resolution, Resolver};
pub use scope::{ImportEntry, ImportTable, Scope, ScopeKind, scopes_around};
pub use usages::{
    TextEdit, UnusedImport, declaration_at, find_usages, is_valid_lower_identifier, rename_edits,
    unused_imports,
};

#[derive(Default)]
pub struct ResolverOption {
    pub sequential: bool,
}

impl ResolverOption {
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }
}

/// Run `f` over a resolver per tree, keeping the input order.
///
/// Trees are independent snapshots, so they are processed in parallel unless
/// `option.sequential` is set.
pub fn resolve_trees_with<T, F>(trees: &[SyntaxTree], option: &ResolverOption, f: F) -> Vec<T>
where
    T: Send,
    F: for<'t> Fn(&Resolver<'t>) -> T + Sync + Send,
{
    let run = |tree: &SyntaxTree| {
        let resolver = Resolver::new(tree);
        f(&resolver)
    };
    if option.sequential {
        trees.iter().map(run).collect()
    } else {
        trees.par_iter().map(run).collect()
    }
}
