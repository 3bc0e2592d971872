use syn::visit::{self, Visit};
use syn::{File, ItemFn};

/// Collects every function item in a file, nested modules included.
pub struct FunctionCollector {
    functions: Vec<ItemFn>,
}

impl FunctionCollector {
    pub fn collect(file: &File) -> Vec<ItemFn> {
        let mut collector = FunctionCollector {
            functions: Vec::new(),
        };
        collector.visit_file(file);
        collector.functions
    }
}

impl<'ast> Visit<'ast> for FunctionCollector {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.functions.push(node.clone());
        visit::visit_item_fn(self, node);
    }
}
