use super::*;
use hime_ir::{Symbol, SymbolType};
use pretty_assertions::assert_eq;

static VARIABLES: [Symbol; 2] = [Symbol::new(10, "expr"), Symbol::new(11, "list")];
static VIRTUALS: [Symbol; 1] = [Symbol::new(20, "group")];

fn token(i: usize) -> SymbolRef {
    SymbolRef::token(i)
}

/// Staged `expr(t0, group(t1, t2), t3)` with `group` replaced.
fn with_replaced_child() -> SubTree {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Insert);
    tree.push(token(0), TreeAction::Insert);
    let group = tree.push(SymbolRef::virtual_symbol(0), TreeAction::Replace);
    tree.push(token(1), TreeAction::Insert);
    tree.push(token(2), TreeAction::Insert);
    tree.set_child_count_at(group, 2);
    tree.push(token(3), TreeAction::Insert);
    tree.set_child_count_at(0, 3);
    tree
}

fn child_symbols(ast: &Ast<'_>, node: NodeId) -> Vec<SymbolRef> {
    (0..ast.child_count(node)).map(|i| ast.symbol_ref(ast.child(node, i))).collect()
}

// === Accessors ===

#[test]
fn push_and_accessors() {
    let mut tree = SubTree::with_capacity(4);
    assert!(tree.is_empty());
    assert_eq!(tree.push(SymbolRef::variable(1), TreeAction::Insert), 0);
    assert_eq!(tree.push(token(5), TreeAction::Replace), 1);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.label_at(1), token(5));
    assert_eq!(tree.action_at(1), TreeAction::Replace);
    tree.set_action_at(1, TreeAction::Insert);
    assert_eq!(tree.action_at(1), TreeAction::Insert);
    assert_eq!(tree.child_count_at(0), 0);
    tree.set_child_count_at(0, 1);
    assert_eq!(tree.child_count_at(0), 1);
    tree.clear();
    assert!(tree.is_empty());
}

#[test]
fn append_copies_whole_block() {
    let child = with_replaced_child();
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(1), TreeAction::Insert);
    tree.append(&child);
    tree.set_child_count_at(0, 1);
    assert_eq!(tree.len(), 1 + child.len());
    assert_eq!(tree.label_at(3), SymbolRef::virtual_symbol(0));
    assert_eq!(tree.action_at(3), TreeAction::Replace);
}

// === Size ===

#[test]
fn size_of_replaced_root_sums_child_blocks() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Replace);
    tree.push(token(0), TreeAction::Insert);
    let second = tree.push(SymbolRef::variable(1), TreeAction::Insert);
    tree.push(token(1), TreeAction::Insert);
    tree.set_child_count_at(second, 1);
    tree.set_child_count_at(0, 2);
    // (0 + 1) + (1 + 1)
    assert_eq!(tree.size(), 3);
}

#[test]
fn size_of_inserted_root_counts_root() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Insert);
    tree.push(token(0), TreeAction::Insert);
    tree.push(token(1), TreeAction::Insert);
    tree.set_child_count_at(0, 2);
    assert_eq!(tree.size(), 3);
}

#[test]
fn size_is_not_raw_length() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Replace);
    tree.push(token(0), TreeAction::Insert);
    tree.set_child_count_at(0, 1);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.size(), 1);
}

// === Commit ===

#[test]
fn commit_inserts_children_in_order() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Insert);
    tree.push(token(0), TreeAction::Insert);
    tree.push(token(1), TreeAction::Insert);
    tree.set_child_count_at(0, 2);

    let mut ast = Ast::tree(&VARIABLES, &VIRTUALS);
    let root = tree.commit(&mut ast);
    assert_eq!(ast.root(), Some(root));
    assert_eq!(ast.symbol_ref(root), SymbolRef::variable(0));
    assert_eq!(child_symbols(&ast, root), vec![token(0), token(1)]);
}

#[test]
fn replaced_child_is_spliced_into_parent() {
    let mut ast = Ast::tree(&VARIABLES, &VIRTUALS);
    let root = with_replaced_child().commit(&mut ast);
    assert_eq!(
        child_symbols(&ast, root),
        vec![token(0), token(1), token(2), token(3)]
    );
    // no node for the replaced virtual
    let stored: Vec<SymbolType> = (0..ast.node_count())
        .map(|i| ast.symbol_ref(NodeId::new(i as u32)).kind())
        .collect();
    assert!(!stored.contains(&SymbolType::Virtual));
}

#[test]
fn replaced_root_hands_children_to_parent() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::virtual_symbol(0), TreeAction::Replace);
    tree.push(token(0), TreeAction::Insert);
    tree.push(token(1), TreeAction::Insert);
    tree.set_child_count_at(0, 2);

    let mut ast = Ast::tree(&VARIABLES, &VIRTUALS);
    let adopted = tree.commit_into(&mut ast);
    assert_eq!(adopted.len(), 2);
    assert_eq!(adopted[0], AstCell::new(token(0)));
    assert_eq!(adopted[1], AstCell::new(token(1)));
    assert_eq!(ast.node_count(), 0);
}

#[test]
fn nested_blocks_commit_bottom_up() {
    // list(expr(t0, t1), t2)
    let mut inner = SubTree::new();
    inner.push(SymbolRef::variable(0), TreeAction::Insert);
    inner.push(token(0), TreeAction::Insert);
    inner.push(token(1), TreeAction::Insert);
    inner.set_child_count_at(0, 2);

    let mut outer = SubTree::new();
    outer.push(SymbolRef::variable(1), TreeAction::Insert);
    outer.append(&inner);
    outer.push(token(2), TreeAction::Insert);
    outer.set_child_count_at(0, 2);

    for mut ast in [Ast::tree(&VARIABLES, &VIRTUALS), Ast::graph(&VARIABLES, &VIRTUALS)] {
        let root = outer.clone().commit(&mut ast);
        assert_eq!(
            child_symbols(&ast, root),
            vec![SymbolRef::variable(0), token(2)]
        );
        let expr = ast.child(root, 0);
        assert_eq!(child_symbols(&ast, expr), vec![token(0), token(1)]);
    }
}

#[test]
fn graph_commit_matches_tree_commit() {
    let mut tree_ast = Ast::tree(&VARIABLES, &VIRTUALS);
    let mut graph_ast = Ast::graph(&VARIABLES, &VIRTUALS);
    let tree_root = with_replaced_child().commit(&mut tree_ast);
    let graph_root = with_replaced_child().commit(&mut graph_ast);
    assert_eq!(
        child_symbols(&tree_ast, tree_root),
        child_symbols(&graph_ast, graph_root)
    );
}

#[test]
#[should_panic(expected = "the root of an AST must be an inserted node")]
fn replaced_root_cannot_be_committed_as_ast() {
    let mut tree = SubTree::new();
    tree.push(SymbolRef::variable(0), TreeAction::Replace);
    let mut ast = Ast::tree(&VARIABLES, &VIRTUALS);
    tree.commit(&mut ast);
}

#[test]
#[should_panic(expected = "cannot commit an empty sub-tree")]
fn empty_sub_tree_cannot_be_committed() {
    let mut ast = Ast::tree(&VARIABLES, &VIRTUALS);
    SubTree::new().commit_into(&mut ast);
}
