use super::node::NodeId;
use super::tree::Tree;

/// Serialize the tree to a Newick string (compact format).
///
/// # Example
/// ```
/// use phylign::libs::phylo::tree::Tree;
/// use phylign::libs::phylo::writer;
/// let mut tree = Tree::new();
/// let root = tree.add_node();
/// let a = tree.add_leaf("A");
/// let b = tree.add_leaf("B");
/// tree.set_root(root);
/// tree.add_child_with_length(root, a, 0.5).unwrap();
/// tree.add_child_with_length(root, b, 1.5).unwrap();
/// assert_eq!(writer::write_newick(&tree), "(A:0.5,B:1.5);");
/// ```
pub fn write_newick(tree: &Tree) -> String {
    write_newick_with_format(tree, "")
}

/// Serialize the tree to a Newick string with optional indentation.
///
/// # Arguments
/// * `indent` - The string to use for indentation (e.g., "  ", "\t").
///   If empty, output will be compact (no whitespace).
///
/// The root never carries a branch length.
pub fn write_newick_with_format(tree: &Tree, indent: &str) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = to_newick_recursive(tree, root, indent, 0, true);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

fn to_newick_recursive(
    tree: &Tree,
    node_id: NodeId,
    indent: &str,
    depth: usize,
    is_root: bool,
) -> String {
    let Some(node) = tree.get_node(node_id) else {
        return String::new();
    };
    let is_pretty = !indent.is_empty();
    let my_indent = if is_pretty {
        indent.repeat(depth)
    } else {
        String::new()
    };

    let mut node_info = String::new();
    if let Some(name) = &node.name {
        node_info.push_str(&quote_label(name));
    }
    if !is_root {
        if let Some(len) = node.length {
            node_info.push_str(&format!(":{}", len));
        }
    }

    if node.children.is_empty() {
        format!("{}{}", my_indent, node_info)
    } else {
        let children_strs: Vec<String> = node
            .children
            .iter()
            .map(|&child| to_newick_recursive(tree, child, indent, depth + 1, false))
            .collect();

        if is_pretty {
            format!(
                "{}(\n{}\n{}){}",
                my_indent,
                children_strs.join(",\n"),
                my_indent,
                node_info
            )
        } else {
            format!("({}){}", children_strs.join(","), node_info)
        }
    }
}

/// Single-quote labels holding Newick metacharacters, doubling inner quotes.
pub fn quote_label(label: &str) -> String {
    let needs_quote = label
        .chars()
        .any(|c| "(),:;[]'".contains(c) || c.is_whitespace());
    if needs_quote {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
