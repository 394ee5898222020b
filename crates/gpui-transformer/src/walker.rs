//! Discovery of top-level markup units.

use crate::query::{MarkupNode, MarkupTree, NodeKind};

/// Returns every element that is not nested inside another element or an
/// expression container, in document order.
///
/// Nested elements are handled when their enclosing unit is built.
pub fn top_level_units<T: MarkupTree>(tree: &T) -> Vec<T::Node> {
    tree.find_all(&[NodeKind::Element, NodeKind::SelfClosingElement])
        .into_iter()
        .filter(is_top_level)
        .collect()
}

fn is_top_level<N: MarkupNode>(node: &N) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        let kind = parent.kind();
        if kind.is_element() || kind == NodeKind::Expression {
            return false;
        }
        current = parent.parent();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::JsxTree;

    fn unit_texts(source: &str) -> Vec<String> {
        let parsed = jsx_parser::parse(source);
        let tree = JsxTree::new(&parsed.document);
        top_level_units(&tree)
            .iter()
            .map(|node| node.text())
            .collect()
    }

    #[test]
    fn test_nested_elements_are_not_units() {
        assert_eq!(
            unit_texts("const a = <div><span>x</span></div>; const b = <img/>;"),
            vec!["<div><span>x</span></div>", "<img/>"]
        );
    }

    #[test]
    fn test_elements_under_expressions_are_not_units() {
        assert_eq!(
            unit_texts("<ul>{items.map(i => <li>{i}</li>)}</ul>"),
            vec!["<ul>{items.map(i => <li>{i}</li>)}</ul>"]
        );
        assert_eq!(
            unit_texts("<Panel icon={<Icon/>} />"),
            vec!["<Panel icon={<Icon/>} />"]
        );
    }

    #[test]
    fn test_no_markup() {
        assert!(unit_texts("export const x = a < b;").is_empty());
    }
}
