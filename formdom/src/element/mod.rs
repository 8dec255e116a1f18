mod content;
mod node;

pub use content::Content;
pub use node::{Element, ElementKind, InputType, SelectOption};

use crate::selector::Selector;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    let path = locate(root, &|el, _| el.id == id)?;
    descend_mut(root, &path)
}

/// First element matching `selector` in document order. The root itself is
/// a candidate.
pub fn query<'a>(root: &'a Element, selector: &Selector) -> Option<&'a Element> {
    let mut ancestors = Vec::new();
    first_match(root, selector, &mut ancestors)
}

pub fn query_mut<'a>(root: &'a mut Element, selector: &Selector) -> Option<&'a mut Element> {
    let path = locate(root, &|el, ancestors| selector.matches(el, ancestors))?;
    descend_mut(root, &path)
}

/// Every element matching `selector`, in document order.
pub fn query_all<'a>(root: &'a Element, selector: &Selector) -> Vec<&'a Element> {
    let mut found = Vec::new();
    let mut ancestors = Vec::new();
    collect_matches(root, selector, &mut ancestors, &mut found);
    found
}

fn first_match<'a>(
    el: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
) -> Option<&'a Element> {
    if selector.matches(el, ancestors) {
        return Some(el);
    }

    ancestors.push(el);
    for child in el.child_elements() {
        if let Some(found) = first_match(child, selector, ancestors) {
            return Some(found);
        }
    }
    ancestors.pop();

    None
}

fn collect_matches<'a>(
    el: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
    found: &mut Vec<&'a Element>,
) {
    if selector.matches(el, ancestors) {
        found.push(el);
    }

    ancestors.push(el);
    for child in el.child_elements() {
        collect_matches(child, selector, ancestors, found);
    }
    ancestors.pop();
}

type Predicate<'p> = dyn Fn(&Element, &[&Element]) -> bool + 'p;

/// Child-index path from `root` to the first element accepted by `pred`.
fn locate(root: &Element, pred: &Predicate<'_>) -> Option<Vec<usize>> {
    fn walk<'a>(
        el: &'a Element,
        pred: &Predicate<'_>,
        ancestors: &mut Vec<&'a Element>,
        path: &mut Vec<usize>,
    ) -> bool {
        if pred(el, ancestors) {
            return true;
        }

        ancestors.push(el);
        for (index, child) in el.child_elements().iter().enumerate() {
            path.push(index);
            if walk(child, pred, ancestors, path) {
                return true;
            }
            path.pop();
        }
        ancestors.pop();

        false
    }

    let mut path = Vec::new();
    let mut ancestors = Vec::new();
    walk(root, pred, &mut ancestors, &mut path).then_some(path)
}

fn descend_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut current = root;
    for &index in path {
        let parent = current;
        current = parent.child_elements_mut().get_mut(index)?;
    }
    Some(current)
}
