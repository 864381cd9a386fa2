//! Tree Building
//!
//! Turns the flat, parent-referencing position list into an ordered forest.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

use pinyin::ToPinyin;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::Position;

/// Display node derived from a position. Rebuilt on every read, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Position name
    pub title: String,
    /// Position id
    pub key: String,
    /// Sorted by title
    pub children: Vec<TreeNode>,
    pub is_leaf: bool,
    pub expanded: bool,
    /// Source record, for lookups on click
    pub origin: Position,
}

// Unlinks descendants one level at a time so long chains do not exhaust the stack
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut doomed = std::mem::take(&mut self.children);
        while let Some(mut node) = doomed.pop() {
            doomed.append(&mut node.children);
        }
    }
}

/// Build the forest for a flat list of positions.
///
/// Every distinct id appears exactly once in the result:
/// - no parent, or a parent id that does not exist => root
/// - a node sitting on a `parent_id` cycle => root (its parent link is ignored)
///
/// Roots and every children list are sorted with [`compare_titles`].
pub fn build_tree(positions: &[Position]) -> Vec<TreeNode> {
    // id -> record, last duplicate wins
    let mut by_id: HashMap<&str, &Position> = HashMap::with_capacity(positions.len());
    for position in positions {
        if by_id.insert(position.id.as_str(), position).is_some() {
            log::warn!("[TREE] Duplicate position id {:?}, keeping the last record", position.id);
        }
    }

    let on_cycle = cycle_members(&by_id);

    // Build parent -> children map
    let mut children_map: HashMap<&str, Vec<&Position>> = HashMap::new();
    let mut roots: Vec<&Position> = Vec::new();
    for &position in by_id.values() {
        match attached_parent(position, &by_id, &on_cycle) {
            Some(parent_id) => children_map.entry(parent_id).or_default().push(position),
            None => roots.push(position),
        }
    }

    // Pre-order walk; reversed, every child comes before its parent
    let mut order: Vec<&Position> = Vec::with_capacity(by_id.len());
    let mut pending: Vec<&Position> = roots.clone();
    while let Some(position) = pending.pop() {
        order.push(position);
        if let Some(kids) = children_map.get(position.id.as_str()) {
            pending.extend(kids.iter().copied());
        }
    }

    let mut built: HashMap<&str, TreeNode> = HashMap::with_capacity(order.len());
    for position in order.into_iter().rev() {
        let mut children: Vec<TreeNode> = children_map
            .get(position.id.as_str())
            .map(|kids| kids.iter().filter_map(|kid| built.remove(kid.id.as_str())).collect())
            .unwrap_or_default();
        children.sort_by(compare_nodes);
        built.insert(position.id.as_str(), make_node(position, children));
    }

    let mut forest: Vec<TreeNode> = roots
        .into_iter()
        .filter_map(|root| built.remove(root.id.as_str()))
        .collect();
    forest.sort_by(compare_nodes);
    forest
}

fn make_node(position: &Position, children: Vec<TreeNode>) -> TreeNode {
    TreeNode {
        title: position.name.clone(),
        key: position.id.clone(),
        is_leaf: children.is_empty(),
        children,
        expanded: true,
        origin: position.clone(),
    }
}

/// Parent this node hangs under, or None when it must be a root
fn attached_parent<'a>(
    position: &'a Position,
    by_id: &HashMap<&str, &Position>,
    on_cycle: &HashSet<&str>,
) -> Option<&'a str> {
    if on_cycle.contains(position.id.as_str()) {
        return None;
    }
    let parent_id = position.effective_parent_id()?;
    if by_id.contains_key(parent_id) {
        Some(parent_id)
    } else {
        log::debug!("[TREE] {:?} references missing parent {:?}, showing as root", position.id, parent_id);
        None
    }
}

/// Ids of all nodes that lie on a parent cycle.
///
/// Each node has at most one parent, so every walk up the ancestor chain either
/// ends at a root, joins an already finished walk, or runs into itself.
fn cycle_members<'a>(by_id: &HashMap<&'a str, &'a Position>) -> HashSet<&'a str> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Visit {
        InWalk,
        Done,
    }

    let mut visits: HashMap<&str, Visit> = HashMap::with_capacity(by_id.len());
    let mut members: HashSet<&'a str> = HashSet::new();

    for &start in by_id.keys() {
        let mut path: Vec<&'a str> = Vec::new();
        let mut cursor = Some(start);

        while let Some(id) = cursor {
            match visits.get(id) {
                Some(Visit::Done) => break,
                Some(Visit::InWalk) => {
                    if let Some(entry) = path.iter().position(|seen| *seen == id) {
                        members.extend(path[entry..].iter().copied());
                    }
                    break;
                }
                None => {
                    visits.insert(id, Visit::InWalk);
                    path.push(id);
                    cursor = by_id
                        .get(id)
                        .copied()
                        .and_then(Position::effective_parent_id)
                        .filter(|parent_id| by_id.contains_key(parent_id));
                }
            }
        }

        for id in path {
            visits.insert(id, Visit::Done);
        }
    }

    if !members.is_empty() {
        let mut ids: Vec<&str> = members.iter().copied().collect();
        ids.sort_unstable();
        log::warn!("[TREE] Parent cycle detected, showing {:?} as roots", ids);
    }
    members
}

fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    compare_titles(&a.title, &b.title).then_with(|| a.key.cmp(&b.key))
}

/// Locale-style title ordering.
///
/// Primary: base letters with accents stripped and case folded, Han characters
/// compared by toneless pinyin. Then accents (unaccented first), then lowercase
/// before uppercase, then plain code point order.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn collation_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    for c in title.chars() {
        if let Some(pinyin) = c.to_pinyin() {
            key.push_str(pinyin.plain());
            continue;
        }
        for base in std::iter::once(c).nfd().filter(|d| !is_combining_mark(*d)) {
            for lower in base.to_lowercase() {
                push_base_letter(&mut key, lower);
            }
        }
    }
    key
}

/// Letters with no canonical decomposition, sorted next to their base letter
fn push_base_letter(key: &mut String, c: char) {
    match c {
        'ø' => key.push('o'),
        'đ' | 'ð' => key.push('d'),
        'ł' => key.push('l'),
        'ħ' => key.push('h'),
        'ı' => key.push('i'),
        'æ' => key.push_str("ae"),
        'œ' => key.push_str("oe"),
        'ß' => key.push_str("ss"),
        'þ' => key.push_str("th"),
        other => key.push(other),
    }
}

/// Case-folded decomposition; differs between titles only in their accents
fn accent_key(title: &str) -> String {
    title.nfd().flat_map(char::to_lowercase).collect()
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Depth-first display order with depth, for indented rendering
pub fn flatten_forest(forest: &[TreeNode]) -> Vec<(&TreeNode, usize)> {
    let mut result = Vec::new();
    let mut pending: Vec<(&TreeNode, usize)> = forest.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        result.push((node, depth));
        if node.expanded {
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
    result
}

/// Ids of every position below `id` (not including `id` itself)
pub fn descendant_ids(positions: &[Position], id: &str) -> HashSet<String> {
    let mut children_map: HashMap<&str, Vec<&str>> = HashMap::new();
    for position in positions {
        if let Some(parent_id) = position.effective_parent_id() {
            children_map.entry(parent_id).or_default().push(position.id.as_str());
        }
    }

    let mut found: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([id]);
    while let Some(current) = queue.pop_front() {
        for &child in children_map.get(current).into_iter().flatten() {
            if child != id && found.insert(child.to_string()) {
                queue.push_back(child);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_position(id: &str, name: &str, parent_id: Option<&str>) -> Position {
        let position = Position::new(id, name);
        match parent_id {
            Some(parent_id) => position.with_parent(parent_id),
            None => position,
        }
    }

    fn titles(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.title.as_str()).collect()
    }

    fn all_keys(nodes: &[TreeNode]) -> Vec<String> {
        let mut keys: Vec<String> = flatten_forest(nodes)
            .into_iter()
            .map(|(node, _)| node.key.clone())
            .collect();
        keys.sort();
        keys
    }

    fn assert_well_formed(nodes: &[TreeNode]) {
        let mut sorted = nodes.to_vec();
        sorted.sort_by(compare_nodes);
        assert_eq!(titles(nodes), titles(&sorted));
        for node in nodes {
            assert_eq!(node.is_leaf, node.children.is_empty(), "leaf flag of {}", node.key);
            assert_eq!(node.title, node.origin.name);
            assert_eq!(node.key, node.origin.id);
            assert_well_formed(&node.children);
        }
    }

    #[test]
    fn test_single_chain() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("2", "CTO", Some("1")),
            make_position("3", "Dev", Some("2")),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["CEO"]);
        let ceo = &tree[0];
        assert!(!ceo.is_leaf);
        assert_eq!(titles(&ceo.children), vec!["CTO"]);
        let cto = &ceo.children[0];
        assert!(!cto.is_leaf);
        assert_eq!(titles(&cto.children), vec!["Dev"]);
        let dev = &cto.children[0];
        assert!(dev.is_leaf);
        assert!(dev.children.is_empty());
    }

    #[test]
    fn test_siblings_sorted_by_title() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("2", "Bob", Some("1")),
            make_position("3", "Alice", Some("1")),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree[0].children), vec!["Alice", "Bob"]);
        assert!(tree[0].children.iter().all(|n| n.is_leaf));
    }

    #[test]
    fn test_roots_sorted_and_leaf_flags() {
        let positions = vec![
            make_position("1", "Zeta", None),
            make_position("2", "alpha", None),
            make_position("3", "Mid", None),
            make_position("4", "Child", Some("1")),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["alpha", "Mid", "Zeta"]);
        assert_well_formed(&tree);
        assert!(!tree[2].is_leaf);
        assert!(tree[0].is_leaf);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("5", "Orphan", Some("404")),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["CEO", "Orphan"]);
        assert_eq!(tree[1].origin.parent_id.as_deref(), Some("404"));
    }

    #[test]
    fn test_every_position_appears_once() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("2", "CTO", Some("1")),
            make_position("3", "CFO", Some("1")),
            make_position("4", "Dev", Some("2")),
            make_position("5", "QA", Some("2")),
            make_position("6", "Accountant", Some("3")),
            make_position("7", "Board", None),
            make_position("8", "Lost", Some("99")),
        ];

        let tree = build_tree(&positions);

        let mut expected: Vec<String> = positions.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        assert_eq!(all_keys(&tree), expected);
        assert_well_formed(&tree);
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("2", "CTO", Some("1")),
            make_position("3", "CFO", Some("1")),
            make_position("4", "Dev", Some("2")),
            make_position("5", "Dev", Some("2")),
        ];
        let mut reversed = positions.clone();
        reversed.reverse();

        let first = build_tree(&positions);
        let second = build_tree(&positions);
        let from_reversed = build_tree(&reversed);

        assert_eq!(first, second);
        assert_eq!(first, from_reversed);
        // Equal titles fall back to id order
        let dev_keys: Vec<&str> = first[0].children[1].children.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(dev_keys, vec!["4", "5"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_cycle_members_become_roots() {
        let positions = vec![
            make_position("a", "Alpha", Some("b")),
            make_position("b", "Beta", Some("a")),
            make_position("c", "Gamma", Some("a")),
            make_position("d", "Delta", None),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["Alpha", "Beta", "Delta"]);
        // Gamma is not on the cycle, so it stays under Alpha
        assert_eq!(titles(&tree[0].children), vec!["Gamma"]);
        assert!(tree[1].is_leaf);
        assert_eq!(all_keys(&tree), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_self_parent_is_root() {
        let positions = vec![make_position("1", "Loop", Some("1"))];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["Loop"]);
        assert!(tree[0].is_leaf);
    }

    #[test]
    fn test_duplicate_id_keeps_last_record() {
        let positions = vec![
            make_position("1", "Old", None),
            make_position("1", "New", None),
        ];

        let tree = build_tree(&positions);

        assert_eq!(titles(&tree), vec!["New"]);
    }

    #[test]
    fn test_title_collation() {
        assert_eq!(compare_titles("alice", "Bob"), Ordering::Less);
        assert_eq!(compare_titles("a", "A"), Ordering::Less);
        assert_eq!(compare_titles("Zed", "zebra"), Ordering::Greater);
        assert_eq!(compare_titles("Same", "Same"), Ordering::Equal);
        // cai < ji < shi
        let mut names = vec!["市场", "技术", "财务"];
        names.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(names, vec!["财务", "技术", "市场"]);
    }

    #[test]
    fn test_accented_titles_sort_with_base_letters() {
        assert_eq!(compare_titles("Émile", "Zoe"), Ordering::Less);
        assert_eq!(compare_titles("Øystein", "Paul"), Ordering::Less);
        assert_eq!(compare_titles("Ærø", "Bob"), Ordering::Less);
        // Unaccented first when the letters match
        assert_eq!(compare_titles("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("Oystein", "Øystein"), Ordering::Less);
        // Accents decide before case
        assert_eq!(compare_titles("Eclair", "éclair"), Ordering::Less);

        let mut names = vec!["Zoe", "Émile", "anna", "Øystein", "Paul", "Łukasz", "Eva"];
        names.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(names, vec!["anna", "Émile", "Eva", "Łukasz", "Øystein", "Paul", "Zoe"]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        const DEPTH: usize = 20_000;
        let positions: Vec<Position> = (0..DEPTH)
            .map(|i| {
                let parent = i.checked_sub(1).map(|p| p.to_string());
                make_position(&i.to_string(), &format!("Level {}", i), parent.as_deref())
            })
            .collect();

        let tree = build_tree(&positions);

        assert_eq!(tree.len(), 1);
        let flat = flatten_forest(&tree);
        assert_eq!(flat.len(), DEPTH);
        let (deepest, depth) = flat[DEPTH - 1];
        assert_eq!(deepest.key, (DEPTH - 1).to_string());
        assert_eq!(depth, DEPTH - 1);
        assert!(deepest.is_leaf);
        assert!(flat[..DEPTH - 1].iter().all(|(node, _)| !node.is_leaf));
    }

    #[test]
    fn test_flatten_forest() {
        let positions = vec![
            make_position("1", "A", None),
            make_position("2", "B", None),
            make_position("3", "A1", Some("1")),
            make_position("4", "A2", Some("1")),
            make_position("5", "A1x", Some("3")),
        ];
        let tree = build_tree(&positions);

        let flat: Vec<(&str, usize)> = flatten_forest(&tree)
            .into_iter()
            .map(|(node, depth)| (node.key.as_str(), depth))
            .collect();

        assert_eq!(flat, vec![("1", 0), ("3", 1), ("5", 2), ("4", 1), ("2", 0)]);
    }

    #[test]
    fn test_descendant_ids() {
        let positions = vec![
            make_position("1", "CEO", None),
            make_position("2", "CTO", Some("1")),
            make_position("3", "Dev", Some("2")),
            make_position("4", "CFO", Some("1")),
            make_position("5", "Other", None),
        ];

        let below_cto = descendant_ids(&positions, "2");
        assert_eq!(below_cto, HashSet::from(["3".to_string()]));

        let below_ceo = descendant_ids(&positions, "1");
        assert_eq!(below_ceo.len(), 3);
        assert!(!below_ceo.contains("5"));
    }

    #[test]
    fn test_descendant_ids_survives_cycle() {
        let positions = vec![
            make_position("a", "A", Some("b")),
            make_position("b", "B", Some("a")),
        ];

        assert_eq!(descendant_ids(&positions, "a"), HashSet::from(["b".to_string()]));
    }
}
