//! Keyboard adjacency graphs, built once at startup from layout grids.
//!
//! Keyboard layouts are slanted: each row sits half a key to the right of
//! the row above, giving every key up to six neighbors. Keypad layouts are
//! aligned on a square grid, giving up to eight. Keyboard slots are
//! two-character strings holding the unshifted and shifted occupants of the
//! key; keypad slots are single characters.

use std::collections::HashMap;

pub type AdjacencyGraph = HashMap<char, Vec<Option<&'static str>>>;

const QWERTY_LAYOUT: &str = "\
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \\|
     aA sS dD fF gG hH jJ kK lL ;: '\"
      zZ xX cC vV bB nN mM ,< .> /?";

const DVORAK_LAYOUT: &str = "\
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '\" ,< .> pP yY fF gG cC rR lL /? =+ \\|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ";

const KEYPAD_LAYOUT: &str = "\
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .";

const MAC_KEYPAD_LAYOUT: &str = "\
  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 .";

// slot order: W, NW, NE, E, SE, SW
const SLANTED_DELTAS: [(isize, isize); 6] = [(-1, 0), (0, -1), (1, -1), (1, 0), (0, 1), (-1, 1)];
// slot order: W, NW, N, NE, E, SE, S, SW
const ALIGNED_DELTAS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

lazy_static! {
    pub static ref QWERTY: AdjacencyGraph = build_graph(QWERTY_LAYOUT, true);
    pub static ref DVORAK: AdjacencyGraph = build_graph(DVORAK_LAYOUT, true);
    pub static ref KEYPAD: AdjacencyGraph = build_graph(KEYPAD_LAYOUT, false);
    pub static ref MAC_KEYPAD: AdjacencyGraph = build_graph(MAC_KEYPAD_LAYOUT, false);
    pub static ref GRAPHS: [(&'static str, &'static AdjacencyGraph); 4] = [
        ("qwerty", &*QWERTY),
        ("dvorak", &*DVORAK),
        ("keypad", &*KEYPAD),
        ("mac_keypad", &*MAC_KEYPAD),
    ];
}

fn build_graph(layout: &'static str, slanted: bool) -> AdjacencyGraph {
    let x_unit = layout
        .split_whitespace()
        .next()
        .map(str::len)
        .unwrap_or(1) as isize
        + 1;
    let deltas: &[(isize, isize)] = if slanted {
        &SLANTED_DELTAS
    } else {
        &ALIGNED_DELTAS
    };

    let mut positions: HashMap<(isize, isize), &'static str> = HashMap::new();
    for (y, row) in layout.lines().enumerate() {
        let slant = if slanted { y as isize } else { 0 };
        for (offset, token) in tokens_with_offsets(row) {
            let x = (offset as isize - slant).div_euclid(x_unit);
            positions.insert((x, y as isize), token);
        }
    }

    let mut graph = AdjacencyGraph::new();
    for (&(x, y), token) in &positions {
        for c in token.chars() {
            let neighbors = deltas
                .iter()
                .map(|&(dx, dy)| positions.get(&(x + dx, y + dy)).copied())
                .collect();
            graph.insert(c, neighbors);
        }
    }
    graph
}

/// Splits a layout row on spaces, keeping each token's column offset.
fn tokens_with_offsets(row: &'static str) -> Vec<(usize, &'static str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (idx, c) in row.char_indices() {
        if c == ' ' {
            if let Some(s) = start.take() {
                tokens.push((s, &row[s..idx]));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        tokens.push((s, &row[s..]));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(graph: &AdjacencyGraph, c: char) -> Vec<Option<&'static str>> {
        graph[&c].clone()
    }

    #[test]
    fn test_qwerty_neighbor_slots() {
        assert_eq!(
            neighbors(&QWERTY, 'a'),
            vec![None, Some("qQ"), Some("wW"), Some("sS"), Some("zZ"), None]
        );
        assert_eq!(
            neighbors(&QWERTY, 'b'),
            vec![Some("vV"), Some("gG"), Some("hH"), Some("nN"), None, None]
        );
        assert_eq!(
            neighbors(&QWERTY, '1'),
            vec![Some("`~"), None, None, Some("2@"), Some("qQ"), None]
        );
        // shifted characters key the same slots as their unshifted partner
        assert_eq!(neighbors(&QWERTY, '!'), neighbors(&QWERTY, '1'));
        assert_eq!(
            neighbors(&QWERTY, '}'),
            vec![Some("[{"), Some("=+"), None, Some("\\|"), None, Some("'\"")]
        );
    }

    #[test]
    fn test_dvorak_neighbor_slots() {
        assert_eq!(
            neighbors(&DVORAK, 'a'),
            vec![None, Some("'\""), Some(",<"), Some("oO"), Some(";:"), None]
        );
    }

    #[test]
    fn test_keypad_neighbor_slots() {
        assert_eq!(
            neighbors(&KEYPAD, '0'),
            vec![
                None,
                Some("1"),
                Some("2"),
                Some("3"),
                Some("."),
                None,
                None,
                None
            ]
        );
        assert_eq!(
            neighbors(&KEYPAD, '5'),
            vec![
                Some("4"),
                Some("7"),
                Some("8"),
                Some("9"),
                Some("6"),
                Some("3"),
                Some("2"),
                Some("1")
            ]
        );
    }

    #[test]
    fn test_graph_sizes() {
        // 13 + 13 + 11 + 10 two-character keys for qwerty,
        // 13 + 14 + 11 + 10 for dvorak
        assert_eq!(QWERTY.len(), 94);
        assert_eq!(DVORAK.len(), 96);
        assert_eq!(KEYPAD.len(), 15);
        assert_eq!(MAC_KEYPAD.len(), 16);
    }
}
