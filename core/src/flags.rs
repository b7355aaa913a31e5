use alloc::vec::Vec;

use crate::*;

type NodeId = usize;

#[derive(Copy, Clone, Debug)]
struct FlagNode {
    coords: Coord2,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Insertion-ordered set of flagged coordinates, most recent first.
///
/// Nodes live in an arena and link to each other by index, freed slots are
/// recycled by later insertions. The index never looks at the grid, keeping
/// it in sync with the flag bits is the board's job.
#[derive(Clone, Debug, Default)]
pub struct FlagIndex {
    nodes: Vec<FlagNode>,
    free: Vec<NodeId>,
    head: Option<NodeId>,
    len: usize,
}

impl FlagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts at the front, the caller guarantees `coords` is not present.
    pub fn add(&mut self, coords: Coord2) {
        let node = FlagNode {
            coords,
            prev: None,
            next: self.head,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            self.nodes[old_head].prev = Some(id);
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Unlinks `coords`, returns whether it was present.
    pub fn remove(&mut self, coords: Coord2) -> bool {
        let Some(id) = self.find(coords) else {
            return false;
        };

        let FlagNode { prev, next, .. } = self.nodes[id];
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }

        self.free.push(id);
        self.len -= 1;
        true
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.find(coords).is_some()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }

    /// Front to back, may be called again to restart.
    pub fn iter(&self) -> FlagIter<'_> {
        FlagIter {
            index: self,
            cursor: self.head,
        }
    }

    fn find(&self, coords: Coord2) -> Option<NodeId> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.coords == coords {
                return Some(id);
            }
            cursor = node.next;
        }
        None
    }
}

impl<'a> IntoIterator for &'a FlagIndex {
    type Item = Coord2;
    type IntoIter = FlagIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug)]
pub struct FlagIter<'a> {
    index: &'a FlagIndex,
    cursor: Option<NodeId>,
}

impl Iterator for FlagIter<'_> {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.index.nodes[self.cursor?];
        self.cursor = node.next;
        Some(node.coords)
    }
}
