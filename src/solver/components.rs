//! Grid-aware disjoint set tracking piece components
//!
//! Ordinary union-find answers "are these connected?"; this structure also
//! has to answer "where, and facing which way?". Every component carries a
//! sparse cell map and a rotation offset per member piece, both relative to
//! the component's own frame. Joining two components is a rigid transform
//! of the whole guest grid (one rotation, one translation) followed by a
//! collision check; a rejected join leaves both components untouched.

use std::collections::HashMap;

use ndarray::Array2;

use crate::solver::matching::split_edge_index;
use crate::spatial::CellMap;
use crate::spatial::orientation::{
    compose_rotation, facing, opposite, rotate_cell, side_delta, turns_between,
};

/// Marker for grid cells not covered by any placed piece
pub const UNPLACED: i32 = -1;

/// Why a join attempt was refused
///
/// Rejections are expected, high-frequency outcomes of the greedy search;
/// they are signals to skip a candidate, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinRejection {
    /// Both edges already belong to the same component
    AlreadyConnected,
    /// The merge would place two pieces on the same grid cell
    ///
    /// Also returned for edge indices outside the piece set.
    PlacementConflict,
}

/// Placement of one piece inside its component's coordinate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePlacement {
    /// Occupied `(row, col)` cell
    pub cell: (i32, i32),
    /// Clockwise quarter-turns relative to the component frame
    pub rotation: u8,
}

/// A connected group of pieces forming a consistent partial grid
///
/// Invariant: the cell map and the member map are inverse views of each
/// other — every occupied cell maps to exactly one member piece and every
/// member occupies exactly one cell.
#[derive(Debug, Clone)]
pub struct Component {
    cells: CellMap,
    members: HashMap<usize, PiecePlacement>,
}

impl Component {
    fn singleton(piece: usize) -> Self {
        let mut members = HashMap::new();
        members.insert(
            piece,
            PiecePlacement {
                cell: (0, 0),
                rotation: 0,
            },
        );
        Self {
            cells: CellMap::singleton(piece),
            members,
        }
    }

    /// Number of member pieces
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the component has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Placement of a member piece, if it belongs to this component
    pub fn placement_of(&self, piece: usize) -> Option<PiecePlacement> {
        self.members.get(&piece).copied()
    }

    /// Iterate over member piece indices in unspecified order
    pub fn pieces(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.keys().copied()
    }

    /// The component's sparse occupancy map
    pub const fn cells(&self) -> &CellMap {
        &self.cells
    }

    fn collides_with(&self, guest: &Self, turns: u8, offset: (i32, i32)) -> bool {
        guest.members.values().any(|place| {
            let rotated = rotate_cell(place.cell, turns);
            self.cells
                .is_occupied((rotated.0 + offset.0, rotated.1 + offset.1))
        })
    }

    fn absorb(&mut self, guest: Self, turns: u8, offset: (i32, i32)) {
        for (piece, place) in guest.members {
            let rotated = rotate_cell(place.cell, turns);
            let cell = (rotated.0 + offset.0, rotated.1 + offset.1);
            self.cells.insert(cell, piece);
            self.members.insert(
                piece,
                PiecePlacement {
                    cell,
                    rotation: compose_rotation(place.rotation, turns),
                },
            );
        }
    }

    fn to_solution(&self) -> Solution {
        let Some(bounds) = self.cells.bounds() else {
            return Solution {
                placements: Array2::from_elem((0, 0), UNPLACED),
                rotations: Array2::zeros((0, 0)),
            };
        };

        let mut placements = Array2::from_elem((bounds.rows(), bounds.cols()), UNPLACED);
        let mut rotations = Array2::zeros((bounds.rows(), bounds.cols()));
        for (cell, piece) in self.cells.iter() {
            let row = (cell.0 - bounds.min_row) as usize;
            let col = (cell.1 - bounds.min_col) as usize;
            if let Some(slot) = placements.get_mut([row, col]) {
                *slot = piece as i32;
            }
            if let Some(place) = self.members.get(&piece) {
                if let Some(slot) = rotations.get_mut([row, col]) {
                    *slot = place.rotation;
                }
            }
        }

        Solution {
            placements,
            rotations,
        }
    }
}

/// Final dense grid of piece placements and per-cell rotation counts
///
/// Both arrays cover the owning component's bounding box and are addressed
/// `[row, col]`; cells no piece covers hold [`UNPLACED`] and rotation 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Piece index per cell, or [`UNPLACED`]
    pub placements: Array2<i32>,
    /// Clockwise quarter-turns applied to the piece on each cell
    pub rotations: Array2<u8>,
}

impl Solution {
    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.placements.nrows()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.placements.ncols()
    }

    /// Piece occupying a cell, if any
    pub fn piece_at(&self, row: usize, col: usize) -> Option<usize> {
        self.placements
            .get([row, col])
            .and_then(|&piece| (piece != UNPLACED).then_some(piece as usize))
    }

    /// Number of cells within the grid covered by no piece
    pub fn unplaced_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|&&piece| piece == UNPLACED)
            .count()
    }
}

/// Disjoint set of pieces with per-component placement grids
///
/// Not safe for concurrent mutation: `join` performs a read, conflict
/// check, then write across two components and must stay atomic with
/// respect to other joins.
#[derive(Debug, Clone)]
pub struct GridUnionFind {
    parent: Vec<usize>,
    components: Vec<Option<Component>>,
    component_count: usize,
}

impl GridUnionFind {
    /// Create one singleton component per piece
    pub fn new(piece_count: usize) -> Self {
        Self {
            parent: (0..piece_count).collect(),
            components: (0..piece_count)
                .map(|piece| Some(Component::singleton(piece)))
                .collect(),
            component_count: piece_count,
        }
    }

    /// Number of pieces tracked
    pub fn piece_count(&self) -> usize {
        self.parent.len()
    }

    /// Number of components still standing
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Whether exactly one component remains covering all pieces
    pub const fn is_fully_joined(&self) -> bool {
        self.component_count == 1
    }

    /// Representative piece of the component owning `piece`
    ///
    /// Path-compressed; out-of-range pieces are their own representative.
    pub fn find(&mut self, piece: usize) -> usize {
        let mut root = piece;
        loop {
            let parent = self.parent.get(root).copied().unwrap_or(root);
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = piece;
        while current != root {
            let next = self.parent.get(current).copied().unwrap_or(root);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = root;
            }
            current = next;
        }
        root
    }

    /// Component owned by a representative piece
    pub fn component(&self, root: usize) -> Option<&Component> {
        self.components.get(root).and_then(Option::as_ref)
    }

    /// Representatives of all live components, in ascending order
    pub fn roots(&self) -> Vec<usize> {
        self.components
            .iter()
            .enumerate()
            .filter_map(|(root, component)| component.as_ref().map(|_| root))
            .collect()
    }

    /// Representative of the largest component; ties pick the smallest root
    pub fn largest_component(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (root, component) in self.components.iter().enumerate() {
            if let Some(component) = component {
                let len = component.len();
                if best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, root));
                }
            }
        }
        best.map(|(_, root)| root)
    }

    /// Attempt to merge the components of two edges along their boundary
    ///
    /// The edge pair dictates a unique rigid transform: the guest component
    /// rotates as a whole until the guest edge faces opposite the host edge,
    /// then translates so the guest piece lands on the neighbor cell the
    /// host edge points at. Union is by size; the first operand's component
    /// hosts on a size tie.
    ///
    /// # Errors
    ///
    /// Returns [`JoinRejection::AlreadyConnected`] for a same-component
    /// pair, or [`JoinRejection::PlacementConflict`] when the transformed
    /// guest would land on an occupied cell. Neither rejection mutates any
    /// component.
    pub fn join(&mut self, edge_a: usize, edge_b: usize) -> Result<(), JoinRejection> {
        let (piece_a, side_a) = split_edge_index(edge_a);
        let (piece_b, side_b) = split_edge_index(edge_b);
        if piece_a >= self.parent.len() || piece_b >= self.parent.len() {
            return Err(JoinRejection::PlacementConflict);
        }

        let root_a = self.find(piece_a);
        let root_b = self.find(piece_b);
        if root_a == root_b {
            return Err(JoinRejection::AlreadyConnected);
        }

        let size_a = self.component(root_a).map_or(0, Component::len);
        let size_b = self.component(root_b).map_or(0, Component::len);
        let (host_root, host_piece, host_side, guest_root, guest_piece, guest_side) =
            if size_b > size_a {
                (root_b, piece_b, side_b, root_a, piece_a, side_a)
            } else {
                (root_a, piece_a, side_a, root_b, piece_b, side_b)
            };

        let (turns, offset) = {
            let Some(host) = self.component(host_root) else {
                return Err(JoinRejection::PlacementConflict);
            };
            let Some(guest) = self.component(guest_root) else {
                return Err(JoinRejection::PlacementConflict);
            };
            let Some(host_place) = host.placement_of(host_piece) else {
                return Err(JoinRejection::PlacementConflict);
            };
            let Some(guest_place) = guest.placement_of(guest_piece) else {
                return Err(JoinRejection::PlacementConflict);
            };

            let host_facing = facing(host_side, host_place.rotation);
            let guest_facing = facing(guest_side, guest_place.rotation);
            let turns = turns_between(guest_facing, opposite(host_facing));

            let (delta_row, delta_col) = side_delta(host_facing);
            let target = (
                host_place.cell.0 + delta_row,
                host_place.cell.1 + delta_col,
            );
            let anchor = rotate_cell(guest_place.cell, turns);
            let offset = (target.0 - anchor.0, target.1 - anchor.1);

            if host.collides_with(guest, turns, offset) {
                return Err(JoinRejection::PlacementConflict);
            }
            (turns, offset)
        };

        let Some(guest) = self.components.get_mut(guest_root).and_then(Option::take) else {
            return Err(JoinRejection::PlacementConflict);
        };
        match self.components.get_mut(host_root).and_then(Option::as_mut) {
            Some(host) => host.absorb(guest, turns, offset),
            None => {
                if let Some(slot) = self.components.get_mut(guest_root) {
                    *slot = Some(guest);
                }
                return Err(JoinRejection::PlacementConflict);
            }
        }

        if let Some(slot) = self.parent.get_mut(guest_root) {
            *slot = host_root;
        }
        self.component_count -= 1;
        Ok(())
    }

    /// Materialize a component's sparse cell map into a dense [`Solution`]
    ///
    /// Returns `None` unless `root` is a live representative.
    pub fn extract(&self, root: usize) -> Option<Solution> {
        self.component(root).map(Component::to_solution)
    }
}
