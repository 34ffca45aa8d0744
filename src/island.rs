//! # Island
//!
//! The connectivity check. Every occupied cell is a node of an undirected
//! graph, with edges to its occupied orthogonal neighbours; the placed letters
//! form a single island exactly when a breadth-first search from any one of
//! them reaches all the others.

use petgraph::{graphmap::UnGraphMap, visit::Bfs};

use crate::board::{LetterGrid, GRID_SIZE};

/// The graph of occupied cells, keyed by `(row, column)`.
pub type LetterGraph = UnGraphMap<(usize, usize), ()>;

/// Build the graph of occupied cells. Cells are joined when they are
/// orthogonally adjacent; nothing wraps around the edges.
///
/// # Arguments
///
/// * `grid` - The grid to examine.
///
/// # Returns
///
/// The graph.
#[must_use]
pub fn letter_graph<G: LetterGrid + ?Sized>(grid: &G) -> LetterGraph
{
	let mut graph = LetterGraph::new();
	for (row, col) in grid.occupied()
	{
		graph.add_node((row, col));
		if row + 1 < GRID_SIZE && grid.letter_at(row + 1, col).is_some()
		{
			graph.add_edge((row, col), (row + 1, col), ());
		}
		if col + 1 < GRID_SIZE && grid.letter_at(row, col + 1).is_some()
		{
			graph.add_edge((row, col), (row, col + 1), ());
		}
	}
	graph
}

/// Check that every placed letter is connected to every other, directly or
/// transitively. An empty grid passes vacuously; completeness is gated
/// separately by the letter count.
///
/// # Arguments
///
/// * `grid` - The grid to examine.
///
/// # Returns
///
/// `true` if the occupied cells form at most one island, `false` otherwise.
#[must_use]
pub fn validate_word_island<G: LetterGrid + ?Sized>(grid: &G) -> bool
{
	let graph = letter_graph(grid);
	let Some(start) = graph.nodes().next()
	else
	{
		return true
	};
	let mut bfs = Bfs::new(&graph, start);
	let mut reached = 0;
	while bfs.next(&graph).is_some()
	{
		reached += 1;
	}
	reached == graph.node_count()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::{HashSet, VecDeque};

	use rand::{Rng, SeedableRng};
	use rand_chacha::ChaCha8Rng;

	use crate::{
		board::{Board, Letter, LetterGrid, SolutionBoard, GRID_SIZE},
		island::*
	};

	fn solution(rows: [&str; 6]) -> SolutionBoard
	{
		SolutionBoard::from_rows(&rows).unwrap()
	}

	/// A straightforward flood fill, for comparison.
	fn flood_fill_reaches_all(grid: &SolutionBoard) -> bool
	{
		let occupied = grid.occupied();
		let Some(&start) = occupied.first() else { return true };
		let mut seen = HashSet::from([start]);
		let mut queue = VecDeque::from([start]);
		while let Some((row, col)) = queue.pop_front()
		{
			let neighbours = [
				(row.wrapping_sub(1), col),
				(row + 1, col),
				(row, col.wrapping_sub(1)),
				(row, col + 1)
			];
			for (r, c) in neighbours
			{
				if r < GRID_SIZE && c < GRID_SIZE
					&& grid.letter_at(r, c).is_some()
					&& seen.insert((r, c))
				{
					queue.push_back((r, c));
				}
			}
		}
		seen.len() == occupied.len()
	}

	/// Ensure that empty and single-letter grids pass.
	#[test]
	fn test_trivial()
	{
		assert!(validate_word_island(&Board::new()));
		let mut board = Board::new();
		board.tiles[4][2].letter = Some(Letter::new(0, 'A'));
		assert!(validate_word_island(&board));
	}

	/// Ensure that a crossword shape is one island.
	#[test]
	fn test_connected()
	{
		let grid = solution([
			"STARES",
			"L...A.",
			"EAGER.",
			"E...N.",
			"PLANS.",
			"......"
		]);
		assert!(validate_word_island(&grid));
		assert_eq!(letter_graph(&grid).node_count(), 20);
	}

	/// Ensure that diagonal contact does not connect, and that nothing wraps
	/// around the edges.
	#[test]
	fn test_disconnected()
	{
		let diagonal = solution([
			"AT....",
			"..TO..",
			"......",
			"......",
			"......",
			"......"
		]);
		assert!(!validate_word_island(&diagonal));
		let edges = solution([
			"A....T",
			"......",
			"......",
			"......",
			"......",
			"......"
		]);
		assert!(!validate_word_island(&edges));
	}

	/// Ensure that the graph search agrees with a plain flood fill across a
	/// spread of random grids.
	#[test]
	fn test_agrees_with_flood_fill()
	{
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		for _ in 0 .. 500
		{
			let density = rng.gen_range(0.1 .. 0.7);
			let mut grid = SolutionBoard::empty();
			for row in 0 .. GRID_SIZE
			{
				for col in 0 .. GRID_SIZE
				{
					if rng.gen_bool(density)
					{
						grid.set(row, col, Some('E'));
					}
				}
			}
			assert_eq!(
				validate_word_island(&grid),
				flood_fill_reaches_all(&grid),
				"\n{}",
				grid
			);
		}
	}
}
