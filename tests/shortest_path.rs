use gridlearn::{
    Error,
    grid::{Cell, Direction, layout},
    shortest_path::{PathEngine, moves_along, shortest_path},
};

mod common;

use common::{adjacent, grid};

#[test]
fn demo_route_is_a_minimal_walkable_chain() {
    let grid = layout::demo();
    let start = grid.start().unwrap();
    let goal = grid.goal().unwrap();

    let path = shortest_path(&grid, start, goal).unwrap();
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert!(adjacent(&grid, pair[0], pair[1]), "{pair:?} not adjacent");
    }
    for &index in &path {
        assert_ne!(grid.cell(index).unwrap(), Cell::Obstructed);
    }

    // Goal is six rows down and two columns across from the start.
    assert_eq!(path.len(), 9);
}

#[test]
fn singleton_path_when_source_is_destination() {
    let grid = grid("S.G");
    assert_eq!(shortest_path(&grid, 1, 1).unwrap(), vec![1]);
    assert_eq!(PathEngine::default().path_length(&grid, 2, 2).unwrap(), 1);
}

#[test]
fn corridor_path_and_moves() {
    let grid = grid("S...G");
    let path = shortest_path(&grid, 0, 4).unwrap();
    assert_eq!(path, vec![0, 1, 2, 3, 4]);
    assert_eq!(moves_along(&grid, &path).unwrap(), vec![Direction::East; 4]);

    let back = shortest_path(&grid, 4, 0).unwrap();
    assert_eq!(back, vec![4, 3, 2, 1, 0]);
}

#[test]
fn hazards_are_walkable_at_uniform_cost() {
    let grid = grid("S~~~G");
    assert_eq!(shortest_path(&grid, 0, 4).unwrap().len(), 5);
}

#[test]
fn walled_off_goal_is_unreachable() {
    let grid = grid("S.#\n.##\n##G");
    let err = shortest_path(&grid, 0, 8).unwrap_err();
    assert!(matches!(
        err,
        Error::UnreachableDestination {
            origin: 0,
            destination: 8
        }
    ));
}
