//! The eight concrete end-to-end scenarios enumerated in §8 of the spec, each as its
//! own test, numbered to match.

use contrast::core::board::Board;
use contrast::core::cell::Cell;
use contrast::core::consts::{NUM_CELLS, Player, TileType};
use contrast::core::coord::Coord;
use contrast::core::inventory::TileInventory;
use contrast::core::rules::{apply_move, is_win, legal_moves};
use contrast::core::state::GameState;
use contrast::eval::network::Network;

fn empty_state(to_move: Player) -> GameState {
    GameState {
        board: Board([Cell::EMPTY; NUM_CELLS]),
        to_move,
        inventory_black: TileInventory::INITIAL,
        inventory_white: TileInventory::INITIAL,
    }
}

fn place(state: &mut GameState, x: u8, y: u8, occupant: Player, tile: TileType) {
    state.board.set_cell(Coord::new(x, y), Cell::new(occupant, tile));
}

fn base_destinations(state: &GameState, origin: Coord) -> Vec<(u8, u8)> {
    let mut dests: Vec<(u8, u8)> = legal_moves(state)
        .into_iter()
        .filter(|mv| mv.from == origin && mv.placement.is_none())
        .map(|mv| (mv.to.x, mv.to.y))
        .collect();
    dests.sort();
    dests
}

#[test]
fn scenario_1_initial_state() {
    let s = GameState::initial();
    let expected: [u8; 29] = [
        3, 3, 3, 3, 3, //
        0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, //
        6, 6, 6, 6, 6, //
        3, 1, 3, 1,
    ];
    assert_eq!(s.encode(), expected);
    assert!(!legal_moves(&s).is_empty());
    assert!(!is_win(&s, Player::Black));
    assert!(!is_win(&s, Player::White));
}

#[test]
fn scenario_2_orthogonal_step() {
    let mut s = empty_state(Player::Black);
    place(&mut s, 2, 2, Player::Black, TileType::None);
    assert_eq!(
        base_destinations(&s, Coord::new(2, 2)),
        vec![(1, 2), (2, 1), (2, 3), (3, 2)]
    );
}

#[test]
fn scenario_3_diagonal_step() {
    let mut s = empty_state(Player::Black);
    place(&mut s, 2, 2, Player::Black, TileType::Black);
    assert_eq!(
        base_destinations(&s, Coord::new(2, 2)),
        vec![(1, 1), (1, 3), (3, 1), (3, 3)]
    );
}

#[test]
fn scenario_4_jump() {
    let mut s = empty_state(Player::Black);
    place(&mut s, 2, 2, Player::Black, TileType::None);
    place(&mut s, 2, 3, Player::Black, TileType::None);
    let dests = base_destinations(&s, Coord::new(2, 2));
    assert!(dests.contains(&(2, 4)));
    assert!(!dests.contains(&(2, 3)));
}

#[test]
fn scenario_5_block() {
    let mut s = empty_state(Player::Black);
    place(&mut s, 2, 2, Player::Black, TileType::None);
    place(&mut s, 2, 3, Player::White, TileType::None);
    let dests = base_destinations(&s, Coord::new(2, 2));
    assert!(!dests.contains(&(2, 3)));
    assert!(!dests.contains(&(2, 4)));
}

#[test]
fn scenario_6_tile_depletion() {
    let mut s = GameState::initial();
    s.inventory_black.black = 0;
    let moves = legal_moves(&s);
    assert!(moves.iter().all(|mv| {
        mv.placement.map(|p| p.tile != TileType::Black).unwrap_or(true)
    }));

    let s = GameState::initial();
    let mv = legal_moves(&s)
        .into_iter()
        .find(|mv| mv.placement.is_some())
        .expect("initial position offers a placement move");
    let next = apply_move(&s, &mv);
    let tile = mv.placement.unwrap().tile;
    assert_eq!(
        next.inventory(Player::Black).count(tile),
        s.inventory(Player::Black).count(tile) - 1
    );
}

#[test]
fn scenario_7_td_correctness() {
    let net = Network::new();
    let s = GameState::initial();
    assert!((net.evaluate(&s) - 0.5).abs() < 1e-6);

    let mut up = net.clone();
    up.td_update(&s, 1.0, 0.1);
    assert!(up.evaluate(&s) > 0.5);

    let mut down = net.clone();
    down.td_update(&s, -1.0, 0.1);
    assert!(down.evaluate(&s) < 0.5);
}

#[test]
fn scenario_8_canonical_consistency() {
    let mut a = GameState::initial();
    a.board.set_cell(Coord::new(1, 2), Cell::new(Player::None, TileType::Black));

    let mut b = GameState::initial();
    b.board.set_cell(Coord::new(3, 2), Cell::new(Player::None, TileType::Black));

    let net = Network::new();
    assert_eq!(net.evaluate(&a), net.evaluate(&b));
}
