use criterion::{criterion_group, criterion_main, Criterion};
use sokoban_tui::core::Direction::{self, *};
use sokoban_tui::core::{attempt_move, is_solved, locate_player};
use sokoban_tui::levels::parse_level;
use std::hint::black_box;

const LEVEL: &str = r#"
#######
#.   .#
# $@$ #
#     #
#######
"#;

const SOLUTION: &[Direction] = &[
    Down, Left, Up, Right, Up, Left, Right, Down, Down, Right, Up, Left, Up, Right,
];

const OPEN_ROOM: &str = r#"
####################
#                  #
#    $   .    $    #
#        @         #
#    .        .  $ #
#                  #
####################
"#;

pub fn bench_replay_solution(c: &mut Criterion) {
    let start = parse_level(LEVEL).unwrap();
    c.bench_function("replay_solution", |b| {
        b.iter(|| {
            let mut grid = start.clone();
            for &direction in SOLUTION {
                attempt_move(&mut grid, direction);
            }
            black_box(is_solved(&grid))
        })
    });
}

pub fn bench_locate_player(c: &mut Criterion) {
    let grid = parse_level(OPEN_ROOM).unwrap();
    c.bench_function("locate_player", |b| b.iter(|| locate_player(black_box(&grid))));
}

criterion_group!(benches, bench_replay_solution, bench_locate_player);
criterion_main!(benches);
