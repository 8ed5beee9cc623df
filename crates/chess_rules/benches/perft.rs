//! Perft and move-generation throughput.
//!
//!   cargo bench -p chess_rules --bench perft
//!
//! Set `PERFT_BENCH_DEEP=1` to add one more depth per position.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use chess_rules::{Board, STARTPOS_FEN, legal_moves_into, perft};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039, 97_862, 4_085_603],
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238, 674_624],
    },
];

fn bench_perft(c: &mut Criterion) {
    let deep = std::env::var("PERFT_BENCH_DEEP").is_ok();

    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let board = Board::from_fen(case.fen).unwrap();
        let limit = if deep {
            case.expected_nodes.len()
        } else {
            case.expected_nodes.len() - 1
        };

        // Only the deepest selected depth is timed; the rest guard correctness.
        for (idx, &expected) in case.expected_nodes[..limit].iter().enumerate() {
            let depth = (idx + 1) as u8;
            assert_eq!(
                perft(&mut board.clone(), depth),
                expected,
                "node mismatch for {} depth {}",
                case.name,
                depth
            );
            if idx + 1 < limit {
                continue;
            }

            group.throughput(Throughput::Elements(expected));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |b, &depth| {
                    let mut scratch = board.clone();
                    b.iter(|| perft(black_box(&mut scratch), black_box(depth)));
                },
            );
        }
    }
    group.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for case in CASES {
        let board = Board::from_fen(case.fen).unwrap();
        group.bench_function(case.name, |b| {
            let mut scratch = board.clone();
            let mut buf = Vec::with_capacity(64);
            b.iter(|| {
                legal_moves_into(black_box(&mut scratch), &mut buf);
                buf.len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_perft, bench_legal_moves);
criterion_main!(benches);
