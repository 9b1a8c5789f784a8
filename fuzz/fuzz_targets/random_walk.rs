#![no_main]

use libfuzzer_sys::fuzz_target;
use queen_dd::{Branch, Config, DdSpec, PieceKind, Step};

#[derive(Debug)]
struct WalkInput {
    config: Config,
    branches: Vec<bool>,
}

impl<'a> arbitrary::Arbitrary<'a> for WalkInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let colored: bool = u.arbitrary()?;
        // Keep colored boards small; their level count grows with n³.
        let side_length = if colored {
            u.int_in_range(1..=6)?
        } else {
            u.int_in_range(1..=12)?
        };
        let piece = if u.arbitrary()? {
            PieceKind::Rook
        } else {
            PieceKind::Queen
        };

        let mut config = Config::new(side_length).piece(piece).colored(colored);
        if !colored && u.arbitrary()? {
            config = config.first_column(u.int_in_range(0..=side_length - 1)?);
        }

        Ok(WalkInput {
            config,
            branches: u.arbitrary()?,
        })
    }
}

fuzz_target!(|input: WalkInput| {
    let puzzle = input
        .config
        .build()
        .expect("generated configurations are valid");
    let mut state = vec![0; puzzle.array_size()];

    let Step::Level(mut level) = puzzle.root(&mut state) else {
        return;
    };

    for take in input.branches {
        let before = state.clone();
        let step = puzzle.child(&mut state, level, Branch::from(take));

        for (before, after) in before.iter().zip(&state) {
            assert_eq!(after & !before, 0, "bits were re-enabled");
        }

        match step {
            Step::Level(next) => {
                assert!(next < level);
                level = next;
            }
            Step::Accept | Step::Reject => return,
        }
    }
});
