//! Food placement by rejection sampling

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// Random draws per cell before giving up on rejection sampling
const SAMPLES_PER_CELL: usize = 4;

/// Pick a uniformly random cell of a `grid_size` x `grid_size` grid that is
/// not in `occupied`.
///
/// Draws random cells until one is free. On a crowded board that can take a
/// long time, so after `SAMPLES_PER_CELL` draws per cell it switches to
/// choosing among the remaining free cells directly. Returns `None` only when
/// every cell is occupied.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    occupied: &[Position],
) -> Option<Position> {
    let cells = grid_size * grid_size;
    if cells == 0 {
        return None;
    }

    for _ in 0..cells * SAMPLES_PER_CELL {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..grid_size as i32)
        .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_never_returns_occupied_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let occupied: Vec<Position> = (0..6).map(|x| Position::new(x, 0)).collect();

        for _ in 0..500 {
            let food = place_food(&mut rng, 6, &occupied).unwrap();
            assert!(!occupied.contains(&food));
            assert!(food.is_within(6));
        }
    }

    #[test]
    fn test_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut occupied = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (2, 1) {
                    occupied.push(Position::new(x, y));
                }
            }
        }

        assert_eq!(place_food(&mut rng, 3, &occupied), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_stuck_source_falls_back_to_free_cells() {
        // A source that only ever yields zero keeps drawing (0, 0)
        let mut rng = StepRng::new(0, 0);
        let occupied = vec![Position::new(0, 0)];

        let food = place_food(&mut rng, 4, &occupied).unwrap();
        assert_ne!(food, Position::new(0, 0));
        assert!(food.is_within(4));
    }

    #[test]
    fn test_stuck_source_on_free_cell() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(place_food(&mut rng, 4, &[]), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let occupied = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];

        assert_eq!(place_food(&mut rng, 2, &occupied), None);
    }
}
