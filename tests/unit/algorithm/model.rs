//! Tests for model orchestration: learning, seeding, and generation

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use wavetile::WfcModel;
    use wavetile::io::configuration::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED};
    use wavetile::io::error::GenerationError;

    fn checkerboard() -> Array2<usize> {
        ndarray::array![[1, 2, 1], [2, 1, 2], [1, 2, 1]]
    }

    // Tests a window size below the minimum is rejected
    // Verified by learning with a 1x1 window
    #[test]
    fn test_learn_rejects_tiny_window() {
        let mut model = WfcModel::new();
        let result = model.learn(&[checkerboard()], 1);
        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameter { parameter: "pattern_size", .. })
        ));
    }

    // Tests set_tile reports tile identifiers that were never learned
    // Verified by silently skipping the unknown identifier
    #[test]
    fn test_set_tile_unknown_tile() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());

        let result = model.set_tile(0, 0, &[9]);
        assert!(matches!(result, Err(GenerationError::UnknownTile { tile: 9 })));
    }

    // Tests re-learning drops instructions that reference stale pattern indices
    // Verified by keeping the instruction list across learn calls
    #[test]
    fn test_learn_clears_set_tiles() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());
        // Adjacent same-tile seeds are unsatisfiable on a checkerboard
        assert!(model.set_tile(0, 0, &[1]).is_ok());
        assert!(model.set_tile(1, 0, &[1]).is_ok());

        // Re-learning must drop the contradictory seed, so generation succeeds
        assert!(model.learn(&[checkerboard()], 2).is_ok());
        let regenerated = model.generate(4, 4, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED);
        assert!(regenerated.is_ok());
    }

    // Tests generation parameter validation for dimensions and attempts
    // Verified by allowing a zero-sized output through
    #[test]
    fn test_generate_parameter_validation() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());

        assert!(matches!(
            model.generate(0, 4, 1, DEFAULT_SEED),
            Err(GenerationError::InvalidParameter { parameter: "width", .. })
        ));
        assert!(matches!(
            model.generate(4, 0, 1, DEFAULT_SEED),
            Err(GenerationError::InvalidParameter { parameter: "height", .. })
        ));
        assert!(matches!(
            model.generate(4, 4, 0, DEFAULT_SEED),
            Err(GenerationError::InvalidParameter { parameter: "max_attempts", .. })
        ));
    }

    // Tests generating before any productive learn is reported up front
    // Verified by letting the empty pattern set reach the solver
    #[test]
    fn test_generate_without_patterns() {
        let mut model = WfcModel::new();
        assert!(matches!(
            model.generate(4, 4, 1, DEFAULT_SEED),
            Err(GenerationError::InvalidSourceData { .. })
        ));

        // A training grid smaller than the window contributes nothing
        let tiny: Array2<usize> = ndarray::array![[1]];
        assert!(model.learn(&[tiny], 2).is_ok());
        assert!(matches!(
            model.generate(4, 4, 1, DEFAULT_SEED),
            Err(GenerationError::InvalidSourceData { .. })
        ));
    }

    // Tests seeded cells force their tile into the generated output
    // Verified by ignoring the recorded instructions during solving
    #[test]
    fn test_set_tile_pins_output() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());
        assert!(model.set_tile(0, 0, &[2]).is_ok());

        let grid = model.generate(4, 4, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED);
        assert!(
            grid.as_ref()
                .is_ok_and(|cells| cells.get((0, 0)) == Some(&2))
        );
    }

    // Tests mutually contradictory seeds fail fatally, not via retries
    // Verified by converting the seed contradiction into a restart
    #[test]
    fn test_contradictory_seeds_are_fatal() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());
        // Horizontally adjacent cells can never share a checkerboard tile
        assert!(model.set_tile(0, 0, &[1]).is_ok());
        assert!(model.set_tile(1, 0, &[1]).is_ok());

        let result = model.generate(4, 4, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED);
        assert!(matches!(
            result,
            Err(GenerationError::UnsatisfiableSeed { position: [0, 1] })
        ));

        model.clear_set_tiles();
        assert!(model.generate(4, 4, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED).is_ok());
    }

    // Tests a fixed seed reproduces the output bit-for-bit
    // Verified by reseeding the solver from entropy
    #[test]
    fn test_generate_deterministic() {
        let mut model = WfcModel::new();
        assert!(model.learn(&[checkerboard()], 2).is_ok());

        let first = model.generate(8, 8, DEFAULT_MAX_ATTEMPTS, 7);
        let second = model.generate(8, 8, DEFAULT_MAX_ATTEMPTS, 7);
        assert!(first.is_ok());
        assert_eq!(first.ok(), second.ok());
    }

    // Tests the trace survives a generate call and records the learning phase
    // Verified by dropping the trace on the solver handoff
    #[test]
    fn test_trace_round_trip() {
        use wavetile::io::metrics::Phase;

        let mut model = WfcModel::new();
        model.enable_trace();
        assert!(model.learn(&[checkerboard()], 2).is_ok());
        assert!(model.generate(4, 4, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED).is_ok());

        let trace = model.trace();
        assert!(trace.is_some_and(|t| t.stats(Phase::Learning).calls == 1));
        assert!(trace.is_some_and(|t| t.stats(Phase::WaveInit).calls >= 1));
        assert!(trace.is_some_and(|t| t.attempts() >= 1));
    }
}
