mod test {
    use crate::config::LevelRange;
    use crate::core::{count_boxes, is_solved, locate_player, Cell, Vec2};
    use crate::error::{LevelError, ParseLevelError};
    use crate::levels::{level_file_name, parse_level, LevelLoader};
    use crate::test::test_util::{grid_to_string, write_level};
    use std::path::Path;

    #[test]
    fn short_rows_are_padded_with_floor() {
        let grid = parse_level("  ###\n  #@#   \n#######\n").unwrap();
        assert_eq!(grid.height(), 3);
        assert!(grid.rows.iter().all(|row| row.len() == 7));
        assert_eq!(grid[Vec2::new(1, 6)], Cell::Floor);
        assert_eq!(grid[Vec2::new(1, 0)], Cell::Floor);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let grid = parse_level("\n\n#@#\n\n###\n\n").unwrap();
        assert_eq!(grid_to_string(&grid), "#@#\n###");
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(parse_level(" \n\n  \n"), Err(ParseLevelError::Empty));
    }

    #[test]
    fn unknown_symbols_are_reported_with_position() {
        assert_eq!(
            parse_level("####\n#@x#\n####"),
            Err(ParseLevelError::UnknownSymbol { symbol: 'x', row: 1, col: 2 })
        );
    }

    #[test]
    fn second_player_is_rejected() {
        assert_eq!(
            parse_level("######\n#@@$.#\n######"),
            Err(ParseLevelError::MultiplePlayers { count: 2 })
        );
        assert_eq!(
            parse_level("#@ #\n# +#"),
            Err(ParseLevelError::MultiplePlayers { count: 2 })
        );
        assert!(parse_level("# $.#").is_ok());
    }

    #[test]
    fn loader_reports_second_player_as_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 0, "#@@$.#");
        let loader = LevelLoader::new(dir.path(), LevelRange::new(0, 5));

        let err = loader.load(0).unwrap_err();
        assert!(!err.is_absent());
        assert!(matches!(
            err,
            LevelError::Malformed { level: 0, source: ParseLevelError::MultiplePlayers { count: 2 }, .. }
        ));
    }

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(level_file_name(0), "level000.xsb");
        assert_eq!(level_file_name(42), "level042.xsb");
    }

    #[test]
    fn loader_reads_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 7, "#####\n#@$.#\n#####\n");
        let loader = LevelLoader::new(dir.path(), LevelRange::new(0, 50));

        let grid = loader.load(7).unwrap();
        assert_eq!(locate_player(&grid), Some(Vec2::new(1, 1)));
    }

    #[test]
    fn missing_and_out_of_range_levels_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 9, "#@#");
        let loader = LevelLoader::new(dir.path(), LevelRange::new(0, 5));

        assert!(matches!(loader.load(3), Err(LevelError::Absent(3))));
        assert!(matches!(loader.load(9), Err(LevelError::Absent(9))));
    }

    #[test]
    fn bad_content_is_malformed_not_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 1, "#@?#");
        write_level(dir.path(), 2, "\n\n");
        let loader = LevelLoader::new(dir.path(), LevelRange::new(0, 5));

        let err = loader.load(1).unwrap_err();
        assert!(!err.is_absent());
        assert!(matches!(
            err,
            LevelError::Malformed { level: 1, source: ParseLevelError::UnknownSymbol { symbol: '?', .. }, .. }
        ));
        assert!(matches!(
            loader.load(2),
            Err(LevelError::Malformed { source: ParseLevelError::Empty, .. })
        ));
    }

    #[test]
    fn unreadable_level_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(level_file_name(4))).unwrap();
        let loader = LevelLoader::new(dir.path(), LevelRange::new(0, 5));

        let err = loader.load(4).unwrap_err();
        assert!(matches!(err, LevelError::Io { level: 4, .. }));
        assert!(!err.is_absent());
    }

    #[test]
    fn bundled_levels_are_playable() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
        let loader = LevelLoader::new(&dir, LevelRange::new(0, 50));
        for level in 0..=5 {
            let grid = loader.load(level).unwrap();
            let players = grid.count(|c| c.is_player());
            let progress = grid.progress();
            assert_eq!(players, 1, "level {} should have one player", level);
            assert!(count_boxes(&grid) > 0, "level {} has no boxes", level);
            assert!(progress.total_targets >= count_boxes(&grid), "level {} lacks targets", level);
            assert!(!is_solved(&grid), "level {} starts solved", level);
        }
        assert!(loader.load(6).unwrap_err().is_absent());
    }

    #[test]
    fn bundled_level_four_solves_with_known_moves() {
        use crate::core::{attempt_move, Direction::*};

        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
        let mut grid = LevelLoader::new(&dir, LevelRange::new(0, 50)).load(4).unwrap();
        for direction in [Down, Left, Up, Right, Up, Left, Right, Down, Down, Right, Up, Left, Up, Right] {
            assert!(attempt_move(&mut grid, direction).is_moved(), "{:?} failed", direction);
        }
        assert!(is_solved(&grid));
    }
}
