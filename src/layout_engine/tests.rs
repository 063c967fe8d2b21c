
use crate::common::collections::HashSet;
use crate::common::config::Config;
use crate::host::testing::{Call, RecordingHost, p};
use crate::host::virtual_host::{Rect, VirtualHost};
use crate::host::{Host, HostError, PaneId};
use crate::layout_engine::{
    BuiltinStrategy, PaneFilter, Rotation, TileCommand, TileEngine, TileError, get_buffers,
};

fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect { Rect { x, y, width, height } }

fn virtual_host(names: &[&str]) -> (VirtualHost, Vec<PaneId>) {
    let mut host = VirtualHost::default();
    let ids = names.iter().map(|n| host.add_pane(*n)).collect();
    (host, ids)
}

fn run(host: &mut VirtualHost, builtin: BuiltinStrategy, count: i64) -> Result<(), HostError> {
    builtin.strategy().execute(host, count, &PaneFilter::default())
}

mod candidate_properties {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn filters() -> Vec<PaneFilter> {
        vec![
            PaneFilter::AcceptAll,
            PaneFilter::default(),
            PaneFilter::custom(|pane, _| pane.idx() % 2 == 1),
            PaneFilter::ignore_names(["^buf-[23]$"]).unwrap(),
        ]
    }

    #[test]
    fn exact_count_no_rejects_no_early_duplicates() {
        let mut host = RecordingHost::with_panes(4);
        host.add_pane(5, " *Minibuf-1*");
        host.visible = vec![p(2), p(5), p(2)];
        host.focused = Some(p(2));

        for filter in filters() {
            let accepted: Vec<_> =
                host.all_panes().into_iter().filter(|pane| filter.accepts(&host, *pane)).collect();
            for n in 1..=8 {
                let got = get_buffers(&host, n, &filter);
                assert_eq!(got.len(), n as usize, "{filter:?} n={n}");
                assert!(got.iter().all(|pane| filter.accepts(&host, *pane)), "{filter:?}");

                let head = &got[..(n as usize).min(accepted.len())];
                let distinct: HashSet<_> = head.iter().collect();
                assert_eq!(distinct.len(), head.len(), "{filter:?} n={n}: {got:?}");
            }
        }
    }

    #[test]
    fn non_positive_counts_behave_like_one() {
        let host = RecordingHost::with_panes(3);
        for filter in filters() {
            let one = get_buffers(&host, 1, &filter);
            assert_eq!(get_buffers(&host, 0, &filter), one);
            assert_eq!(get_buffers(&host, -5, &filter), one);
        }
    }
}

mod layouts_on_virtual_host {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn master_left() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::MasterLeft, 3).unwrap();
        assert_eq!(
            host.frames(),
            vec![
                (ids[0], rect(0, 0, 80, 48)),
                (ids[1], rect(80, 0, 80, 24)),
                (ids[2], rect(80, 24, 80, 24)),
            ]
        );
    }

    #[test]
    fn master_right() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::MasterRight, 3).unwrap();
        assert_eq!(
            host.frames(),
            vec![
                (ids[1], rect(0, 0, 80, 24)),
                (ids[2], rect(0, 24, 80, 24)),
                (ids[0], rect(80, 0, 80, 48)),
            ]
        );
    }

    #[test]
    fn master_top() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::MasterTop, 3).unwrap();
        assert_eq!(
            host.frames(),
            vec![
                (ids[0], rect(0, 0, 160, 24)),
                (ids[1], rect(0, 24, 80, 24)),
                (ids[2], rect(80, 24, 80, 24)),
            ]
        );
    }

    #[test]
    fn master_bottom() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::MasterBottom, 3).unwrap();
        assert_eq!(
            host.frames(),
            vec![
                (ids[1], rect(0, 0, 80, 24)),
                (ids[2], rect(80, 0, 80, 24)),
                (ids[0], rect(0, 24, 160, 24)),
            ]
        );
    }

    #[test]
    fn master_left_single_pane_splits_surface() {
        let (mut host, ids) = virtual_host(&["a"]);
        run(&mut host, BuiltinStrategy::MasterLeft, 1).unwrap();
        assert_eq!(
            host.frames(),
            vec![(ids[0], rect(0, 0, 80, 48)), (ids[0], rect(80, 0, 80, 48))]
        );
        assert_eq!(host.region_count(), 2);
    }

    #[test]
    fn wide_rows_are_equal() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::Wide, 3).unwrap();
        assert_eq!(
            host.frames(),
            vec![
                (ids[0], rect(0, 0, 160, 16)),
                (ids[1], rect(0, 16, 160, 16)),
                (ids[2], rect(0, 32, 160, 16)),
            ]
        );
    }

    #[test]
    fn tall_columns_are_equal() {
        let (mut host, _) = virtual_host(&["a", "b", "c", "d"]);
        run(&mut host, BuiltinStrategy::Tall, 4).unwrap();
        let widths: Vec<_> = host.frames().iter().map(|(_, r)| r.width).collect();
        assert_eq!(widths, vec![40, 40, 40, 40]);
    }

    #[test]
    fn previous_regions_are_discarded() {
        let (mut host, ids) = virtual_host(&["a", "b", "c"]);
        run(&mut host, BuiltinStrategy::Wide, 3).unwrap();
        run(&mut host, BuiltinStrategy::Monocle, 3).unwrap();
        assert_eq!(host.region_count(), 1);
        assert_eq!(host.visible_panes().len(), 1);
        assert!(ids.contains(&host.visible_panes()[0]));
    }

    #[test]
    fn visible_panes_are_tiled_first() {
        let (mut host, ids) = virtual_host(&["a", "b", "c", "d"]);
        host.focus_pane(ids[3]).unwrap();
        run(&mut host, BuiltinStrategy::Tall, 2).unwrap();
        assert_eq!(host.visible_panes(), vec![ids[3], ids[0]]);
    }

    #[test]
    fn minibuffer_is_never_tiled() {
        let (mut host, ids) = virtual_host(&["a", " *Minibuf-1*", "b"]);
        run(&mut host, BuiltinStrategy::Wide, 3).unwrap();
        assert_eq!(host.visible_panes(), vec![ids[0], ids[2], ids[0]]);
    }

    #[test]
    fn too_many_columns_fails_midway() {
        let (mut host, _) = virtual_host(&["a", "b", "c", "d", "e", "f"]);
        let err = run(&mut host, BuiltinStrategy::Tall, 6).unwrap_err();
        assert!(matches!(err, HostError::RegionTooSmall { width: 10, .. }), "{err:?}");
        assert_eq!(host.region_count(), 5);
    }
}

mod rotation_on_virtual_host {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn names(engine: &mut TileEngine, host: &mut VirtualHost, times: usize) -> Vec<(String, usize)> {
        (0..times)
            .map(|_| {
                engine.handle_command(host, &TileCommand::default()).unwrap();
                let name = engine.rotation().last_executed().unwrap().name().to_string();
                (name, host.region_count())
            })
            .collect()
    }

    #[test]
    fn window_count_follows_visible_regions() {
        let mut engine = TileEngine::from_config(&Config::default()).unwrap();
        let (mut host, _) = virtual_host(&["a", "b", "c"]);
        let first = TileCommand {
            window_count: Some(3),
            ..Default::default()
        };
        engine.handle_command(&mut host, &first).unwrap();
        assert_eq!(host.region_count(), 3);

        assert_eq!(
            names(&mut engine, &mut host, 5),
            vec![
                ("master-top".to_string(), 3),
                ("wide".to_string(), 3),
                ("tall".to_string(), 3),
                ("monocle".to_string(), 1),
                ("master-left".to_string(), 2),
            ]
        );
    }

    #[test]
    fn failed_run_does_not_advance() {
        let mut rotation = Rotation::new(vec![
            BuiltinStrategy::Wide.strategy(),
            BuiltinStrategy::Tall.strategy(),
        ]);
        let (mut host, _) = virtual_host(&["a", "b", "c", "d", "e", "f"]);
        let filter = PaneFilter::default();

        rotation.run(&mut host, Some(2), None, &filter).unwrap();
        let err = rotation.run(&mut host, Some(6), None, &filter).unwrap_err();
        assert!(matches!(err, TileError::Host(HostError::RegionTooSmall { .. })));
        assert_eq!(rotation.last_executed().unwrap().name(), "wide");
        assert_eq!(rotation.upcoming().unwrap().name(), "tall");
    }

    #[test]
    fn empty_host_still_advances_rotation() {
        let mut engine = TileEngine::from_config(&Config::default()).unwrap();
        let mut host = VirtualHost::default();
        assert_eq!(
            names(&mut engine, &mut host, 2),
            vec![("master-left".to_string(), 0), ("master-top".to_string(), 0)]
        );
    }
}

mod call_ordering {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn evenly_split_places_after_each_split() {
        let mut host = RecordingHost::with_panes(3);
        BuiltinStrategy::Tall.strategy().execute(&mut host, 3, &PaneFilter::AcceptAll).unwrap();

        assert_eq!(host.split_count(), 2);
        let calls: Vec<_> =
            host.calls.iter().copied().filter(|c| !matches!(c, Call::MoveFocus(_))).collect();
        assert_eq!(
            calls,
            vec![
                Call::DeleteOtherRegions,
                Call::SetPane(p(1)),
                Call::SplitHorizontally,
                Call::SetPane(p(2)),
                Call::SplitHorizontally,
                Call::SetPane(p(3)),
                Call::BalanceRegions,
            ]
        );
    }

    #[test]
    fn master_placed_before_master_split() {
        let mut host = RecordingHost::with_panes(3);
        BuiltinStrategy::MasterLeft
            .strategy()
            .execute(&mut host, 3, &PaneFilter::AcceptAll)
            .unwrap();

        let first_split = host.calls.iter().position(|c| c.is_split()).unwrap();
        let master_placed = host.calls.iter().position(|c| *c == Call::SetPane(p(1))).unwrap();
        assert!(master_placed < first_split);
        assert_eq!(host.calls[first_split], Call::SplitHorizontally);
        assert_eq!(host.calls[first_split + 1], Call::MoveFocus(1));

        let others: Vec<_> = host.calls[first_split + 1..].to_vec();
        assert!(!others.contains(&Call::SplitHorizontally));
        assert_eq!(host.placed(), vec![p(1), p(2), p(3)]);
    }

    #[test]
    fn zero_panes_issue_no_calls() {
        let mut host = RecordingHost::default();
        let mut rotation = Rotation::new(vec![BuiltinStrategy::MasterLeft.strategy()]);
        rotation.run(&mut host, Some(4), None, &PaneFilter::AcceptAll).unwrap();
        assert!(host.calls.is_empty());
    }
}
