//! Session transitions
//!
//! Every user decision arrives as an [`Action`]; [`reduce`] computes the
//! next snapshot and names the side effect the shell must run. Actions
//! that don't apply to the active view are ignored, so a misbehaving
//! caller can never corrupt the session.

use super::state::{MAX_LEVEL, SessionState, View};

/// A single user or collaborator decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Home screen "play" button
    StartGame,
    /// A map tile was picked
    SelectLevel(u8),
    /// The level player finished one attempt; positive delta means the
    /// answer was correct
    CompleteLevel(i32),
    /// Voluntary exit from a level before answering
    BackToMap,
    /// Map back button
    GoHome,
    /// Wipe all progress. Only runs when the player confirmed the
    /// prompt; an unconfirmed reset changes nothing.
    ResetGame { confirmed: bool },
}

/// Fire-and-forget work the shell runs after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the victory confetti timer
    Celebrate,
    /// Stop any pending confetti timer (progress was wiped)
    CancelCelebration,
}

/// Result of one transition: the next snapshot plus at most one effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduced {
    pub state: SessionState,
    pub effect: Option<Effect>,
}

fn unchanged(state: &SessionState) -> Reduced {
    Reduced {
        state: *state,
        effect: None,
    }
}

/// Compute the next session snapshot for one action.
///
/// Pure and total: every `(state, action)` pair yields a valid next
/// state. The caller persists the result and runs the effect.
pub fn reduce(state: &SessionState, action: Action) -> Reduced {
    match action {
        Action::StartGame => match state.view {
            View::Home => Reduced {
                state: SessionState {
                    view: View::Map,
                    ..*state
                },
                effect: None,
            },
            _ => unchanged(state),
        },

        Action::SelectLevel(level) => match state.view {
            View::Map => {
                // The map refuses locked tiles already; clamp anyway so a
                // stray call can't jump past the frontier.
                let level = level.clamp(1, state.unlocked_level.min(MAX_LEVEL));
                Reduced {
                    state: SessionState {
                        current_level: level,
                        view: View::Game,
                        ..*state
                    },
                    effect: None,
                }
            }
            _ => unchanged(state),
        },

        Action::CompleteLevel(delta) => match state.view {
            View::Game => {
                let correct = delta > 0;
                let score = state.score.saturating_add_signed(delta);

                // The frontier only moves when its own level was just
                // cleared; replays of earlier levels never advance it.
                let unlocked_level = if correct
                    && state.current_level == state.unlocked_level
                    && state.unlocked_level < MAX_LEVEL
                {
                    state.unlocked_level + 1
                } else {
                    state.unlocked_level
                };

                let victory = correct && state.current_level == MAX_LEVEL;
                Reduced {
                    state: SessionState {
                        score,
                        unlocked_level,
                        view: if victory { View::Victory } else { View::Map },
                        ..*state
                    },
                    effect: victory.then_some(Effect::Celebrate),
                }
            }
            _ => unchanged(state),
        },

        Action::BackToMap => match state.view {
            View::Game => Reduced {
                state: SessionState {
                    view: View::Map,
                    ..*state
                },
                effect: None,
            },
            _ => unchanged(state),
        },

        Action::GoHome => match state.view {
            View::Map => Reduced {
                state: SessionState {
                    view: View::Home,
                    ..*state
                },
                effect: None,
            },
            _ => unchanged(state),
        },

        Action::ResetGame { confirmed } => {
            if confirmed {
                Reduced {
                    state: SessionState::default(),
                    effect: Some(Effect::CancelCelebration),
                }
            } else {
                unchanged(state)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(current: u8, unlocked: u8, score: u32, view: View) -> SessionState {
        SessionState {
            current_level: current,
            unlocked_level: unlocked,
            score,
            view,
        }
    }

    #[test]
    fn test_first_level_unlocks_next() {
        let mut s = SessionState::default();
        s = reduce(&s, Action::StartGame).state;
        assert_eq!(s.view, View::Map);
        s = reduce(&s, Action::SelectLevel(1)).state;
        assert_eq!(s.view, View::Game);
        s = reduce(&s, Action::CompleteLevel(10)).state;
        assert_eq!(s, state(1, 2, 10, View::Map));
    }

    #[test]
    fn test_replay_never_advances_frontier() {
        let mut s = state(1, 2, 10, View::Map);
        s = reduce(&s, Action::SelectLevel(1)).state;
        s = reduce(&s, Action::CompleteLevel(5)).state;
        assert_eq!(s, state(1, 2, 15, View::Map));
    }

    #[test]
    fn test_final_level_victory() {
        let reduced = reduce(&state(100, 100, 990, View::Game), Action::CompleteLevel(10));
        assert_eq!(reduced.state, state(100, 100, 1000, View::Victory));
        assert_eq!(reduced.effect, Some(Effect::Celebrate));
    }

    #[test]
    fn test_final_level_wrong_answer_returns_to_map() {
        let reduced = reduce(&state(100, 100, 990, View::Game), Action::CompleteLevel(-5));
        assert_eq!(reduced.state, state(100, 100, 985, View::Map));
        assert_eq!(reduced.effect, None);
    }

    #[test]
    fn test_wrong_answer_keeps_frontier() {
        let reduced = reduce(&state(5, 5, 50, View::Game), Action::CompleteLevel(-10));
        assert_eq!(reduced.state, state(5, 5, 40, View::Map));
        assert_eq!(reduced.effect, None);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let s = reduce(&state(2, 3, 4, View::Game), Action::CompleteLevel(-100)).state;
        assert_eq!(s.score, 0);
        assert_eq!(s.view, View::Map);
    }

    #[test]
    fn test_select_level_clamps_to_frontier() {
        let s = reduce(&state(1, 5, 0, View::Map), Action::SelectLevel(50)).state;
        assert_eq!(s.current_level, 5);
        assert_eq!(s.view, View::Game);

        let s = reduce(&state(1, 5, 0, View::Map), Action::SelectLevel(0)).state;
        assert_eq!(s.current_level, 1);
    }

    #[test]
    fn test_back_to_map_keeps_score_and_frontier() {
        let s = reduce(&state(3, 7, 60, View::Game), Action::BackToMap).state;
        assert_eq!(s, state(3, 7, 60, View::Map));
    }

    #[test]
    fn test_go_home_only_from_map() {
        let s = reduce(&state(3, 7, 60, View::Map), Action::GoHome).state;
        assert_eq!(s.view, View::Home);

        let from_game = state(3, 7, 60, View::Game);
        assert_eq!(reduce(&from_game, Action::GoHome).state, from_game);
    }

    #[test]
    fn test_actions_outside_their_view_are_ignored() {
        let home = SessionState::default();
        assert_eq!(reduce(&home, Action::SelectLevel(1)), Reduced { state: home, effect: None });
        assert_eq!(reduce(&home, Action::CompleteLevel(10)), Reduced { state: home, effect: None });
        assert_eq!(reduce(&home, Action::BackToMap), Reduced { state: home, effect: None });

        let map = state(1, 1, 0, View::Map);
        assert_eq!(reduce(&map, Action::StartGame).state, map);
        assert_eq!(reduce(&map, Action::CompleteLevel(10)).state, map);
    }

    #[test]
    fn test_confirmed_reset_wipes_everything() {
        for view in [View::Home, View::Map, View::Game, View::Victory] {
            let reduced = reduce(&state(42, 43, 440, view), Action::ResetGame { confirmed: true });
            assert_eq!(reduced.state, SessionState::default());
            assert_eq!(reduced.effect, Some(Effect::CancelCelebration));
        }
    }

    #[test]
    fn test_declined_reset_changes_nothing() {
        let s = state(42, 43, 440, View::Victory);
        let reduced = reduce(&s, Action::ResetGame { confirmed: false });
        assert_eq!(reduced.state, s);
        assert_eq!(reduced.effect, None);
    }

    #[test]
    fn test_frontier_stops_at_max_level() {
        let s = reduce(&state(100, 100, 0, View::Game), Action::CompleteLevel(10)).state;
        assert_eq!(s.unlocked_level, 100);
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::StartGame),
            (0u8..=120).prop_map(Action::SelectLevel),
            (-1000i32..=1000).prop_map(Action::CompleteLevel),
            Just(Action::BackToMap),
            Just(Action::GoHome),
            any::<bool>().prop_map(|confirmed| Action::ResetGame { confirmed }),
        ]
    }

    proptest! {
        #[test]
        fn prop_frontier_monotonic_without_reset(
            actions in prop::collection::vec(action_strategy(), 0..300)
        ) {
            let mut s = SessionState::default();
            for action in actions {
                let next = reduce(&s, action).state;
                if matches!(action, Action::ResetGame { confirmed: true }) {
                    prop_assert_eq!(next, SessionState::default());
                } else {
                    prop_assert!(next.unlocked_level >= s.unlocked_level);
                    prop_assert!(next.unlocked_level - s.unlocked_level <= 1);
                }
                s = next;
            }
        }

        #[test]
        fn prop_invariants_hold_for_any_history(
            actions in prop::collection::vec(action_strategy(), 0..300)
        ) {
            let mut s = SessionState::default();
            for action in actions {
                s = reduce(&s, action).state;
                prop_assert!((1..=MAX_LEVEL).contains(&s.current_level));
                prop_assert!((1..=MAX_LEVEL).contains(&s.unlocked_level));
                prop_assert!(s.current_level <= s.unlocked_level);
            }
        }

        #[test]
        fn prop_victory_only_from_completing_final_level(
            actions in prop::collection::vec(action_strategy(), 0..300)
        ) {
            let mut s = SessionState::default();
            for action in actions {
                let reduced = reduce(&s, action);
                if reduced.state.view == View::Victory && s.view != View::Victory {
                    prop_assert!(matches!(action, Action::CompleteLevel(d) if d > 0));
                    prop_assert_eq!(s.current_level, MAX_LEVEL);
                    prop_assert_eq!(s.view, View::Game);
                    prop_assert_eq!(reduced.effect, Some(Effect::Celebrate));
                }
                s = reduced.state;
            }
        }

        #[test]
        fn prop_frontier_advance_requires_frontier_clear(
            actions in prop::collection::vec(action_strategy(), 0..300)
        ) {
            let mut s = SessionState::default();
            for action in actions {
                let next = reduce(&s, action).state;
                if next.unlocked_level > s.unlocked_level {
                    prop_assert!(matches!(action, Action::CompleteLevel(d) if d > 0));
                    prop_assert_eq!(s.current_level, s.unlocked_level);
                    prop_assert_eq!(s.view, View::Game);
                }
                s = next;
            }
        }

        #[test]
        fn prop_score_matches_saturating_model(
            deltas in prop::collection::vec(-1000i32..=1000, 0..200)
        ) {
            // Drive an endless stream of attempts on level 1 and check the
            // score against an i64 model of max(0, score + delta).
            let mut s = reduce(&SessionState::default(), Action::StartGame).state;
            let mut model: i64 = 0;
            for delta in deltas {
                s = reduce(&s, Action::SelectLevel(1)).state;
                s = reduce(&s, Action::CompleteLevel(delta)).state;
                model = (model + i64::from(delta)).max(0);
                prop_assert_eq!(i64::from(s.score), model);
            }
        }
    }
}
