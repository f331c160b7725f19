//! End-to-end round flows through the public session API with a store that
//! drops its first publish.

use std::sync::Mutex;

use teepad_core::player::Player;
use teepad_core::pot::Pots;
use teepad_core::round::{Round, RoundConfig};
use teepad_core::test_helpers::make_players;
use teepad_engine::{
    Checkpoint, CollaboratorError, EngineConfig, ExternalTarget, FinalizeOutcome, NavigationError,
    Notice, PayoutStatus, RoundCollaborator, ScoreSnapshot, ScoringSession, Step,
};

/// Store that keeps the latest snapshot and fails a configurable number of
/// publishes before recovering.
#[derive(Default)]
struct FlakyStore {
    failures_left: Mutex<u32>,
    latest: Mutex<Option<ScoreSnapshot>>,
    committed: Mutex<bool>,
    payouts: Mutex<Vec<Pots>>,
    exits: Mutex<Vec<ExternalTarget>>,
}

impl FlakyStore {
    fn failing(n: u32) -> Self {
        Self {
            failures_left: Mutex::new(n),
            ..Self::default()
        }
    }
}

impl RoundCollaborator for FlakyStore {
    async fn publish_scores(&self, snapshot: &ScoreSnapshot) -> Result<(), CollaboratorError> {
        let mut left = self.failures_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err("relay unreachable".into());
        }
        *self.latest.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    async fn finalize_round(&self, _round: &Round) -> Result<(), CollaboratorError> {
        *self.committed.lock().unwrap() = true;
        Ok(())
    }

    async fn dispatch_payout(&self, _round: &Round, pots: &Pots) -> Result<(), CollaboratorError> {
        self.payouts.lock().unwrap().push(*pots);
        Ok(())
    }

    fn navigate_external(&self, target: ExternalTarget) {
        self.exits.lock().unwrap().push(target);
    }
}

fn league_card() -> Vec<Player> {
    let mut players = make_players(4);
    for p in players.iter_mut().take(3) {
        p.pays_entry = true;
    }
    players[3].pays_ace = true;
    players[1].handicap = -2;
    players
}

async fn play_hole(session: &mut ScoringSession<FlakyStore>, strokes: &[u32]) -> Step {
    let ids: Vec<_> = session.players().iter().map(|p| p.id).collect();
    for (id, &s) in ids.into_iter().zip(strokes) {
        session.score_current(id, s).unwrap();
    }
    session.advance().await.unwrap().step
}

#[tokio::test]
async fn shotgun_round_from_hole_five() {
    let config = RoundConfig {
        total_holes: 18,
        starting_hole: 5,
        entry_fee_amount: 1000,
        ace_pot_fee_amount: 500,
        use_honor_system: true,
    };
    let mut session =
        ScoringSession::new(&config, league_card(), EngineConfig::default(), FlakyStore::failing(1))
            .unwrap();
    assert_eq!(session.pots().total(), 3500);

    // Hole 5: the first publish is dropped but navigation carries on.
    session.score_current(1, 3).unwrap();
    session.score_current(2, 3).unwrap();
    session.score_current(3, 3).unwrap();
    session.score_current(4, 3).unwrap();
    let out = session.advance().await.unwrap();
    assert_eq!(out.step, Step::Moved { from: 5, to: 6 });
    assert_eq!(out.notices, vec![Notice::PublishFailed("relay unreachable".into())]);

    // Holes 6..=12.
    for _ in 6..=12 {
        play_hole(&mut session, &[3, 4, 2, 3]).await;
    }
    assert_eq!(session.view_hole(), 13);
    assert_eq!(session.holes_played(), 9);
    let ids: Vec<_> = session.honor_order().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 4, 2]);

    // Ninth hole played triggers the halfway review.
    let step = play_hole(&mut session, &[3, 3, 3, 1]).await;
    assert_eq!(step, Step::EnteredReview(Checkpoint::HalfwayReview));
    assert_eq!(session.review_holes(), vec![5, 6, 7, 8, 9, 10, 11, 12, 13]);
    assert!(session.review_complete());

    // Backing out of the review keeps the hole; the review is not shown again.
    assert_eq!(
        session.retreat().unwrap().step,
        Step::LeftReview(Checkpoint::HalfwayReview)
    );
    assert_eq!(
        session.advance().await.unwrap().step,
        Step::Moved { from: 13, to: 14 }
    );

    // 14..=18 then 1..=3.
    for _ in 0..8 {
        play_hole(&mut session, &[3, 3, 3, 3]).await;
    }
    assert_eq!(session.view_hole(), 4);

    let step = play_hole(&mut session, &[3, 3, 3, 3]).await;
    assert_eq!(step, Step::EnteredReview(Checkpoint::FinalReview));

    let out = session.advance().await.unwrap();
    assert_eq!(
        out.step,
        Step::Finalized(FinalizeOutcome::Finalized {
            pots: Pots {
                entry: 3000,
                ace: 500
            },
            payout: PayoutStatus::Requested,
        })
    );

    let store = session.collaborator();
    assert!(*store.committed.lock().unwrap());
    assert_eq!(store.payouts.lock().unwrap().len(), 1);
    assert_eq!(*store.exits.lock().unwrap(), vec![ExternalTarget::RoundSummary]);
    let latest = store.latest.lock().unwrap().clone().unwrap();
    assert!(latest.players.iter().all(|p| p.scores.len() == 18));

    let winners = session.pot_winners();
    assert_eq!(winners.ace, vec![4]);
    let standings = session.standings();
    assert_eq!(standings[0].player_id, 3);

    assert_eq!(session.retreat().unwrap_err(), NavigationError::RoundFinalized);
}

#[tokio::test]
async fn finalize_retries_after_publish_failure() {
    let config = RoundConfig {
        total_holes: 3,
        ..RoundConfig::default()
    };
    let mut session =
        ScoringSession::new(&config, make_players(2), EngineConfig::default(), FlakyStore::default())
            .unwrap();
    for _ in 0..3 {
        play_hole(&mut session, &[3, 3]).await;
    }
    assert_eq!(session.view().checkpoint, Checkpoint::FinalReview);

    *session.collaborator().failures_left.lock().unwrap() = 1;
    let err = session.advance().await.unwrap_err();
    assert!(matches!(err, NavigationError::Finalize(_)));
    assert!(!session.round().is_finalized());
    assert!(!*session.collaborator().committed.lock().unwrap());

    let outcome = session.finalize().await.unwrap();
    assert_eq!(
        outcome,
        FinalizeOutcome::Finalized {
            pots: Pots::default(),
            payout: PayoutStatus::NotRequired,
        }
    );
    assert_eq!(session.finalize().await.unwrap(), FinalizeOutcome::AlreadyFinalized);
}
