mod helpers;

use helpers::*;
use sov_voting::{CallMessage, Event};

#[test]
fn accepts_vote_while_open() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.open_voting();

        let events = deployment.execute(
            deployment.voter1,
            CallMessage::Vote {
                candidate: deployment.candidate1,
            },
        );
        assert_eq!(
            events,
            vec![Event::Voted {
                voter: deployment.voter1,
                candidate: deployment.candidate1,
                votes_count: 1,
            }]
        );

        let record = deployment
            .query(|voting, ws| voting.get_candidate(&deployment.candidate1, ws))
            .unwrap();
        assert_eq!(record.votes_count, 1);
        assert!(deployment.query(|voting, ws| voting.has_voted(&deployment.voter1, ws)));
    });
}

#[test]
fn rejects_double_vote() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.register(deployment.candidate2, "Bob");
        deployment.open_voting();
        deployment.vote(deployment.voter1, deployment.candidate1);

        deployment.assert_reverted_with(
            deployment.voter1,
            CallMessage::Vote {
                candidate: deployment.candidate1,
            },
            "Already voted",
        );
        // A second vote is rejected whatever the target.
        deployment.assert_reverted_with(
            deployment.voter1,
            CallMessage::Vote {
                candidate: deployment.candidate2,
            },
            "Already voted",
        );
    });
}

#[test]
fn rejects_vote_while_closed() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");

        deployment.assert_reverted_with(
            deployment.voter1,
            CallMessage::Vote {
                candidate: deployment.candidate1,
            },
            "Voting is not open",
        );
        assert!(!deployment.query(|voting, ws| voting.has_voted(&deployment.voter1, ws)));
    });
}

#[test]
fn rejects_vote_for_unregistered_address() {
    with_deployment(|deployment| {
        deployment.open_voting();

        deployment.assert_reverted_with(
            deployment.voter1,
            CallMessage::Vote {
                candidate: deployment.voter2,
            },
            "Not a candidate",
        );
        // The rejected vote is not recorded, so the voter can still vote.
        assert!(!deployment.query(|voting, ws| voting.has_voted(&deployment.voter1, ws)));
    });
}

#[test]
fn tracks_current_leader() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.register(deployment.candidate2, "Bob");
        deployment.open_voting();

        deployment.vote(deployment.voter1, deployment.candidate1);
        assert_eq!(
            deployment.query(|voting, ws| voting.current_leader(ws)),
            Some(deployment.candidate1)
        );

        deployment.vote(deployment.voter2, deployment.candidate2);
        deployment.vote(deployment.admin, deployment.candidate2);
        assert_eq!(
            deployment.query(|voting, ws| voting.current_leader(ws)),
            Some(deployment.candidate2)
        );
    });
}

#[test]
fn first_candidate_to_reach_a_tied_count_keeps_the_lead() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.register(deployment.candidate2, "Bob");
        deployment.open_voting();

        deployment.vote(deployment.voter1, deployment.candidate2);
        deployment.vote(deployment.voter2, deployment.candidate1);

        assert_eq!(
            deployment.query(|voting, ws| voting.current_leader(ws)),
            Some(deployment.candidate2)
        );
    });
}

#[test]
fn candidates_may_vote_for_themselves() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.open_voting();

        deployment.vote(deployment.candidate1, deployment.candidate1);
        assert_eq!(deployment.query(|voting, ws| voting.total_votes(ws)), 1);
    });
}
