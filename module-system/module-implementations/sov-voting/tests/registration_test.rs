mod helpers;

use helpers::*;
use sov_voting::{CallMessage, Candidate, Event, VotingStatus};

#[test]
fn registers_candidate_while_closed() {
    with_deployment(|deployment| {
        let events = deployment.execute(
            deployment.candidate1,
            CallMessage::RegisterCandidate {
                name: "Alice".to_owned(),
            },
        );
        assert_eq!(
            events,
            vec![Event::CandidateRegistered {
                candidate: deployment.candidate1,
                name: "Alice".to_owned(),
            }]
        );

        let record = deployment
            .query(|voting, ws| voting.get_candidate(&deployment.candidate1, ws))
            .unwrap();
        assert_eq!(
            record,
            Candidate {
                user_name: "Alice".to_owned(),
                user_candidate: true,
                votes_count: 0,
            }
        );
    });
}

#[test]
fn rejects_duplicate_registration() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");

        deployment.assert_reverted_with(
            deployment.candidate1,
            CallMessage::RegisterCandidate {
                name: "Alice2".to_owned(),
            },
            "Already registered as candidate",
        );

        // The name is kept from the first registration.
        let record = deployment
            .query(|voting, ws| voting.get_candidate(&deployment.candidate1, ws))
            .unwrap();
        assert_eq!(record.user_name, "Alice");
    });
}

#[test]
fn rejects_registration_while_open() {
    with_deployment(|deployment| {
        deployment.open_voting();

        deployment.assert_reverted_with(
            deployment.candidate1,
            CallMessage::RegisterCandidate {
                name: "Alice".to_owned(),
            },
            "Cannot add candidate during voting",
        );
    });
}

#[test]
fn status_is_checked_before_duplicates() {
    with_deployment(|deployment| {
        deployment.register(deployment.candidate1, "Alice");
        deployment.open_voting();

        deployment.assert_reverted_with(
            deployment.candidate1,
            CallMessage::RegisterCandidate {
                name: "Alice".to_owned(),
            },
            "Cannot add candidate during voting",
        );
    });
}

#[test]
fn registration_reopens_after_closing() {
    with_deployment(|deployment| {
        deployment.open_voting();
        deployment.execute(
            deployment.admin,
            CallMessage::ChangeStatus(VotingStatus::Closed),
        );

        deployment.register(deployment.candidate2, "Bob");
        assert!(deployment
            .query(|voting, ws| voting.get_candidate(&deployment.candidate2, ws))
            .is_some());
    });
}
