use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{Address, Context, Module, WorkingSet};
use sov_state::InMemoryStorage;

use super::call::CallMessage;
use super::types::Candidate;
use super::{Event, VotingConfig, VotingError, VotingLogic, VotingStatus};

#[test]
fn test_voting() {
    let admin = Address::from([1; 32]);
    let mut working_set = WorkingSet::new(InMemoryStorage::new());

    test_module::<DefaultContext>(admin, &mut working_set);
}

fn test_module<C: Context>(admin: C::Address, working_set: &mut WorkingSet<C::Storage>) {
    let admin_context = C::new(admin.clone());
    let voting = &mut VotingLogic::<C>::default();

    // Init module
    {
        let config = VotingConfig {
            admin: admin.clone(),
        };
        voting.genesis(&config, working_set).unwrap();
        assert_eq!(voting.current_status(working_set), VotingStatus::Closed);
        assert_eq!(voting.admin(working_set), Some(admin.clone()));
    }

    let alice = C::Address::from([2; 32]);
    let bob = C::Address::from([3; 32]);
    let voter_1 = C::Address::from([4; 32]);
    let voter_2 = C::Address::from([5; 32]);

    // Register candidates
    {
        let register = CallMessage::RegisterCandidate {
            name: "Alice".to_owned(),
        };
        voting
            .call(register, &C::new(alice.clone()), working_set)
            .unwrap();

        let register = CallMessage::RegisterCandidate {
            name: "Bob".to_owned(),
        };
        voting
            .call(register, &C::new(bob.clone()), working_set)
            .unwrap();
    }

    voting
        .call(
            CallMessage::ChangeStatus(VotingStatus::Open),
            &admin_context,
            working_set,
        )
        .unwrap();

    // Vote
    {
        let vote = CallMessage::Vote {
            candidate: alice.clone(),
        };
        voting.call(vote, &C::new(voter_1), working_set).unwrap();
        assert_eq!(voting.current_leader(working_set), Some(alice.clone()));

        let vote = CallMessage::Vote {
            candidate: bob.clone(),
        };
        voting.call(vote, &C::new(voter_2), working_set).unwrap();
        assert_eq!(voting.current_leader(working_set), Some(alice.clone()));

        let vote = CallMessage::Vote {
            candidate: bob.clone(),
        };
        voting.call(vote, &admin_context, working_set).unwrap();
        assert_eq!(voting.current_leader(working_set), Some(bob.clone()));
    }

    // Get results
    {
        assert_eq!(
            voting.get_winner(working_set).unwrap(),
            Candidate {
                user_name: "Bob".to_owned(),
                user_candidate: true,
                votes_count: 2,
            }
        );

        let results = voting.get_all_results(&admin, working_set).unwrap();
        let names: Vec<_> = results.iter().map(|c| c.user_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(voting.total_votes(working_set), 3);
    }

    // Test events
    {
        let events = working_set.events();
        assert_eq!(events.len(), 6);

        let last = events.last().unwrap();
        assert_eq!(last.key(), "Voted");
        assert_eq!(
            last.decode_value::<Event<C>>().unwrap(),
            Event::Voted {
                voter: admin,
                candidate: bob,
                votes_count: 2,
            }
        );
    }
}

#[test]
fn test_status_conversion() {
    assert_eq!(VotingStatus::try_from(0u8), Ok(VotingStatus::Closed));
    assert_eq!(VotingStatus::try_from(1u8), Ok(VotingStatus::Open));
    assert_eq!(
        VotingStatus::try_from(2u8),
        Err(VotingError::InvalidStatus)
    );
    assert_eq!(u8::from(VotingStatus::Open), 1);
    assert_eq!(VotingError::InvalidStatus.to_string(), "Invalid status");
}

#[test]
fn test_vote_count_overflow_is_rejected() {
    let admin = Address::from([1; 32]);
    let candidate = Address::from([2; 32]);
    let mut working_set = WorkingSet::new(InMemoryStorage::new());
    let voting = VotingLogic::<DefaultContext>::default();

    voting
        .genesis(&VotingConfig { admin }, &mut working_set)
        .unwrap();
    voting.candidates.set(
        &candidate,
        &Candidate {
            user_name: "Max".to_owned(),
            user_candidate: true,
            votes_count: u64::MAX,
        },
        &mut working_set,
    );
    voting.status.set(&VotingStatus::Open, &mut working_set);

    let err = voting
        .call(
            CallMessage::Vote { candidate },
            &DefaultContext::new(Address::from([3; 32])),
            &mut working_set,
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Vote count overflow");
}

#[test]
fn test_call_message_json_schema() {
    use sov_modules_api::ModuleCallJsonSchema;

    let schema = VotingLogic::<DefaultContext>::json_schema();
    assert!(schema.contains("RegisterCandidate"));
    assert!(schema.contains("ChangeStatus"));
    assert!(schema.contains("Vote"));
}
