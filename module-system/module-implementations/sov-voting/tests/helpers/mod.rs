use std::sync::{Mutex, PoisonError};

use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{Address, Context, Error, Module, WorkingSet};
use sov_state::{FixtureLoader, InMemoryStorage, Storage};
use sov_voting::{CallMessage, Event, VotingConfig, VotingLogic};

pub type C = DefaultContext;

/// A freshly deployed module and the accounts the tests act with.
#[allow(dead_code)]
#[derive(Clone)]
pub struct Deployment {
    pub storage: InMemoryStorage,
    pub voting: VotingLogic<C>,
    pub admin: Address,
    pub candidate1: Address,
    pub candidate2: Address,
    pub voter1: Address,
    pub voter2: Address,
}

static FIXTURE_LOADER: Mutex<FixtureLoader<InMemoryStorage, Deployment>> =
    Mutex::new(FixtureLoader::new());

fn deploy_voting_fixture() -> anyhow::Result<(InMemoryStorage, Deployment)> {
    let storage = InMemoryStorage::new();
    let admin = generate_address::<C>("admin");
    let voting = VotingLogic::<C>::default();

    let mut working_set = WorkingSet::new(storage.clone());
    voting.genesis(&VotingConfig { admin }, &mut working_set)?;
    storage.validate_and_commit(working_set.checkpoint().freeze())?;

    let deployment = Deployment {
        storage: storage.clone(),
        voting,
        admin,
        candidate1: generate_address::<C>("candidate1"),
        candidate2: generate_address::<C>("candidate2"),
        voter1: generate_address::<C>("voter1"),
        voter2: generate_address::<C>("voter2"),
    };
    Ok((storage, deployment))
}

/// Runs `test` against the deployed module. The deployment runs once per test
/// binary; every later call starts again from the state right after it.
pub fn with_deployment<R>(test: impl FnOnce(&Deployment) -> R) -> R {
    let mut loader = FIXTURE_LOADER
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let deployment = loader.load(deploy_voting_fixture).unwrap();
    test(&deployment)
}

impl Deployment {
    /// Executes `msg` from `sender` as its own transaction: committed on success,
    /// reverted on failure. Returns the decoded events of the call.
    #[allow(dead_code)]
    pub fn send(&self, sender: Address, msg: CallMessage<C>) -> Result<Vec<Event<C>>, Error> {
        let mut working_set = WorkingSet::new(self.storage.clone());

        match self.voting.call(msg, &C::new(sender), &mut working_set) {
            Ok(_) => {
                let events = working_set
                    .take_events()
                    .iter()
                    .map(|event| event.decode_value::<Event<C>>().unwrap())
                    .collect();
                self.storage
                    .validate_and_commit(working_set.checkpoint().freeze())
                    .unwrap();
                Ok(events)
            }
            Err(e) => {
                working_set.revert();
                Err(e)
            }
        }
    }

    /// Like [`Deployment::send`], for calls that are expected to succeed.
    #[allow(dead_code)]
    pub fn execute(&self, sender: Address, msg: CallMessage<C>) -> Vec<Event<C>> {
        self.send(sender, msg).unwrap()
    }

    /// Asserts that `msg` from `sender` is rejected with exactly `reason`.
    #[allow(dead_code)]
    pub fn assert_reverted_with(&self, sender: Address, msg: CallMessage<C>, reason: &str) {
        let root_before = self.storage.get_state_root();
        let err = self.send(sender, msg).unwrap_err();
        assert_eq!(err.to_string(), reason);
        assert_eq!(self.storage.get_state_root(), root_before);
    }

    /// Runs a read-only query against the committed state.
    #[allow(dead_code)]
    pub fn query<R>(
        &self,
        query: impl FnOnce(&VotingLogic<C>, &mut WorkingSet<InMemoryStorage>) -> R,
    ) -> R {
        let mut working_set = WorkingSet::new(self.storage.clone());
        query(&self.voting, &mut working_set)
    }

    #[allow(dead_code)]
    pub fn register(&self, candidate: Address, name: &str) {
        self.execute(
            candidate,
            CallMessage::RegisterCandidate {
                name: name.to_owned(),
            },
        );
    }

    #[allow(dead_code)]
    pub fn open_voting(&self) {
        self.execute(
            self.admin,
            CallMessage::ChangeStatus(sov_voting::VotingStatus::Open),
        );
    }

    #[allow(dead_code)]
    pub fn vote(&self, voter: Address, candidate: Address) {
        self.execute(voter, CallMessage::Vote { candidate });
    }
}
