use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::Address;
use sov_state::InMemoryStorage;
use sov_voting::CallMessage;
use voting_system::{Transaction, VotingSystem};

#[allow(dead_code)]
pub type C = DefaultContext;

// The addresses used by test-data/txs.json.
#[allow(dead_code)]
pub const ADMIN: Address = Address::new([11; 32]);
#[allow(dead_code)]
pub const CANDIDATE_1: Address = Address::new([2; 32]);
#[allow(dead_code)]
pub const CANDIDATE_2: Address = Address::new([3; 32]);
#[allow(dead_code)]
pub const VOTER_1: Address = Address::new([4; 32]);
#[allow(dead_code)]
pub const VOTER_2: Address = Address::new([5; 32]);

#[allow(dead_code)]
pub fn deployed_system() -> VotingSystem<C> {
    let system = VotingSystem::<C>::new("VotingSystem", InMemoryStorage::new());
    system.deploy(&ADMIN).unwrap();
    system
}

#[allow(dead_code)]
pub fn tx(sender: Address, call: CallMessage<C>) -> Transaction<C> {
    Transaction { sender, call }
}

#[allow(dead_code)]
pub fn sample_batch() -> Vec<Transaction<C>> {
    let contents = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/txs.json"),
    )
    .unwrap();
    serde_json::from_str(&contents).unwrap()
}
