use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::default_context::DefaultContext;
use crate::utils::generate_address;
use crate::{Address, AddressBech32, Bech32ParseError, ModulePrefix};

#[test]
fn test_account_bech32m_display() {
    let expected_addr: Vec<u8> = (1..=32).collect();
    let account = Address::try_from(expected_addr.as_slice()).unwrap();
    assert_eq!(
        account.to_string(),
        "sov1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5z5tpwxqergd3c8g7rusqqsn6hm"
    );
}

#[test]
fn test_address_parses_from_bech32() {
    let address =
        Address::from_str("sov1pv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9stup8tx")
            .unwrap();
    assert_eq!(address, Address::from([11; 32]));
}

#[test]
fn test_address_rejects_malformed_input() {
    assert!(matches!(
        AddressBech32::from_str("sov1notanaddress"),
        Err(Bech32ParseError::Bech32(_))
    ));
    assert!(Address::try_from([1u8; 31].as_slice()).is_err());
}

#[test]
fn test_address_serialization() {
    let address = Address::from([11; 32]);

    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(
        json,
        "\"sov1pv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9stup8tx\""
    );
    assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);

    let bytes = address.try_to_vec().unwrap();
    assert_eq!(bytes, vec![11; 32]);
    assert_eq!(Address::try_from_slice(&bytes).unwrap(), address);
}

#[test]
fn test_generated_addresses_are_deterministic() {
    let admin = generate_address::<DefaultContext>("admin");
    assert_eq!(admin, generate_address::<DefaultContext>("admin"));
    assert_ne!(admin, generate_address::<DefaultContext>("voter"));
}

#[test]
fn test_module_prefix_layout() {
    let storage = ModulePrefix::new_storage("sov_voting", "VotingLogic", "candidates");
    let prefix: sov_state::Prefix = storage.into();
    assert_eq!(prefix.as_bytes(), b"sov_voting/VotingLogic/candidates/");

    let module = ModulePrefix::new_module("sov_voting", "VotingLogic");
    assert_ne!(
        module.hash::<DefaultContext>(),
        ModulePrefix::new_module("sov_voting", "Other").hash::<DefaultContext>()
    );
}
