mod common;

use std::collections::BTreeMap;

use alloy::primitives::Address;
use safe_wallet_core::address_book::EntryNameError;
use safe_wallet_core::{
    filter_suggestions, AddressBookInput, AddressBookPort, EntryDialog, SuggestionFilter,
};

use common::{addr, MemoryBook};

fn book() -> BTreeMap<Address, String> {
    let mut book = BTreeMap::new();
    book.insert(addr(0x11), "Alice".to_owned());
    book.insert(addr(0x22), "Bob".to_owned());
    book.insert(addr(0xab), "Treasury".to_owned());
    book
}

#[test]
fn filter_matches_exactly_entries_containing_query() {
    let book = book();
    let queries = ["", "ali", "ALICE", "0x2222", "ABAB", "zzz", "b", "2"];
    for query in queries {
        let got: Vec<Address> = filter_suggestions(&book, query, SuggestionFilter::default())
            .into_iter()
            .map(|s| s.address)
            .collect();
        let expected: Vec<Address> = book
            .iter()
            .filter(|(address, name)| {
                format!("{} {}", address.to_checksum(None), name)
                    .to_lowercase()
                    .contains(&query.trim().to_lowercase())
            })
            .map(|(address, _)| *address)
            .collect();
        assert_eq!(got, expected, "query {query:?}");
    }
}

#[test]
fn case_sensitive_filter_respects_case() {
    let filter = SuggestionFilter {
        ignore_case: false,
        trim: true,
    };
    assert!(filter_suggestions(&book(), "alice", filter).is_empty());
    assert_eq!(filter_suggestions(&book(), "Alice", filter).len(), 1);
}

#[test]
fn typing_updates_value_and_suggestions() {
    let book = book();
    let mut input = AddressBookInput::new(true);
    input.on_input("bob", &book);
    assert_eq!(input.value, "bob");
    assert_eq!(input.suggestions.len(), 1);

    let choice = input.suggestions[0].clone();
    input.select(&choice);
    assert_eq!(input.value, addr(0x22).to_checksum(None));
    assert_eq!(input.parsed(), Some(addr(0x22)));
}

#[test]
fn unknown_valid_address_offers_new_entry() {
    let book = book();
    let mut input = AddressBookInput::new(true);
    let fresh = addr(0x44);
    input.on_input(fresh.to_string(), &book);
    assert!(input.suggestions.is_empty());
    assert_eq!(input.unknown_address(&book), Some(fresh));
    assert_eq!(input.open_entry_dialog(&book), Some(EntryDialog::prefilled(fresh)));

    input.on_input(addr(0x11).to_string(), &book);
    assert_eq!(input.unknown_address(&book), None);

    input.on_input("not an address", &book);
    assert_eq!(input.value, "not an address");
    assert_eq!(input.unknown_address(&book), None);

    let mut read_only = AddressBookInput::new(false);
    read_only.on_input(fresh.to_string(), &book);
    assert_eq!(read_only.unknown_address(&book), None);
}

#[test]
fn entry_dialog_validates_and_upserts() {
    let store = MemoryBook::default();
    let mut dialog = EntryDialog::prefilled(addr(0x44));
    assert_eq!(dialog.validate(), Err(EntryNameError::Empty));

    dialog.name = "x".repeat(51);
    assert_eq!(dialog.validate(), Err(EntryNameError::TooLong(51)));

    dialog.name = "  Carol ".to_owned();
    let entry = dialog.submit(5, &store).expect("submit");
    assert_eq!(entry.name, "Carol");
    assert_eq!(
        store.entries(5).expect("entries").get(&addr(0x44)).map(String::as_str),
        Some("Carol")
    );
    assert!(store.entries(1).expect("other chain").is_empty());
}

#[test]
fn upsert_keeps_addresses_unique_per_chain() {
    let store = MemoryBook::default();
    let mut dialog = EntryDialog::prefilled(addr(0x44));
    dialog.name = "Carol".to_owned();
    dialog.submit(1, &store).expect("first");
    dialog.name = "Caroline".to_owned();
    dialog.submit(1, &store).expect("rename");

    let entries = store.entries(1).expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.get(&addr(0x44)).map(String::as_str), Some("Caroline"));
}
