//! Address-book backed autocomplete for address form fields.

use std::collections::BTreeMap;

use alloy::primitives::Address;

use crate::domain::{AddressBookEntry, ChainId};
use crate::ports::{AddressBookPort, PortError};

pub const MAX_ENTRY_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionFilter {
    pub ignore_case: bool,
    pub trim: bool,
}

impl Default for SuggestionFilter {
    fn default() -> Self {
        Self {
            ignore_case: true,
            trim: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub address: Address,
    pub name: String,
}

impl Suggestion {
    /// Text the typed query is matched against.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.address.to_checksum(None), self.name)
    }
}

/// Entries whose `"<address> <name>"` contains `typed`, in address order.
pub fn filter_suggestions(
    book: &BTreeMap<Address, String>,
    typed: &str,
    filter: SuggestionFilter,
) -> Vec<Suggestion> {
    let needle = if filter.trim { typed.trim() } else { typed };
    let needle = if filter.ignore_case {
        needle.to_lowercase()
    } else {
        needle.to_owned()
    };

    book.iter()
        .map(|(address, name)| Suggestion {
            address: *address,
            name: name.clone(),
        })
        .filter(|s| {
            let haystack = s.haystack();
            if filter.ignore_case {
                haystack.to_lowercase().contains(&needle)
            } else {
                haystack.contains(&needle)
            }
        })
        .collect()
}

/// State of one address field with autocomplete.
#[derive(Debug, Clone, Default)]
pub struct AddressBookInput {
    pub value: String,
    pub suggestions: Vec<Suggestion>,
    pub can_add: bool,
    pub filter: SuggestionFilter,
}

impl AddressBookInput {
    pub fn new(can_add: bool) -> Self {
        Self {
            can_add,
            ..Self::default()
        }
    }

    pub fn on_input(&mut self, text: impl Into<String>, book: &BTreeMap<Address, String>) {
        self.value = text.into();
        self.refresh(book);
    }

    pub fn refresh(&mut self, book: &BTreeMap<Address, String>) {
        self.suggestions = filter_suggestions(book, &self.value, self.filter);
    }

    pub fn select(&mut self, suggestion: &Suggestion) {
        self.value = suggestion.address.to_checksum(None);
        self.suggestions.clear();
    }

    /// Parsed value, if it is a syntactically valid address.
    pub fn parsed(&self) -> Option<Address> {
        self.value.trim().parse().ok()
    }

    /// The typed address when it is valid, not yet in the book and adding is allowed.
    pub fn unknown_address(&self, book: &BTreeMap<Address, String>) -> Option<Address> {
        if !self.can_add {
            return None;
        }
        self.parsed().filter(|address| !book.contains_key(address))
    }

    pub fn open_entry_dialog(&self, book: &BTreeMap<Address, String>) -> Option<EntryDialog> {
        self.unknown_address(book).map(EntryDialog::prefilled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryNameError {
    Empty,
    TooLong(usize),
}

impl std::fmt::Display for EntryNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryNameError::Empty => f.write_str("Name is required"),
            EntryNameError::TooLong(len) => write!(
                f,
                "Name is {len} characters long, maximum is {MAX_ENTRY_NAME_LENGTH}"
            ),
        }
    }
}

/// Create/edit dialog for a single address-book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDialog {
    pub address: Address,
    pub name: String,
}

impl EntryDialog {
    pub fn prefilled(address: Address) -> Self {
        Self {
            address,
            name: String::new(),
        }
    }

    pub fn validate(&self) -> Result<AddressBookEntry, EntryNameError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EntryNameError::Empty);
        }
        let len = name.chars().count();
        if len > MAX_ENTRY_NAME_LENGTH {
            return Err(EntryNameError::TooLong(len));
        }
        Ok(AddressBookEntry::new(self.address, name))
    }

    pub fn submit(
        &self,
        chain_id: ChainId,
        book: &dyn AddressBookPort,
    ) -> Result<AddressBookEntry, PortError> {
        let entry = self
            .validate()
            .map_err(|e| PortError::Validation(e.to_string()))?;
        book.upsert_entry(chain_id, entry.clone())?;
        Ok(entry)
    }
}
