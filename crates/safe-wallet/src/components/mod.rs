//! Wallet components rendered by the shell.

pub mod address_book_input;
pub mod owner_flow;
pub mod recovery_modal;
pub mod social_login;
pub mod tx_data_row;
