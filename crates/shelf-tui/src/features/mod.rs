//! Feature slices for the TUI (state/update/render per screen).

pub mod form;
pub mod login;
pub mod nav;
pub mod notice;
pub mod register;
pub mod saved;
pub mod search;
