pub mod create;
pub mod list;
pub mod login;
pub mod preview;
pub mod query_form;
