pub mod action;
pub mod command_line;
pub mod config;
pub mod constants;
pub mod document_model;
pub mod editor;
pub mod literal;
pub mod search_context;
