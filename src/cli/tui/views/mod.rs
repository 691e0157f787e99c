//! Screens drawn by the form

pub mod form;
