use crate::status::{Action, Status};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("action {action:?} is not permitted from status {from:?}")]
    InvalidTransition { from: Status, action: Action },
    #[error("required field `{0}` is empty")]
    MissingRequiredField(&'static str),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not parse monetary value from {0:?}")]
    Money(String),
    #[error("could not parse calendar date from {0:?}")]
    Date(String),
}
