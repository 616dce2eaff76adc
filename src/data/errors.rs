// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use thiserror::Error;

use crate::data::basics::{Address, Round};
use crate::token::TransferError;

/// Rejected committee creation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid participants: {0}")]
    InvalidParticipants(#[from] ParticipantsError),
    #[error("amount per round must be positive and the pot must fit the token's range")]
    InvalidAmount,
    #[error("round duration must be positive")]
    InvalidDuration,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParticipantsError {
    #[error("got {0} participants, need at least {1}")]
    TooFew(usize, usize),
    #[error("got {0} participants, at most {1} are allowed")]
    TooMany(usize, usize),
    #[error("participant at position {0} is the zero address")]
    ZeroAddress(usize),
    #[error("participant {0} appears more than once")]
    Duplicate(Address),
}

/// The caller is not allowed to perform the operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("{0} is not a participant of this committee")]
    NotParticipant(Address),
}

/// The operation does not fit the committee's current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{participant} already paid for round {round}")]
    AlreadyPaidThisRound { participant: Address, round: Round },
    #[error("only {paid} of {total} participants paid for round {round}")]
    NotAllPaid { round: Round, paid: usize, total: usize },
    #[error("round {round} is still open for another {remaining}s")]
    RoundNotElapsed { round: Round, remaining: u64 },
    #[error("all rounds of this committee have been distributed")]
    AlreadyCompleted,
}

/// Discriminates errors by the taxonomy callers act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Permission,
    State,
    Transfer,
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Permission(#[from] PermissionError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("token transfer failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("no committee at address {0}")]
    UnknownCommittee(Address),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Permission(_) => ErrorKind::Permission,
            Error::State(_) => ErrorKind::State,
            Error::Transfer(_) => ErrorKind::Transfer,
            Error::UnknownCommittee(_) => ErrorKind::NotFound,
        }
    }
}

impl From<ParticipantsError> for Error {
    fn from(err: ParticipantsError) -> Self {
        Error::Validation(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
