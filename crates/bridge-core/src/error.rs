use crate::board::Position;
use crate::call::Call;
use crate::card::Card;
use thiserror::Error;

/// Why an append was rejected. The auction is left untouched in every case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalCall {
    #[error("the auction has already ended")]
    AuctionTerminated,
    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: Position, actual: Position },
    #[error("bid level {0} is outside 1..=7")]
    InvalidLevel(u8),
    #[error("insufficient bid: {call} does not outrank {last}")]
    InsufficientBid { call: Call, last: Call },
    #[error("there is no bid to double")]
    NothingToDouble,
    #[error("cannot double partner's bid")]
    DoubleOfPartner,
    #[error("only an opponent's bid can be doubled")]
    DoubleOfNonBid,
    #[error("only an opponent's double can be redoubled")]
    NothingToRedouble,
    #[error("cannot redouble partner's double")]
    RedoubleOfPartner,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("a hand holds 13 cards, found {0}")]
    WrongCardCount(usize),
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DealError {
    #[error("invalid hand for {seat}: {source}")]
    InvalidHand {
        seat: Position,
        #[source]
        source: HandError,
    },
    #[error("{card} is held by both {first} and {second}")]
    OverlappingCard {
        card: Card,
        first: Position,
        second: Position,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized call `{0}`")]
    Call(String),
    #[error("unrecognized card `{0}`")]
    Card(String),
    #[error("malformed hand `{0}`")]
    Hand(String),
    #[error("unrecognized seat `{0}`")]
    Position(String),
    #[error("malformed board identifier `{0}`")]
    Identifier(String),
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error("call {index} is illegal: {source}")]
    Auction {
        index: usize,
        #[source]
        source: IllegalCall,
    },
}
