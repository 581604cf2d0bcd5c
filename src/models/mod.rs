pub mod book;
pub mod book_match;
pub mod operator;
pub mod user;

pub use book::Book;
pub use book_match::{Match, MatchStatus};
pub use user::{User, UserRole};
