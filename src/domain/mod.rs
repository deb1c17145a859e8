mod book;
mod bookshelf;
mod credentials;
mod error_response;
mod token;

pub use book::{Book, BookList};
pub use bookshelf::{AddBookRequest, AddBookResponse, IsbnEntry};
pub use credentials::Credentials;
pub use error_response::ErrorResponse;
pub use token::{GenerateTokenRequest, Token, TokenResponse};
