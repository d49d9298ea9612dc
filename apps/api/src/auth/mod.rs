// Authentication: password hashing, bearer tokens, the request extractor,
// and the register / login / me handlers.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;
pub mod users;
