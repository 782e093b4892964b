pub mod attachment_service;
pub mod favorite_service;
pub mod prompt_service;
pub mod tag_service;
pub mod validation;

pub use attachment_service::*;
pub use favorite_service::*;
pub use prompt_service::*;
pub use tag_service::*;
pub use validation::*;
