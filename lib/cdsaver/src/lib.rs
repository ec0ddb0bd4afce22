pub mod apple_music;
pub mod config;
pub mod error;
pub mod extraction;
mod http;
pub mod pipeline;
pub mod results;
pub mod search;
pub mod services;
pub mod spotify;
pub mod traits;

pub use error::{Error, Result};
pub use pipeline::Scanner;
pub use results::ResultSet;
pub use services::{Services, ServicesBuilder};
pub use traits::{CatalogProvider, Credential};
