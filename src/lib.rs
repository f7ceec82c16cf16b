pub mod auth;
pub mod client;
pub mod config;
pub mod consts;
pub mod error;
pub mod form;
pub mod grades;
pub mod models;
pub mod schedule;
pub mod scrape;
pub mod terms;
pub mod transport;
pub mod utils;

pub use client::Client;
pub use error::{Error, Result};
pub use form::Form;
pub use models::{Class, CourseGrade, CourseSchedule, Term};
pub use transport::{HttpSession, Response, Transport};
