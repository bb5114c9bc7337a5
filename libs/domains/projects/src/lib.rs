//! Projects Domain
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, caller identity
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation, ownership, events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_projects::{handlers, InMemoryProjectRepository, ProjectService};
//!
//! let service = ProjectService::new(InMemoryProjectRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProjectError, ProjectResult};
pub use handlers::ApiDoc;
pub use models::{CreateProject, NewProject, Project};
pub use postgres::PgProjectRepository;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::ProjectService;
