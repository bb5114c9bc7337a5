//! Tasks Domain
//!
//! Tasks live inside projects. Creating one asks the projects domain, through
//! [`ProjectAccessor`], whether the caller owns the parent project.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, caller identity
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────────┐
//! │   Service   │ ──▶ │ ProjectAccessor  │
//! └──────┬──────┘     └──────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_projects::{InMemoryProjectRepository, ProjectService};
//! use domain_tasks::{handlers, InMemoryTaskRepository, TaskService};
//!
//! let projects = ProjectService::new(InMemoryProjectRepository::new());
//! let tasks = TaskService::new(InMemoryTaskRepository::new(), projects.clone());
//! let router = handlers::router(tasks);
//! ```

pub mod accessor;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use accessor::ProjectAccessor;
pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateTask, NewTask, Task, TaskListQuery, TaskPriority, TaskStatus, UpdateTask,
};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
