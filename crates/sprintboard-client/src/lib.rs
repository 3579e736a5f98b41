pub mod http;
pub mod service;

pub use http::{HttpTaskService, ServiceConfig};
pub use service::{StatusPatch, TaskService};
