#[path = "io/json_backend.rs"]
mod json_backend;
#[path = "io/snapshot.rs"]
mod snapshot;
