//! Repository layer: one zero-sized struct per table, static async methods
//! taking a `&PgPool`.

pub mod image_repo;
pub mod job_repo;

pub use image_repo::GeneratedImageRepo;
pub use job_repo::JobRepo;
