//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Aggregate writes run
//! inside a single transaction; supplied child collections are
//! replaced wholesale (delete-then-reinsert), never diffed.

pub mod blog_post_repo;
pub mod film_repo;
pub mod venue_repo;

pub use blog_post_repo::BlogPostRepo;
pub use film_repo::FilmRepo;
pub use venue_repo::VenueRepo;
