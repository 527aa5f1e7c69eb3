//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are implemented by domain services
//! and called by inbound adapters. Driven ports describe the stores and
//! external directories the services depend on; each exposes a typed error
//! so adapters report failures as predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_feed_query;
mod activity_log;
mod activity_log_command;
mod film_catalogue;
mod follow_graph_command;
mod follow_graph_query;
mod follow_repository;
mod review_command;
mod review_query;
mod review_repository;
mod user_directory;

pub use activity_feed_query::ActivityFeedQuery;
#[cfg(test)]
pub use activity_feed_query::MockActivityFeedQuery;
#[cfg(test)]
pub use activity_log::MockActivityLog;
pub use activity_log::{ActivityLog, ActivityLogError};
#[cfg(test)]
pub use activity_log_command::MockActivityLogCommand;
pub use activity_log_command::{ActivityLogCommand, AppendEventRequest};
#[cfg(test)]
pub use film_catalogue::MockFilmCatalogue;
pub use film_catalogue::{FilmCatalogue, FilmCatalogueError};
pub use follow_graph_command::FollowGraphCommand;
#[cfg(test)]
pub use follow_graph_command::MockFollowGraphCommand;
pub use follow_graph_query::FollowGraphQuery;
#[cfg(test)]
pub use follow_graph_query::MockFollowGraphQuery;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FollowRepository, FollowRepositoryError};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{ReviewCommand, SubmitReviewRequest, UpdateReviewRequest, VoteRequest};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{ListReviewsRequest, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
