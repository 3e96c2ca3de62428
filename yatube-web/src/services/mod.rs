pub mod content;
pub mod feed;
pub mod messages;
pub mod social_graph;
pub mod user;

pub use content::{ContentService, Mutation};
pub use feed::FeedService;
pub use messages::MessageService;
pub use social_graph::SocialGraphService;
pub use user::UserService;
