pub mod group;
pub mod message;
pub mod post;
pub mod social_graph;
pub mod user;

pub use group::GroupRepository;
pub use message::MessageRepository;
pub use post::PostRepository;
pub use social_graph::SocialGraphRepository;
pub use user::UserRepository;
