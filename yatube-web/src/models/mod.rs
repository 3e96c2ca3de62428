pub mod group;
pub mod message;
pub mod post;
pub mod profile;
pub mod user;

pub use group::{GroupPageResponse, GroupResponse};
pub use message::{DialogueSummary, MailboxResponse, MessageResponse};
pub use post::{CommentResponse, CommentWithAuthor, PostResponse, PostWithAuthor};
pub use profile::{PostDetailResponse, ProfileCounters, ProfileResponse};
pub use user::UserResponse;
