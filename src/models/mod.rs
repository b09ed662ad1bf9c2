// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Experience, ExperienceId, Tag, EngagementRow, SwipeRow, ChatMessage, Role, split_tag_field};
pub use requests::SuggestedQuery;
pub use responses::{SuggestionsResponse, ErrorResponse, HealthResponse, ServiceInfoResponse};
