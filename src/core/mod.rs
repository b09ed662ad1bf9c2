// Core pipeline exports
pub mod engagement;
pub mod expander;
pub mod filters;
pub mod prompts;
pub mod ranker;
pub mod recommender;
pub mod replies;

pub use engagement::{Engagement, EngagementCollector};
pub use expander::{ExpansionSource, TagExpander};
pub use filters::{build_tag_filter, exclude_seen, AnyOf, Clause, FilterValue, Operator};
pub use ranker::{Ranker, RankingSource};
pub use recommender::{ColdStartReason, RecommendError, Recommender, RecommenderOptions, Strategy, Suggestions};
pub use replies::{parse_index_list, parse_tag_list};
