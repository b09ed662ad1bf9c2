use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestedQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, max = 20))]
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_bounds() {
        let mut query = SuggestedQuery { user_id: "u1".to_string(), k: 5 };
        assert!(query.validate().is_ok());

        query.k = 0;
        assert!(query.validate().is_err());

        query.k = 21;
        assert!(query.validate().is_err());

        query.k = 20;
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let query = SuggestedQuery { user_id: String::new(), k: 5 };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_k_defaults_to_five() {
        let query: SuggestedQuery = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert_eq!(query.k, 5);
    }
}
