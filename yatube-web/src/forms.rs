//! Request bodies and their field-level validation.
//!
//! `validate` covers the checks a form can make on its own; checks that need
//! storage (group exists, recipient exists) are added by the services.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use yatube_store::RecordId;

use crate::error::{ApiError, FieldErrors};

pub const REQUIRED: &str = "This field is required.";

const USERNAME_MAX: usize = 150;
const GROUP_TITLE_MAX: usize = 200;
const GROUP_SLUG_MAX: usize = 100;

/// First path segments taken by fixed routes; a profile at these names
/// would be unreachable
const RESERVED_USERNAMES: &[&str] = &["auth", "follow", "group", "groups", "health", "new"];

/// JSON request body whose rejections answer as `ApiError`
#[derive(Debug)]
pub struct JsonForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonForm(value))
    }
}

fn require_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
    }
}

fn limit_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.add(
            field,
            format!("Ensure this value has at most {} characters (it has {}).", max, len),
        );
    }
}

/// Create or edit a post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    pub group: Option<RecordId>,
    pub image: Option<String>,
}

impl PostForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "text", &self.text);
        errors
    }
}

/// Comment on a post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "text", &self.text);
        errors
    }
}

/// Direct message to another user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub text: String,
    pub image: Option<String>,
}

impl MessageForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "text", &self.text);
        errors
    }
}

/// Register a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl SignupForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.username.is_empty() {
            errors.add("username", REQUIRED);
        } else {
            limit_length(&mut errors, "username", &self.username, USERNAME_MAX);
            // letters, digits and @/./+/-/_
            let allowed = |c: char| c.is_alphanumeric() || "@.+-_".contains(c);
            if !self.username.chars().all(allowed) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
            if RESERVED_USERNAMES.contains(&self.username.as_str()) {
                errors.add("username", "This username is reserved.");
            }
        }

        if !self.email.is_empty() {
            let valid = self
                .email
                .split_once('@')
                .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if !valid {
                errors.add("email", "Enter a valid email address.");
            }
        }

        errors
    }
}

/// Create a group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl GroupForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "title", &self.title);
        limit_length(&mut errors, "title", &self.title, GROUP_TITLE_MAX);

        if self.slug.is_empty() {
            errors.add("slug", REQUIRED);
        } else {
            limit_length(&mut errors, "slug", &self.slug, GROUP_SLUG_MAX);
            let allowed = |c: char| c.is_alphanumeric() || c == '-' || c == '_';
            if !self.slug.chars().all(allowed) {
                errors.add(
                    "slug",
                    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
                );
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_post_text_is_required() {
        let form = PostForm {
            text: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate().get("text"), Some(&[REQUIRED.to_string()][..]));

        let form = PostForm {
            text: "Hello".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_post_form_accepts_numeric_group() {
        let form: PostForm = serde_json::from_str(r#"{"text": "hi", "group": 3}"#).unwrap();
        assert_eq!(form.group, Some(RecordId::from_raw(3)));
    }

    #[test]
    fn test_signup_username_rules() {
        let mut form = SignupForm {
            username: "leo tolstoy".to_string(),
            ..Default::default()
        };
        assert!(form.validate().get("username").is_some());

        form.username = "leo.tolstoy+1".to_string();
        assert!(form.validate().is_empty());

        form.email = "not-an-email".to_string();
        assert!(form.validate().get("email").is_some());

        form.email = "leo@yasnaya.ru".to_string();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_route_names_are_reserved() {
        for name in ["follow", "new", "groups", "group", "health", "auth"] {
            let form = SignupForm {
                username: name.to_string(),
                ..Default::default()
            };
            assert!(form.validate().get("username").is_some(), "{} accepted", name);
        }

        // Sharing a prefix with a route is fine
        for name in ["groupie", "newton", "follower"] {
            let form = SignupForm {
                username: name.to_string(),
                ..Default::default()
            };
            assert!(form.validate().is_empty(), "{} rejected", name);
        }
    }

    #[test]
    fn test_group_slug_allows_unicode() {
        let form = GroupForm {
            title: "Кошки".to_string(),
            slug: "кошки-2".to_string(),
            description: String::new(),
        };
        assert!(form.validate().is_empty());

        let form = GroupForm {
            title: "x".repeat(201),
            slug: "bad slug".to_string(),
            description: String::new(),
        };
        let errors = form.validate();
        assert!(errors.get("title").is_some());
        assert!(errors.get("slug").is_some());
    }
}
