use once_cell::sync::Lazy;
use regex::Regex;
// An extension trait to provide the `graphemes` method on `String` and `&str`
use unicode_segmentation::UnicodeSegmentation;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

const FORBIDDEN_CHARACTERS: [char; 9] = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];

fn check_text(s: &str, max_len: usize) -> bool {
    let is_empty_or_whitespace = s.trim().is_empty();
    let is_too_long = s.graphemes(true).count() > max_len;
    let contains_forbidden_characters = s.chars().any(|c| FORBIDDEN_CHARACTERS.contains(&c));
    !(is_empty_or_whitespace || is_too_long || contains_forbidden_characters)
}

#[derive(Debug)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> std::result::Result<UserName, String> {
        if check_text(&s, 100) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid name.", s))
        }
    }
}
impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(s: String) -> std::result::Result<UserEmail, String> {
        if EMAIL_REGEX.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct UserPhone(String);

impl UserPhone {
    pub fn parse(s: String) -> std::result::Result<UserPhone, String> {
        if PHONE_REGEX.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid phone number.", s))
        }
    }
}

impl AsRef<str> for UserPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Names of menus, dishes and menu categories.
#[derive(Debug)]
pub struct EntityName(String);

impl EntityName {
    pub fn parse(s: String, field: &str) -> std::result::Result<EntityName, String> {
        if check_text(&s, 256) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid {}.", s, field))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Plain password rule; the hash is what gets stored.
pub fn validate_password(password: &str) -> std::result::Result<(), String> {
    if password.graphemes(true).count() < 6 {
        Err("password must be at least 6 characters long.".to_string())
    } else {
        Ok(())
    }
}
