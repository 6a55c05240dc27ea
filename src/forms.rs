//! Form Validation
//!
//! Submission-time validation; errors are keyed by field and shown inline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Priority;

pub const LIST_NAME_MAX: usize = 30;
pub const CARD_TITLE_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} field(s) invalid", .0.len())]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("请输入{}", label));
    }
}

fn max_chars(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.add(field, format!("不能超过 {} 个字符", max));
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListForm {
    pub name: String,
}

impl ListForm {
    /// Returns the trimmed list name
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "name", &self.name, "列表名称");
        max_chars(&mut errors, "name", &self.name, LIST_NAME_MAX);
        errors.into_result(self.name.trim().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ValidCard {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub title: String,
    pub priority: String,
    /// `YYYY-MM-DD` or empty
    pub due_date: String,
}

impl CardForm {
    pub fn validate(&self) -> Result<ValidCard, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "title", &self.title, "标题");
        max_chars(&mut errors, "title", &self.title, CARD_TITLE_MAX);

        let priority = if self.priority.is_empty() {
            Priority::default()
        } else {
            Priority::parse(&self.priority).unwrap_or_else(|| {
                errors.add("priority", "无效的优先级");
                Priority::default()
            })
        };

        let due_date = match self.due_date.trim() {
            "" => None,
            s => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("due_date", "日期格式应为 YYYY-MM-DD");
                    None
                }
            },
        };

        errors.into_result(ValidCard { title: self.title.trim().to_string(), priority, due_date })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "username", &self.username, "用户名");
        required(&mut errors, "password", &self.password, "密码");
        errors.into_result(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "username", &self.username, "用户名");
        required(&mut errors, "email", &self.email, "邮箱");
        if !self.email.trim().is_empty() && !is_plausible_email(self.email.trim()) {
            errors.add("email", "邮箱格式不正确");
        }
        check_password(&mut errors, &self.password, &self.confirm);
        errors.into_result(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "old_password", &self.old_password, "原密码");
        check_password(&mut errors, &self.new_password, &self.confirm);
        errors.into_result(())
    }
}

fn check_password(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password.chars().count() < PASSWORD_MIN {
        errors.add("password", format!("密码至少 {} 位", PASSWORD_MIN));
    }
    if password != confirm {
        errors.add("confirm", "两次输入的密码不一致");
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_form() {
        assert_eq!(ListForm { name: "  Backlog ".into() }.validate().unwrap(), "Backlog");

        let errors = ListForm { name: " ".into() }.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("请输入列表名称"));

        let errors = ListForm { name: "x".repeat(31) }.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("不能超过 30 个字符"));
    }

    #[test]
    fn test_card_form() {
        let form = CardForm { title: "Ship".into(), priority: "high".into(), due_date: "2024-06-30".into() };
        let card = form.validate().unwrap();
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.due_date, NaiveDate::from_ymd_opt(2024, 6, 30));

        let form = CardForm { title: "".into(), priority: "urgent".into(), due_date: "30/06/2024".into() };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("priority").is_some());
        assert!(errors.get("due_date").is_some());
    }

    #[test]
    fn test_register_form() {
        let mut form = RegisterForm {
            username: "amy".into(),
            email: "amy@example.com".into(),
            password: "secret1".into(),
            confirm: "secret1".into(),
        };
        assert!(form.validate().is_ok());

        form.email = "amy@".into();
        form.confirm = "secret2".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("邮箱格式不正确"));
        assert_eq!(errors.get("confirm"), Some("两次输入的密码不一致"));
    }

    #[test]
    fn test_password_form_min_length() {
        let form = PasswordForm { old_password: "old".into(), new_password: "123".into(), confirm: "123".into() };
        assert_eq!(form.validate().unwrap_err().get("password"), Some("密码至少 6 位"));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("name", "first");
        errors.add("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
    }
}
