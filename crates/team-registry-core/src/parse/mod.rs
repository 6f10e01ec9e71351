//! Parser module for team registration comments.
//!
//! Turns the free-form Markdown of an issue comment into a structured
//! [`TeamRecord`], or a [`ParseFailure`] explaining why the comment is not a
//! complete registration.
//!
//! # Example
//!
//! ```rust
//! use team_registry_core::parse::{parse_registration, ParseFailure};
//!
//! let input = r#"
//! **团队名称：** Team Alpha
//!
//! **团队成员信息：**
//! | 成员姓名 | 个人 GitHub ID | 个人 GitHub 链接 |
//! |----------|----------------|------------------|
//! | 张三     | zhangsan       | https://github.com/zhangsan |
//!
//! **团队 GitHub 账户：** team-alpha
//! "#;
//!
//! let registration = parse_registration(input).unwrap();
//! assert_eq!(registration.members[0].account, "zhangsan");
//!
//! assert_eq!(
//!     parse_registration("+1, count me in"),
//!     Err(ParseFailure::NotARegistration)
//! );
//! ```

mod error;
mod parser;
mod record;
pub mod reference;
pub mod template;

pub use error::ParseFailure;
pub use parser::{parse_comment, parse_registration};
pub use record::{Member, Registration, TeamRecord};
pub use reference::{AccountReference, KNOWN_HOSTS, Scheme};
