//! Template rules for registration comments.
//!
//! Every rule about what a registration looks like lives here: the label
//! vocabulary, bullet markers, table rows and member entry shapes. The
//! parser only walks lines and assembles the results.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1},
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{opt, recognize},
    sequence::delimited,
};

use super::record::Member;
use super::reference::{AccountReference, looks_like_url, strip_at};

/// A labeled field of the registration template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `团队名称` / `Team Name`
    TeamName,
    /// `团队成员信息` / `Members`
    Members,
    /// `团队 GitHub 账户` / `Team Account`
    TeamReference,
    /// `团队项目仓库` / `Team Repository`
    Repository,
    /// `提交时间` / `Submitted`
    SubmittedAt,
}

impl Field {
    /// Every template field.
    pub const ALL: [Field; 5] = [
        Field::TeamName,
        Field::Members,
        Field::TeamReference,
        Field::Repository,
        Field::SubmittedAt,
    ];

    /// Accepted spellings of this field's label.
    ///
    /// Comparison ignores whitespace and ASCII case.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Field::TeamName => &["团队名称", "Team Name"],
            Field::Members => &["团队成员信息", "团队成员", "Members", "Team Members"],
            Field::TeamReference => &[
                "团队 GitHub 账户",
                "团队GitHub账号",
                "Team Account",
                "Team GitHub Account",
            ],
            Field::Repository => &["团队项目仓库", "Team Repository", "Repository"],
            Field::SubmittedAt => &["提交时间", "Submitted", "Submission Time"],
        }
    }

    /// Looks up the field a label names.
    pub fn from_label(label: &str) -> Option<Field> {
        let wanted = normalize(label);
        Field::ALL.into_iter().find(|field| {
            field
                .labels()
                .iter()
                .any(|candidate| normalize(candidate) == wanted)
        })
    }
}

/// Words that mark a member table header row.
const HEADER_WORDS: &[&str] = &[
    "成员姓名",
    "姓名",
    "成员",
    "个人 GitHub ID",
    "GitHub ID",
    "个人 GitHub 链接",
    "GitHub 链接",
    "链接",
    "Name",
    "Member",
    "Member Name",
    "Account",
    "Link",
    "Profile",
    "URL",
];

/// Lowercases ASCII and drops whitespace so label spellings compare equal.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A line that names a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLine<'a> {
    /// The field the label names.
    pub field: Field,
    /// Text after the label separator, cleaned; may be empty.
    pub content: &'a str,
}

/// Parses a list bullet: `-`, `*`, `+`, `•` or a numbered marker.
fn bullet_marker(input: &str) -> IResult<&str, &str> {
    recognize(alt((
        (one_of("-*+•"), space1).map(|_| ()),
        (digit1, one_of(".)、"), space0).map(|_| ()),
    )))
    .parse(input)
}

/// Removes surrounding whitespace and a leading bullet marker.
pub fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    match bullet_marker(line) {
        Ok((rest, _)) => rest.trim(),
        Err(_) => line,
    }
}

/// Splits `**Label:** content` (bold and separator placement vary).
fn label_parts(input: &str) -> IResult<&str, &str> {
    let (input, _) = opt(tag("**")).parse(input)?;
    let (input, label) = take_till1(|c: char| c == ':' || c == '：' || c == '*').parse(input)?;
    let (input, _) = opt(tag("**")).parse(input)?;
    let (input, _) = one_of(":：").parse(input)?;
    let (input, _) = opt(tag("**")).parse(input)?;
    let (input, _) = space0(input)?;
    Ok((input, label))
}

/// Recognizes a template label line.
///
/// Returns `None` for lines whose label is not part of the template, so
/// member entries such as `Alice: alice` fall through to member parsing.
pub fn parse_label_line(line: &str) -> Option<LabelLine<'_>> {
    let text = strip_bullet(line);
    let (content, label) = label_parts(text).ok()?;
    let field = Field::from_label(label)?;
    Some(LabelLine {
        field,
        content: clean_value(content),
    })
}

/// Parses a Markdown link, returning its target.
fn markdown_link(input: &str) -> IResult<&str, &str> {
    let (input, _) = delimited(char('['), take_till(|c: char| c == ']'), char(']')).parse(input)?;
    delimited(char('('), take_till1(|c: char| c == ')'), char(')')).parse(input)
}

/// Trims whitespace, bold markers, code backticks, angle brackets and
/// Markdown links.
pub fn clean_value(value: &str) -> &str {
    let value = strip_bold(value.trim());
    if let Ok((_, target)) = markdown_link(value) {
        return target.trim();
    }
    value
        .trim_matches(|c| c == '`' || c == '<' || c == '>')
        .trim()
}

/// Drops `**` around a value, including a lone closing `**` left when the
/// whole label line was bold.
fn strip_bold(value: &str) -> &str {
    let value = value.strip_prefix("**").unwrap_or(value);
    value.strip_suffix("**").unwrap_or(value).trim()
}

/// The outcome of reading one line of the member block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberLine {
    /// A member entry.
    Entry(Member),
    /// Blank, header, separator or decoration; not an entry.
    Skip,
    /// Looks like an entry but has no readable account.
    Malformed,
}

/// Reads one line of the member block.
pub fn parse_member_line(line: &str) -> MemberLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("<!--") {
        return MemberLine::Skip;
    }

    if trimmed.starts_with('|') {
        return parse_table_row(trimmed);
    }

    match parse_member_entry(strip_bullet(trimmed)) {
        Some(member) => MemberLine::Entry(member),
        None => MemberLine::Malformed,
    }
}

/// Reads a Markdown table row `| name | account | url |`.
fn parse_table_row(row: &str) -> MemberLine {
    let inner = row.trim_start_matches('|').trim_end_matches('|');
    let cells: Vec<&str> = inner.split('|').map(clean_value).collect();

    let is_separator = cells
        .iter()
        .all(|cell| !cell.is_empty() && cell.chars().all(|c| matches!(c, '-' | ':' | ' ')));
    if is_separator || cells.iter().all(|cell| cell.is_empty()) {
        return MemberLine::Skip;
    }

    let is_header = cells.iter().take(2).any(|cell| {
        let cell = normalize(cell);
        HEADER_WORDS.iter().any(|word| normalize(word) == cell)
    });
    if is_header {
        return MemberLine::Skip;
    }

    let name = cells.first().copied().unwrap_or_default();
    let account = cells.get(1).copied().unwrap_or_default();
    let url = cells.get(2).copied().unwrap_or_default();

    if name.is_empty() {
        return MemberLine::Malformed;
    }

    match member_from_parts(name, account, url) {
        Some(member) => MemberLine::Entry(member),
        None => MemberLine::Malformed,
    }
}

/// Parses `name (account)` with ASCII or full-width parentheses.
fn parenthesized(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = take_till1(|c: char| c == '(' || c == '（').parse(input)?;
    let (input, _) = one_of("(（").parse(input)?;
    let (input, inner) = take_till1(|c: char| c == ')' || c == '）').parse(input)?;
    let (input, _) = one_of(")）").parse(input)?;
    Ok((input, (name.trim(), inner.trim())))
}

/// Parses a lone `@account`, leaving anything after it.
fn lone_handle(input: &str) -> IResult<&str, &str> {
    let (input, _) = char('@').parse(input)?;
    take_till1(char::is_whitespace).parse(input)
}

/// Keeps trailing text only when it is a profile link.
fn trailing_link(text: &str) -> &str {
    let text = clean_value(text);
    if looks_like_url(text) { text } else { "" }
}

/// Reads a bullet-style member entry.
///
/// Accepted shapes, tried in order:
/// - a lone profile URL or `@account`
/// - `name (account)`
/// - `name @account`
/// - `name - account`
/// - `name <profile URL>`
/// - `name: account`
pub fn parse_member_entry(text: &str) -> Option<Member> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if !text.contains(char::is_whitespace) && looks_like_url(text) {
        return member_from_parts("", text, "");
    }

    if let Ok((trailing, handle)) = lone_handle(text) {
        return member_from_parts(handle, handle, trailing_link(trailing));
    }

    if let Ok((trailing, (name, account))) = parenthesized(text) {
        if !name.is_empty() {
            return member_from_parts(name, account, trailing_link(trailing));
        }
    }

    if let Some((name, remainder)) = text.split_once(" @") {
        return split_account(name, remainder);
    }

    for separator in [" - ", " – ", " — "] {
        if let Some((name, remainder)) = text.split_once(separator) {
            return split_account(name, remainder);
        }
    }

    if let Some((name, last)) = text.rsplit_once(char::is_whitespace) {
        if looks_like_url(last) {
            return member_from_parts(name, last, "");
        }
    }

    if let Some((name, remainder)) = text.split_once([':', '：']) {
        return split_account(name, remainder);
    }

    None
}

/// Takes the first word of `remainder` as the account and the rest as a link.
fn split_account(name: &str, remainder: &str) -> Option<Member> {
    let remainder = remainder.trim();
    let (account, trailing) = remainder
        .split_once(char::is_whitespace)
        .unwrap_or((remainder, ""));
    member_from_parts(name, account, trailing_link(trailing))
}

/// Builds a member from its written parts.
///
/// An account written as a profile URL supplies both the account name and
/// the profile link. An empty display name defaults to the account.
fn member_from_parts(name: &str, account: &str, url: &str) -> Option<Member> {
    let name = clean_value(name)
        .trim_end_matches(|c: char| matches!(c, ':' | '：' | '-' | '–' | '—'))
        .trim();
    let account = clean_value(account);
    let url = clean_value(url);

    let (account, mut profile_url) = match AccountReference::parse(account) {
        Ok(reference @ AccountReference::Url { .. }) => {
            (reference.account().to_string(), Some(account.to_string()))
        }
        _ => (strip_at(account).to_string(), None),
    };

    if account.is_empty() || account.contains(char::is_whitespace) {
        return None;
    }

    if !url.is_empty() {
        profile_url = Some(url.to_string());
    }

    let display_name = if name.is_empty() {
        account.clone()
    } else {
        name.to_string()
    };

    Some(Member {
        display_name,
        account,
        profile_url,
    })
}
