//! Identity attribution.
//!
//! An event counts as the user's own when their login or one of their
//! registered email addresses shows up anywhere inside it, not just in
//! `actor`. This surfaces pushes where the user authored commits, reviews
//! on their pull requests, and similar participation.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::event::RawEvent;

/// The authenticated GitHub account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    /// Registered addresses, lowercased.
    pub emails: BTreeSet<String>,
}

impl Identity {
    pub fn new<I, S>(login: impl Into<String>, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            login: login.into(),
            emails: emails
                .into_iter()
                .map(|email| email.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether any of the collected logins or emails belong to this identity.
    ///
    /// Both comparisons ignore ASCII case.
    pub fn owns(&self, found: &Identities) -> bool {
        found
            .logins
            .iter()
            .any(|login| login.eq_ignore_ascii_case(&self.login))
            || found
                .emails
                .iter()
                .any(|email| self.emails.contains(&email.to_lowercase()))
    }

    /// Whether the event mentions this identity anywhere.
    pub fn is_attributed(&self, event: &RawEvent) -> bool {
        self.owns(&collect_identities(event.as_value()))
    }
}

/// Every `login` and `email` value found in a JSON tree, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identities {
    pub logins: Vec<String>,
    pub emails: Vec<String>,
}

/// Walks `node` and collects the string values of every `login` and
/// `email` key.
///
/// A `login` value is recorded and not searched further. An `email` value is
/// recorded and then searched as well, so an `email` key holding an object
/// still yields the addresses nested inside it.
pub fn collect_identities(node: &Value) -> Identities {
    let mut found = Identities::default();
    visit(node, &mut found);
    found
}

fn visit(node: &Value, found: &mut Identities) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                match key.as_str() {
                    "login" => {
                        if let Some(login) = value.as_str() {
                            found.logins.push(login.to_string());
                        }
                    }
                    "email" => {
                        if let Some(email) = value.as_str() {
                            found.emails.push(email.to_string());
                        }
                        visit(value, found);
                    }
                    _ => visit(value, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
